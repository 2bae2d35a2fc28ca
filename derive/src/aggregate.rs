use darling::ast::{Data, Style};
use darling::{FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use quote::quote;

#[derive(FromDeriveInput)]
#[darling(attributes(vtk), supports(struct_named, struct_tuple))]
struct AggregateInput {
    ident: syn::Ident,
    generics: syn::Generics,
    data: Data<(), AggregateField>,
}

#[derive(FromField)]
#[darling(attributes(vtk))]
struct AggregateField {
    ident: Option<syn::Ident>,
    ty: syn::Type,
    /// name written to the file instead of the field name
    #[darling(default)]
    name: Option<String>,
    /// keep the property slot but never write it
    #[darling(default)]
    skip: bool,
}

pub fn derive(input: syn::DeriveInput) -> darling::Result<TokenStream> {
    let input = AggregateInput::from_derive_input(&input)?;

    let fields = match input.data {
        Data::Struct(fields) => fields,
        // rejected by `supports` above
        Data::Enum(_) => return Err(darling::Error::unsupported_shape("enum")),
    };
    let tuple = fields.style == Style::Tuple;

    let count = fields.fields.len();
    let mut kinds = quote! {};
    let mut names = quote! {};
    let mut components = quote! {};

    for (index, field) in fields.fields.into_iter().enumerate() {
        if field.skip {
            // the default arms already answer unsupported / no components
            continue;
        }
        let ty = &field.ty;

        kinds = quote! {
            #kinds
            #index => <#ty as vtk_writer::VtkValue>::KIND,
        };

        // tuple fields only have a name if one was given
        let name = field
            .name
            .clone()
            .or_else(|| field.ident.as_ref().map(|ident| ident.to_string()));
        if let Some(name) = name {
            let lit = syn::LitStr::new(&name, proc_macro2::Span::call_site());
            names = quote! {
                #names
                #index => Some(#lit),
            };
        }

        let access = if tuple {
            let member = syn::Index::from(index);
            quote! { self.#member }
        } else {
            let ident = &field.ident;
            quote! { self.#ident }
        };
        components = quote! {
            #components
            #index => vtk_writer::VtkValue::component(&#access, component),
        };
    }

    let struct_type = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // declare the whole trait
    let expanded = quote! {
        impl #impl_generics vtk_writer::Aggregate for #struct_type #ty_generics #where_clause {
            const PROPERTY_COUNT: usize = #count;

            fn property_kind(index: usize) -> vtk_writer::PropertyKind {
                match index {
                    #kinds
                    _ => vtk_writer::PropertyKind::Unsupported,
                }
            }

            fn property_name(index: usize) -> Option<&'static str> {
                match index {
                    #names
                    _ => None,
                }
            }

            fn component(&self, property: usize, component: usize) -> Option<vtk_writer::Scalar> {
                match property {
                    #components
                    _ => None,
                }
            }
        }
    };

    Ok(expanded)
}
