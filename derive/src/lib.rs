mod aggregate;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive `vtk_writer::Aggregate` for a struct, one property per field in declaration order.
///
/// Field attributes:
///
/// * `#[vtk(name = "...")]` writes the field under another name
/// * `#[vtk(skip)]` keeps the property index but never writes the field
#[proc_macro_derive(Aggregate, attributes(vtk))]
pub fn derive_aggregate(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let input = parse_macro_input!(input as DeriveInput);

    aggregate::derive(input)
        .unwrap_or_else(|e| e.write_errors())
        .into()
}
