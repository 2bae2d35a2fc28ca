use crate::encode::encode_ascii;
use crate::legacy;
use crate::options::WriteOptions;
use crate::properties;
use crate::report::{NanAccumulator, Warning, WriteReport};
use crate::traits::{Aggregate, GraphSource};
use crate::types::{Scalar, ScalarType};
use crate::utils;
use crate::Error;

use std::io::Write;
use std::path::Path;

/// Writes graphs to a legacy ascii `POLYDATA`.
///
/// Vertices become points with a vertex cell each, edges become two point `LINES`. Vertex
/// properties are written as `POINT_DATA`; edge properties as `CELL_DATA`, where the rows of
/// the vertex cells come first and are zero.
///
/// The point coordinates are read from one vertex property (property `0` unless set with
/// [`position`](Self::position)), padded to three components.
#[derive(Debug)]
pub struct GraphWriter<'a, G> {
    graphs: Vec<&'a G>,
    position: usize,
    edge_names: &'a [&'a str],
}

impl<'a, G> Default for GraphWriter<'a, G> {
    fn default() -> Self {
        Self {
            graphs: Vec::new(),
            position: 0,
            edge_names: &[],
        }
    }
}

impl<'a, G: GraphSource> GraphWriter<'a, G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// read vertex coordinates from property `index`
    pub fn position(mut self, index: usize) -> Self {
        self.position = index;
        self
    }

    /// names of the edge properties, by property index
    pub fn edge_names(mut self, names: &'a [&'a str]) -> Self {
        self.edge_names = names;
        self
    }

    pub fn add(&mut self, graph: &'a G) {
        self.graphs.push(graph);
    }

    pub fn write<P: AsRef<Path>>(
        &self,
        path: P,
        options: &WriteOptions,
    ) -> Result<WriteReport, Error> {
        let file = utils::create(path.as_ref())?;
        self.write_to(file, options)
    }

    pub fn write_to<W: Write>(&self, mut sink: W, options: &WriteOptions) -> Result<WriteReport, Error> {
        let mut report = WriteReport::default();
        let mut nan = NanAccumulator::default();
        super::legacy_encoding(options.encoding, &mut report);
        let field_data = options.field_data(&mut report);

        let n_vertices: usize = self.graphs.iter().map(|g| g.vertex_count()).sum();

        // resolve edges to global vertex ids, dropping the ones with dangling endpoints
        let mut edges = Vec::new();
        let mut shift = 0;
        let mut n_requested = 0;
        for graph in &self.graphs {
            let count = graph.vertex_count();
            for id in 0..graph.edge_count() {
                n_requested += 1;
                if let Some((source, destination, edge)) = graph.edge(id) {
                    if source < count && destination < count {
                        edges.push((source + shift, destination + shift, edge));
                    }
                }
            }
            shift += count;
        }
        if edges.len() < n_requested {
            report.warn(Warning::ShapeMismatch {
                context: "edge endpoints",
                expected: n_requested,
                found: edges.len(),
            });
        }

        legacy::write_header(&mut sink, options.title, "POLYDATA")?;
        legacy::write_field_data(&mut sink, &field_data)?;

        let vertices = self
            .graphs
            .iter()
            .flat_map(|g| (0..g.vertex_count()).map(move |i| g.vertex(i)));

        let kind = <G::Vertex as Aggregate>::property_kind(self.position);
        let scalar_type = kind.scalar_type().unwrap_or(ScalarType::Float32);
        let zero = Scalar::zero(scalar_type);
        let components = kind.components().min(3);

        writeln!(sink, "POINTS {} {}", n_vertices, scalar_type.legacy_tag())?;
        for vertex in vertices.clone() {
            let coordinates: Vec<String> = (0..3)
                .map(|c| {
                    let value = if c < components {
                        vertex.and_then(|v| v.component(self.position, c))
                    } else {
                        None
                    };
                    encode_ascii(value.unwrap_or(zero))
                })
                .collect();
            writeln!(sink, "{}", coordinates.join(" "))?;
        }

        writeln!(sink, "VERTICES {} {}", n_vertices, n_vertices * 2)?;
        for i in 0..n_vertices {
            writeln!(sink, "1 {}", i)?;
        }

        writeln!(sink, "LINES {} {}", edges.len(), edges.len() * 3)?;
        for (source, destination, _) in &edges {
            writeln!(sink, "2 {} {}", source, destination)?;
        }

        let selected = properties::select::<G::Vertex>(options, &mut report);
        legacy::write_attributes(
            &mut sink,
            "POINT_DATA",
            n_vertices,
            &selected,
            vertices,
            &mut nan,
        )?;

        let edge_options = WriteOptions::new().names(self.edge_names);
        let selected = properties::select::<G::Edge>(&edge_options, &mut report);
        let edge_rows = std::iter::repeat(None)
            .take(n_vertices)
            .chain(edges.iter().map(|(_, _, edge)| Some(*edge)));
        legacy::write_attributes(
            &mut sink,
            "CELL_DATA",
            n_vertices + edges.len(),
            &selected,
            edge_rows,
            &mut nan,
        )?;
        sink.flush()?;

        nan.finish(&mut report);
        report.points = n_vertices;
        report.cells = n_vertices + edges.len();
        Ok(report)
    }
}
