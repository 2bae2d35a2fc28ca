use crate::traits::{Aggregate, GraphSource};

/// A graph stored as a vertex list and an edge list.
///
/// Edges refer to vertices by position. Nothing checks that they are in range; the graph
/// writer drops the edges it cannot resolve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeListGraph<V, E> {
    pub vertices: Vec<V>,
    pub edges: Vec<(usize, usize, E)>,
}

impl<V, E> EdgeListGraph<V, E> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// add a vertex, returning its id
    pub fn add_vertex(&mut self, vertex: V) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// add a directed edge, returning its id
    pub fn add_edge(&mut self, source: usize, destination: usize, edge: E) -> usize {
        self.edges.push((source, destination, edge));
        self.edges.len() - 1
    }
}

impl<V: Aggregate, E: Aggregate> GraphSource for EdgeListGraph<V, E> {
    type Vertex = V;
    type Edge = E;

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn vertex(&self, id: usize) -> Option<&V> {
        self.vertices.get(id)
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn edge(&self, id: usize) -> Option<(usize, usize, &E)> {
        self.edges.get(id).map(|(s, d, e)| (*s, *d, e))
    }
}
