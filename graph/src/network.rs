//! Typed weighted graph over the restaurant network.
//!
//! Vertices live in an arena keyed by their string identity and carry a
//! [`VertexKind`] tag; adjacency is stored as a weight map per vertex, keyed
//! by the same identities. Edges are undirected: both endpoint maps always
//! hold the same weight for a pair.

use savora_core::error::{ErrorCode, SavoraError};
use savora_core::model::VertexKind;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Weight applied when an edge has no caller-supplied importance weight.
pub const DEFAULT_EDGE_WEIGHT: f64 = 5.0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex not found: {0}")]
    VertexNotFound(String),
    #[error("edge endpoints must already be vertices: {0}, {1}")]
    InvalidEdge(String, String),
    #[error("vertex {0} has no neighbours")]
    DegenerateComputation(String),
}

impl SavoraError for GraphError {
    fn error_code(&self) -> ErrorCode {
        match self {
            GraphError::VertexNotFound(_) => ErrorCode::NotFound,
            GraphError::InvalidEdge(_, _) => ErrorCode::InvalidEdge,
            GraphError::DegenerateComputation(_) => ErrorCode::DegenerateComputation,
        }
    }
}

#[derive(Debug, Clone)]
struct Vertex {
    kind: VertexKind,
    neighbours: HashMap<String, f64>,
}

impl Vertex {
    fn new(kind: VertexKind) -> Self {
        Self {
            kind,
            neighbours: HashMap::new(),
        }
    }

    fn degree(&self) -> usize {
        self.neighbours.len()
    }

    /// Cosine similarity of the two weighted-neighbour vectors.
    ///
    /// The dot product runs over the shared neighbours only, but each norm
    /// covers the vertex's entire neighbour set. `None` when either vertex
    /// has no neighbours (zero norm).
    fn cosine_similarity(&self, other: &Vertex) -> Option<f64> {
        let numerator: f64 = self
            .neighbours
            .iter()
            .filter_map(|(id, w)| other.neighbours.get(id).map(|v| w * v))
            .sum();

        let norm_a = self.neighbours.values().map(|w| w * w).sum::<f64>().sqrt();
        let norm_b = other.neighbours.values().map(|w| w * w).sum::<f64>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return None;
        }
        Some(numerator / (norm_a * norm_b))
    }
}

/// An undirected graph of restaurants, their attributes, and optionally users.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: HashMap<String, Vertex>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex if absent. Re-adding an existing identity is a no-op
    /// and never resets its neighbours.
    pub fn add_vertex(&mut self, item: impl Into<String>, kind: VertexKind) {
        self.vertices
            .entry(item.into())
            .or_insert_with(|| Vertex::new(kind));
    }

    /// Connect two existing vertices with the given weight, symmetrically.
    ///
    /// Re-adding an edge overwrites the previous weight on both sides.
    /// Fails without touching either adjacency map when an endpoint is
    /// missing. `item1 != item2` is a caller precondition.
    pub fn add_edge(&mut self, item1: &str, item2: &str, weight: f64) -> Result<(), GraphError> {
        debug_assert_ne!(item1, item2, "self-loops are not allowed");

        if !(self.vertices.contains_key(item1) && self.vertices.contains_key(item2)) {
            return Err(GraphError::InvalidEdge(item1.to_string(), item2.to_string()));
        }
        if let Some(v1) = self.vertices.get_mut(item1) {
            v1.neighbours.insert(item2.to_string(), weight);
        }
        if let Some(v2) = self.vertices.get_mut(item2) {
            v2.neighbours.insert(item1.to_string(), weight);
        }
        Ok(())
    }

    /// Whether the two items are connected. False, not an error, when either
    /// identity is absent.
    pub fn adjacent(&self, item1: &str, item2: &str) -> bool {
        self.vertices
            .get(item1)
            .is_some_and(|v| v.neighbours.contains_key(item2))
    }

    /// Identities of all neighbours of `item`.
    pub fn get_neighbours(&self, item: &str) -> Result<HashSet<String>, GraphError> {
        let vertex = self.lookup(item)?;
        Ok(vertex.neighbours.keys().cloned().collect())
    }

    /// All vertex identities, optionally restricted to one kind.
    pub fn get_all_vertices(&self, kind: Option<VertexKind>) -> HashSet<String> {
        match kind {
            Some(kind) => self
                .vertices
                .iter()
                .filter(|(_, v)| v.kind == kind)
                .map(|(id, _)| id.clone())
                .collect(),
            None => self.vertices.keys().cloned().collect(),
        }
    }

    /// Stored weight of the edge between the two items.
    ///
    /// Returns the sentinel `0.0` for any non-adjacent pair; absent vertices
    /// are treated as non-adjacent. Callers for whom a genuine zero-weight
    /// edge is meaningful must check [`Graph::adjacent`] first.
    pub fn get_weight(&self, item1: &str, item2: &str) -> f64 {
        self.vertices
            .get(item1)
            .and_then(|v| v.neighbours.get(item2))
            .copied()
            .unwrap_or(0.0)
    }

    /// Mean weight of the edges incident to `item`.
    pub fn average_weight(&self, item: &str) -> Result<f64, GraphError> {
        let vertex = self.lookup(item)?;
        if vertex.neighbours.is_empty() {
            return Err(GraphError::DegenerateComputation(item.to_string()));
        }
        Ok(vertex.neighbours.values().sum::<f64>() / vertex.degree() as f64)
    }

    /// Sum of the weights of the edges incident to `item`, re-queried one
    /// neighbour at a time.
    pub fn total_weights(&self, item: &str) -> Result<f64, GraphError> {
        let mut total = 0.0;
        for neighbour in self.get_neighbours(item)? {
            total += self.get_weight(item, &neighbour);
        }
        Ok(total)
    }

    /// Cosine similarity between the two items' weighted-neighbour vectors.
    ///
    /// A vertex compared with itself scores 1.0; vertices sharing no
    /// neighbours score 0.0. A vertex with no neighbours at all has a zero
    /// norm and surfaces [`GraphError::DegenerateComputation`].
    pub fn get_similarity_score(&self, item1: &str, item2: &str) -> Result<f64, GraphError> {
        let v1 = self.lookup(item1)?;
        let v2 = self.lookup(item2)?;

        v1.cosine_similarity(v2).ok_or_else(|| {
            let degenerate = if v1.neighbours.is_empty() { item1 } else { item2 };
            GraphError::DegenerateComputation(degenerate.to_string())
        })
    }

    /// Number of neighbours of `item`.
    pub fn get_degree(&self, item: &str) -> Result<usize, GraphError> {
        Ok(self.lookup(item)?.degree())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn lookup(&self, item: &str) -> Result<&Vertex, GraphError> {
        self.vertices
            .get(item)
            .ok_or_else(|| GraphError::VertexNotFound(item.to_string()))
    }
}
