pub mod network;

pub use network::{Graph, GraphError, DEFAULT_EDGE_WEIGHT};
