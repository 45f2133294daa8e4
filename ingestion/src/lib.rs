pub mod builder;
pub mod synthetic;

pub use builder::{build_attribute_graph, BuildError};
pub use synthetic::{GeneratorError, UserGraphGenerator};
