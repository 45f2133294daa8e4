pub mod engine;

pub use engine::{
    Recommender, RecommendError, DEFAULT_SIMILAR_LIMIT, DOMINANT_FACTOR_LIMIT, TOP_LIKED_LIMIT,
};
