//! Synthetic bipartite user–restaurant graphs for demos and tests.
//!
//! Users form one partition and restaurants the other; edge weights encode
//! how much a user likes a restaurant, on a 1..=10 scale.

use graph::{Graph, GraphError};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use savora_core::model::{Restaurant, VertexKind};
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

/// Each generated user connects to this many restaurants, at minimum.
const MIN_USER_DEGREE: usize = 5;
/// Each generated user connects to at most this many restaurants.
const MAX_USER_DEGREE: usize = 10;
/// The static demo graph wires ten users to this many restaurants.
const STATIC_RESTAURANT_COUNT: usize = 7;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("need at least {needed} restaurants, got {available}")]
    NotEnoughRestaurants { needed: usize, available: usize },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Generates user–restaurant graphs from a restaurant record map.
pub struct UserGraphGenerator {
    seed: Option<u64>,
}

impl UserGraphGenerator {
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Generate with a fixed seed, for reproducible graphs.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Random bipartite graph: `user_count` users, `restaurant_count`
    /// restaurants sampled from `records`, each user liking between
    /// 5 and 10 of them with a weight in 1..=10.
    pub fn random_user_graph(
        &self,
        records: &HashMap<String, Restaurant>,
        user_count: usize,
        restaurant_count: usize,
    ) -> Result<Graph, GeneratorError> {
        if records.len() < restaurant_count {
            return Err(GeneratorError::NotEnoughRestaurants {
                needed: restaurant_count,
                available: records.len(),
            });
        }
        if restaurant_count < MAX_USER_DEGREE {
            return Err(GeneratorError::NotEnoughRestaurants {
                needed: MAX_USER_DEGREE,
                available: restaurant_count,
            });
        }

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut names: Vec<&String> = records.keys().collect();
        names.sort();
        let picked = rand::seq::index::sample(&mut rng, names.len(), restaurant_count);
        let restaurants: Vec<&String> = picked.iter().map(|i| names[i]).collect();

        let mut graph = Graph::new();
        for restaurant in &restaurants {
            graph.add_vertex(restaurant.as_str(), VertexKind::Restaurant);
        }
        let users: Vec<String> = (0..user_count).map(|i| format!("user_{i}")).collect();
        for user in &users {
            graph.add_vertex(user.clone(), VertexKind::User);
        }

        for user in &users {
            let degree = rng.random_range(MIN_USER_DEGREE..=MAX_USER_DEGREE);
            let liked = rand::seq::index::sample(&mut rng, restaurants.len(), degree);
            for index in liked.iter() {
                let weight = rng.random_range(1..=10) as f64;
                graph.add_edge(user, restaurants[index], weight)?;
            }
        }

        info!(
            users = user_count,
            restaurants = restaurant_count,
            "generated random user graph"
        );
        Ok(graph)
    }

    /// The hard-coded demo graph: ten users wired to the first seven
    /// restaurants of `records` in lexicographic order.
    pub fn static_user_graph(
        records: &HashMap<String, Restaurant>,
    ) -> Result<Graph, GeneratorError> {
        if records.len() < STATIC_RESTAURANT_COUNT {
            return Err(GeneratorError::NotEnoughRestaurants {
                needed: STATIC_RESTAURANT_COUNT,
                available: records.len(),
            });
        }

        let mut names: Vec<&String> = records.keys().collect();
        names.sort();
        let restaurants = &names[..STATIC_RESTAURANT_COUNT];

        let mut graph = Graph::new();
        for i in 0..10 {
            graph.add_vertex(format!("user_{i}"), VertexKind::User);
        }
        for restaurant in restaurants {
            graph.add_vertex(restaurant.as_str(), VertexKind::Restaurant);
        }

        let wiring: [(usize, usize, f64); 16] = [
            (0, 0, 3.0),
            (0, 3, 6.0),
            (1, 6, 8.0),
            (1, 1, 5.0),
            (2, 2, 5.0),
            (2, 4, 7.0),
            (3, 3, 5.0),
            (4, 4, 8.0),
            (4, 6, 9.0),
            (5, 4, 6.0),
            (5, 5, 3.0),
            (6, 1, 5.0),
            (6, 5, 1.0),
            (7, 5, 3.0),
            (7, 6, 9.0),
            (8, 6, 8.0),
        ];
        for (user, restaurant, weight) in wiring {
            graph.add_edge(&format!("user_{user}"), restaurants[restaurant], weight)?;
        }
        graph.add_edge("user_9", restaurants[6], 8.0)?;

        Ok(graph)
    }
}

impl Default for UserGraphGenerator {
    fn default() -> Self {
        Self::new()
    }
}
