//! Builds the attribute-bucket graph from validated restaurant records.
//!
//! Each restaurant becomes one vertex, connected to shared attribute-bucket
//! vertices: boolean flags, a rating bucket, its location, one vertex per
//! rest-type and cuisine label, a cost bucket, and its listed-in category.
//! Location, rest-type, cuisine, and cost edges carry the caller-configured
//! importance weights; everything else carries the fixed default weight.

use graph::{Graph, GraphError, DEFAULT_EDGE_WEIGHT};
use savora_core::config::{WeightConfig, WeightConfigError};
use savora_core::model::{Restaurant, VertexKind};
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid weight configuration: {0}")]
    Config(#[from] WeightConfigError),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Rating buckets over the normalized [0, 1] rate.
fn rating_bucket(rate: f64) -> &'static str {
    if (0.0..0.2).contains(&rate) {
        "worst_rated"
    } else if (0.2..0.4).contains(&rate) {
        "poor_rated"
    } else if (0.4..0.6).contains(&rate) {
        "moderate_rated"
    } else if (0.6..0.8).contains(&rate) {
        "good_rated"
    } else {
        "excellent_rated"
    }
}

/// Cost buckets over the approximate cost for two people.
fn cost_bucket(cost: u32) -> &'static str {
    if cost < 750 {
        "low_cost"
    } else if cost < 2000 {
        "medium_price"
    } else {
        "high_price"
    }
}

/// Build a graph connecting every restaurant to its attribute buckets.
///
/// The weight configuration is validated before any vertex is created.
pub fn build_attribute_graph(
    records: &HashMap<String, Restaurant>,
    weights: &WeightConfig,
) -> Result<Graph, BuildError> {
    weights.validate()?;

    let mut graph = Graph::new();
    for (name, record) in records {
        graph.add_vertex(name.clone(), VertexKind::Restaurant);

        let online_order = if record.online_order {
            "yes_online_order"
        } else {
            "no_online_order"
        };
        graph.add_vertex(online_order, VertexKind::Other);
        graph.add_edge(name, online_order, DEFAULT_EDGE_WEIGHT)?;

        let book_table = if record.book_table {
            "yes_book_table"
        } else {
            "no_book_table"
        };
        graph.add_vertex(book_table, VertexKind::Other);
        graph.add_edge(name, book_table, DEFAULT_EDGE_WEIGHT)?;

        let rated = rating_bucket(record.rate);
        graph.add_vertex(rated, VertexKind::Other);
        graph.add_edge(name, rated, DEFAULT_EDGE_WEIGHT)?;

        graph.add_vertex(record.location.clone(), VertexKind::Location);
        graph.add_edge(name, &record.location, weights.location)?;

        for rest_type in &record.rest_type {
            graph.add_vertex(rest_type.clone(), VertexKind::RestType);
            graph.add_edge(name, rest_type, weights.rest_type)?;
        }

        for cuisine in &record.cuisines {
            graph.add_vertex(cuisine.clone(), VertexKind::Cuisines);
            graph.add_edge(name, cuisine, weights.cuisines)?;
        }

        let priced = cost_bucket(record.approx_cost);
        graph.add_vertex(priced, VertexKind::ApproxCost);
        graph.add_edge(name, priced, weights.approx_cost)?;

        graph.add_vertex(record.listed_in.clone(), VertexKind::Other);
        graph.add_edge(name, &record.listed_in, DEFAULT_EDGE_WEIGHT)?;
    }

    info!(
        restaurants = records.len(),
        vertices = graph.vertex_count(),
        "built attribute graph"
    );
    Ok(graph)
}
