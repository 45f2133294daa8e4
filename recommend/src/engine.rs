//! Similarity and recommendation queries over a built restaurant graph.
//!
//! The engine is a stateless request/response layer: it shares the graph,
//! never mutates it, and every query recomputes from the adjacency maps.

use graph::{Graph, GraphError};
use savora_core::error::{ErrorCode, SavoraError};
use savora_core::model::VertexKind;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Candidate pool size for [`Recommender::top_similar`].
pub const DEFAULT_SIMILAR_LIMIT: usize = 20;
/// Number of attribute identities returned by [`Recommender::dominant_attributes`].
pub const DOMINANT_FACTOR_LIMIT: usize = 3;
/// Number of restaurant identities returned by [`Recommender::top_liked`].
pub const TOP_LIKED_LIMIT: usize = 7;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecommendError {
    #[error("unknown {kind} vertex: {item}")]
    UnknownItem { item: String, kind: VertexKind },
    #[error("at least one candidate set is required")]
    NoCandidateSets,
    #[error("liked-restaurant ranking requires the user kind, got {0}")]
    InvalidKind(VertexKind),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl SavoraError for RecommendError {
    fn error_code(&self) -> ErrorCode {
        match self {
            RecommendError::UnknownItem { .. } => ErrorCode::NotFound,
            RecommendError::NoCandidateSets | RecommendError::InvalidKind(_) => {
                ErrorCode::InvalidArgument
            }
            RecommendError::Graph(err) => err.error_code(),
        }
    }
}

/// Read-only recommendation engine over one shared [`Graph`].
pub struct Recommender {
    graph: Arc<Graph>,
}

impl Recommender {
    pub fn new(graph: Arc<Graph>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Up to `limit` vertices of `kind` most similar to `item` by cosine
    /// similarity of their weighted-neighbour vectors.
    ///
    /// Candidates are grouped into buckets keyed by their exact score before
    /// the top scores are selected, so candidates that tie on score collapse
    /// into one bucket whose last-visited member wins; with ties present the
    /// returned set can be smaller than `limit`, and which tied candidate
    /// survives depends on map iteration order.
    pub fn top_similar(
        &self,
        item: &str,
        kind: VertexKind,
        limit: usize,
    ) -> Result<HashSet<String>, RecommendError> {
        let candidates = self.graph.get_all_vertices(Some(kind));
        if !candidates.contains(item) {
            return Err(RecommendError::UnknownItem {
                item: item.to_string(),
                kind,
            });
        }

        let mut by_score: HashMap<u64, String> = HashMap::new();
        let mut scores: Vec<f64> = Vec::new();
        for candidate in &candidates {
            if candidate == item {
                continue;
            }
            let score = self.graph.get_similarity_score(item, candidate)?;
            by_score.insert(score.to_bits(), candidate.clone());
            scores.push(score);
        }

        scores.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
        let limit = limit.min(scores.len());

        Ok(scores[..limit]
            .iter()
            .filter_map(|score| by_score.get(&score.to_bits()).cloned())
            .collect())
    }

    /// Candidates shared by every per-seed set, as an intersection of the
    /// supplied sets, truncated to `limit` (`limit < 0` returns everything).
    ///
    /// When the seeds share nothing, the fallback is the *first* candidate
    /// set, truncated the same way: the answer silently degrades from
    /// "consensus across all seeds" to "recommendations for the first seed".
    /// Results are materialized in lexicographic order before truncation.
    pub fn consensus(
        &self,
        candidate_sets: &[HashSet<String>],
        limit: i64,
    ) -> Result<Vec<String>, RecommendError> {
        let first = candidate_sets.first().ok_or(RecommendError::NoCandidateSets)?;

        let mut intersection = first.clone();
        for set in &candidate_sets[1..] {
            intersection.retain(|item| set.contains(item));
        }

        let pool = if intersection.is_empty() {
            first
        } else {
            &intersection
        };

        let mut ranked: Vec<String> = pool.iter().cloned().collect();
        ranked.sort();
        if limit >= 0 {
            ranked.truncate(limit as usize);
        }
        Ok(ranked)
    }

    /// Up to three attribute identities accumulated across the neighbour
    /// sets of `items` (each of which must be a vertex of `kind`).
    ///
    /// The summed edge weights build the candidate pool, but the returned
    /// identities are ordered lexicographically, not by their accumulated
    /// weight, before truncation.
    pub fn dominant_attributes(
        &self,
        items: &[String],
        kind: VertexKind,
    ) -> Result<Vec<String>, RecommendError> {
        let members = self.graph.get_all_vertices(Some(kind));

        let mut summed: HashMap<String, f64> = HashMap::new();
        for item in items {
            if !members.contains(item) {
                return Err(RecommendError::UnknownItem {
                    item: item.clone(),
                    kind,
                });
            }
            for factor in self.graph.get_neighbours(item)? {
                let weight = self.graph.get_weight(&factor, item);
                *summed.entry(factor).or_insert(0.0) += weight;
            }
        }

        let mut factors: Vec<String> = summed.into_keys().collect();
        factors.sort();
        factors.truncate(DOMINANT_FACTOR_LIMIT);
        Ok(factors)
    }

    /// Up to seven restaurant identities from a user–restaurant graph,
    /// selected by average incident edge weight (how much connected users
    /// like them).
    ///
    /// Only valid with [`VertexKind::User`]. Like
    /// [`Recommender::dominant_attributes`], the returned identities are
    /// ordered lexicographically rather than by the computed average.
    pub fn top_liked(&self, kind: VertexKind) -> Result<Vec<String>, RecommendError> {
        if kind != VertexKind::User {
            return Err(RecommendError::InvalidKind(kind));
        }

        let mut averages: HashMap<String, f64> = HashMap::new();
        for restaurant in self.graph.get_all_vertices(Some(VertexKind::Restaurant)) {
            let average = self.graph.average_weight(&restaurant)?;
            averages.entry(restaurant).or_insert(average);
        }

        let mut ranked: Vec<String> = averages.into_keys().collect();
        ranked.sort();
        ranked.truncate(TOP_LIKED_LIMIT);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_recommender() -> Recommender {
        let mut graph = Graph::new();
        for restaurant in ["R1", "R2", "R3"] {
            graph.add_vertex(restaurant, VertexKind::Restaurant);
        }
        graph.add_vertex("cheap", VertexKind::ApproxCost);
        graph.add_vertex("veg", VertexKind::Cuisines);
        graph.add_vertex("bbq", VertexKind::Cuisines);

        graph.add_edge("R1", "cheap", 5.0).unwrap();
        graph.add_edge("R1", "veg", 4.0).unwrap();
        graph.add_edge("R2", "cheap", 5.0).unwrap();
        graph.add_edge("R2", "bbq", 2.0).unwrap();
        graph.add_edge("R3", "bbq", 6.0).unwrap();

        Recommender::new(Arc::new(graph))
    }

    #[test]
    fn top_similar_excludes_the_query_item() {
        let engine = seeded_recommender();
        let similar = engine
            .top_similar("R1", VertexKind::Restaurant, DEFAULT_SIMILAR_LIMIT)
            .unwrap();

        assert!(!similar.contains("R1"));
        assert_eq!(similar.len(), 2);
        assert_eq!(engine.graph().vertex_count(), 6);
    }

    #[test]
    fn top_similar_respects_the_limit() {
        let engine = seeded_recommender();
        let similar = engine.top_similar("R1", VertexKind::Restaurant, 1).unwrap();

        // R2 shares "cheap" with R1; R3 shares nothing.
        assert_eq!(similar.len(), 1);
        assert!(similar.contains("R2"));
    }

    #[test]
    fn top_similar_rejects_unknown_or_wrong_kind_items() {
        let engine = seeded_recommender();
        assert!(matches!(
            engine.top_similar("nowhere", VertexKind::Restaurant, 5),
            Err(RecommendError::UnknownItem { .. })
        ));
        // "cheap" exists, but not as a restaurant.
        assert!(matches!(
            engine.top_similar("cheap", VertexKind::Restaurant, 5),
            Err(RecommendError::UnknownItem { .. })
        ));
    }

    #[test]
    fn consensus_returns_only_intersection_elements() {
        let engine = seeded_recommender();
        let sets = vec![
            HashSet::from(["a".to_string(), "b".to_string(), "c".to_string()]),
            HashSet::from(["b".to_string(), "c".to_string(), "d".to_string()]),
        ];

        let picked = engine.consensus(&sets, -1).unwrap();
        assert_eq!(picked, vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn consensus_falls_back_to_first_set_when_disjoint() {
        let engine = seeded_recommender();
        let sets = vec![
            HashSet::from(["a".to_string(), "b".to_string()]),
            HashSet::from(["c".to_string()]),
        ];

        let picked = engine.consensus(&sets, 1).unwrap();
        assert_eq!(picked, vec!["a".to_string()]);

        let all = engine.consensus(&sets, -1).unwrap();
        assert_eq!(all, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn consensus_limit_beyond_intersection_returns_whole_intersection() {
        let engine = seeded_recommender();
        let sets = vec![
            HashSet::from(["a".to_string(), "b".to_string()]),
            HashSet::from(["a".to_string(), "b".to_string()]),
        ];

        let picked = engine.consensus(&sets, 99).unwrap();
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn consensus_requires_at_least_one_set() {
        let engine = seeded_recommender();
        assert_eq!(
            engine.consensus(&[], 3).unwrap_err(),
            RecommendError::NoCandidateSets
        );
    }

    #[test]
    fn dominant_attributes_orders_by_identity_not_weight() {
        let engine = seeded_recommender();
        let items = vec!["R1".to_string(), "R2".to_string(), "R3".to_string()];

        // Summed weights: cheap 10, veg 4, bbq 8 — but the identity sort
        // puts "bbq" first regardless of the totals.
        let factors = engine
            .dominant_attributes(&items, VertexKind::Restaurant)
            .unwrap();
        assert_eq!(
            factors,
            vec!["bbq".to_string(), "cheap".to_string(), "veg".to_string()]
        );
    }

    #[test]
    fn dominant_attributes_rejects_members_of_the_wrong_kind() {
        let engine = seeded_recommender();
        let items = vec!["R1".to_string(), "veg".to_string()];
        assert!(matches!(
            engine.dominant_attributes(&items, VertexKind::Restaurant),
            Err(RecommendError::UnknownItem { .. })
        ));
    }

    #[test]
    fn top_liked_requires_the_user_kind() {
        let engine = seeded_recommender();
        assert_eq!(
            engine.top_liked(VertexKind::Restaurant).unwrap_err(),
            RecommendError::InvalidKind(VertexKind::Restaurant)
        );
    }
}
