use serde::{Deserialize, Serialize};

/// Category tag carried by every vertex in the restaurant network.
///
/// The set is closed: a graph only ever contains these seven kinds, and
/// anything else is rejected at the serde boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexKind {
    Restaurant,
    Location,
    RestType,
    Cuisines,
    ApproxCost,
    Other,
    User,
}

impl VertexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VertexKind::Restaurant => "restaurant",
            VertexKind::Location => "location",
            VertexKind::RestType => "rest_type",
            VertexKind::Cuisines => "cuisines",
            VertexKind::ApproxCost => "approx_cost",
            VertexKind::Other => "other",
            VertexKind::User => "user",
        }
    }
}

impl std::fmt::Display for VertexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One validated restaurant record, as produced by the row-validation layer.
///
/// `rate` is normalized into [0, 1]; `rest_type` and `cuisines` hold the
/// already-split label lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub online_order: bool,
    pub book_table: bool,
    pub rate: f64,
    pub location: String,
    pub rest_type: Vec<String>,
    pub cuisines: Vec<String>,
    pub approx_cost: u32,
    pub listed_in: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_kind_serializes_to_snake_case_tags() {
        let json = serde_json::to_string(&VertexKind::RestType).unwrap();
        assert_eq!(json, "\"rest_type\"");
        assert_eq!(VertexKind::ApproxCost.to_string(), "approx_cost");
    }

    #[test]
    fn vertex_kind_rejects_unknown_tags() {
        let parsed: Result<VertexKind, _> = serde_json::from_str("\"michelin_stars\"");
        assert!(parsed.is_err());
    }
}
