use std::collections::BTreeMap;

/// One node of the search tree on the wire.
///
/// `score` stays null until the scoring pass has run (always, for trees
/// produced by bounded expansion). `children` preserve move-generation
/// order; ids are `node_{index}` strings resolvable in the same map.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeRecord {
    pub label: String,
    pub parent_id: Option<String>,
    pub children: Vec<String>,
    pub score: Option<f64>,
    pub player_index: Option<usize>,
    pub is_leaf: bool,
    pub is_root: bool,
    pub time_period: Option<usize>,
}

/// The whole tree as a flat id → record map.
pub type TreeDto = BTreeMap<String, NodeRecord>;

/// Answer to a full build-and-score search.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
    pub best_move: Option<String>,
    pub best_score: f64,
    pub time_periods: usize,
    pub time_period_unit: String,
    pub tree: TreeDto,
}

/// The single structured error shape every failed request reduces to.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub cause: String,
}
