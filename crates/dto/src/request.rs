/// A full build-and-score search request.
///
/// `initial_state` is caller-defined JSON; the engine only requires stable
/// player identity and order. When `action_set` is present the primary
/// player's moves come from that fixed list at every turn, making the tree
/// reproducible for a deterministic transition and evaluator.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
    pub business_goal: String,
    pub initial_state: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_set: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_periods: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_period_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branching_limit: Option<usize>,
}

/// A bounded, unscored expansion request for incremental visualization.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExpandRequest {
    pub business_goal: String,
    pub initial_state: serde_json::Value,
    pub max_depth: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branching_limit: Option<usize>,
}
