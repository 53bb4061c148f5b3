use bdr_agents::Capabilities;
use bdr_agents::PinnedMoves;
use bdr_agents::RetryPolicy;
use bdr_core::PlayerIdx;
use bdr_dto::ErrorBody;
use bdr_dto::ExpandRequest;
use bdr_dto::NodeRecord;
use bdr_dto::SearchRequest;
use bdr_dto::SearchResponse;
use bdr_dto::TreeDto;
use bdr_search::MaxN;
use bdr_search::SearchConfig;
use bdr_search::SearchError;
use bdr_search::Tree;
use bdr_search::TreeBuilder;
use bdr_state::GameState;
use petgraph::graph::NodeIndex;
use std::sync::Arc;
use std::time::Duration;

/// Request-level policy: the whole-search deadline and the per-call retry
/// behavior handed to the builder and scorer.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub deadline: Duration,
    pub retry: RetryPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            deadline: bdr_core::SEARCH_DEADLINE,
            retry: RetryPolicy::default(),
        }
    }
}

/// The search facade the API layer talks to.
///
/// Owns a capability bundle and a request policy; everything per-request
/// (tree, scores, verdict) lives and dies inside one call.
pub struct Engine {
    caps: Capabilities,
    config: EngineConfig,
}

impl Engine {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            config: EngineConfig::default(),
        }
    }
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Full build-and-score under the request deadline.
    pub async fn run_search(
        &self,
        initial: GameState,
        search: SearchConfig,
    ) -> Result<SearchResponse, SearchError> {
        let unit = bdr_core::TIME_PERIOD_UNIT.to_string();
        tokio::time::timeout(self.config.deadline, self.search(&self.caps, initial, search, unit))
            .await
            .map_err(|_| SearchError::DeadlineExceeded)?
    }

    /// Bounded, unscored expansion for incremental visualization.
    pub async fn expand_tree(
        &self,
        initial: GameState,
        search: SearchConfig,
        max_depth: usize,
    ) -> Result<TreeDto, SearchError> {
        let primary = search.primary;
        let builder = TreeBuilder::new(self.caps.clone(), search).with_retry(self.config.retry);
        let tree = tokio::time::timeout(self.config.deadline, builder.expand(initial, max_depth))
            .await
            .map_err(|_| SearchError::DeadlineExceeded)??;
        Ok(serialize(&tree, primary))
    }

    /// Wire entry point: caller-defined JSON state, optional fixed action
    /// set for the primary player, optional overrides for horizon, rotation,
    /// and branching.
    pub async fn run_request(&self, request: SearchRequest) -> Result<SearchResponse, SearchError> {
        let initial: GameState = serde_json::from_value(request.initial_state)
            .map_err(|e| SearchError::InvalidConfig(format!("bad initial_state: {}", e)))?;
        let mut search = SearchConfig::new(request.business_goal).for_players(initial.n());
        if let Some(rotation) = request.rotation {
            search = search.with_rotation(rotation);
        }
        if let Some(periods) = request.time_periods {
            search = search.with_horizon(periods.min(bdr_core::MAX_HORIZON_PERIODS));
        }
        if let Some(limit) = request.branching_limit {
            search = search.with_branching(limit);
        }
        let caps = match request.action_set {
            Some(labels) => self.caps.clone().with_moves(Arc::new(PinnedMoves::new(
                search.primary,
                labels,
                self.caps.moves.clone(),
            ))),
            None => self.caps.clone(),
        };
        let unit = request
            .time_period_unit
            .unwrap_or_else(|| bdr_core::TIME_PERIOD_UNIT.to_string());
        tokio::time::timeout(self.config.deadline, self.search(&caps, initial, search, unit))
            .await
            .map_err(|_| SearchError::DeadlineExceeded)?
    }

    /// Wire entry point for bounded expansion.
    pub async fn expand_request(&self, request: ExpandRequest) -> Result<TreeDto, SearchError> {
        let initial: GameState = serde_json::from_value(request.initial_state)
            .map_err(|e| SearchError::InvalidConfig(format!("bad initial_state: {}", e)))?;
        let mut search = SearchConfig::new(request.business_goal).for_players(initial.n());
        if let Some(rotation) = request.rotation {
            search = search.with_rotation(rotation);
        }
        if let Some(limit) = request.branching_limit {
            search = search.with_branching(limit);
        }
        self.expand_tree(initial, search, request.max_depth).await
    }

    async fn search(
        &self,
        caps: &Capabilities,
        initial: GameState,
        search: SearchConfig,
        unit: String,
    ) -> Result<SearchResponse, SearchError> {
        let started = tokio::time::Instant::now();
        let builder = TreeBuilder::new(caps.clone(), search.clone()).with_retry(self.config.retry);
        let mut tree = builder.build(initial).await?;
        let verdict = MaxN::new(caps, &search)
            .with_retry(self.config.retry)
            .evaluate(&mut tree)
            .await?;
        log::info!(
            "[engine] searched {} nodes in {:?}: best {:?} at {:.3}",
            tree.n(),
            started.elapsed(),
            verdict.best_move,
            verdict.best_score
        );
        Ok(SearchResponse {
            best_move: verdict.best_move,
            best_score: verdict.best_score,
            time_periods: search.clamped_horizon(),
            time_period_unit: unit,
            tree: serialize(&tree, search.primary),
        })
    }
}

/// The single structured error every failed request reduces to on the wire.
pub fn error_body(error: &SearchError) -> ErrorBody {
    ErrorBody {
        kind: error.kind().to_string(),
        cause: error.to_string(),
    }
}

fn node_id(index: NodeIndex) -> String {
    format!("node_{}", index.index())
}

/// Flattens a tree into the wire map. The scalar `score` is the primary
/// player's coordinate of the node's vector, the quantity every verdict
/// and visualization is judged by.
fn serialize(tree: &Tree, primary: PlayerIdx) -> TreeDto {
    let mut dto = TreeDto::new();
    for index in tree.indices() {
        let data = tree.data(index);
        dto.insert(
            node_id(index),
            NodeRecord {
                label: tree
                    .incoming(index)
                    .map(|mv| mv.label.clone())
                    .unwrap_or_else(|| "start".to_string()),
                parent_id: tree.parent(index).map(node_id),
                children: tree.children(index).into_iter().map(node_id).collect(),
                score: data.score.as_ref().and_then(|v| v.get(primary)).copied(),
                player_index: data.player,
                is_leaf: tree.is_leaf(index),
                is_root: tree.is_root(index),
                time_period: data.turn_period,
            },
        );
    }
    dto
}

#[cfg(test)]
mod tests {
    use super::*;
    use bdr_agents::scripted::*;
    use bdr_state::PlayerMetrics;

    fn duo() -> GameState {
        GameState::new(
            100.0,
            vec![PlayerMetrics::new("Us", 0.5), PlayerMetrics::new("Them", 0.5)],
        )
    }

    fn scripted_caps() -> Capabilities {
        Capabilities::new(
            Arc::new(
                ScriptedMoves::none()
                    .for_player(0, ["A", "B"])
                    .for_player(1, ["X"]),
            ),
            Arc::new(ScriptedTransition::Identity),
            Arc::new(
                ScriptedEvaluator::constant(0.1)
                    .with_path("A/X", vec![0.4, 0.9])
                    .with_path("B/X", vec![0.6, 0.2]),
            ),
        )
    }

    fn config() -> SearchConfig {
        SearchConfig::new("grow share").for_players(2).with_horizon(1)
    }

    #[tokio::test]
    async fn run_search_answers_with_a_resolvable_tree() {
        let engine = Engine::new(scripted_caps());
        let response = engine.run_search(duo(), config()).await.unwrap();
        assert_eq!(response.best_move.as_deref(), Some("B"));
        assert_eq!(response.best_score, 0.6);
        assert_eq!(response.time_periods, 1);
        let root = &response.tree["node_0"];
        assert!(root.is_root && root.parent_id.is_none());
        assert_eq!(root.label, "start");
        for (id, record) in &response.tree {
            if let Some(parent) = &record.parent_id {
                assert!(response.tree.contains_key(parent), "{} orphaned", id);
            }
            for child in &record.children {
                assert_eq!(response.tree[child].parent_id.as_ref(), Some(id));
            }
            assert!(record.score.is_some(), "{} unscored after run_search", id);
        }
    }

    #[tokio::test]
    async fn expand_tree_is_unscored_and_depth_bounded() {
        let engine = Engine::new(scripted_caps());
        let tree = engine
            .expand_tree(duo(), config().with_horizon(3), 1)
            .await
            .unwrap();
        assert_eq!(tree.len(), 3); // root + A + B
        assert!(tree.values().all(|record| record.score.is_none()));
        assert!(tree.values().filter(|r| !r.is_root).all(|r| r.is_leaf));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_fails_the_request_whole() {
        let caps = Capabilities::new(
            Arc::new(ScriptedMoves::none().for_player(0, ["A"]).for_player(1, ["X"])),
            Arc::new(ScriptedTransition::Stall),
            Arc::new(ScriptedEvaluator::constant(0.5)),
        );
        let engine = Engine::new(caps).with_config(EngineConfig {
            deadline: Duration::from_secs(1),
            retry: RetryPolicy::once(),
        });
        let err = engine.run_search(duo(), config()).await.unwrap_err();
        assert_eq!(err, SearchError::DeadlineExceeded);
    }

    #[tokio::test]
    async fn expand_request_round_trips_through_the_wire_types() {
        let engine = Engine::new(scripted_caps());
        let request = ExpandRequest {
            business_goal: "grow share".into(),
            initial_state: serde_json::to_value(duo()).unwrap(),
            max_depth: 1,
            rotation: None,
            branching_limit: None,
        };
        let tree = engine.expand_request(request).await.unwrap();
        assert_eq!(tree.len(), 3);
        assert!(tree.values().all(|record| record.score.is_none()));
    }

    #[tokio::test]
    async fn run_request_pins_the_action_set_to_the_primary() {
        let engine = Engine::new(scripted_caps());
        let request = SearchRequest {
            business_goal: "grow share".into(),
            initial_state: serde_json::to_value(duo()).unwrap(),
            action_set: Some(vec!["OnlyMove".into()]),
            time_periods: Some(1),
            time_period_unit: Some("month".into()),
            rotation: None,
            branching_limit: None,
        };
        let response = engine.run_request(request).await.unwrap();
        assert_eq!(response.best_move.as_deref(), Some("OnlyMove"));
        assert_eq!(response.time_period_unit, "month");
        // rivals still answered from the scripted source
        assert!(
            response
                .tree
                .values()
                .any(|record| record.label == "X" && record.player_index == Some(1))
        );
    }

    #[tokio::test]
    async fn run_request_rejects_unreadable_state() {
        let engine = Engine::new(scripted_caps());
        let request = SearchRequest {
            business_goal: "g".into(),
            initial_state: serde_json::json!({"players": "not a list"}),
            action_set: None,
            time_periods: None,
            time_period_unit: None,
            rotation: None,
            branching_limit: None,
        };
        let err = engine.run_request(request).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidConfig(_)));
        let body = error_body(&err);
        assert_eq!(body.kind, "invalid_config");
        assert!(body.cause.contains("initial_state"));
    }
}
