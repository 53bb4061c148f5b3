use super::*;
use bdr_core::PlayerIdx;
use bdr_core::Score;
use bdr_state::Category;
use bdr_state::GameState;
use bdr_state::Move;
use std::sync::Arc;

/// Agent-backed move source.
///
/// Sends the state, goal, and acting player's profile to the strategist
/// (primary player) or opponent persona and parses a `{"moves": [...]}`
/// answer. Entries may be bare labels or objects carrying a category and
/// rationale. The goal is bound at construction: an agent serves one
/// objective for its whole lifetime, so trees stay comparable.
pub struct RemoteMoves {
    transport: Arc<dyn AgentTransport>,
    role: AgentRole,
    goal: String,
}

impl RemoteMoves {
    /// Move proposals for the primary player.
    pub fn strategist(transport: Arc<dyn AgentTransport>, goal: impl Into<String>) -> Self {
        Self {
            transport,
            role: AgentRole::Strategist,
            goal: goal.into(),
        }
    }
    /// Counter-move proposals for rival players.
    pub fn opponent(transport: Arc<dyn AgentTransport>, goal: impl Into<String>) -> Self {
        Self {
            transport,
            role: AgentRole::Opponent,
            goal: goal.into(),
        }
    }

    fn parse_move(value: &serde_json::Value, player: PlayerIdx) -> Option<Move> {
        let mv = match value {
            serde_json::Value::String(label) => Move::new(label.as_str(), Category::Other, player),
            serde_json::Value::Object(obj) => {
                let label = obj.get("label").or_else(|| obj.get("move_name"))?.as_str()?;
                let category = obj
                    .get("category")
                    .and_then(|c| c.as_str())
                    .map(Category::from)
                    .unwrap_or_default();
                let mut mv = Move::new(label, category, player);
                if let Some(rationale) = obj.get("rationale").and_then(|r| r.as_str()) {
                    mv = mv.with_rationale(rationale);
                }
                mv
            }
            _ => return None,
        };
        mv.is_labeled().then_some(mv)
    }
}

#[async_trait::async_trait]
impl MoveSource for RemoteMoves {
    async fn generate(
        &self,
        state: &GameState,
        player: PlayerIdx,
        limit: usize,
    ) -> Result<Vec<Move>, CapabilityError> {
        let request = AgentRequest::new(
            self.role,
            serde_json::json!({
                "game_state": state,
                "business_goal": self.goal,
                "player_index": player,
                "player_id": state.player(player).map(|p| p.player_id.clone()),
                "max_moves": limit,
            }),
        );
        let text = self.transport.call(&request).await?;
        let value = extract_json(&text)
            .ok_or_else(|| CapabilityError::Malformed(format!("{}: not JSON", self.role)))?;
        let moves = value
            .get("moves")
            .and_then(|m| m.as_array())
            .ok_or_else(|| CapabilityError::Malformed(format!("{}: no moves array", self.role)))?;
        Ok(moves
            .iter()
            .filter_map(|m| Self::parse_move(m, player))
            .take(limit)
            .collect())
    }
}

/// Agent-backed transition.
///
/// Asks the simulator persona to project the state after a move and expects
/// `{"new_game_state": {...}}`. An explicit `{"inapplicable": "why"}` answer
/// prunes the branch. The input's period and history are reinstated on the
/// way out; round bookkeeping belongs to the engine, whatever the agent
/// echoes back.
pub struct RemoteTransition {
    transport: Arc<dyn AgentTransport>,
    goal: String,
}

impl RemoteTransition {
    pub fn new(transport: Arc<dyn AgentTransport>, goal: impl Into<String>) -> Self {
        Self {
            transport,
            goal: goal.into(),
        }
    }
}

#[async_trait::async_trait]
impl Transition for RemoteTransition {
    async fn apply(&self, state: &GameState, mv: &Move) -> Result<GameState, CapabilityError> {
        let request = AgentRequest::new(
            AgentRole::Simulator,
            serde_json::json!({
                "game_state": state,
                "business_goal": self.goal,
                "move": mv,
            }),
        );
        let text = self.transport.call(&request).await?;
        let value = extract_json(&text)
            .ok_or_else(|| CapabilityError::Malformed("simulator: not JSON".into()))?;
        if let Some(reason) = value.get("inapplicable").and_then(|r| r.as_str()) {
            return Err(CapabilityError::Inapplicable(reason.to_string()));
        }
        let next = value
            .get("new_game_state")
            .cloned()
            .ok_or_else(|| CapabilityError::Malformed("simulator: no new_game_state".into()))?;
        let mut next: GameState = serde_json::from_value(next)
            .map_err(|e| CapabilityError::Malformed(format!("simulator: bad state: {}", e)))?;
        next.period = state.period;
        next.history = state.history.clone();
        Ok(next)
    }
}

/// Agent-backed evaluator.
///
/// Sends the state, player, and goal to the evaluator persona and expects
/// `{"heuristic_score": 0.0..1.0}`. Score drift across calls is expected
/// and never retried; only transport-class failures are.
pub struct RemoteEvaluator {
    transport: Arc<dyn AgentTransport>,
}

impl RemoteEvaluator {
    pub fn new(transport: Arc<dyn AgentTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait::async_trait]
impl Evaluator for RemoteEvaluator {
    async fn score(
        &self,
        state: &GameState,
        player: PlayerIdx,
        goal: &str,
    ) -> Result<Score, CapabilityError> {
        let request = AgentRequest::new(
            AgentRole::Evaluator,
            serde_json::json!({
                "game_state": state,
                "business_goal": goal,
                "player_index": player,
            }),
        );
        let text = self.transport.call(&request).await?;
        let value = extract_json(&text)
            .ok_or_else(|| CapabilityError::Malformed("evaluator: not JSON".into()))?;
        value
            .get("heuristic_score")
            .or_else(|| value.get("score"))
            .and_then(|s| s.as_f64())
            .ok_or_else(|| CapabilityError::Malformed("evaluator: no heuristic_score".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripted::ScriptedTransport;
    use bdr_state::PlayerMetrics;

    fn state() -> GameState {
        GameState::new(
            500.0,
            vec![
                PlayerMetrics::new("Us", 0.6),
                PlayerMetrics::new("Them", 0.4),
            ],
        )
    }

    #[tokio::test]
    async fn moves_parse_labels_and_objects() {
        let transport = Arc::new(ScriptedTransport::replying(
            AgentRole::Strategist,
            r#"```json
            {"moves": ["Cut prices",
                       {"label": "Partner up", "category": "partnership", "rationale": "cheap reach"},
                       "  "]}
            ```"#,
        ));
        let source = RemoteMoves::strategist(transport, "grow share");
        let moves = source.generate(&state(), 0, 4).await.unwrap();
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].label, "Cut prices");
        assert_eq!(moves[1].category, Category::Partnership);
        assert_eq!(moves[1].rationale.as_deref(), Some("cheap reach"));
    }

    #[tokio::test]
    async fn moves_respect_the_limit() {
        let transport = Arc::new(ScriptedTransport::replying(
            AgentRole::Opponent,
            r#"{"moves": ["a", "b", "c", "d"]}"#,
        ));
        let source = RemoteMoves::opponent(transport, "defend");
        let moves = source.generate(&state(), 1, 2).await.unwrap();
        assert_eq!(moves.len(), 2);
    }

    #[tokio::test]
    async fn missing_moves_array_is_malformed() {
        let transport = Arc::new(ScriptedTransport::replying(
            AgentRole::Strategist,
            r#"{"strategy": "wing it"}"#,
        ));
        let source = RemoteMoves::strategist(transport, "grow");
        let err = source.generate(&state(), 0, 4).await.unwrap_err();
        assert!(matches!(err, CapabilityError::Malformed(_)));
    }

    #[tokio::test]
    async fn transition_reinstates_period_and_history() {
        let mut start = state();
        start.advance_period();
        let mut echoed = start.clone();
        echoed.period = 9;
        echoed.players[0].market_share = 0.7;
        let transport = Arc::new(ScriptedTransport::replying(
            AgentRole::Simulator,
            serde_json::json!({ "new_game_state": echoed }).to_string(),
        ));
        let transition = RemoteTransition::new(transport, "grow");
        let mv = Move::new("Cut prices", Category::Pricing, 0);
        let next = transition.apply(&start, &mv).await.unwrap();
        assert_eq!(next.period, start.period);
        assert_eq!(next.players[0].market_share, 0.7);
    }

    #[tokio::test]
    async fn transition_inapplicable_answer_prunes() {
        let transport = Arc::new(ScriptedTransport::replying(
            AgentRole::Simulator,
            r#"{"inapplicable": "target already acquired"}"#,
        ));
        let transition = RemoteTransition::new(transport, "grow");
        let mv = Move::new("Acquire target", Category::Acquisition, 0);
        let err = transition.apply(&state(), &mv).await.unwrap_err();
        assert_eq!(
            err,
            CapabilityError::Inapplicable("target already acquired".into())
        );
    }

    #[tokio::test]
    async fn evaluator_reads_heuristic_score() {
        let transport = Arc::new(ScriptedTransport::replying(
            AgentRole::Evaluator,
            r#"Sure! {"heuristic_score": 0.82, "score_explanation": "strong position"}"#,
        ));
        let eval = RemoteEvaluator::new(transport);
        let score = eval.score(&state(), 0, "grow share").await.unwrap();
        assert_eq!(score, 0.82);
    }
}
