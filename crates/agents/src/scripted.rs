//! Deterministic test doubles for the capability contracts.
//!
//! Production capabilities may be LLM-backed and noisy; tests need stubs
//! whose answers are a pure function of their inputs. These doubles key off
//! the state's recorded history, so a leaf's score is determined by the
//! exact move path that produced it.
use super::*;
use bdr_core::PlayerIdx;
use bdr_core::Score;
use bdr_state::Category;
use bdr_state::GameState;
use bdr_state::Move;
use std::collections::HashMap;

/// The move-path key for a state: history labels joined with `/`.
pub fn path_of(state: &GameState) -> String {
    state
        .history
        .iter()
        .map(|play| play.move_label.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

/// Canned transport: one fixed reply per agent role.
pub struct ScriptedTransport {
    replies: HashMap<AgentRole, String>,
}

impl ScriptedTransport {
    pub fn replying(role: AgentRole, text: impl Into<String>) -> Self {
        Self {
            replies: HashMap::from([(role, text.into())]),
        }
    }
    pub fn with(mut self, role: AgentRole, text: impl Into<String>) -> Self {
        self.replies.insert(role, text.into());
        self
    }
}

#[async_trait::async_trait]
impl AgentTransport for ScriptedTransport {
    async fn call(&self, request: &AgentRequest) -> Result<String, CapabilityError> {
        self.replies
            .get(&request.role)
            .cloned()
            .ok_or_else(|| CapabilityError::Unavailable(format!("no script for {}", request.role)))
    }
}

/// Canned move source: fixed labels per player index.
pub struct ScriptedMoves {
    per_player: HashMap<PlayerIdx, Vec<String>>,
}

impl ScriptedMoves {
    /// A source where every player has no options.
    pub fn none() -> Self {
        Self {
            per_player: HashMap::new(),
        }
    }
    pub fn for_player<I, S>(mut self, player: PlayerIdx, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.per_player
            .insert(player, labels.into_iter().map(Into::into).collect());
        self
    }
}

#[async_trait::async_trait]
impl MoveSource for ScriptedMoves {
    async fn generate(
        &self,
        _state: &GameState,
        player: PlayerIdx,
        limit: usize,
    ) -> Result<Vec<Move>, CapabilityError> {
        Ok(self
            .per_player
            .get(&player)
            .map(|labels| {
                labels
                    .iter()
                    .take(limit)
                    .map(|label| Move::new(label.as_str(), Category::Other, player))
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Canned transition with configurable failure behavior.
pub enum ScriptedTransition {
    /// Successor = unchanged clone of the input.
    Identity,
    /// Prune branches for these move labels; identity otherwise.
    FailFor(Vec<String>),
    /// Every candidate prunes.
    FailAll,
    /// Successor silently drops the last player (player-set violation).
    DropPlayer,
    /// Transport down: always unavailable.
    Down,
    /// Never completes; exercises deadlines.
    Stall,
}

impl ScriptedTransition {
    pub fn failing_for<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::FailFor(labels.into_iter().map(Into::into).collect())
    }
}

#[async_trait::async_trait]
impl Transition for ScriptedTransition {
    async fn apply(&self, state: &GameState, mv: &Move) -> Result<GameState, CapabilityError> {
        match self {
            Self::Identity => Ok(state.clone()),
            Self::FailFor(labels) if labels.contains(&mv.label) => {
                Err(CapabilityError::Inapplicable(mv.label.clone()))
            }
            Self::FailFor(_) => Ok(state.clone()),
            Self::FailAll => Err(CapabilityError::Inapplicable(mv.label.clone())),
            Self::DropPlayer => {
                let mut next = state.clone();
                next.players.pop();
                Ok(next)
            }
            Self::Down => Err(CapabilityError::Unavailable("scripted outage".into())),
            Self::Stall => {
                tokio::time::sleep(std::time::Duration::from_secs(1_000_000)).await;
                Ok(state.clone())
            }
        }
    }
}

/// Canned evaluator: score vectors keyed by the state's move path.
///
/// Unknown paths fall back to a constant, so partial tables stay usable.
pub struct ScriptedEvaluator {
    by_path: HashMap<String, Vec<Score>>,
    fallback: Score,
}

impl ScriptedEvaluator {
    pub fn constant(fallback: Score) -> Self {
        Self {
            by_path: HashMap::new(),
            fallback,
        }
    }
    /// Assigns the full per-player score vector for one move path.
    pub fn with_path(mut self, path: impl Into<String>, scores: Vec<Score>) -> Self {
        self.by_path.insert(path.into(), scores);
        self
    }
}

#[async_trait::async_trait]
impl Evaluator for ScriptedEvaluator {
    async fn score(
        &self,
        state: &GameState,
        player: PlayerIdx,
        _goal: &str,
    ) -> Result<Score, CapabilityError> {
        Ok(self
            .by_path
            .get(&path_of(state))
            .and_then(|scores| scores.get(player))
            .copied()
            .unwrap_or(self.fallback))
    }
}
