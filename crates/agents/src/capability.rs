use super::*;
use bdr_core::PlayerIdx;
use bdr_core::Score;
use bdr_state::GameState;
use bdr_state::Move;
use std::sync::Arc;

/// Proposes candidate moves for an acting player.
///
/// Returns between 0 and `limit` moves. An empty result means the player has
/// no options at that node; the search treats the node as a natural leaf,
/// not an error. Implementations need not be deterministic, and the engine
/// never re-invokes except when retrying a transient failure.
#[async_trait::async_trait]
pub trait MoveSource: Send + Sync {
    async fn generate(
        &self,
        state: &GameState,
        player: PlayerIdx,
        limit: usize,
    ) -> Result<Vec<Move>, CapabilityError>;
}

/// Applies a move to a state and yields the successor.
///
/// Pure in (state, move): no hidden dependency on tree position. The
/// returned state must carry the same players in the same order, and must
/// leave `period` and `history` untouched, since the search engine alone
/// knows the rotation and owns round bookkeeping. An `Inapplicable` error
/// prunes that single branch.
#[async_trait::async_trait]
pub trait Transition: Send + Sync {
    async fn apply(&self, state: &GameState, mv: &Move) -> Result<GameState, CapabilityError>;
}

/// Scores a state for one player against the stated business goal.
///
/// Higher is strictly better for `player`. The scale is evaluator-defined
/// but must stay consistent within one search; the engine never mixes
/// evaluators mid-tree. Score drift across calls is expected when the
/// backing agent is non-deterministic and is never retried.
#[async_trait::async_trait]
pub trait Evaluator: Send + Sync {
    async fn score(
        &self,
        state: &GameState,
        player: PlayerIdx,
        goal: &str,
    ) -> Result<Score, CapabilityError>;
}

/// The capability bundle one search invocation carries.
///
/// Selected by construction, not inheritance: swap any member for a static,
/// heuristic, or remote variant behind the same contract.
#[derive(Clone)]
pub struct Capabilities {
    pub moves: Arc<dyn MoveSource>,
    pub transition: Arc<dyn Transition>,
    pub evaluator: Arc<dyn Evaluator>,
}

impl Capabilities {
    pub fn new(
        moves: Arc<dyn MoveSource>,
        transition: Arc<dyn Transition>,
        evaluator: Arc<dyn Evaluator>,
    ) -> Self {
        Self {
            moves,
            transition,
            evaluator,
        }
    }
    /// Fully local bundle: playbook moves, market-model transitions,
    /// scorecard evaluation. Deterministic end to end.
    pub fn local() -> Self {
        Self::new(
            Arc::new(PlaybookMoves),
            Arc::new(MarketModel),
            Arc::new(BalancedScorecard::default()),
        )
    }
    /// Same bundle with the move source replaced (e.g. by a caller-supplied
    /// fixed action set).
    pub fn with_moves(mut self, moves: Arc<dyn MoveSource>) -> Self {
        self.moves = moves;
        self
    }
}
