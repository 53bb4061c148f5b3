use super::*;
use bdr_core::PlayerIdx;
use bdr_state::Category;
use bdr_state::GameState;
use bdr_state::Move;

/// Caller-supplied fixed action set.
///
/// Returns the same labels (truncated to the requested limit) at every node
/// where its player acts, making the tree reproducible when the transition
/// and evaluator are deterministic.
pub struct StaticMoves {
    labels: Vec<String>,
}

impl StaticMoves {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(Into::into)
                .filter(|l: &String| !l.trim().is_empty())
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl MoveSource for StaticMoves {
    async fn generate(
        &self,
        _state: &GameState,
        player: PlayerIdx,
        limit: usize,
    ) -> Result<Vec<Move>, CapabilityError> {
        Ok(self
            .labels
            .iter()
            .take(limit)
            .map(|label| Move::new(label.as_str(), Category::Other, player))
            .collect())
    }
}

/// The standing playbook of business actions, one flagship per category.
/// "Observe and wait" is the zero-cost fallback so a player always has at
/// least one legal option.
const PLAYBOOK: &[(&str, Category)] = &[
    ("Cut prices to undercut rivals", Category::Pricing),
    ("Launch a premium product line", Category::Product),
    ("Run a national brand campaign", Category::Marketing),
    ("Acquire a struggling competitor", Category::Acquisition),
    ("Form a distribution partnership", Category::Partnership),
    ("Automate operations end to end", Category::Technology),
    ("Observe and wait", Category::Other),
];

/// Deterministic catalog move source.
///
/// Proposes playbook entries the acting player can afford under the
/// [`MarketModel`] cost table, in fixed catalog order.
pub struct PlaybookMoves;

#[async_trait::async_trait]
impl MoveSource for PlaybookMoves {
    async fn generate(
        &self,
        state: &GameState,
        player: PlayerIdx,
        limit: usize,
    ) -> Result<Vec<Move>, CapabilityError> {
        let Some(metrics) = state.player(player) else {
            return Ok(Vec::new());
        };
        Ok(PLAYBOOK
            .iter()
            .filter(|(_, category)| metrics.resources >= category_cost(*category))
            .take(limit)
            .map(|(label, category)| Move::new(*label, *category, player))
            .collect())
    }
}

/// Fixed action set for one player, any source for the rest.
///
/// This is the wire case where the caller pre-enumerates the primary
/// player's options but leaves rivals to the configured source.
pub struct PinnedMoves {
    player: PlayerIdx,
    pinned: StaticMoves,
    fallback: std::sync::Arc<dyn MoveSource>,
}

impl PinnedMoves {
    pub fn new<I, S>(
        player: PlayerIdx,
        labels: I,
        fallback: std::sync::Arc<dyn MoveSource>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            player,
            pinned: StaticMoves::new(labels),
            fallback,
        }
    }
}

#[async_trait::async_trait]
impl MoveSource for PinnedMoves {
    async fn generate(
        &self,
        state: &GameState,
        player: PlayerIdx,
        limit: usize,
    ) -> Result<Vec<Move>, CapabilityError> {
        if player == self.player {
            self.pinned.generate(state, player, limit).await
        } else {
            self.fallback.generate(state, player, limit).await
        }
    }
}
