use super::*;
use bdr_core::PlayerIdx;
use bdr_core::Score;
use bdr_state::GameState;

/// Weighted-metric evaluator.
///
/// Scores a player's position as a convex combination of market share,
/// revenue capture, brand sentiment, and resource depth, each normalized to
/// [0, 1]. The business goal string is advisory here; goal conditioning is
/// what the remote variant is for. Deterministic, so scores are stable
/// across identical searches.
pub struct BalancedScorecard {
    pub share: Score,
    pub revenue: Score,
    pub sentiment: Score,
    pub resources: Score,
}

/// Resource depth saturates around this many units.
const RESOURCE_SCALE: Score = 100.0;

impl Default for BalancedScorecard {
    fn default() -> Self {
        Self {
            share: 0.40,
            revenue: 0.25,
            sentiment: 0.20,
            resources: 0.15,
        }
    }
}

#[async_trait::async_trait]
impl Evaluator for BalancedScorecard {
    async fn score(
        &self,
        state: &GameState,
        player: PlayerIdx,
        _goal: &str,
    ) -> Result<Score, CapabilityError> {
        let Some(p) = state.player(player) else {
            return Err(CapabilityError::Unavailable(format!(
                "no player at index {}",
                player
            )));
        };
        let revenue_capture = if state.market_size > 0.0 {
            (p.revenue / state.market_size).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let resource_depth = p.resources.max(0.0) / (p.resources.max(0.0) + RESOURCE_SCALE);
        Ok(self.share * p.market_share.clamp(0.0, 1.0)
            + self.revenue * revenue_capture
            + self.sentiment * p.brand_sentiment.clamp(0.0, 1.0)
            + self.resources * resource_depth)
    }
}
