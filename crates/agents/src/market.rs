use super::*;
use bdr_core::Score;
use bdr_state::Category;
use bdr_state::GameState;
use bdr_state::Move;

/// Fraction of addressed market value realized as revenue per period.
const MARGIN: Score = 0.2;
/// Fraction of a period's revenue retained as deployable resources.
const RETENTION: Score = 0.1;

/// Resource cost of executing a move in the given category.
pub fn category_cost(category: Category) -> Score {
    match category {
        Category::Pricing => 10.0,
        Category::Product => 40.0,
        Category::Marketing => 25.0,
        Category::Acquisition => 60.0,
        Category::Partnership => 20.0,
        Category::Technology => 35.0,
        Category::Other => 0.0,
    }
}

/// Market share captured from rivals by a move in the given category.
fn share_gain(category: Category) -> Score {
    match category {
        Category::Pricing => 0.04,
        Category::Product => 0.05,
        Category::Marketing => 0.03,
        Category::Acquisition => 0.06,
        Category::Partnership => 0.02,
        Category::Technology => 0.03,
        Category::Other => 0.0,
    }
}

/// Brand sentiment shift for the acting player.
fn sentiment_delta(category: Category) -> Score {
    match category {
        Category::Pricing => -0.02,
        Category::Product => 0.03,
        Category::Marketing => 0.04,
        Category::Acquisition => -0.01,
        Category::Partnership => 0.02,
        Category::Technology => 0.01,
        Category::Other => 0.0,
    }
}

/// Pure numeric market transition.
///
/// Category-keyed effects: the mover pays the category cost, captures share
/// proportionally from rivals, shifts its sentiment, and every player's
/// revenue is restated from its resulting share. Inapplicable when the mover
/// cannot afford the move. Deterministic; leaves `period` and `history` to
/// the search engine per the [`Transition`] contract.
pub struct MarketModel;

#[async_trait::async_trait]
impl Transition for MarketModel {
    async fn apply(&self, state: &GameState, mv: &Move) -> Result<GameState, CapabilityError> {
        let actor = mv.acting_player;
        let Some(player) = state.player(actor) else {
            return Err(CapabilityError::Inapplicable(format!(
                "no player at index {}",
                actor
            )));
        };
        let cost = category_cost(mv.category);
        if player.resources < cost {
            return Err(CapabilityError::Inapplicable(format!(
                "{} cannot afford {} ({} < {})",
                player.player_id, mv.label, player.resources, cost
            )));
        }

        let mut next = state.clone();
        let rival_share: Score = next
            .players
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != actor)
            .map(|(_, p)| p.market_share)
            .sum();
        let gain = share_gain(mv.category).min(rival_share);
        if rival_share > 0.0 {
            for (i, p) in next.players.iter_mut().enumerate() {
                if i != actor {
                    p.market_share -= gain * (p.market_share / rival_share);
                }
            }
        }
        {
            let p = &mut next.players[actor];
            p.market_share = (p.market_share + gain).min(1.0);
            p.brand_sentiment = (p.brand_sentiment + sentiment_delta(mv.category)).clamp(0.0, 1.0);
            p.resources -= cost;
        }
        for p in next.players.iter_mut() {
            p.revenue = next.market_size * p.market_share * MARGIN;
        }
        {
            let p = &mut next.players[actor];
            p.resources += p.revenue * RETENTION;
        }
        log::trace!(
            "[market] {} plays {:?}: +{:.3} share",
            next.players[actor].player_id,
            mv.label,
            gain
        );
        Ok(next)
    }
}
