use super::*;
use bdr_core::Period;
use bdr_core::PlayerIdx;
use std::collections::BTreeMap;

/// Named environment parameters (growth rate, competitive intensity, ...).
/// Schema is caller-defined; the engine carries these opaquely.
pub type MarketConditions = BTreeMap<String, serde_json::Value>;

/// Snapshot of the simulated market at one point in the planning horizon.
///
/// Player order is fixed for the whole tree: a player's position in
/// `players` is its index in every rotation, score vector, and move.
/// Transitions never mutate a state; they produce a successor.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GameState {
    pub period: Period,
    pub market_size: f64,
    pub players: Vec<PlayerMetrics>,
    #[serde(default, skip_serializing_if = "MarketConditions::is_empty")]
    pub market_conditions: MarketConditions,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Play>,
}

impl GameState {
    pub fn new(market_size: f64, players: Vec<PlayerMetrics>) -> Self {
        Self {
            period: 0,
            market_size,
            players,
            market_conditions: MarketConditions::new(),
            history: Vec::new(),
        }
    }
    /// Number of players; positions `0..n()` are valid indices.
    pub fn n(&self) -> usize {
        self.players.len()
    }
    pub fn player(&self, idx: PlayerIdx) -> Option<&PlayerMetrics> {
        self.players.get(idx)
    }
    /// Position of a player by id, if present.
    pub fn index_of(&self, player_id: &str) -> Option<PlayerIdx> {
        self.players.iter().position(|p| p.player_id == player_id)
    }
    /// True when `other` carries the same players in the same order.
    /// Score-vector indices are only meaningful under this equivalence.
    pub fn same_players(&self, other: &Self) -> bool {
        self.players.len() == other.players.len()
            && self
                .players
                .iter()
                .zip(other.players.iter())
                .all(|(a, b)| a.player_id == b.player_id)
    }
    /// Appends a history entry. History never shrinks.
    pub fn record(&mut self, play: Play) {
        self.history.push(play);
    }
    /// Advances to the next planning period.
    pub fn advance_period(&mut self) {
        self.period += 1;
    }
    /// The most recent recorded play, if any.
    pub fn last_play(&self) -> Option<&Play> {
        self.history.last()
    }
}
