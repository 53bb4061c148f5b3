use bdr_core::Score;
use std::collections::BTreeMap;

/// One company's position in the simulated market.
///
/// All figures are plain numbers; transitions produce new values rather than
/// mutating in place. `extras` carries caller-defined numeric metrics the
/// engine never interprets.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerMetrics {
    pub player_id: String,
    pub market_share: Score,
    pub revenue: Score,
    pub brand_sentiment: Score,
    pub resources: Score,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, f64>,
}

impl PlayerMetrics {
    /// A player with the given id and share, neutral everywhere else.
    pub fn new(player_id: impl Into<String>, market_share: Score) -> Self {
        Self {
            player_id: player_id.into(),
            market_share,
            revenue: 0.0,
            brand_sentiment: 0.5,
            resources: 0.0,
            extras: BTreeMap::new(),
        }
    }
    pub fn with_revenue(mut self, revenue: Score) -> Self {
        self.revenue = revenue;
        self
    }
    pub fn with_sentiment(mut self, brand_sentiment: Score) -> Self {
        self.brand_sentiment = brand_sentiment;
        self
    }
    pub fn with_resources(mut self, resources: Score) -> Self {
        self.resources = resources;
        self
    }
}
