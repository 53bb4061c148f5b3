use bdr_core::Period;

/// One recorded entry in a state's running history.
///
/// History is append-only: it grows monotonically along any root-to-node
/// path and is never rewritten by a transition.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Play {
    pub period: Period,
    pub player_id: String,
    pub move_label: String,
}

impl Play {
    pub fn new(period: Period, player_id: impl Into<String>, move_label: impl Into<String>) -> Self {
        Self {
            period,
            player_id: player_id.into(),
            move_label: move_label.into(),
        }
    }
}

impl std::fmt::Display for Play {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{} {}: {}", self.period, self.player_id, self.move_label)
    }
}
