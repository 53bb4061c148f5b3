use bdr_agents::CapabilityError;

/// Failure modes of a whole search request.
///
/// The engine never returns a best move computed from a partially-failed
/// tree: any of these aborts the request with a single structured cause.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A capability stayed unavailable after bounded retries.
    Capability(CapabilityError),
    /// A successor state dropped or reordered players; score-vector indices
    /// would be ambiguous from here on.
    InconsistentPlayers { mv: String },
    /// The request-level deadline expired; all in-flight capability calls
    /// were cancelled.
    DeadlineExceeded,
    /// The search configuration cannot describe a valid tree.
    InvalidConfig(String),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Capability(e) => write!(f, "search failed: {}", e),
            Self::InconsistentPlayers { mv } => {
                write!(f, "inconsistent player set after move: {}", mv)
            }
            Self::DeadlineExceeded => write!(f, "search deadline exceeded"),
            Self::InvalidConfig(s) => write!(f, "invalid search config: {}", s),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<CapabilityError> for SearchError {
    fn from(e: CapabilityError) -> Self {
        Self::Capability(e)
    }
}

impl SearchError {
    /// Stable machine-readable kind for the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Capability(_) => "capability_unavailable",
            Self::InconsistentPlayers { .. } => "inconsistent_player_set",
            Self::DeadlineExceeded => "deadline_exceeded",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}
