use super::*;

/// Which agent persona a request addresses.
///
/// Mirrors the three wargame agents: the strategist proposes moves for the
/// primary player, the opponent answers for rivals, the simulator projects
/// state changes, and the evaluator scores outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Strategist,
    Opponent,
    Simulator,
    Evaluator,
}

impl AgentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strategist => "strategist",
            Self::Opponent => "opponent",
            Self::Simulator => "simulator",
            Self::Evaluator => "evaluator",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One request to a backing agent: a persona plus a JSON payload whose shape
/// the remote capability variants define.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AgentRequest {
    pub role: AgentRole,
    pub payload: serde_json::Value,
}

impl AgentRequest {
    pub fn new(role: AgentRole, payload: serde_json::Value) -> Self {
        Self { role, payload }
    }
}

/// Caller-supplied exchange with the backing agents.
///
/// The engine is agnostic to how answers are produced: an HTTP client, a
/// local model, a scripted table. Implementations return the agent's raw
/// text; the remote capability variants parse it (tolerating fenced or
/// embedded JSON) and map failures into the capability error taxonomy.
#[async_trait::async_trait]
pub trait AgentTransport: Send + Sync {
    async fn call(&self, request: &AgentRequest) -> Result<String, CapabilityError>;
}
