use super::*;
use bdr_core::Period;
use bdr_core::PlayerIdx;
use bdr_state::GameState;

/// Shape of one search: objective, horizon, turn order, and width limits.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// The business objective the primary player optimizes for.
    pub goal: String,
    /// Full decision periods to plan ahead.
    pub horizon_periods: Period,
    /// Cyclic turn order within a period; one tree level = one entry.
    pub rotation: Vec<PlayerIdx>,
    /// Candidate moves considered per node.
    pub branching_limit: usize,
    /// The acting player the verdict is extracted for.
    pub primary: PlayerIdx,
    /// Cap on worst-case materialized nodes; clamps the horizon up front.
    pub node_budget: usize,
}

impl SearchConfig {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            horizon_periods: bdr_core::DEFAULT_HORIZON_PERIODS,
            rotation: Vec::new(),
            branching_limit: bdr_core::DEFAULT_BRANCHING_LIMIT,
            primary: 0,
            node_budget: bdr_core::NODE_BUDGET,
        }
    }
    /// Rotation 0..n: every player moves once per period, primary first.
    pub fn for_players(mut self, n: usize) -> Self {
        self.rotation = (0..n).collect();
        self
    }
    pub fn with_rotation(mut self, rotation: Vec<PlayerIdx>) -> Self {
        self.rotation = rotation;
        self
    }
    pub fn with_horizon(mut self, periods: Period) -> Self {
        self.horizon_periods = periods;
        self
    }
    pub fn with_branching(mut self, limit: usize) -> Self {
        self.branching_limit = limit;
        self
    }
    pub fn with_primary(mut self, primary: PlayerIdx) -> Self {
        self.primary = primary;
        self
    }
    pub fn with_budget(mut self, nodes: usize) -> Self {
        self.node_budget = nodes;
        self
    }

    /// Rejects configurations that cannot describe a valid tree over `state`.
    pub fn validate(&self, state: &GameState) -> Result<(), SearchError> {
        if self.rotation.is_empty() {
            return Err(SearchError::InvalidConfig("empty rotation".into()));
        }
        if self.horizon_periods == 0 {
            return Err(SearchError::InvalidConfig("zero horizon".into()));
        }
        if self.branching_limit == 0 {
            return Err(SearchError::InvalidConfig("zero branching limit".into()));
        }
        if let Some(bad) = self.rotation.iter().find(|p| **p >= state.n()) {
            return Err(SearchError::InvalidConfig(format!(
                "rotation references player {} but state has {}",
                bad,
                state.n()
            )));
        }
        if self.primary >= state.n() {
            return Err(SearchError::InvalidConfig(format!(
                "primary player {} out of range",
                self.primary
            )));
        }
        Ok(())
    }

    /// Horizon after the node-budget clamp.
    ///
    /// Worst case the tree holds `branching ^ (periods × rotation)` nodes;
    /// the horizon is reduced up front (never mid-build) until that stays
    /// under budget, keeping at least one period.
    pub fn clamped_horizon(&self) -> Period {
        let per_period = self
            .branching_limit
            .checked_pow(self.rotation.len() as u32)
            .unwrap_or(usize::MAX);
        let mut periods = 1;
        let mut total = per_period;
        while periods < self.horizon_periods {
            match total.checked_mul(per_period) {
                Some(t) if t <= self.node_budget => {
                    total = t;
                    periods += 1;
                }
                _ => break,
            }
        }
        if periods < self.horizon_periods {
            log::warn!(
                "[config] clamping horizon {} -> {} to stay under {} nodes",
                self.horizon_periods,
                periods,
                self.node_budget
            );
        }
        periods
    }

    /// Total tree levels after clamping: one per (period, rotation slot).
    pub fn levels(&self) -> usize {
        self.clamped_horizon() * self.rotation.len()
    }
}
