use super::*;
use bdr_agents::Capabilities;
use bdr_agents::CapabilityError;
use bdr_agents::RetryPolicy;
use bdr_core::Period;
use bdr_state::GameState;
use bdr_state::Move;
use bdr_state::Play;
use futures::FutureExt;
use futures::future::BoxFuture;
use petgraph::graph::NodeIndex;

/// Recursive tree expansion over the capability bundle.
///
/// At each non-terminal node: ask the move source for the acting player's
/// candidates (capped at the branching limit), apply the transition to every
/// candidate concurrently, prune inapplicable branches, and recurse into the
/// survivors. Sibling subtrees expand in parallel (the dominant latency is
/// the capability calls), but children are always recorded in the move
/// source's order, whatever the completion order of the concurrent calls.
///
/// Round bookkeeping lives here, not in transitions: the builder appends the
/// history record for each move and advances the period exactly when the
/// last player in the rotation has moved.
pub struct TreeBuilder {
    caps: Capabilities,
    config: SearchConfig,
    retry: RetryPolicy,
}

/// A fully-expanded subtree, produced concurrently and grafted into the
/// petgraph in order afterwards.
struct Sprout {
    mv: Move,
    state: GameState,
    turn_period: Period,
    children: Vec<Sprout>,
}

impl TreeBuilder {
    pub fn new(caps: Capabilities, config: SearchConfig) -> Self {
        Self {
            caps,
            config,
            retry: RetryPolicy::default(),
        }
    }
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Eagerly materializes the whole tree to the (budget-clamped) horizon.
    pub async fn build(&self, initial: GameState) -> Result<Tree, SearchError> {
        self.expand(initial, usize::MAX).await
    }

    /// Bounded expansion to at most `max_depth` levels; used for on-demand
    /// visualization. With deterministic capabilities this produces exactly
    /// the first `max_depth` levels of what `build` would produce.
    pub async fn expand(&self, initial: GameState, max_depth: usize) -> Result<Tree, SearchError> {
        self.config.validate(&initial)?;
        let cap = self.config.levels().min(max_depth);
        let children = self.offspring(&initial, 0, cap).await?;
        let mut tree = Tree::seed(initial);
        let root = tree.root();
        for sprout in children {
            Self::graft(&mut tree, root, sprout, 1);
        }
        log::debug!("[builder] expanded {} nodes to depth {}", tree.n(), tree.depth());
        Ok(tree)
    }

    /// Expands all children of one node. Returns an empty vec at terminal
    /// nodes: horizon reached, no moves proposed, or every branch pruned.
    fn offspring<'a>(
        &'a self,
        state: &'a GameState,
        depth: usize,
        cap: usize,
    ) -> BoxFuture<'a, Result<Vec<Sprout>, SearchError>> {
        async move {
            if depth >= cap {
                return Ok(Vec::new());
            }
            let rotation = &self.config.rotation;
            let player = rotation[depth % rotation.len()];
            let turn_period = depth / rotation.len();
            let limit = self.config.branching_limit;
            let moves = self
                .retry
                .run("move source", || self.caps.moves.generate(state, player, limit))
                .await?;
            let moves = moves
                .into_iter()
                .filter(Move::is_labeled)
                .take(limit)
                .map(|mut mv| {
                    mv.acting_player = player;
                    mv
                })
                .collect::<Vec<_>>();
            if moves.is_empty() {
                log::debug!("[builder] player {} has no options at depth {}", player, depth);
                return Ok(Vec::new());
            }
            let round_complete = (depth + 1) % rotation.len() == 0;
            let branches = moves
                .into_iter()
                .map(|mv| self.branch(state, mv, depth, cap, turn_period, round_complete));
            let mut children = Vec::new();
            for result in futures::future::join_all(branches).await {
                if let Some(sprout) = result? {
                    children.push(sprout);
                }
            }
            if children.is_empty() {
                log::debug!("[builder] all branches pruned at depth {}", depth);
            }
            Ok(children)
        }
        .boxed()
    }

    /// Applies one candidate move and expands the resulting subtree.
    /// `Ok(None)` means the branch was pruned.
    async fn branch(
        &self,
        state: &GameState,
        mv: Move,
        depth: usize,
        cap: usize,
        turn_period: Period,
        round_complete: bool,
    ) -> Result<Option<Sprout>, SearchError> {
        let applied = self
            .retry
            .run("transition", || self.caps.transition.apply(state, &mv))
            .await;
        let mut succ = match applied {
            Ok(succ) => succ,
            Err(CapabilityError::Inapplicable(reason)) => {
                log::debug!("[builder] pruned {:?}: {}", mv.label, reason);
                return Ok(None);
            }
            Err(e) => return Err(SearchError::Capability(e)),
        };
        if !state.same_players(&succ) {
            return Err(SearchError::InconsistentPlayers { mv: mv.label.clone() });
        }
        // round bookkeeping is core-owned, whatever the transition returned
        succ.period = state.period;
        succ.history = state.history.clone();
        let player_id = state
            .player(mv.acting_player)
            .map(|p| p.player_id.clone())
            .unwrap_or_default();
        succ.record(Play::new(turn_period, player_id, mv.label.clone()));
        if round_complete {
            succ.advance_period();
        }
        let children = self.offspring(&succ, depth + 1, cap).await?;
        Ok(Some(Sprout {
            mv,
            state: succ,
            turn_period,
            children,
        }))
    }

    /// Folds a sprouted subtree into the petgraph, preserving child order.
    fn graft(tree: &mut Tree, parent: NodeIndex, sprout: Sprout, depth: usize) {
        let Sprout {
            mv,
            state,
            turn_period,
            children,
        } = sprout;
        let player = mv.acting_player;
        let index = tree.grow(
            parent,
            mv,
            NodeData {
                state,
                player: Some(player),
                turn_period: Some(turn_period),
                depth,
                score: None,
            },
        );
        for child in children {
            Self::graft(tree, index, child, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bdr_agents::scripted::*;
    use bdr_state::PlayerMetrics;
    use std::sync::Arc;

    fn duo() -> GameState {
        GameState::new(
            100.0,
            vec![PlayerMetrics::new("Us", 0.5), PlayerMetrics::new("Them", 0.5)],
        )
    }

    fn caps(moves: ScriptedMoves, transition: ScriptedTransition) -> Capabilities {
        Capabilities::new(
            Arc::new(moves),
            Arc::new(transition),
            Arc::new(ScriptedEvaluator::constant(0.5)),
        )
    }

    fn config() -> SearchConfig {
        SearchConfig::new("grow").for_players(2).with_horizon(1)
    }

    #[tokio::test]
    async fn structure_holds_after_build() {
        let caps = caps(
            ScriptedMoves::none()
                .for_player(0, ["A", "B"])
                .for_player(1, ["X", "Y"]),
            ScriptedTransition::Identity,
        );
        let tree = TreeBuilder::new(caps, config()).build(duo()).await.unwrap();
        // 1 root + 2 + 4
        assert_eq!(tree.n(), 7);
        for index in tree.indices() {
            if tree.is_root(index) {
                assert!(tree.parent(index).is_none());
            } else {
                assert!(tree.parent(index).is_some());
                // no node is its own ancestor
                let mut seen = vec![index];
                let mut cursor = index;
                while let Some(up) = tree.parent(cursor) {
                    assert!(!seen.contains(&up));
                    seen.push(up);
                    cursor = up;
                }
            }
        }
    }

    #[tokio::test]
    async fn levels_alternate_players_and_periods_advance() {
        let caps = caps(
            ScriptedMoves::none()
                .for_player(0, ["A"])
                .for_player(1, ["X"]),
            ScriptedTransition::Identity,
        );
        let config = config().with_horizon(2);
        let tree = TreeBuilder::new(caps, config).build(duo()).await.unwrap();
        // chain: root -> A(p0) -> X(p1) -> A(p0) -> X(p1)
        assert_eq!(tree.n(), 5);
        let mut cursor = tree.root();
        let mut expected = [(0, 0), (1, 0), (0, 1), (1, 1)].iter();
        while let Some(child) = tree.children(cursor).first().copied() {
            let (player, period) = expected.next().unwrap();
            assert_eq!(tree.data(child).player, Some(*player));
            assert_eq!(tree.data(child).turn_period, Some(*period));
            cursor = child;
        }
        // both players moved twice; each round completion bumped the period
        let leaf_state = &tree.data(cursor).state;
        assert_eq!(leaf_state.period, 2);
        assert_eq!(leaf_state.history.len(), 4);
    }

    #[tokio::test]
    async fn branching_cap_is_enforced() {
        let caps = caps(
            ScriptedMoves::none()
                .for_player(0, ["a", "b", "c", "d", "e"])
                .for_player(1, ["x", "y", "z", "w", "v"]),
            ScriptedTransition::Identity,
        );
        let config = config().with_branching(2);
        let tree = TreeBuilder::new(caps, config).build(duo()).await.unwrap();
        for index in tree.indices() {
            assert!(tree.children(index).len() <= 2);
        }
    }

    #[tokio::test]
    async fn horizon_bounds_every_path() {
        let caps = caps(
            ScriptedMoves::none()
                .for_player(0, ["a", "b"])
                .for_player(1, ["x", "y"]),
            ScriptedTransition::Identity,
        );
        let config = config().with_horizon(3).with_branching(2);
        let tree = TreeBuilder::new(caps, config).build(duo()).await.unwrap();
        assert!(tree.depth() <= 3 * 2);
        for leaf in tree.leaves() {
            assert_eq!(tree.data(leaf).depth, 6);
        }
    }

    #[tokio::test]
    async fn empty_move_set_is_a_natural_leaf() {
        let caps = caps(ScriptedMoves::none(), ScriptedTransition::Identity);
        let tree = TreeBuilder::new(caps, config()).build(duo()).await.unwrap();
        assert_eq!(tree.n(), 1);
        assert!(tree.is_leaf(tree.root()));
    }

    #[tokio::test]
    async fn pruned_branches_disappear_silently() {
        let caps = caps(
            ScriptedMoves::none()
                .for_player(0, ["good", "bad"])
                .for_player(1, ["x"]),
            ScriptedTransition::failing_for(["bad"]),
        );
        let tree = TreeBuilder::new(caps, config()).build(duo()).await.unwrap();
        let roots = tree.children(tree.root());
        assert_eq!(roots.len(), 1);
        assert_eq!(tree.incoming(roots[0]).unwrap().label, "good");
    }

    #[tokio::test]
    async fn all_pruned_makes_a_leaf_not_an_error() {
        let caps = caps(
            ScriptedMoves::none()
                .for_player(0, ["a", "b"])
                .for_player(1, ["x"]),
            ScriptedTransition::FailAll,
        );
        let tree = TreeBuilder::new(caps, config()).build(duo()).await.unwrap();
        assert_eq!(tree.n(), 1);
        assert!(tree.is_leaf(tree.root()));
    }

    #[tokio::test]
    async fn dropped_player_is_fatal() {
        let caps = caps(
            ScriptedMoves::none().for_player(0, ["a"]).for_player(1, ["x"]),
            ScriptedTransition::DropPlayer,
        );
        let err = TreeBuilder::new(caps, config()).build(duo()).await.unwrap_err();
        assert!(matches!(err, SearchError::InconsistentPlayers { .. }));
    }

    #[tokio::test]
    async fn outage_fails_the_whole_build() {
        let caps = caps(
            ScriptedMoves::none().for_player(0, ["a"]).for_player(1, ["x"]),
            ScriptedTransition::Down,
        );
        let builder = TreeBuilder::new(caps, config()).with_retry(RetryPolicy::once());
        let err = builder.build(duo()).await.unwrap_err();
        assert!(matches!(err, SearchError::Capability(_)));
    }

    #[tokio::test]
    async fn bounded_expand_is_a_prefix_of_build() {
        let caps = caps(
            ScriptedMoves::none()
                .for_player(0, ["a", "b"])
                .for_player(1, ["x", "y"]),
            ScriptedTransition::Identity,
        );
        let builder = TreeBuilder::new(caps, config().with_horizon(2));
        let full = builder.build(duo()).await.unwrap();
        let partial = builder.expand(duo(), 1).await.unwrap();
        assert_eq!(partial.depth(), 1);
        assert_eq!(partial.n(), 3);
        let labels = |tree: &Tree| {
            tree.children(tree.root())
                .into_iter()
                .map(|c| tree.incoming(c).unwrap().label.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(labels(&full), labels(&partial));
    }
}
