use super::*;
use bdr_agents::Capabilities;
use bdr_agents::Evaluator;
use bdr_agents::RetryPolicy;
use bdr_core::PlayerIdx;
use bdr_core::Score;
use std::sync::Arc;

/// The extracted answer for the primary player.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Label on the root edge of the chosen branch; absent when the root
    /// has no children.
    pub best_move: Option<String>,
    /// The primary player's coordinate of the root's inherited vector.
    pub best_score: Score,
}

/// Bottom-up MaxN scoring over a built tree.
///
/// Leaves are scored first (the full per-player vector, concurrently
/// across leaves), then every internal node inherits, unchanged, the entire
/// vector of the child whose coordinate for the player to move at that node
/// is maximal. MaxN never blends scores across branches, and no alpha-beta
/// analogue applies: sibling bounds do not compose across independent
/// per-player maximization coordinates, so the absence of pruning is a
/// deliberate tradeoff.
///
/// Ties break to the earliest child in discovery order. Scored nodes are
/// never rescored within the same search.
pub struct MaxN {
    evaluator: Arc<dyn Evaluator>,
    goal: String,
    primary: PlayerIdx,
    retry: RetryPolicy,
}

impl MaxN {
    pub fn new(caps: &Capabilities, config: &SearchConfig) -> Self {
        Self {
            evaluator: caps.evaluator.clone(),
            goal: config.goal.clone(),
            primary: config.primary,
            retry: RetryPolicy::default(),
        }
    }
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Scores the tree in place and extracts the verdict.
    pub async fn evaluate(&self, tree: &mut Tree) -> Result<Verdict, SearchError> {
        self.score_leaves(tree).await?;
        self.propagate(tree);
        Ok(self.verdict(tree))
    }

    /// Evaluates every unscored leaf for every player, concurrently across
    /// leaves. Cutoff nodes are leaves by construction, so the depth-limited
    /// case needs no special path.
    async fn score_leaves(&self, tree: &mut Tree) -> Result<(), SearchError> {
        let unscored = tree
            .leaves()
            .into_iter()
            .filter(|i| tree.data(*i).score.is_none())
            .collect::<Vec<_>>();
        log::debug!("[maxn] scoring {} leaves", unscored.len());
        let evaluations = unscored.iter().map(|&index| {
            let state = &tree.data(index).state;
            async move {
                let per_player = (0..state.n()).map(|player| {
                    self.retry
                        .run("evaluator", move || self.evaluator.score(state, player, &self.goal))
                });
                futures::future::join_all(per_player)
                    .await
                    .into_iter()
                    .collect::<Result<ScoreVector, _>>()
                    .map(|scores| (index, scores))
            }
        });
        let scored = futures::future::join_all(evaluations).await;
        for result in scored {
            let (index, scores) = result?;
            tree.set_score(index, scores);
        }
        Ok(())
    }

    /// Postorder pass: each internal node inherits its best child's whole
    /// vector, judged by the coordinate of the player to move at that node.
    /// The root is always judged from the primary player's perspective,
    /// whatever the rotation says.
    fn propagate(&self, tree: &mut Tree) {
        for index in tree.postorder() {
            if tree.data(index).score.is_some() {
                continue;
            }
            let children = tree.children(index);
            if children.is_empty() {
                continue;
            }
            let acting = if tree.is_root(index) {
                self.primary
            } else {
                tree.data(children[0])
                    .player
                    .expect("non-root nodes carry their mover")
            };
            let chosen = Self::best_child(tree, &children, acting);
            let inherited = tree
                .data(chosen)
                .score
                .clone()
                .expect("postorder scores children first");
            tree.set_score(index, inherited);
        }
    }

    /// The child maximizing `score[coordinate]`; earliest wins ties.
    fn best_child(tree: &Tree, children: &[petgraph::graph::NodeIndex], coordinate: PlayerIdx) -> petgraph::graph::NodeIndex {
        let mut best = children[0];
        let mut best_score = Self::coordinate(tree, best, coordinate);
        for &child in &children[1..] {
            let score = Self::coordinate(tree, child, coordinate);
            if score > best_score {
                best = child;
                best_score = score;
            }
        }
        best
    }

    fn coordinate(tree: &Tree, index: petgraph::graph::NodeIndex, coordinate: PlayerIdx) -> Score {
        tree.data(index)
            .score
            .as_ref()
            .and_then(|v| v.get(coordinate))
            .copied()
            .unwrap_or(Score::NEG_INFINITY)
    }

    fn verdict(&self, tree: &Tree) -> Verdict {
        let root = tree.root();
        let best_score = Self::coordinate(tree, root, self.primary);
        let children = tree.children(root);
        if children.is_empty() {
            return Verdict {
                best_move: None,
                best_score,
            };
        }
        let chosen = Self::best_child(tree, &children, self.primary);
        Verdict {
            best_move: tree.incoming(chosen).map(|mv| mv.label.clone()),
            best_score,
        }
    }
}
