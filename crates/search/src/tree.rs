use bdr_core::Period;
use bdr_core::PlayerIdx;
use bdr_core::Score;
use bdr_state::GameState;
use bdr_state::Move;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

/// Per-player scores at a node, indexed by player position.
pub type ScoreVector = Vec<Score>;

/// Everything a node knows about itself.
///
/// `player` and `turn_period` describe the move that created the node and
/// are `None` only at the root. `score` stays absent until the MaxN pass.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub state: GameState,
    pub player: Option<PlayerIdx>,
    pub turn_period: Option<Period>,
    pub depth: usize,
    pub score: Option<ScoreVector>,
}

/// A decision tree for one search invocation.
///
/// Wraps a petgraph `DiGraph`; vertices carry [`NodeData`], edges carry the
/// [`Move`] taken. The root is always index 0. Children are exposed in
/// insertion order, which by construction equals move-generation order,
/// the tie-break for "first discovered" during scoring.
#[derive(Debug)]
pub struct Tree {
    graph: DiGraph<NodeData, Move>,
}

impl Tree {
    /// A one-node tree holding the initial state.
    pub fn seed(state: GameState) -> Self {
        let mut graph = DiGraph::default();
        graph.add_node(NodeData {
            state,
            player: None,
            turn_period: None,
            depth: 0,
            score: None,
        });
        Self { graph }
    }
    pub fn root(&self) -> NodeIndex {
        NodeIndex::new(0)
    }
    /// Number of nodes in the tree.
    pub fn n(&self) -> usize {
        self.graph.node_count()
    }
    /// Attach a child produced by `mv` under `parent`.
    pub fn grow(&mut self, parent: NodeIndex, mv: Move, data: NodeData) -> NodeIndex {
        let child = self.graph.add_node(data);
        self.graph.add_edge(parent, child, mv);
        child
    }
    pub fn data(&self, index: NodeIndex) -> &NodeData {
        &self.graph[index]
    }
    pub fn set_score(&mut self, index: NodeIndex, score: ScoreVector) {
        self.graph[index].score = Some(score);
    }
    /// Direct children in insertion order. Petgraph iterates neighbors
    /// newest-first, so the raw order is reversed here.
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut children = self
            .graph
            .neighbors_directed(index, petgraph::Direction::Outgoing)
            .collect::<Vec<_>>();
        children.reverse();
        children
    }
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(index, petgraph::Direction::Incoming)
            .next()
    }
    /// The move on the edge from this node's parent, if any.
    pub fn incoming(&self, index: NodeIndex) -> Option<&Move> {
        self.graph
            .edges_directed(index, petgraph::Direction::Incoming)
            .next()
            .map(|edge| edge.weight())
    }
    pub fn is_root(&self, index: NodeIndex) -> bool {
        index == self.root()
    }
    pub fn is_leaf(&self, index: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(index, petgraph::Direction::Outgoing)
            .next()
            .is_none()
    }
    /// All node indices in creation order.
    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }
    /// All leaves in creation order.
    pub fn leaves(&self) -> Vec<NodeIndex> {
        self.indices().filter(|i| self.is_leaf(*i)).collect()
    }
    /// Nodes in postorder (leaves first) for bottom-up value propagation.
    pub fn postorder(&self) -> Vec<NodeIndex> {
        let mut result = Vec::with_capacity(self.n());
        let mut stack = vec![(self.root(), false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                result.push(node);
            } else {
                stack.push((node, true));
                for child in self.children(node) {
                    stack.push((child, false));
                }
            }
        }
        result
    }
    /// Longest root-to-leaf distance in edges.
    pub fn depth(&self) -> usize {
        self.indices().map(|i| self.data(i).depth).max().unwrap_or(0)
    }
}
