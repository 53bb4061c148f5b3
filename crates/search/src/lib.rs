//! MaxN game-tree search over pluggable capabilities.
//!
//! Builds a tree of alternating-player decisions across a fixed planning
//! horizon, obtains candidate moves and state transitions from the
//! capability bundle, and propagates per-player score vectors bottom-up
//! under the MaxN rule: every player maximizes strictly its own coordinate,
//! with no zero-sum assumption between players. Two-player minimax is the
//! N=2 specialization and gets no separate code path.
//!
//! # Module Structure
//!
//! - `tree` — Petgraph-backed tree with ordered children and postorder walks
//! - `builder` — Async expansion: ordered sibling fan-out, pruning, rounds
//! - `maxn` — Leaf evaluation and bottom-up vector propagation
//! - `config` — Horizon, rotation, branching, budget clamping
//! - `error` — Search-level failure taxonomy
//!
//! # Passes
//!
//! Data flows strictly downward during expansion (root → leaves) and upward
//! during scoring (leaves → root). The tree is owned by one invocation;
//! no node, once scored, is ever rescored within the same search.
mod builder;
mod config;
mod error;
mod maxn;
mod tree;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use maxn::*;
pub use tree::*;
