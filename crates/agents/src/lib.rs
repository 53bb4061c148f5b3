//! Pluggable capabilities for the wargame search engine.
//!
//! The engine consumes three collaborator contracts, each a single-method
//! async trait: propose candidate moves, apply a move to a state, and score
//! a state for a player. Any implementation satisfies the same contract,
//! whether a fixed action list, a deterministic market model, or a remote
//! LLM-backed agent speaking JSON over a caller-supplied transport.
//!
//! ## Contracts
//!
//! - [`MoveSource`] — Candidate moves for an acting player (empty = no options)
//! - [`Transition`] — Successor state for (state, move); pure, prunable
//! - [`Evaluator`] — Per-player score for a state against the business goal
//! - [`Capabilities`] — The bundle a search invocation carries
//!
//! ## Variants
//!
//! - [`StaticMoves`] — Caller-supplied fixed action set (reproducible trees)
//! - [`PlaybookMoves`] — Deterministic catalog of business actions
//! - [`MarketModel`] — Pure numeric market transition
//! - [`BalancedScorecard`] — Weighted-metric evaluator
//! - [`RemoteMoves`] / [`RemoteTransition`] / [`RemoteEvaluator`] — Agent-backed
//!   variants over an [`AgentTransport`]
//! - [`scripted`] — Deterministic test doubles
//!
//! ## Ambient policy
//!
//! [`RetryPolicy`] time-boxes every capability call and retries transient
//! failures with exponential backoff. Inapplicable moves are never retried;
//! they prune a single branch upstream.
mod capability;
mod catalog;
mod error;
mod market;
mod parse;
mod remote;
mod retry;
mod scorecard;
mod transport;

pub mod scripted;

pub use capability::*;
pub use catalog::*;
pub use error::*;
pub use market::*;
pub use parse::*;
pub use remote::*;
pub use retry::*;
pub use scorecard::*;
pub use transport::*;
