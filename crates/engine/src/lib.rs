//! Search facade and session lifecycle.
//!
//! The two operations the API layer consumes, plus the explicit session
//! store that replaces any ambient global state:
//!
//! - [`Engine`] — `run_search` (build-and-score under a request deadline)
//!   and `expand_tree` (bounded, unscored expansion for visualization)
//! - [`SessionStore`] — session id → stored game, created on start, touched
//!   on access, expired by TTL sweep or explicit reset
//!
//! The engine owns nothing across requests: each search builds, scores,
//! serializes, and drops its tree. A deadline expiry cancels all in-flight
//! capability calls and fails the whole request; a partially-scored tree
//! is never returned.
mod engine;
mod session;

pub use engine::*;
pub use session::*;
