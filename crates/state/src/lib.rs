//! Business wargame state model.
//!
//! The simulated market at a point in time, and the moves that change it.
//!
//! ## State Representation
//!
//! - [`GameState`] — Snapshot of one planning period: market, players, history
//! - [`PlayerMetrics`] — One company's position: share, revenue, sentiment, resources
//! - [`Play`] — A recorded (period, player, move) entry in the running history
//!
//! ## Moves
//!
//! - [`Move`] — A strategic action proposed for a player
//! - [`Category`] — Advisory classification of a move (never drives control flow)
//!
//! States are immutable per tree node: applying a move always yields a new
//! [`GameState`]. Player order is fixed for the lifetime of a search; a
//! player's position in `players` is its index everywhere else.
mod metrics;
mod moves;
mod play;
mod state;

pub use metrics::*;
pub use moves::*;
pub use play::*;
pub use state::*;
