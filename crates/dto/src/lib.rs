//! Data transfer objects for API communication.
//!
//! Request and response types for the wargame API, serializable via `serde`.
//! These types bridge the gap between the Rust domain model and JSON
//! payloads; the tree travels as a flat id → record map so a UI can render
//! it without reconstructing ownership.
mod request;
mod response;

pub use request::*;
pub use response::*;
