//! Fairground Ports
//!
//! Port definitions (traits) for the Fairground market simulation.
//! These define the boundaries between domain logic and infrastructure.

mod clock;
mod store;

pub use clock::Clock;
pub use store::{ScoreStore, StoreError, StoreResult};
