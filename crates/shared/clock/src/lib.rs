//! Fairground Clock Infrastructure
//!
//! Time sources behind the [`Clock`] port:
//!
//! - [`SystemClock`] - wall-clock time for live rounds
//! - [`ManualClock`] - explicitly advanced time for deterministic tests

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use fairground_ports::Clock;
