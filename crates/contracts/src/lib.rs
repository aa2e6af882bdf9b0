//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Every recording carries its own device clock (seconds, f64)
//! - A single shared trigger event anchors all clocks to one session origin
//! - No drift correction: one trigger instant, zero-drift assumption

mod audio;
mod blueprint;
mod error;
mod recording;
mod sink;
mod synced;
mod table;

pub use audio::*;
pub use blueprint::*;
pub use error::*;
pub use recording::*;
pub use sink::TableSink;
pub use synced::*;
pub use table::*;
