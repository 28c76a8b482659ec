//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks (fixed-interval accumulator for hosts without a timer)
//! - Pointer input (host coordinates to surface coordinates)

pub mod pointer;
pub mod ticker;

pub use pointer::{PointerProbe, PointerSpace};
pub use ticker::FixedTicker;
