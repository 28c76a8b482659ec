//! Deterministic simulation module
//!
//! All ball logic lives here. This module must be pure and deterministic:
//! - One tick per timer callback, no wall-clock time
//! - Randomness only through an injected `RandomSource`
//! - No platform dependencies; drawing goes through `RenderSurface`

pub mod rng;
pub mod simulation;
pub mod state;
pub mod tick;

pub use rng::{PcgSource, RandomSource, SequenceSource};
pub use simulation::BounceSimulation;
pub use state::{Ball, BallColor, PALETTE, PointerState, RunState, Viewport};
pub use tick::{BounceReport, MotionPolicy, update_ball};
