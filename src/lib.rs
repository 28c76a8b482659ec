//! Bouncing Ball - one ball, one canvas, a palette of colors
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, bounces, pointer proximity)
//! - `render`: Drawing surface abstraction (canvas 2D on web, recording elsewhere)
//! - `platform`: Fixed-interval timing and pointer coordinate handling
//! - `settings`: JSON configuration with validation

pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::BounceSimulation;

/// Startup configuration constants
pub mod consts {
    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 400.0;
    pub const VIEWPORT_HEIGHT: f32 = 400.0;

    /// Timer period between ticks (milliseconds)
    pub const TICK_INTERVAL_MS: u32 = 10;
    /// Maximum ticks run per host callback to prevent spiral of death
    pub const MAX_CATCH_UP_TICKS: u32 = 8;

    /// Ball defaults - starts near the top left corner
    pub const BALL_START_X: f32 = 25.0;
    pub const BALL_START_Y: f32 = 25.0;
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_START_DX: f32 = 4.0;
    pub const BALL_START_DY: f32 = 4.0;

    /// Speed the legacy renormalization resets the ball to every tick
    pub const LEGACY_SPEED: f32 = 2.0;
}
