//! Simulation settings
//!
//! JSON document; every field has a default so partial documents load.
//! Persisted in LocalStorage on web, read from a file by the native runner.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::PointerSpace;
use crate::sim::{Ball, BallColor, MotionPolicy, Viewport};

/// Starting ball parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub dx: f32,
    pub dy: f32,
    pub color: BallColor,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            x: BALL_START_X,
            y: BALL_START_Y,
            radius: BALL_RADIUS,
            dx: BALL_START_DX,
            dy: BALL_START_DY,
            color: BallColor::Red,
        }
    }
}

impl BallSettings {
    pub fn to_ball(&self) -> Ball {
        Ball::new(
            Vec2::new(self.x, self.y),
            Vec2::new(self.dx, self.dy),
            self.radius,
            self.color,
        )
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Timer period (milliseconds)
    pub tick_interval_ms: u32,
    pub ball: BallSettings,
    /// RNG seed; `None` seeds from the clock at startup
    pub seed: Option<u64>,
    pub motion: MotionPolicy,
    pub pointer_space: PointerSpace,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            tick_interval_ms: TICK_INTERVAL_MS,
            ball: BallSettings::default(),
            seed: None,
            motion: MotionPolicy::Legacy,
            pointer_space: PointerSpace::SurfaceLocal,
        }
    }
}

/// Settings failed to parse or validate
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "cannot read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {}", e),
            SettingsError::Invalid { field, reason } => {
                write!(f, "invalid setting `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            reason: format!("must be a positive number, got {}", value),
        })
    }
}

/// Largest magnitude accepted for any coordinate, size or velocity component
pub const MAX_SETTING_MAGNITUDE: f32 = 1.0e6;

fn require_bounded(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value.abs() <= MAX_SETTING_MAGNITUDE {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            reason: format!(
                "must be finite and within ±{}, got {}",
                MAX_SETTING_MAGNITUDE, value
            ),
        })
    }
}

impl Settings {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        require_positive("viewport_width", self.viewport_width)?;
        require_positive("viewport_height", self.viewport_height)?;
        require_positive("ball.radius", self.ball.radius)?;
        require_bounded("viewport_width", self.viewport_width)?;
        require_bounded("viewport_height", self.viewport_height)?;
        require_bounded("ball.radius", self.ball.radius)?;
        require_bounded("ball.x", self.ball.x)?;
        require_bounded("ball.y", self.ball.y)?;
        require_bounded("ball.dx", self.ball.dx)?;
        require_bounded("ball.dy", self.ball.dy)?;
        // Host timers take a signed 32-bit millisecond delay
        if self.tick_interval_ms == 0 || i32::try_from(self.tick_interval_ms).is_err() {
            return Err(SettingsError::Invalid {
                field: "tick_interval_ms",
                reason: format!("must be between 1 and {}", i32::MAX),
            });
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "bouncing_ball_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
