//! Simulation state and core types
//!
//! Everything a tick reads or writes lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Ball colors, in palette order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallColor {
    #[default]
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

/// Fixed palette; random picks index into this
pub const PALETTE: [BallColor; 6] = [
    BallColor::Red,
    BallColor::Orange,
    BallColor::Yellow,
    BallColor::Green,
    BallColor::Blue,
    BallColor::Purple,
];

impl BallColor {
    /// CSS color name (used as canvas fill style)
    pub fn as_str(&self) -> &'static str {
        match self {
            BallColor::Red => "red",
            BallColor::Orange => "orange",
            BallColor::Yellow => "yellow",
            BallColor::Green => "green",
            BallColor::Blue => "blue",
            BallColor::Purple => "purple",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        PALETTE
            .iter()
            .copied()
            .find(|c| c.as_str() == s.to_lowercase())
    }

    /// RGBA matching the CSS named color
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            BallColor::Red => [1.0, 0.0, 0.0, 1.0],
            BallColor::Orange => [1.0, 0.647, 0.0, 1.0],
            BallColor::Yellow => [1.0, 1.0, 0.0, 1.0],
            BallColor::Green => [0.0, 0.502, 0.0, 1.0],
            BallColor::Blue => [0.0, 0.0, 1.0, 1.0],
            BallColor::Purple => [0.502, 0.0, 0.502, 1.0],
        }
    }

    /// Map a uniform draw in [0, 1) to a palette entry
    pub fn from_unit(r: f32) -> Self {
        let idx = (r * PALETTE.len() as f32).floor() as usize;
        PALETTE[idx.min(PALETTE.len() - 1)]
    }
}

/// The ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: BallColor,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            vel: Vec2::new(BALL_START_DX, BALL_START_DY),
            radius: BALL_RADIUS,
            color: BallColor::Red,
        }
    }
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: BallColor) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
        }
    }

    /// True if `point` lies strictly inside the disk
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.radius
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Fixed drawing area, origin at top left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Disk edge is past the left or right wall
    #[inline]
    pub fn crosses_x(&self, pos: Vec2, radius: f32) -> bool {
        pos.x + radius > self.width || pos.x - radius < 0.0
    }

    /// Disk edge is past the top or bottom wall
    #[inline]
    pub fn crosses_y(&self, pos: Vec2, radius: f32) -> bool {
        pos.y + radius > self.height || pos.y - radius < 0.0
    }

    /// Whole disk fits inside (edges touching allowed)
    pub fn contains_disk(&self, pos: Vec2, radius: f32) -> bool {
        !self.crosses_x(pos, radius) && !self.crosses_y(pos, radius)
    }
}

/// Last known pointer position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PointerState {
    /// No pointer-move received yet
    #[default]
    Absent,
    At(Vec2),
}

impl PointerState {
    pub fn position(&self) -> Option<Vec2> {
        match self {
            PointerState::Absent => None,
            PointerState::At(p) => Some(*p),
        }
    }
}

/// Simulation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Running,
    Stopped,
}
