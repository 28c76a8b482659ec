//! Drawing surface abstraction
//!
//! The simulation only needs two primitives: wipe the viewport and fill a
//! disk. Web builds draw through a canvas 2D context; native builds and
//! tests record commands instead.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::sim::{BallColor, Viewport};

/// Something the simulation can draw a frame onto
pub trait RenderSurface {
    /// Erase everything inside the viewport
    fn clear(&mut self, viewport: &Viewport);
    /// Draw a filled disk
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: BallColor);
}

/// A single recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    FillCircle { center: Vec2, radius: f32, color: BallColor },
}

/// Surface that keeps the draw calls of the current frame
///
/// `clear` starts a new frame, so only the latest frame is retained.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls since the last clear (the clear included)
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames started
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Last disk drawn this frame
    pub fn last_circle(&self) -> Option<(Vec2, f32, BallColor)> {
        self.commands.iter().rev().find_map(|cmd| match *cmd {
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => Some((center, radius, color)),
            DrawCommand::Clear { .. } => None,
        })
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self, viewport: &Viewport) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear {
            width: viewport.width,
            height: viewport.height,
        });
        self.frames += 1;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: BallColor) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }
}
