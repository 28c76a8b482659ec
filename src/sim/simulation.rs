//! The bouncing ball simulation object
//!
//! Owns the ball, the viewport, the last pointer position and the random
//! source. Hosts call `tick` on a fixed period and `on_pointer_move` as
//! pointer events arrive.

use glam::Vec2;

use super::rng::{PcgSource, RandomSource};
use super::state::{Ball, BallColor, PointerState, RunState, Viewport};
use super::tick::{BounceReport, MotionPolicy, update_ball};
use crate::Settings;
use crate::render::RenderSurface;

#[derive(Debug)]
pub struct BounceSimulation {
    ball: Ball,
    viewport: Viewport,
    pointer: PointerState,
    rng: Box<dyn RandomSource>,
    motion: MotionPolicy,
    /// Starting speed, held constant by `MotionPolicy::ReflectClamp`
    cruise_speed: f32,
    run_state: RunState,
    /// Completed physics updates
    time_ticks: u64,
    warned_degenerate: bool,
}

impl BounceSimulation {
    /// Build from settings with an explicit random source
    pub fn new(settings: &Settings, rng: Box<dyn RandomSource>) -> Self {
        let ball = settings.ball.to_ball();
        let cruise_speed = ball.speed();
        Self {
            ball,
            viewport: settings.viewport(),
            pointer: PointerState::Absent,
            rng,
            motion: settings.motion,
            cruise_speed,
            run_state: RunState::Running,
            time_ticks: 0,
            warned_degenerate: false,
        }
    }

    /// Build from settings with a PCG stream for `seed`
    pub fn seeded(settings: &Settings, seed: u64) -> Self {
        Self::new(settings, Box::new(PcgSource::new(seed)))
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn motion(&self) -> MotionPolicy {
        self.motion
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn start(&mut self) {
        if self.run_state != RunState::Running {
            self.run_state = RunState::Running;
            log::info!("Simulation started at tick {}", self.time_ticks);
        }
    }

    pub fn stop(&mut self) {
        if self.run_state != RunState::Stopped {
            self.run_state = RunState::Stopped;
            log::info!("Simulation stopped at tick {}", self.time_ticks);
        }
    }

    /// One timer period: clear, draw the current ball, then advance physics.
    /// Does nothing (and returns `None`) while stopped.
    pub fn tick<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> Option<BounceReport> {
        if !self.is_running() {
            return None;
        }
        self.render(surface);
        Some(self.update())
    }

    /// Draw the current state
    pub fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear(&self.viewport);
        surface.fill_circle(self.ball.pos, self.ball.radius, self.ball.color);
    }

    /// Advance the ball: move, bounce, renormalize
    pub fn update(&mut self) -> BounceReport {
        let report = update_ball(
            &mut self.ball,
            &self.viewport,
            self.rng.as_mut(),
            self.motion,
            self.cruise_speed,
        );
        self.time_ticks += 1;

        if report.bounced() {
            log::debug!(
                "Bounce (x: {}, y: {}) at ({:.1}, {:.1}) -> {:?}",
                report.bounced_x,
                report.bounced_y,
                self.ball.pos.x,
                self.ball.pos.y,
                self.ball.color
            );
        }
        if report.renormalize_skipped {
            if !self.warned_degenerate {
                log::warn!("Ball velocity has no magnitude; skipping renormalization");
                self.warned_degenerate = true;
            }
        } else {
            self.warned_degenerate = false;
        }
        log::trace!(
            "Tick {}: pos=({:.2}, {:.2}) vel=({:.3}, {:.3})",
            self.time_ticks,
            self.ball.pos.x,
            self.ball.pos.y,
            self.ball.vel.x,
            self.ball.vel.y
        );

        report
    }

    /// Record the pointer position (surface coordinates) and recolor the ball
    /// if the pointer is inside it. Re-evaluated on every call.
    pub fn on_pointer_move(&mut self, pos: Vec2) -> bool {
        self.pointer = PointerState::At(pos);
        if !self.ball.contains(pos) {
            return false;
        }
        self.ball.color = BallColor::from_unit(self.rng.next_unit());
        log::debug!("Pointer over ball, recolored to {:?}", self.ball.color);
        true
    }
}
