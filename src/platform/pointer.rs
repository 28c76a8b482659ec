//! Pointer input forwarding
//!
//! Host pointer events arrive in display coordinates while the ball lives in
//! surface coordinates. The two only agree when the surface sits at the
//! display origin, so the probe can subtract the surface origin first.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::BounceSimulation;

/// Coordinate space pointer events are interpreted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerSpace {
    /// Use host coordinates as-is (only correct with the surface at 0,0)
    Client,
    /// Subtract the surface origin before hit-testing
    #[default]
    SurfaceLocal,
}

/// Forwards pointer moves to the simulation
#[derive(Debug, Clone, Default)]
pub struct PointerProbe {
    space: PointerSpace,
    surface_origin: Vec2,
}

impl PointerProbe {
    pub fn new(space: PointerSpace) -> Self {
        Self {
            space,
            surface_origin: Vec2::ZERO,
        }
    }

    pub fn space(&self) -> PointerSpace {
        self.space
    }

    /// Where the surface's top left corner is in host coordinates
    pub fn set_surface_origin(&mut self, x: f32, y: f32) {
        self.surface_origin = Vec2::new(x, y);
    }

    /// Map host coordinates into surface coordinates
    pub fn to_surface(&self, x: f32, y: f32) -> Vec2 {
        let raw = Vec2::new(x, y);
        match self.space {
            PointerSpace::Client => raw,
            PointerSpace::SurfaceLocal => raw - self.surface_origin,
        }
    }

    /// Handle one host pointer-move; returns true if the ball was recolored
    pub fn pointer_moved(&self, sim: &mut BounceSimulation, x: f32, y: f32) -> bool {
        sim.on_pointer_move(self.to_surface(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PointerState, SequenceSource};
    use crate::Settings;

    #[test]
    fn test_client_space_passes_through() {
        let mut probe = PointerProbe::new(PointerSpace::Client);
        probe.set_surface_origin(100.0, 50.0);
        assert_eq!(probe.to_surface(30.0, 40.0), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_surface_local_subtracts_origin() {
        let mut probe = PointerProbe::default();
        assert_eq!(probe.space(), PointerSpace::SurfaceLocal);
        probe.set_surface_origin(100.0, 50.0);
        assert_eq!(probe.to_surface(125.0, 75.0), Vec2::new(25.0, 25.0));
    }

    #[test]
    fn test_forwards_to_simulation() {
        let mut sim = BounceSimulation::new(
            &Settings::default(),
            Box::new(SequenceSource::new(vec![0.9])),
        );
        let mut probe = PointerProbe::new(PointerSpace::SurfaceLocal);
        probe.set_surface_origin(8.0, 8.0);

        // (33, 33) host = (25, 25) surface = ball center
        assert!(probe.pointer_moved(&mut sim, 33.0, 33.0));
        assert_eq!(sim.pointer(), PointerState::At(Vec2::new(25.0, 25.0)));

        // Client space ignores the origin
        let client = PointerProbe::new(PointerSpace::Client);
        assert!(client.pointer_moved(&mut sim, 40.0, 25.0));
        assert_eq!(sim.pointer(), PointerState::At(Vec2::new(40.0, 25.0)));

        let before = sim.ball().color;
        assert!(!client.pointer_moved(&mut sim, 133.0, 133.0));
        assert_eq!(sim.ball().color, before);
    }
}
