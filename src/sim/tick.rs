//! Per-tick ball physics
//!
//! Move, bounce off walls with a randomized reflection, then renormalize speed.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::{Ball, BallColor, Viewport};
use crate::consts::LEGACY_SPEED;

/// How bounces and speed are resolved after the ball moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPolicy {
    /// Randomized reflection, then velocity divided by (magnitude / 2).
    /// Speed snaps to 2 after every tick and the ball can jitter against a
    /// wall when a bounce leaves it still outside.
    #[default]
    Legacy,
    /// Same randomized reflection, but the new component always points back
    /// into the viewport, the disk is clamped inside, and speed is held at
    /// the starting speed.
    ReflectClamp,
}

/// What happened during one physics update
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BounceReport {
    pub bounced_x: bool,
    pub bounced_y: bool,
    /// Final color if any bounce reassigned it this tick
    pub recolored: Option<BallColor>,
    /// Velocity had no usable magnitude, so it was left as is
    pub renormalize_skipped: bool,
}

impl BounceReport {
    pub fn bounced(&self) -> bool {
        self.bounced_x || self.bounced_y
    }
}

/// Randomized reflection of one velocity component: `-v + r*v - v/2`
#[inline]
pub fn perturb(component: f32, r: f32) -> f32 {
    -component + r * component - component / 2.0
}

/// Scale `vel` to `target` speed. Returns false when the vector is zero or
/// not finite and nothing was changed.
///
/// Components are divided by the largest one first, so a finite vector whose
/// length would overflow still normalizes.
pub fn renormalize(vel: &mut glam::Vec2, target: f32) -> bool {
    if !vel.is_finite() {
        return false;
    }
    let scale = vel.abs().max_element();
    if scale <= 0.0 {
        return false;
    }
    let unit = *vel / scale;
    *vel = unit * (target / unit.length());
    true
}

/// Resolve one axis after crossing: perturbed component, forced inward for
/// `ReflectClamp`
fn bounce_component(
    component: f32,
    pos: f32,
    radius: f32,
    extent: f32,
    r: f32,
    motion: MotionPolicy,
) -> f32 {
    let bounced = perturb(component, r);
    match motion {
        MotionPolicy::Legacy => bounced,
        MotionPolicy::ReflectClamp => {
            let past_low = pos - radius < 0.0;
            let past_high = pos + radius > extent;
            match (past_low, past_high) {
                (true, false) => bounced.abs(),
                (false, true) => -bounced.abs(),
                // Ball wider than the viewport: no inward direction
                _ => bounced,
            }
        }
    }
}

/// Clamp one coordinate so the disk fits, when it can fit at all
fn clamp_axis(pos: f32, radius: f32, extent: f32) -> f32 {
    if extent >= 2.0 * radius {
        pos.clamp(radius, extent - radius)
    } else {
        pos
    }
}

/// Advance the ball one tick
///
/// Order matters for reproducibility: per crossed axis the perturbation draw
/// comes before the color draw, and x is handled before y.
pub fn update_ball(
    ball: &mut Ball,
    viewport: &Viewport,
    rng: &mut dyn RandomSource,
    motion: MotionPolicy,
    cruise_speed: f32,
) -> BounceReport {
    let mut report = BounceReport::default();

    ball.pos += ball.vel;

    if viewport.crosses_x(ball.pos, ball.radius) {
        let r = rng.next_unit();
        ball.vel.x = bounce_component(
            ball.vel.x,
            ball.pos.x,
            ball.radius,
            viewport.width,
            r,
            motion,
        );
        ball.color = BallColor::from_unit(rng.next_unit());
        report.bounced_x = true;
    }

    if viewport.crosses_y(ball.pos, ball.radius) {
        let r = rng.next_unit();
        ball.vel.y = bounce_component(
            ball.vel.y,
            ball.pos.y,
            ball.radius,
            viewport.height,
            r,
            motion,
        );
        ball.color = BallColor::from_unit(rng.next_unit());
        report.bounced_y = true;
    }

    if report.bounced() {
        report.recolored = Some(ball.color);
    }

    let target = match motion {
        MotionPolicy::Legacy => LEGACY_SPEED,
        MotionPolicy::ReflectClamp => {
            ball.pos.x = clamp_axis(ball.pos.x, ball.radius, viewport.width);
            ball.pos.y = clamp_axis(ball.pos.y, ball.radius, viewport.height);
            cruise_speed
        }
    };

    report.renormalize_skipped = !renormalize(&mut ball.vel, target);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SequenceSource;
    use glam::Vec2;

    const EPS: f32 = 1e-5;

    fn ball_at(x: f32, y: f32, dx: f32, dy: f32) -> Ball {
        Ball::new(Vec2::new(x, y), Vec2::new(dx, dy), 20.0, BallColor::Red)
    }

    #[test]
    fn test_first_tick_from_start() {
        let mut ball = Ball::default();
        let mut rng = SequenceSource::new(vec![0.5]);
        let report = update_ball(&mut ball, &Viewport::default(), &mut rng, MotionPolicy::Legacy, 0.0);

        assert_eq!(ball.pos, Vec2::new(29.0, 29.0));
        assert_eq!(ball.color, BallColor::Red);
        assert!(!report.bounced());
        assert_eq!(report.recolored, None);
        assert_eq!(rng.draws(), 0);
        // (4, 4) / (sqrt(32) / 2)
        let expected = std::f32::consts::SQRT_2;
        assert!((ball.vel.x - expected).abs() < EPS);
        assert!((ball.vel.y - expected).abs() < EPS);
    }

    #[test]
    fn test_right_wall_bounce() {
        let mut ball = ball_at(378.0, 200.0, 4.0, 0.0);
        let mut rng = SequenceSource::new(vec![0.5, 0.5]);
        let report = update_ball(&mut ball, &Viewport::default(), &mut rng, MotionPolicy::Legacy, 0.0);

        assert_eq!(ball.pos, Vec2::new(382.0, 200.0));
        assert!(report.bounced_x);
        assert!(!report.bounced_y);
        // -4 + 0.5*4 - 2 = -4, then / (4 / 2)
        assert_eq!(ball.vel, Vec2::new(-2.0, 0.0));
        assert_eq!(ball.color, BallColor::Green);
        assert_eq!(report.recolored, Some(BallColor::Green));
    }

    #[test]
    fn test_corner_bounce_keeps_last_color() {
        let mut ball = ball_at(378.0, 378.0, 4.0, 4.0);
        let mut rng = SequenceSource::new(vec![0.0, 0.0, 0.25, 0.9]);
        let report = update_ball(&mut ball, &Viewport::default(), &mut rng, MotionPolicy::Legacy, 0.0);

        assert!(report.bounced_x && report.bounced_y);
        assert_eq!(rng.draws(), 4);
        // x: -4 + 0 - 2 = -6, y: -4 + 1 - 2 = -5
        let scale = 2.0 / 61.0_f32.sqrt();
        assert!((ball.vel.x - -6.0 * scale).abs() < EPS);
        assert!((ball.vel.y - -5.0 * scale).abs() < EPS);
        assert_eq!(ball.color, BallColor::Purple);
        assert_eq!(report.recolored, Some(BallColor::Purple));
    }

    #[test]
    fn test_left_and_top_walls() {
        let mut ball = ball_at(22.0, 22.0, -4.0, -4.0);
        let mut rng = SequenceSource::new(vec![0.0, 0.2]);
        let report = update_ball(&mut ball, &Viewport::default(), &mut rng, MotionPolicy::Legacy, 0.0);

        assert!(report.bounced_x && report.bounced_y);
        // 4 + 0 + 2 = 6 on both axes, then scaled to speed 2
        assert!(ball.vel.x > 0.0 && ball.vel.y > 0.0);
        assert!((ball.speed() - 2.0).abs() < EPS);
        assert_eq!(ball.color, BallColor::Orange);
    }

    #[test]
    fn test_zero_velocity_skips_renormalize() {
        let mut ball = ball_at(200.0, 200.0, 0.0, 0.0);
        let mut rng = SequenceSource::default();
        let report = update_ball(&mut ball, &Viewport::default(), &mut rng, MotionPolicy::Legacy, 0.0);

        assert!(report.renormalize_skipped);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.pos, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_legacy_can_push_ball_further_out() {
        // Already outside and drifting back in: legacy flips it outward again
        let mut ball = ball_at(15.0, 200.0, 1.0, 0.0);
        let mut rng = SequenceSource::new(vec![0.0, 0.0]);
        update_ball(&mut ball, &Viewport::default(), &mut rng, MotionPolicy::Legacy, 0.0);
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn test_reflect_clamp_points_inward() {
        let mut ball = ball_at(15.0, 200.0, 1.0, 0.0);
        let mut rng = SequenceSource::new(vec![0.0, 0.0]);
        let report = update_ball(&mut ball, &Viewport::default(), &mut rng, MotionPolicy::ReflectClamp, 1.0);

        assert!(report.bounced_x);
        assert_eq!(ball.pos.x, 20.0);
        assert_eq!(ball.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_reflect_clamp_right_wall() {
        let mut ball = ball_at(378.0, 200.0, 4.0, 0.0);
        let mut rng = SequenceSource::new(vec![0.0, 0.0]);
        update_ball(&mut ball, &Viewport::default(), &mut rng, MotionPolicy::ReflectClamp, 4.0);

        assert_eq!(ball.pos, Vec2::new(380.0, 200.0));
        assert_eq!(ball.vel, Vec2::new(-4.0, 0.0));
    }

    #[test]
    fn test_renormalize_rejects_degenerate() {
        let mut v = Vec2::ZERO;
        assert!(!renormalize(&mut v, 2.0));
        let mut v = Vec2::new(f32::NAN, 1.0);
        assert!(!renormalize(&mut v, 2.0));
        let mut v = Vec2::new(3.0, 4.0);
        assert!(renormalize(&mut v, 2.0));
        assert!((v - Vec2::new(1.2, 1.6)).length() < EPS);
    }

    #[test]
    fn test_renormalize_huge_finite_velocity() {
        // Length overflows f32 even though both components are finite
        let mut v = Vec2::new(3e38, 3e38);
        assert!(!v.length().is_finite());
        assert!(renormalize(&mut v, 2.0));
        assert!(v.is_finite());
        assert!((v.length() - 2.0).abs() < EPS);
        assert!((v.x - std::f32::consts::SQRT_2).abs() < EPS);
    }

    #[test]
    fn test_huge_velocity_stays_finite() {
        let vp = Viewport::new(f32::MAX, f32::MAX);
        let mut ball = ball_at(1e38, 1e38, 1e38, 1e38);
        let mut rng = SequenceSource::new(vec![0.5]);

        let report = update_ball(&mut ball, &vp, &mut rng, MotionPolicy::Legacy, 0.0);
        assert!(!report.bounced());
        assert!(!report.renormalize_skipped);
        assert!((ball.speed() - 2.0).abs() < EPS);

        for _ in 0..4 {
            update_ball(&mut ball, &vp, &mut rng, MotionPolicy::Legacy, 0.0);
            assert!(ball.pos.is_finite(), "pos went non-finite: {:?}", ball.pos);
            assert!(ball.vel.is_finite(), "vel went non-finite: {:?}", ball.vel);
        }
    }

    mod proptests {
        use super::*;
        use crate::sim::rng::PcgSource;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn position_advances_by_pre_tick_velocity(
                x in 20.0f32..380.0,
                y in 20.0f32..380.0,
                dx in -10.0f32..10.0,
                dy in -10.0f32..10.0,
                seed in any::<u64>(),
            ) {
                let mut ball = ball_at(x, y, dx, dy);
                let expected = ball.pos + ball.vel;
                let mut rng = PcgSource::new(seed);
                update_ball(&mut ball, &Viewport::default(), &mut rng, MotionPolicy::Legacy, 0.0);
                prop_assert_eq!(ball.pos, expected);
            }

            #[test]
            fn legacy_speed_is_two_after_any_tick(
                x in 0.0f32..400.0,
                y in 0.0f32..400.0,
                dx in 0.1f32..10.0,
                dy in -10.0f32..10.0,
                seed in any::<u64>(),
            ) {
                let mut ball = ball_at(x, y, dx, dy);
                let mut rng = PcgSource::new(seed);
                let report = update_ball(&mut ball, &Viewport::default(), &mut rng, MotionPolicy::Legacy, 0.0);
                prop_assert!(!report.renormalize_skipped);
                prop_assert!((ball.speed() - 2.0).abs() < 1e-4, "speed {}", ball.speed());
            }

            #[test]
            fn reflect_clamp_stays_inside_at_constant_speed(
                x in 20.0f32..380.0,
                y in 20.0f32..380.0,
                angle in 0.0f32..std::f32::consts::TAU,
                speed in 0.5f32..15.0,
                seed in any::<u64>(),
            ) {
                let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
                let mut ball = ball_at(x, y, vel.x, vel.y);
                let cruise = ball.speed();
                let vp = Viewport::default();
                let mut rng = PcgSource::new(seed);
                for _ in 0..500 {
                    update_ball(&mut ball, &vp, &mut rng, MotionPolicy::ReflectClamp, cruise);
                    prop_assert!(ball.pos.x >= 20.0 - 1e-3 && ball.pos.x <= 380.0 + 1e-3);
                    prop_assert!(ball.pos.y >= 20.0 - 1e-3 && ball.pos.y <= 380.0 + 1e-3);
                    prop_assert!((ball.speed() - cruise).abs() < 1e-3 * cruise.max(1.0));
                }
            }
        }
    }
}
