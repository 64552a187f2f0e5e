//! Ball motion: integration, angle floor and serving
//!
//! The ball's `direction` is renormalised every step, so only its heading
//! matters between frames. Speed lives in the separate `speed` scalar.

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, Side};
use crate::tuning::Tuning;

impl Ball {
    /// Advance the ball by `dt` seconds.
    ///
    /// Applies the angle floor, rescales `direction` to `speed`, then moves.
    /// `fallback` is used when the direction has degenerated to zero length.
    pub fn update(&mut self, dt: f32, min_vertical_angle: f32, fallback: Vec2) {
        self.enforce_angle_floor(min_vertical_angle, fallback);
        self.position += self.direction * dt;
    }

    /// Keep the path at least `min_vertical_angle` away from vertical and set
    /// the direction's length to `speed`. Signs of both components are kept.
    pub fn enforce_angle_floor(&mut self, min_vertical_angle: f32, fallback: Vec2) {
        let fallback = fallback.try_normalize().unwrap_or(Vec2::X);
        let mut unit = self.direction.try_normalize().unwrap_or(fallback);

        let min_x = min_vertical_angle.sin();
        if unit.x.abs() < min_x {
            unit.x = min_x.copysign(unit.x);
            unit.y = (1.0 - min_x * min_x).max(0.0).sqrt().copysign(unit.y);
        }

        self.direction = unit * self.speed;
    }

    /// Re-serve from the centre line toward `toward` at base speed.
    ///
    /// The vertical start position and the vertical direction component are
    /// jittered so consecutive serves differ. The ball never starts under the
    /// top/bottom field lines.
    pub fn serve<R: Rng + ?Sized>(&mut self, toward: Side, tuning: &Tuning, rng: &mut R) {
        let offset = rng.random_range(-tuning.serve_offset_max..=tuning.serve_offset_max);
        let jitter = rng.random_range(-tuning.serve_jitter..=tuning.serve_jitter);

        self.size = tuning.ball_size;
        self.speed = tuning.ball_speed;

        let lines = tuning.field_line_thickness;
        let centered_y = (tuning.field_height - self.size) / 2.0;
        self.position = Vec2::new(
            (tuning.field_width - self.size) / 2.0,
            (centered_y + offset)
                .min(tuning.field_height - lines - self.size)
                .max(lines),
        );

        let heading = Vec2::new(toward.dir_x(), jitter).normalize_or(Vec2::new(toward.dir_x(), 0.0));
        self.direction = heading * self.speed;
    }
}
