//! Paddle controllers
//!
//! Each controller only decides a vertical speed for the frame; [`move_paddle`]
//! applies it and keeps the paddle on the field.

use super::collision::clamp_paddle;
use super::state::{Ball, Paddle, Side};
use super::tick::PaddleInput;
use crate::settings::{Difficulty, GameMode};
use crate::tuning::Tuning;

/// Who drives a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    /// Reads the input slot for its own side
    Human,
    Ai,
}

impl Controller {
    pub fn for_side(mode: GameMode, side: Side) -> Self {
        match (mode, side) {
            (GameMode::SinglePlayer, Side::Left) => Controller::Human,
            (GameMode::SinglePlayer, Side::Right) => Controller::Ai,
            (GameMode::TwoPlayer, _) => Controller::Human,
            (GameMode::Demo, _) => Controller::Ai,
        }
    }
}

/// Three-state keyboard control: up, down or still. Boost doubles the speed.
pub fn human_paddle_speed(input: &PaddleInput, base_speed: f32) -> f32 {
    let speed = match (input.up, input.down) {
        (true, false) => -base_speed,
        (false, true) => base_speed,
        _ => 0.0,
    };
    if input.boost { speed * 2.0 } else { speed }
}

/// AI paddle speed for this frame.
///
/// The AI keeps the ball between two tracking points, `next_hit_pos` in from
/// each end of the paddle, and holds still while it is there. It ignores the
/// ball while it is more than half a field away, and once it has returned
/// the ball (`turn == side`) it moves at a fraction of its speed.
pub fn ai_paddle_speed(
    paddle: &Paddle,
    side: Side,
    ball: &Ball,
    turn: Side,
    difficulty: Difficulty,
    tuning: &Tuning,
) -> f32 {
    let ball_rect = ball.rect();
    let distance = (ball_rect.center().x - paddle.rect().center().x).abs();
    if distance > tuning.field_width / 2.0 {
        return 0.0;
    }

    let upper = paddle.position.y + paddle.next_hit_pos;
    let lower = paddle.position.y + paddle.length - paddle.next_hit_pos;
    let heading = if ball_rect.bottom() < upper {
        -1.0
    } else if ball_rect.top() > lower {
        1.0
    } else {
        return 0.0;
    };

    let mut speed = tuning.ai_base_speed * difficulty.speed_factor(tuning.ai_difficulty_step);
    if turn == side {
        // Already returned it: drift instead of chase
        speed /= tuning.ai_recovery_divisor;
    }
    heading * speed
}

/// Apply a controller's speed for `dt` seconds and clamp to the field
pub fn move_paddle(paddle: &mut Paddle, speed: f32, dt: f32, field_height: f32) {
    paddle.speed = speed;
    paddle.position.y += speed * dt;
    clamp_paddle(paddle, field_height);
}
