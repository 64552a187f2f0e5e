//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance and geometry parameters for one match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Top/bottom line thickness; serves never spawn under the lines
    pub field_line_thickness: f32,

    // === Paddles ===
    pub paddle_length: f32,
    pub paddle_width: f32,
    /// Human paddle speed (px/s); the boost key doubles it
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_size: f32,
    /// Speed at every serve (px/s)
    pub ball_speed: f32,
    pub bounce_multiplier: f32,
    pub max_bounce_angle_deg: f32,
    pub min_vertical_angle_deg: f32,
    /// Largest vertical offset from centre for a serve (px)
    pub serve_offset_max: f32,
    /// Largest vertical direction component at a serve (unit space)
    pub serve_jitter: f32,

    // === Match flow ===
    pub win_score: u32,
    pub score_pause_secs: f32,
    pub win_pause_secs: f32,

    // === AI ===
    /// AI base speed (px/s) before the difficulty factor
    pub ai_base_speed: f32,
    pub ai_difficulty_step: f32,
    pub ai_recovery_divisor: f32,

    // === Frame handling ===
    pub max_frame_dt: f32,
    pub pause_fade_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            field_line_thickness: FIELD_LINE_THICKNESS,

            paddle_length: PADDLE_LENGTH,
            paddle_width: PADDLE_WIDTH,
            paddle_speed: PADDLE_SPEED,

            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,
            bounce_multiplier: BOUNCE_MULTIPLIER,
            max_bounce_angle_deg: MAX_BOUNCE_ANGLE_DEG,
            min_vertical_angle_deg: MIN_VERTICAL_ANGLE_DEG,
            serve_offset_max: SERVE_OFFSET_MAX,
            serve_jitter: SERVE_JITTER,

            win_score: WIN_SCORE,
            score_pause_secs: SCORE_PAUSE_SECS,
            win_pause_secs: WIN_PAUSE_SECS,

            ai_base_speed: PADDLE_SPEED,
            ai_difficulty_step: AI_DIFFICULTY_STEP,
            ai_recovery_divisor: AI_RECOVERY_DIVISOR,

            max_frame_dt: MAX_FRAME_DT,
            pause_fade_speed: PAUSE_FADE_SPEED,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document over the defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Repair values the simulation cannot run with, falling back to defaults
    pub fn sanitized(self) -> Self {
        let defaults = Tuning::default();
        let mut t = self;

        fn positive(name: &str, value: &mut f32, fallback: f32) {
            if !(value.is_finite() && *value > 0.0) {
                log::warn!("tuning: {} = {} is invalid, using {}", name, value, fallback);
                *value = fallback;
            }
        }
        fn non_negative(name: &str, value: &mut f32, fallback: f32) {
            if !(value.is_finite() && *value >= 0.0) {
                log::warn!("tuning: {} = {} is invalid, using {}", name, value, fallback);
                *value = fallback;
            }
        }

        positive("field_width", &mut t.field_width, defaults.field_width);
        positive("field_height", &mut t.field_height, defaults.field_height);
        positive("paddle_length", &mut t.paddle_length, defaults.paddle_length);
        positive("paddle_width", &mut t.paddle_width, defaults.paddle_width);
        positive("ball_size", &mut t.ball_size, defaults.ball_size);
        positive("ball_speed", &mut t.ball_speed, defaults.ball_speed);
        positive("max_frame_dt", &mut t.max_frame_dt, defaults.max_frame_dt);
        positive(
            "ai_recovery_divisor",
            &mut t.ai_recovery_divisor,
            defaults.ai_recovery_divisor,
        );
        non_negative("paddle_speed", &mut t.paddle_speed, defaults.paddle_speed);
        non_negative("ai_base_speed", &mut t.ai_base_speed, defaults.ai_base_speed);
        non_negative(
            "ai_difficulty_step",
            &mut t.ai_difficulty_step,
            defaults.ai_difficulty_step,
        );
        non_negative("serve_offset_max", &mut t.serve_offset_max, defaults.serve_offset_max);
        non_negative("serve_jitter", &mut t.serve_jitter, defaults.serve_jitter);
        non_negative("score_pause_secs", &mut t.score_pause_secs, defaults.score_pause_secs);
        non_negative("win_pause_secs", &mut t.win_pause_secs, defaults.win_pause_secs);
        non_negative("pause_fade_speed", &mut t.pause_fade_speed, defaults.pause_fade_speed);

        if !(t.bounce_multiplier.is_finite() && t.bounce_multiplier >= 1.0) {
            log::warn!(
                "tuning: bounce_multiplier = {} is invalid, using {}",
                t.bounce_multiplier,
                defaults.bounce_multiplier
            );
            t.bounce_multiplier = defaults.bounce_multiplier;
        }
        if !(t.max_bounce_angle_deg.is_finite() && (0.0..90.0).contains(&t.max_bounce_angle_deg)) {
            log::warn!(
                "tuning: max_bounce_angle_deg = {} is invalid, using {}",
                t.max_bounce_angle_deg,
                defaults.max_bounce_angle_deg
            );
            t.max_bounce_angle_deg = defaults.max_bounce_angle_deg;
        }
        if !(t.min_vertical_angle_deg.is_finite()
            && (0.0..90.0).contains(&t.min_vertical_angle_deg))
        {
            log::warn!(
                "tuning: min_vertical_angle_deg = {} is invalid, using {}",
                t.min_vertical_angle_deg,
                defaults.min_vertical_angle_deg
            );
            t.min_vertical_angle_deg = defaults.min_vertical_angle_deg;
        }
        if t.win_score == 0 {
            log::warn!("tuning: win_score = 0 is invalid, using {}", defaults.win_score);
            t.win_score = defaults.win_score;
        }

        // Geometry that no longer fits the field goes back to defaults wholesale
        let lines = t.field_line_thickness;
        if !(lines.is_finite() && lines >= 0.0 && 2.0 * lines + t.ball_size <= t.field_height) {
            log::warn!("tuning: field_line_thickness = {} does not fit, using 0", lines);
            t.field_line_thickness = 0.0;
        }
        if t.paddle_length > t.field_height {
            log::warn!(
                "tuning: paddle_length = {} exceeds field height, using {}",
                t.paddle_length,
                t.field_height
            );
            t.paddle_length = t.field_height;
        }
        if t.ball_size > t.field_height.min(t.field_width) {
            log::warn!("tuning: ball_size = {} exceeds the field, using default", t.ball_size);
            t.ball_size = defaults.ball_size.min(t.field_height.min(t.field_width));
        }

        t
    }

    pub fn max_bounce_angle(&self) -> f32 {
        self.max_bounce_angle_deg.to_radians()
    }

    pub fn min_vertical_angle(&self) -> f32 {
        self.min_vertical_angle_deg.to_radians()
    }

    /// Left edge of the left paddle's home position
    pub fn left_paddle_x(&self) -> f32 {
        self.paddle_width * 1.5
    }

    /// Left edge of the right paddle's home position
    pub fn right_paddle_x(&self) -> f32 {
        self.field_width - self.paddle_width * 2.5
    }
}
