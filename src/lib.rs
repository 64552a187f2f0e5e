//! Pong Remake - deterministic simulation core for a two-paddle ball game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, ball, collisions, match state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Game mode and AI difficulty selection
//! - `audio`: Beep cues derived from simulation events
//!
//! Rendering, menus and sound synthesis live outside this crate. They read
//! [`sim::MatchState`] through its accessors and feed it a
//! [`sim::FrameInput`] once per frame.

pub mod audio;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Difficulty, GameMode};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (4:3, rendered at 1080p and scaled by the host)
    pub const FIELD_WIDTH: f32 = 1440.0;
    pub const FIELD_HEIGHT: f32 = 1080.0;
    /// Thickness of the dashed top/bottom field lines drawn by the host
    pub const FIELD_LINE_THICKNESS: f32 = 10.0;

    /// Paddle defaults
    pub const PADDLE_LENGTH: f32 = 150.0;
    pub const PADDLE_WIDTH: f32 = 25.0;
    /// Speed in pixels per second
    pub const PADDLE_SPEED: f32 = 400.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 25.0;
    pub const BALL_SPEED: f32 = 500.0;
    /// Speed boost when ball hits paddle (multiplicative, uncapped)
    pub const BOUNCE_MULTIPLIER: f32 = 1.1;
    /// Maximum rebound angle at the paddle tips (degrees)
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 45.0;
    /// Minimum angle between the ball path and the vertical (degrees)
    pub const MIN_VERTICAL_ANGLE_DEG: f32 = 25.0;

    /// Serve randomisation
    pub const SERVE_OFFSET_MAX: f32 = 150.0;
    pub const SERVE_JITTER: f32 = 0.5;

    /// Match flow
    pub const WIN_SCORE: u32 = 10;
    pub const SCORE_PAUSE_SECS: f32 = 1.0;
    pub const WIN_PAUSE_SECS: f32 = 5.0;

    /// AI speed per difficulty step, as a fraction of the base paddle speed
    pub const AI_DIFFICULTY_STEP: f32 = 0.5;
    /// AI slows down by this factor once it has returned the ball
    pub const AI_RECOVERY_DIVISOR: f32 = 3.0;

    /// Largest frame delta the simulation will integrate in one call
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Cap on ball sub-steps per frame
    pub const MAX_BALL_SUBSTEPS: u32 = 64;
    /// Angular speed of the "Paused" text fade (radians per second)
    pub const PAUSE_FADE_SPEED: f32 = 3.0;
}
