//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Host-supplied frame time only (clamped, never read from a clock)
//! - Seeded RNG only
//! - Fixed update order: paddles, ball, edges, left paddle, right paddle
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod control;
pub mod motion;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{EdgeContact, bounce_ball_edge, bounce_ball_paddle, clamp_paddle};
pub use control::Controller;
pub use rect::Rect;
pub use state::{Ball, MatchPhase, MatchState, Paddle, Side};
pub use tick::{FrameEvents, FrameInput, GameEvent, PaddleInput, advance_frame};
