//! Per-frame simulation step
//!
//! [`advance_frame`] is the single entry point the host calls once per
//! rendered frame. It runs the paddle controllers, moves the ball, resolves
//! collisions and drives the match phases, then reports what happened as
//! [`FrameEvents`] for the audio layer to react to.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{bounce_ball_edge, bounce_ball_paddle};
use super::control::{Controller, ai_paddle_speed, human_paddle_speed, move_paddle};
use super::state::{MatchPhase, MatchState, Side};
use crate::consts::MAX_BALL_SUBSTEPS;

/// Held keys for one paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
    /// Doubles paddle speed while held
    pub boost: bool,
}

/// Input snapshot for one frame, sampled by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Left paddle keys (player one)
    pub left: PaddleInput,
    /// Right paddle keys (player two)
    pub right: PaddleInput,
    /// Pause toggle (pressed this frame)
    pub pause: bool,
    /// Skip the win pause (pressed this frame)
    pub skip: bool,
}

impl FrameInput {
    pub fn paddle(&self, side: Side) -> &PaddleInput {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Something the audio layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball returned by this side's paddle
    PaddleHit(Side),
    /// Ball bounced off a field edge
    EdgeBounce,
    /// This side scored
    Score(Side),
    /// This side won the match
    Win(Side),
}

/// Events produced by a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub paddle_hit: Option<Side>,
    pub edge_bounce: bool,
    pub score: Option<Side>,
    pub win: Option<Side>,
}

impl FrameEvents {
    pub fn is_empty(&self) -> bool {
        *self == FrameEvents::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = GameEvent> {
        let events = *self;
        events
            .paddle_hit
            .map(GameEvent::PaddleHit)
            .into_iter()
            .chain(events.edge_bounce.then_some(GameEvent::EdgeBounce))
            .chain(events.score.map(GameEvent::Score))
            .chain(events.win.map(GameEvent::Win))
    }
}

/// Advance the match by one frame of `dt` seconds.
///
/// A non-positive or non-finite `dt` does nothing. Larger steps than
/// `tuning.max_frame_dt` are clamped.
pub fn advance_frame(state: &mut MatchState, dt: f32, input: &FrameInput) -> FrameEvents {
    let mut events = FrameEvents::default();
    if !(dt.is_finite() && dt > 0.0) {
        return events;
    }
    let dt = dt.min(state.tuning.max_frame_dt);

    if input.pause {
        state.paused = !state.paused;
        state.pause_fade_elapsed = 0.0;
        log::debug!("{}", if state.paused { "Paused" } else { "Resumed" });
    }
    if state.paused {
        state.pause_fade_elapsed += dt;
        return events;
    }

    state.frame += 1;

    match state.phase {
        MatchPhase::Rally => step_rally(state, dt, input, &mut events),
        MatchPhase::Scored { timer } => {
            // Ball stays hidden; players may reposition
            update_paddles(state, dt, input);
            let timer = (timer - dt).max(0.0);
            state.phase = if timer > 0.0 {
                MatchPhase::Scored { timer }
            } else {
                MatchPhase::Rally
            };
        }
        MatchPhase::Won { winner, timer } => {
            let timer = (timer - dt).max(0.0);
            if input.skip || timer <= 0.0 {
                state.rematch();
                return events;
            }
            state.phase = MatchPhase::Won { winner, timer };
            // The last rally keeps bouncing around until the reset
            step_rally(state, dt, input, &mut events);
        }
    }

    events
}

fn step_rally(state: &mut MatchState, dt: f32, input: &FrameInput, events: &mut FrameEvents) {
    update_paddles(state, dt, input);

    // No sub-step may carry the ball past a paddle face
    let max_travel = state.tuning.paddle_width.min(state.tuning.ball_size);
    let mut remaining = dt;
    for substep in 1..=MAX_BALL_SUBSTEPS {
        let step = if substep == MAX_BALL_SUBSTEPS {
            remaining
        } else {
            remaining.min(max_travel / state.ball.speed)
        };
        remaining -= step;
        if step_ball(state, step, events) || remaining <= 0.0 {
            return;
        }
    }
}

/// Move the ball once and resolve edges, then paddles. Returns true when a
/// point ended the rally.
fn step_ball(state: &mut MatchState, dt: f32, events: &mut FrameEvents) -> bool {
    let fallback = Vec2::new(state.turn.opposite().dir_x(), 0.0);
    state
        .ball
        .update(dt, state.tuning.min_vertical_angle(), fallback);

    let goals_closed = state.player_won();
    let contact = bounce_ball_edge(&mut state.ball, &state.tuning, goals_closed);
    events.edge_bounce |= contact.bounced;
    if let Some(scorer) = contact.goal {
        events.score = Some(scorer);
        if state.award_point(scorer) {
            events.win = Some(scorer);
        }
        return true;
    }

    for side in [Side::Left, Side::Right] {
        let paddle = &mut state.paddles[side.index()];
        if bounce_ball_paddle(&mut state.ball, paddle, side, &state.tuning, &mut state.rng) {
            state.turn = side;
            events.paddle_hit = Some(side);
            log::trace!("{:?} paddle hit, ball speed {:.1}", side, state.ball.speed);
        }
    }
    false
}

fn update_paddles(state: &mut MatchState, dt: f32, input: &FrameInput) {
    for side in [Side::Left, Side::Right] {
        let index = side.index();
        let speed = match Controller::for_side(state.mode, side) {
            Controller::Human => human_paddle_speed(input.paddle(side), state.tuning.paddle_speed),
            Controller::Ai => ai_paddle_speed(
                &state.paddles[index],
                side,
                &state.ball,
                state.turn,
                state.difficulty,
                &state.tuning,
            ),
        };
        move_paddle(
            &mut state.paddles[index],
            speed,
            dt,
            state.tuning.field_height,
        );
    }
}
