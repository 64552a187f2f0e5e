//! Match state and core simulation types
//!
//! Everything the per-frame update reads or writes lives in [`MatchState`].
//! The draw pass only uses the read accessors at the bottom of this file.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::settings::{Difficulty, GameMode};
use crate::tuning::Tuning;

/// Player/paddle side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Index into per-side arrays (`paddles`, `score`)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Horizontal sign of travel toward this side
    #[inline]
    pub fn dir_x(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Which of the mutually exclusive match phases is active
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Ball in play
    Rally,
    /// A point was just scored; ball hidden until the timer runs out
    Scored { timer: f32 },
    /// Someone reached the win score; the match resets when the timer runs out
    Won { winner: Side, timer: f32 },
}

/// A paddle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub position: Vec2,
    pub width: f32,
    pub length: f32,
    /// Vertical speed this frame (px/s, positive is down)
    pub speed: f32,
    /// AI aim: distance from each paddle end that the AI tries to keep the
    /// ball inside of. Redrawn from `[0, length / 2]` every time this paddle
    /// returns the ball.
    pub next_hit_pos: f32,
}

impl Paddle {
    /// Paddle at its home position for the given side, vertically centred
    pub fn home<R: Rng + ?Sized>(side: Side, tuning: &Tuning, rng: &mut R) -> Self {
        let x = match side {
            Side::Left => tuning.left_paddle_x(),
            Side::Right => tuning.right_paddle_x(),
        };
        let mut paddle = Self {
            position: Vec2::new(x, (tuning.field_height - tuning.paddle_length) / 2.0),
            width: tuning.paddle_width,
            length: tuning.paddle_length,
            speed: 0.0,
            next_hit_pos: 0.0,
        };
        paddle.redraw_aim(rng);
        paddle
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.position,
            size: Vec2::new(self.width, self.length),
        }
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.position.y + self.length / 2.0
    }

    /// Pick a fresh AI aim offset for the next return
    pub fn redraw_aim<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.next_hit_pos = rng.random_range(0.0..=self.length / 2.0);
    }
}

/// The ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left of the bounding square
    pub position: Vec2,
    /// Travel direction; rescaled to `speed` every integration step
    pub direction: Vec2,
    /// Scalar speed (px/s)
    pub speed: f32,
    pub size: f32,
}

impl Ball {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.position,
            size: Vec2::splat(self.size),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.size / 2.0)
    }
}

/// Complete match state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    /// Balance/geometry this match was created with
    pub tuning: Tuning,
    pub mode: GameMode,
    /// Ignored in two-player mode
    pub difficulty: Difficulty,
    /// Indexed by [`Side::index`]
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    /// Indexed by [`Side::index`]
    pub score: [u32; 2],
    /// Side whose paddle last returned the ball
    pub turn: Side,
    pub phase: MatchPhase,
    /// Manual pause; freezes everything except the pause text fade
    pub paused: bool,
    /// Seconds the current pause has lasted (cosmetic)
    pub pause_fade_elapsed: f32,
    /// Frames simulated since this match started
    pub frame: u64,
    /// Seed the RNG stream started from
    pub seed: u64,
    /// Serve and AI jitter source
    pub(crate) rng: Pcg32,
}

impl MatchState {
    /// Fresh match with default tuning
    pub fn new(mode: GameMode, difficulty: Difficulty, seed: u64) -> Self {
        Self::with_tuning(mode, difficulty, seed, Tuning::default())
    }

    pub fn with_tuning(mode: GameMode, difficulty: Difficulty, seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let state = Self::build(mode, difficulty, tuning, seed, Pcg32::seed_from_u64(seed));
        log::info!(
            "New match: mode={}, difficulty={}, seed={}",
            mode.as_str(),
            difficulty.as_str(),
            seed
        );
        state
    }

    fn build(
        mode: GameMode,
        difficulty: Difficulty,
        tuning: Tuning,
        seed: u64,
        mut rng: Pcg32,
    ) -> Self {
        let paddles = [
            Paddle::home(Side::Left, &tuning, &mut rng),
            Paddle::home(Side::Right, &tuning, &mut rng),
        ];
        let server = if rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };
        let mut ball = Ball {
            position: Vec2::ZERO,
            direction: Vec2::ZERO,
            speed: tuning.ball_speed,
            size: tuning.ball_size,
        };
        ball.serve(server.opposite(), &tuning, &mut rng);

        Self {
            tuning,
            mode,
            difficulty,
            paddles,
            ball,
            score: [0, 0],
            turn: server,
            phase: MatchPhase::Rally,
            paused: false,
            pause_fade_elapsed: 0.0,
            frame: 0,
            seed,
            rng,
        }
    }

    /// Start over after a win. Keeps mode, difficulty, tuning and the RNG
    /// stream, so consecutive matches differ but stay reproducible.
    pub fn rematch(&mut self) {
        let rng = self.rng.clone();
        *self = Self::build(self.mode, self.difficulty, self.tuning, self.seed, rng);
        log::info!("Rematch started");
    }

    /// Credit a point to `scorer`. Returns true if that point won the match.
    ///
    /// A winning point leaves the ball where it is so the last rally keeps
    /// animating during the win pause; any other point re-serves toward the
    /// side that conceded.
    pub fn award_point(&mut self, scorer: Side) -> bool {
        self.score[scorer.index()] += 1;
        log::debug!(
            "Point to {:?}: {} - {}",
            scorer,
            self.score[0],
            self.score[1]
        );

        if self.score[scorer.index()] >= self.tuning.win_score {
            self.phase = MatchPhase::Won {
                winner: scorer,
                timer: self.tuning.win_pause_secs,
            };
            log::info!(
                "{:?} wins {} - {} after {} frames",
                scorer,
                self.score[0],
                self.score[1],
                self.frame
            );
            true
        } else {
            self.phase = MatchPhase::Scored {
                timer: self.tuning.score_pause_secs,
            };
            self.turn = scorer;
            self.ball
                .serve(scorer.opposite(), &self.tuning, &mut self.rng);
            false
        }
    }

    // === Read accessors (draw pass) ===

    pub fn score(&self, side: Side) -> u32 {
        self.score[side.index()]
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn paddle_rect(&self, side: Side) -> Rect {
        self.paddle(side).rect()
    }

    /// Ball bounds, or `None` while it is hidden during the scoring pause
    pub fn ball_rect(&self) -> Option<Rect> {
        match self.phase {
            MatchPhase::Scored { .. } => None,
            MatchPhase::Rally | MatchPhase::Won { .. } => Some(self.ball.rect()),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn player_won(&self) -> bool {
        matches!(self.phase, MatchPhase::Won { .. })
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            MatchPhase::Won { winner, .. } => Some(winner),
            _ => None,
        }
    }

    /// Remaining scoring pause (0 outside of it)
    pub fn score_timer(&self) -> f32 {
        match self.phase {
            MatchPhase::Scored { timer } => timer,
            _ => 0.0,
        }
    }

    /// Remaining win pause (0 outside of it)
    pub fn win_timer(&self) -> f32 {
        match self.phase {
            MatchPhase::Won { timer, .. } => timer,
            _ => 0.0,
        }
    }

    /// Label for the HUD; `None` when no AI is playing
    pub fn difficulty_label(&self) -> Option<&'static str> {
        if self.mode.uses_ai() {
            Some(self.difficulty.as_str())
        } else {
            None
        }
    }

    /// Opacity of the "Paused" text, pulsing between 0 and 1 while paused
    pub fn pause_text_alpha(&self) -> f32 {
        if !self.paused {
            return 0.0;
        }
        0.5 + 0.5 * (self.pause_fade_elapsed * self.tuning.pause_fade_speed).cos()
    }
}
