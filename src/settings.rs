//! Match settings chosen on the title screen
//!
//! The menu layer picks these; the simulation only reads them.

use serde::{Deserialize, Serialize};

/// Who controls each paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Human on the left, AI on the right
    #[default]
    SinglePlayer,
    /// Humans on both sides
    TwoPlayer,
    /// AI on both sides (attract mode)
    Demo,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::SinglePlayer => "One Player",
            GameMode::TwoPlayer => "Two Player",
            GameMode::Demo => "Demo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "single" | "one" | "1p" | "one player" | "one-player" | "single-player" => {
                Some(GameMode::SinglePlayer)
            }
            "two" | "2p" | "two player" | "two-player" | "versus" => Some(GameMode::TwoPlayer),
            "demo" | "ai" => Some(GameMode::Demo),
            _ => None,
        }
    }

    /// Whether difficulty has any effect in this mode
    pub fn uses_ai(&self) -> bool {
        match self {
            GameMode::SinglePlayer | GameMode::Demo => true,
            GameMode::TwoPlayer => false,
        }
    }
}

/// AI paddle speed tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" | "normal" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Position in the difficulty menu (0-based)
    pub fn index(&self) -> u32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    /// AI speed multiplier: `step * (index + 1)`
    pub fn speed_factor(&self, step: f32) -> f32 {
        step * (self.index() + 1) as f32
    }
}
