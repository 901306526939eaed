use crate::constants::{MAX_INITIALS, LEADERBOARD_SIZE};
use crate::protocol::ScoreRecord;

/// Which subsystem owns the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Main,
    Options,
    Game,
    ScoreInput,
    GameOver,
    Connecting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub fn easier(self) -> Self {
        match self {
            Difficulty::Hard => Difficulty::Normal,
            _ => Difficulty::Easy,
        }
    }

    pub fn harder(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            _ => Difficulty::Hard,
        }
    }

    /// Wire name used by the leaderboard service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSelection {
    Engage,
    Options,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub score: u32,
    pub high: u32,
}

/// Progress through the post-death score flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreEntry {
    /// Player just died; leaderboard not fetched yet.
    AwaitingScores,
    /// Score qualifies, initials being typed.
    Entering(String),
}

impl ScoreEntry {
    pub fn push(&mut self, c: char) {
        if let ScoreEntry::Entering(initials) = self {
            if initials.chars().count() < MAX_INITIALS && c.is_ascii_alphanumeric() {
                initials.push(c.to_ascii_uppercase());
            }
        }
    }

    pub fn pop(&mut self) {
        if let ScoreEntry::Entering(initials) = self {
            initials.pop();
        }
    }
}

/// What the game-over screen shows below the title.
#[derive(Debug, Clone, PartialEq)]
pub enum LeaderboardView {
    Hidden,
    Scores(Vec<ScoreRecord>),
    ConnectionError,
}

/// A score makes the board if there is room or it beats the lowest row.
pub fn qualifies(score: u32, board: &[ScoreRecord]) -> bool {
    if score == 0 {
        return false;
    }
    if board.len() < LEADERBOARD_SIZE {
        return true;
    }
    board.iter().map(|r| r.score).min().map_or(true, |lowest| score > lowest)
}
