use super::*;
use crate::GAME_PLAYERS;
use crate::Seat;

/// Who made a move: one of the players, or the world (dealing, skat).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Seat(Seat),
    World,
}

impl From<&str> for Source {
    fn from(s: &str) -> Self {
        match s.parse::<Seat>() {
            Ok(seat) if seat < GAME_PLAYERS => Self::Seat(seat),
            _ => Self::World,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Seat(s) => write!(f, "{}", s),
            Self::World => write!(f, "w"),
        }
    }
}

/// One entry of a game's move history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub source: Source,
    pub action: String,
}

impl Move {
    pub fn new(source: Source, action: &str) -> Self {
        Self {
            source,
            action: action.to_string(),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.source, self.action)
    }
}

/// Game state owned by the rule engine.
///
/// The runtime treats it as opaque apart from the [`Snapshot`] it reports,
/// the legal moves it lists and the moves it accepts or rejects.
pub trait Game: Send + Sync + std::fmt::Debug {
    /// Facts about the current position.
    fn snapshot(&self) -> Snapshot;
    /// Legal moves for the player to move.
    fn legal(&self) -> Vec<String>;
    /// Apply a move, rejecting it with a reason when illegal.
    fn apply(&mut self, who: Source, action: &str) -> anyhow::Result<()>;
    /// Every move applied so far.
    fn history(&self) -> Vec<Move>;
    /// Independent copy.
    fn boxed(&self) -> Box<dyn Game>;
}

impl Clone for Box<dyn Game> {
    fn clone(&self) -> Self {
        self.boxed()
    }
}
