use crate::GAME_PLAYERS;
use crate::Seat;

/// Phase of one Skat game as reported by the rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Deal,
    Bid,
    Answer,
    SkatOrHand,
    GetSkat,
    DiscardAndDecl,
    Cardplay,
    Finished,
}

/// Whose eyes a game state is seen through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// One of the three players in the game.
    Seat(Seat),
    /// Observer seeing only public information.
    #[default]
    Public,
    /// Observer seeing every card.
    World,
}

impl View {
    pub fn seat(&self) -> Option<Seat> {
        match self {
            Self::Seat(s) => Some(*s),
            _ => None,
        }
    }
}

/// Facts about the current position that move control needs.
/// Produced by the rule engine; the runtime never derives them itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub view: View,
    pub to_move: Seat,
    pub declarer: Option<Seat>,
    pub ouvert: bool,
    pub null: bool,
    /// Cards in hand per seat.
    pub cards: [usize; GAME_PLAYERS],
    /// Cards already played to the current trick (0, 1 or 2).
    pub trick_card: usize,
    /// Number of the current trick, starting at 1.
    pub trick_num: usize,
    /// The trick leader is certain to take every remaining trick.
    pub leader_gets_all: bool,
    /// The declarer's null hand can no longer lose.
    pub safe_null: bool,
}

impl Snapshot {
    /// Seat that led the current trick.
    pub fn leader(&self) -> Seat {
        (self.to_move + GAME_PLAYERS - self.trick_card % GAME_PLAYERS) % GAME_PLAYERS
    }
    pub fn cards_to_move(&self) -> usize {
        self.cards[self.to_move % GAME_PLAYERS]
    }
    pub fn viewer_to_move(&self) -> bool {
        self.view.seat() == Some(self.to_move)
    }
    pub fn viewer_declares(&self) -> bool {
        self.view.seat().is_some() && self.view.seat() == self.declarer
    }
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
}
