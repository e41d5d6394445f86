use super::*;
use crate::GAME_PLAYERS;
use crate::RESIGN;
use crate::SHOW_CARDS;

/// Minimal rules adapter standing in for a real Skat engine.
///
/// Every game starts from a template [`Snapshot`] and offers the same list
/// of legal moves. A legal move by the player to move passes the turn on and
/// advances the trick; moves by anyone else are recorded without effect.
/// The default template is a finished game, so nothing is ever computed.
#[derive(Debug, Clone)]
pub struct Stub {
    template: Snapshot,
    legal: Vec<String>,
}

impl Default for Stub {
    fn default() -> Self {
        Self::new(
            Snapshot {
                phase: Phase::Finished,
                ..Snapshot::default()
            },
            &[],
        )
    }
}

impl Stub {
    pub fn new(template: Snapshot, legal: &[&str]) -> Self {
        Self {
            template,
            legal: legal.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Rules for Stub {
    fn deal(&self, view: View) -> Box<dyn Game> {
        Box::new(StubGame {
            snapshot: Snapshot {
                view,
                ..self.template.clone()
            },
            legal: self.legal.clone(),
            history: Vec::new(),
        })
    }
    fn load(&self, view: View, _: &str) -> anyhow::Result<Box<dyn Game>> {
        Ok(self.deal(view))
    }
}

#[derive(Debug, Clone)]
pub struct StubGame {
    snapshot: Snapshot,
    legal: Vec<String>,
    history: Vec<Move>,
}

impl StubGame {
    fn rotate(&mut self) {
        let s = &mut self.snapshot;
        s.cards[s.to_move] = s.cards[s.to_move].saturating_sub(1);
        s.to_move = (s.to_move + 1) % GAME_PLAYERS;
        s.trick_card += 1;
        if s.trick_card == GAME_PLAYERS {
            s.trick_card = 0;
            s.trick_num += 1;
        }
    }
}

impl Game for StubGame {
    fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }
    fn legal(&self) -> Vec<String> {
        match self.snapshot.phase {
            Phase::Finished => Vec::new(),
            _ => self.legal.clone(),
        }
    }
    fn apply(&mut self, who: Source, action: &str) -> anyhow::Result<()> {
        let signal = action == RESIGN || action == SHOW_CARDS;
        let mover = who == Source::Seat(self.snapshot.to_move);
        if mover && !signal {
            if !self.legal().iter().any(|m| m == action) {
                anyhow::bail!("{} is not legal here", action);
            }
            self.rotate();
        }
        self.history.push(Move::new(who, action));
        Ok(())
    }
    fn history(&self) -> Vec<Move> {
        self.history.clone()
    }
    fn boxed(&self) -> Box<dyn Game> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cardplay() -> Stub {
        Stub::new(
            Snapshot {
                phase: Phase::Cardplay,
                cards: [10, 10, 10],
                trick_num: 1,
                ..Snapshot::default()
            },
            &["CJ", "SJ"],
        )
    }

    #[test]
    fn legal_move_rotates() {
        let mut game = cardplay().deal(View::Seat(0));
        game.apply(Source::Seat(0), "CJ").unwrap();
        let s = game.snapshot();
        assert_eq!(s.to_move, 1);
        assert_eq!(s.trick_card, 1);
        assert_eq!(s.cards, [9, 10, 10]);
        assert_eq!(s.leader(), 0);
    }
    #[test]
    fn third_card_closes_trick() {
        let mut game = cardplay().deal(View::World);
        for seat in 0..3 {
            game.apply(Source::Seat(seat), "SJ").unwrap();
        }
        let s = game.snapshot();
        assert_eq!(s.trick_card, 0);
        assert_eq!(s.trick_num, 2);
        assert_eq!(game.history().len(), 3);
    }
    #[test]
    fn illegal_move_rejected() {
        let mut game = cardplay().deal(View::Seat(0));
        assert!(game.apply(Source::Seat(0), "DA").is_err());
        assert!(game.history().is_empty());
    }
    #[test]
    fn signals_never_rotate() {
        let mut game = cardplay().deal(View::Seat(0));
        game.apply(Source::Seat(0), "RE").unwrap();
        game.apply(Source::Seat(2), "SC").unwrap();
        assert_eq!(game.snapshot().to_move, 0);
        assert_eq!(game.history().len(), 2);
    }
    #[test]
    fn default_never_moves() {
        let game = Stub::default().deal(View::Seat(0));
        assert!(game.snapshot().is_finished());
        assert!(game.legal().is_empty());
    }
}
