//! When to wait, when to show cards and when to give up.
//! Pure functions of the rule engine's [`Snapshot`].
use crate::FLOOR_HAND_SIZE;
use crate::GAME_PLAYERS;
use crate::LAST_EARLY_TRICK;
use crate::RESIGN;
use crate::game::*;

/// Sending the second or third card of a trick from a hand of six or more
/// must not be faster than the think-time floor.
pub fn think_floor(s: &Snapshot) -> bool {
    s.phase == Phase::Cardplay
        && s.cards_to_move() >= FLOOR_HAND_SIZE
        && (s.trick_card == 1 || s.trick_card == 2)
}

/// The declarer, about to lead, holds a hand that cannot lose a trick
/// (or a null hand that cannot take one) and should show it.
pub fn disclose(s: &Snapshot) -> bool {
    s.viewer_declares()
        && s.phase == Phase::Cardplay
        && !s.ouvert
        && s.declarer == Some(s.to_move)
        && ((s.trick_card % GAME_PLAYERS == 0 && s.leader_gets_all && s.trick_num <= LAST_EARLY_TRICK)
            || s.safe_null)
}

/// The viewer defends against a declarer in the card play.
pub fn defending(s: &Snapshot) -> bool {
    s.phase == Phase::Cardplay && s.declarer.is_some() && s.view.seat().is_some() && !s.viewer_declares()
}

/// The declarer is certain to win, so a defender resigns.
pub fn concede(s: &Snapshot) -> bool {
    defending(s)
        && ((s.declarer == Some(s.leader())
            && !s.null
            && s.leader_gets_all
            && s.trick_num <= LAST_EARLY_TRICK)
            || s.safe_null)
}

/// The fellow defender just resigned.
pub fn partner_resigned(s: &Snapshot, who: Source, action: &str) -> bool {
    match who {
        Source::Seat(seat) => {
            defending(s)
                && action == RESIGN
                && Some(seat) != s.view.seat()
                && Some(seat) != s.declarer
        }
        Source::World => false,
    }
}
