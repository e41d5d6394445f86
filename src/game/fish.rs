use super::*;
use crate::Seat;
use rand::seq::IndexedRandom;
use std::time::Duration;

/// CPU player that picks uniformly among legal moves.
#[derive(Debug, Default)]
pub struct Fish;

#[async_trait::async_trait]
impl Player for Fish {
    fn reset(&self, seat: Seat) {
        log::debug!("[fish] seated at {}", seat);
    }
    fn notify(&self, _: Source, _: &str) {}
    async fn decide(&self, game: &dyn Game, _: Duration) -> String {
        let ref mut rng = rand::rng();
        game.legal().choose(rng).cloned().unwrap_or_default()
    }
    fn finish(&self, _: &str) {}
    fn interrupt(&self) {}
}
