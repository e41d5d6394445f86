use super::*;
use crate::Seat;
use crate::session::TableViewerId;
use std::sync::Arc;
use std::time::Duration;

/// Decision algorithm seated at one table.
///
/// Methods take `&self` so that `interrupt` can reach a player while
/// `decide` is still running on another task. Implementations keep any
/// mutable search state behind their own interior mutability.
#[async_trait::async_trait]
pub trait Player: Send + Sync {
    /// Called when a new game begins with the seat this player holds.
    fn reset(&self, seat: Seat);
    /// Observe a move made by anyone at the table.
    fn notify(&self, who: Source, action: &str);
    /// Choose a move for the player to move within `budget`.
    async fn decide(&self, game: &dyn Game, budget: Duration) -> String;
    /// Game over, with the final record.
    fn finish(&self, history: &str);
    /// Ask a running `decide` to return as soon as possible.
    fn interrupt(&self);
    /// Release resources; the player is not used again.
    fn dispose(&self) {
        self.interrupt();
    }
}

/// Builds a fresh player for a table context.
pub trait PlayerFactory: Send + Sync {
    fn build(&self, table: &TableViewerId) -> Arc<dyn Player>;
}
