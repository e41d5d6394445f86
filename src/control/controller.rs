use super::*;
use crate::GAME_PLAYERS;
use crate::config::Timing;
use crate::connection::Outbox;
use crate::game::*;
use crate::protocol::Command;
use crate::session::*;
use rand::seq::IndexedRandom;
use std::sync::Arc;
use tokio::time::Instant;

/// What a finished decision turns into once checked against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Verdict {
    action: String,
    floor: bool,
    disclose: bool,
}

/// Starts, tracks and cancels move computations for every table the
/// client plays at. Entry points run on the reader path; the
/// computations themselves run on their own tasks.
#[derive(Clone)]
pub struct Controller {
    shared: Shared,
    outbox: Outbox,
    factory: Arc<dyn PlayerFactory>,
    timing: Timing,
}

impl Controller {
    pub fn new(shared: Shared, outbox: Outbox, factory: Arc<dyn PlayerFactory>, timing: Timing) -> Self {
        Self {
            shared,
            outbox,
            factory,
            timing,
        }
    }

    /// A game began at `id`.
    pub async fn start(&self, id: &TableViewerId) -> Result<(), Inconsistency> {
        let (snapshot, previous) = {
            let mut session = self.shared.lock().await;
            let (snapshot, history) = {
                let game = Self::game(&mut session, id)?;
                (game.snapshot(), game.history())
            };
            let Some(seat) = snapshot.view.seat() else {
                log::debug!("[control] {} skip start, not a player", id);
                return Ok(());
            };
            if seat >= GAME_PLAYERS {
                return Err(Inconsistency::Seat(format!("{} at {}", seat, id)));
            }
            if session.context(id).is_none() {
                let player = self.factory.build(id);
                session.insert_context(id.clone(), PlayerContext::new(player));
            }
            let context = session
                .context_mut(id)
                .ok_or_else(|| Inconsistency::NoContext(id.to_string()))?;
            context.player().reset(seat);
            history
                .iter()
                .for_each(|m| context.player().notify(m.source, &m.action));
            context.rearm();
            let previous = context.live();
            if let Some(task) = previous.as_ref() {
                log::debug!("[control] {} interrupting leftover task", id);
                task.interrupt();
            }
            (snapshot, previous)
        };
        if let Some(task) = previous {
            task.wait().await;
        }
        if !snapshot.is_finished() && snapshot.viewer_to_move() {
            self.spawn(id).await?;
        }
        Ok(())
    }

    /// Somebody moved at `id`.
    pub async fn play(&self, id: &TableViewerId) -> Result<(), Inconsistency> {
        let compute = {
            let mut session = self.shared.lock().await;
            let table = session.find(id)?;
            let last = table.last().cloned();
            let snapshot = table
                .game()
                .ok_or_else(|| Inconsistency::NoGame(id.to_string()))?
                .snapshot();
            if snapshot.view.seat().is_none() {
                log::debug!("[control] {} skip move, not a player", id);
                return Ok(());
            }
            if snapshot.is_finished() {
                return Ok(());
            }
            let last = last.ok_or_else(|| Inconsistency::Malformed(format!("no last move at {}", id)))?;
            let context = session
                .context_mut(id)
                .ok_or_else(|| Inconsistency::NoContext(id.to_string()))?;
            context.player().notify(last.source, &last.action);
            if partner_resigned(&snapshot, last.source, &last.action) && context.resign() {
                log::info!("[control] {} partner resigned, resigning too", id);
                self.outbox.send(Command::resign(id));
                return Ok(());
            }
            if concede(&snapshot) && context.resign() {
                log::info!("[control] {} declarer cannot lose, resigning", id);
                self.outbox.send(Command::resign(id));
            }
            snapshot.viewer_to_move()
        };
        if compute {
            self.spawn(id).await?;
        }
        Ok(())
    }

    /// The game at `id` is over; the context goes away.
    pub async fn end(&self, id: &TableViewerId, history: &str) -> Result<(), Inconsistency> {
        let context = self.shared.lock().await.remove_context(id);
        let Some(context) = context else {
            log::debug!("[control] {} no player to release", id);
            return Ok(());
        };
        context.player().finish(history);
        Self::retire(context).await;
        Ok(())
    }

    /// The table at `id` is gone: drop its context and dispose the player.
    pub async fn release(&self, id: &TableViewerId) {
        let context = self.shared.lock().await.remove_context(id);
        if let Some(context) = context {
            log::debug!("[control] {} releasing player", id);
            Self::retire(context).await;
        }
    }

    /// Interrupt every live computation, wait for all of them and
    /// dispose every player.
    pub async fn shutdown(&self) {
        let contexts = self.shared.lock().await.take_contexts();
        log::info!("[control] shutting down {} player(s)", contexts.len());
        futures::future::join_all(contexts.into_iter().map(|(_, context)| Self::retire(context))).await;
    }

    /// Launch a computation at `id`. While one is still live, that one is
    /// returned instead and nothing new starts.
    pub async fn spawn(&self, id: &TableViewerId) -> Result<MoveTask, Inconsistency> {
        let mut session = self.shared.lock().await;
        let (game, seat) = {
            let table = session.find(id)?;
            let seat = table.viewer_seat();
            let game = table
                .game()
                .ok_or_else(|| Inconsistency::NoGame(id.to_string()))?
                .boxed();
            (game, seat)
        };
        seat.filter(|s| *s < GAME_PLAYERS)
            .ok_or_else(|| Inconsistency::Seat(id.to_string()))?;
        let context = session
            .context_mut(id)
            .ok_or_else(|| Inconsistency::NoContext(id.to_string()))?;
        if let Some(live) = context.live() {
            log::warn!("[control] {} move task still running, not starting another", id);
            return Ok(live);
        }
        let task = MoveTask::new(context.player().clone());
        context.assign(task.clone());
        drop(session);
        log::debug!("[control] {} computing move", id);
        tokio::spawn(self.clone().run(id.clone(), task.clone(), game));
        Ok(task)
    }
}

impl Controller {
    async fn retire(context: PlayerContext) {
        if let Some(task) = context.live() {
            task.interrupt();
            task.wait().await;
        }
        context.player().dispose();
    }

    async fn run(self, id: TableViewerId, task: MoveTask, game: Box<dyn Game>) {
        let _guard = task.guard();
        if !task.begin() {
            return;
        }
        let began = Instant::now();
        let decision = task.player().decide(game.as_ref(), self.timing.budget).await;
        if task.is_interrupted() {
            log::debug!("[control] {} computation interrupted", id);
            return;
        }
        let verdict = match self.settle(&id, decision).await {
            Ok(Some(verdict)) => verdict,
            Ok(None) => return,
            Err(e) => crate::fatal(e),
        };
        if verdict.floor {
            tokio::time::sleep_until(began + self.timing.floor).await;
        }
        if let Some(pace) = self.timing.pace {
            tokio::time::sleep_until(began + pace).await;
        }
        let mut session = self.shared.lock().await;
        if task.is_interrupted() {
            log::debug!("[control] {} interrupted before sending", id);
            return;
        }
        let Some(context) = session.context_mut(&id).filter(|c| c.runs(&task)) else {
            log::debug!("[control] {} task was replaced, dropping {}", id, verdict.action);
            return;
        };
        if verdict.disclose && context.disclose() {
            self.outbox.send(Command::disclose(&id));
        }
        self.outbox.send(Command::Play(id, verdict.action));
    }

    /// Check the decision against the current position, replacing an
    /// illegal one by a random legal move. `None` if the table is gone.
    async fn settle(&self, id: &TableViewerId, decision: String) -> Result<Option<Verdict>, Inconsistency> {
        let session = self.shared.lock().await;
        let Some(table) = session.table(id) else {
            return Ok(None);
        };
        let game = table
            .game()
            .ok_or_else(|| Inconsistency::NoGame(id.to_string()))?;
        let snapshot = game.snapshot();
        let mut trial = game.boxed();
        let action = match trial.apply(Source::Seat(snapshot.to_move), &decision) {
            Ok(()) => decision,
            Err(e) => {
                log::warn!("[control] {} computed illegal move {}: {}", id, decision, e);
                self.outbox.send(Command::Tell(
                    id.clone(),
                    format!("Computed illegal move {}: {}! Send random move instead.", decision, e),
                ));
                Self::fallback(game).ok_or_else(|| Inconsistency::NoLegalMove(id.to_string()))?
            }
        };
        Ok(Some(Verdict {
            action,
            floor: think_floor(&snapshot),
            disclose: disclose(&snapshot),
        }))
    }

    fn fallback(game: &dyn Game) -> Option<String> {
        let ref mut rng = rand::rng();
        game.legal().choose(rng).cloned()
    }

    fn game<'a>(session: &'a mut Session, id: &TableViewerId) -> Result<&'a dyn Game, Inconsistency> {
        session
            .find(id)?
            .game()
            .ok_or_else(|| Inconsistency::NoGame(id.to_string()))
    }
}
