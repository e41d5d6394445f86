use crate::game::Player;
use std::sync::Arc;
use tokio::sync::watch;

/// Lifecycle of one move computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Created,
    Running,
    Interrupting,
    Finished,
}

/// Handle on one move computation.
///
/// Status changes are published on a watch channel, so waiting for a task
/// to finish is a plain await. A task only ever moves forward through
/// [`Status`] and is never restarted.
#[derive(Clone)]
pub struct MoveTask {
    status: Arc<watch::Sender<Status>>,
    player: Arc<dyn Player>,
}

impl MoveTask {
    pub fn new(player: Arc<dyn Player>) -> Self {
        Self {
            status: Arc::new(watch::channel(Status::Created).0),
            player,
        }
    }
    pub fn player(&self) -> &Arc<dyn Player> {
        &self.player
    }
    pub fn status(&self) -> Status {
        *self.status.borrow()
    }
    pub fn is_interrupted(&self) -> bool {
        self.status() == Status::Interrupting
    }
    pub fn is_finished(&self) -> bool {
        self.status() == Status::Finished
    }

    /// `Created -> Running`. False if the task was cancelled before it ran.
    pub fn begin(&self) -> bool {
        self.status.send_if_modified(|status| match status {
            Status::Created => {
                *status = Status::Running;
                true
            }
            _ => false,
        })
    }

    /// Ask the task to stop. Reaches the player only while it is deciding.
    pub fn interrupt(&self) {
        let mut running = false;
        self.status.send_if_modified(|status| match status {
            Status::Created => {
                *status = Status::Interrupting;
                true
            }
            Status::Running => {
                running = true;
                *status = Status::Interrupting;
                true
            }
            _ => false,
        });
        if running {
            self.player.interrupt();
        }
    }

    pub fn finish(&self) {
        self.status.send_replace(Status::Finished);
    }

    /// Resolves once the task has finished.
    pub async fn wait(&self) {
        let mut rx = self.status.subscribe();
        let _ = rx.wait_for(|status| *status == Status::Finished).await;
    }

    /// Both handles refer to the same computation.
    pub fn same(&self, other: &MoveTask) -> bool {
        Arc::ptr_eq(&self.status, &other.status)
    }

    /// Marks the task finished when dropped, however the body exits.
    pub fn guard(&self) -> Finisher {
        Finisher(self.clone())
    }
}

pub struct Finisher(MoveTask);

impl Drop for Finisher {
    fn drop(&mut self) {
        self.0.finish();
    }
}
