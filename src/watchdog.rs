use crate::config::Timing;
use crate::connection::Outbox;
use crate::protocol::Command;
use crate::session::Shared;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Outcome of one watchdog pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Quit,
}

/// Periodically leaves abandoned tables, keeps the connection alive with
/// `time`, and ends a `--quit` client once its uptime runs out.
pub struct Watchdog {
    shared: Shared,
    outbox: Outbox,
    timing: Timing,
    quit: bool,
    born: Instant,
}

impl Watchdog {
    pub fn new(shared: Shared, outbox: Outbox, timing: Timing, quit: bool) -> Self {
        Self {
            shared,
            outbox,
            timing,
            quit,
            born: Instant::now(),
        }
    }

    /// One pass over the session.
    pub async fn tick(&self) -> Tick {
        let mut session = self.shared.lock().await;
        if self.quit && self.born.elapsed() >= self.timing.uptime {
            session.drain();
        }
        if session.is_draining() {
            log::info!("[watchdog] time is up");
            return Tick::Quit;
        }
        session
            .joined()
            .filter(|t| t.occupants() <= 1 || (!t.in_progress() && t.idle() >= self.timing.idle))
            .inspect(|t| log::info!("[watchdog] leaving {}", t.id()))
            .for_each(|t| self.outbox.send(Command::Leave(t.id().clone())));
        self.outbox.send(Command::Time);
        Tick::Continue
    }

    /// Run forever, first pass one period from now. Exits the process on `Quit`.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + self.timing.period, self.timing.period);
            loop {
                interval.tick().await;
                if self.tick().await == Tick::Quit {
                    std::process::exit(0);
                }
            }
        })
    }
}
