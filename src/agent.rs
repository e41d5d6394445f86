use crate::connection::Handler;
use crate::connection::Outbox;
use crate::control::Controller;
use crate::dispatch::ServiceEvent;
use crate::protocol::Command;
use crate::session::Inconsistency;
use crate::session::Shared;

/// Plays on behalf of the logged-in user: gets ready at every table it
/// is seated at, accepts invitations and hands moves to the [`Controller`].
pub struct Agent {
    shared: Shared,
    outbox: Outbox,
    controller: Controller,
}

impl Agent {
    pub fn new(shared: Shared, outbox: Outbox, controller: Controller) -> Self {
        Self {
            shared,
            outbox,
            controller,
        }
    }
    async fn draining(&self) -> bool {
        self.shared.lock().await.is_draining()
    }
}

#[async_trait::async_trait]
impl Handler for Agent {
    async fn handle(&self, event: &ServiceEvent) -> Result<(), Inconsistency> {
        match event {
            ServiceEvent::TableCreated { table, player: true } => {
                self.outbox.send(Command::Ready(table.clone()));
            }
            ServiceEvent::TableDestroyed { table, player: true } => {
                self.controller.release(table).await;
            }
            ServiceEvent::TableStart(table) => {
                self.controller.start(table).await?;
            }
            ServiceEvent::TableGo(table) => {
                log::debug!("[agent] {} go", table);
            }
            ServiceEvent::TablePlay { table, .. } => {
                self.controller.play(table).await?;
            }
            ServiceEvent::TableEnd { table, history } => {
                self.controller.end(table, history).await?;
                if !self.draining().await {
                    self.outbox.send(Command::Ready(table.clone()));
                }
            }
            ServiceEvent::Invite { from, table, password } => {
                if self.draining().await {
                    log::info!("[agent] ignoring invitation from {} while draining", from);
                } else {
                    log::info!("[agent] invited to {} by {}", table, from);
                    self.outbox.send(Command::Join {
                        table: table.clone(),
                        password: password.clone(),
                    });
                }
            }
            ServiceEvent::CatchAll(words) => {
                log::warn!("[agent] unhandled command: {}", words.join(" "));
            }
            ServiceEvent::Disconnect => {
                log::info!("[agent] disconnected");
                self.controller.shutdown().await;
            }
            event => {
                log::debug!("[agent] {}", event.kind());
            }
        }
        Ok(())
    }
}
