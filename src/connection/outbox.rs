use std::fmt::Display;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// Sending end of the writer queue. Cheap to clone; never blocks.
#[derive(Debug, Clone)]
pub struct Outbox(UnboundedSender<String>);

impl Outbox {
    pub fn channel() -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = unbounded_channel();
        (Self(tx), rx)
    }
    /// Queue one line. Lines queued after the connection closed are dropped.
    pub fn send(&self, command: impl Display) {
        let line = command.to_string();
        if self.0.send(line).is_err() {
            log::debug!("[outbox] connection closed, dropping '{}'", command);
        }
    }
}
