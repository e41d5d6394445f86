use super::*;
use crate::SENT_LOG_LIMIT;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::UnboundedReceiver;

/// Outbound half of the connection. Drains the [`Outbox`] queue in order,
/// one line per command.
pub struct Writer<W> {
    half: W,
    queue: UnboundedReceiver<String>,
    lifeline: Lifeline,
}

impl<W> Writer<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(half: W, queue: UnboundedReceiver<String>, lifeline: Lifeline) -> Self {
        Self {
            half,
            queue,
            lifeline,
        }
    }

    /// Write until the connection ends, then close the queue and the socket.
    pub async fn run(mut self) {
        log::debug!("[writer] started");
        loop {
            tokio::select! {
                biased;
                _ = self.lifeline.dead() => break,
                next = self.queue.recv() => match next {
                    Some(line) => {
                        if let Err(e) = self.write(&line).await {
                            log::warn!("[writer] {}", e);
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
        self.queue.close();
        let _ = self.half.shutdown().await;
        self.lifeline.terminate();
        log::debug!("[writer] stopped");
    }

    async fn write(&mut self, line: &str) -> std::io::Result<()> {
        self.half.write_all(line.as_bytes()).await?;
        self.half.write_all(b"\n").await?;
        self.half.flush().await?;
        log::debug!("SENT: {}", crate::clip(line, SENT_LOG_LIMIT));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncBufReadExt;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn writes_lines_in_order() {
        let (near, far) = tokio::io::duplex(1024);
        let (outbox, queue) = Outbox::channel();
        let lifeline = Lifeline::default();
        let writer = tokio::spawn(Writer::new(near, queue, lifeline.clone()).run());
        outbox.send("time");
        outbox.send("join T1 pw");
        let mut lines = BufReader::new(far).lines();
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("time"));
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("join T1 pw"));
        lifeline.terminate();
        writer.await.unwrap();
        assert_eq!(lines.next_line().await.unwrap(), None);
    }
}
