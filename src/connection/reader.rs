use super::*;
use crate::RCVD_LOG_LIMIT;
use crate::dispatch::Dispatcher;
use crate::dispatch::ServiceEvent;
use crate::session::Shared;
use std::borrow::Cow;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncRead;
use tokio::io::BufReader;

/// Inbound half of the connection.
///
/// The only task that mutates session state on behalf of the server:
/// every line is dispatched under the session lock and the resulting
/// event is handed to the [`Handler`] once the lock is released.
pub struct Reader<R, H> {
    source: BufReader<R>,
    buffer: Vec<u8>,
    shared: Shared,
    dispatcher: Dispatcher,
    handler: H,
    lifeline: Lifeline,
}

impl<R, H> Reader<R, H>
where
    R: AsyncRead + Unpin + Send + 'static,
    H: Handler,
{
    pub fn new(
        source: BufReader<R>,
        shared: Shared,
        dispatcher: Dispatcher,
        handler: H,
        lifeline: Lifeline,
    ) -> Self {
        Self {
            source,
            buffer: Vec::new(),
            shared,
            dispatcher,
            handler,
            lifeline,
        }
    }

    /// Read until the connection ends, then deliver `Disconnect`.
    pub async fn run(mut self) {
        log::debug!("[reader] started");
        loop {
            tokio::select! {
                biased;
                _ = self.lifeline.dead() => break,
                read = self.source.read_until(b'\n', &mut self.buffer) => match read {
                    Ok(0) => {
                        log::info!("[reader] server closed the connection");
                        break;
                    }
                    Ok(_) => {
                        let line = decode_line(&self.buffer);
                        self.buffer.clear();
                        self.receive(&line).await;
                    }
                    Err(e) => {
                        log::warn!("[reader] {}", e);
                        break;
                    }
                },
            }
        }
        self.lifeline.terminate();
        self.deliver(&ServiceEvent::Disconnect).await;
        log::debug!("[reader] stopped");
    }

    async fn receive(&self, line: &str) {
        log::debug!("RCVD: {}", crate::clip(line, RCVD_LOG_LIMIT));
        let event = {
            let mut session = self.shared.lock().await;
            self.dispatcher.dispatch(&mut session, line)
        };
        match event {
            Ok(event) => self.deliver(&event).await,
            Err(e) => crate::fatal(e),
        }
    }

    async fn deliver(&self, event: &ServiceEvent) {
        if let Err(e) = self.handler.handle(event).await {
            crate::fatal(e);
        }
    }
}

/// One received line without its terminator (`\n` or `\r\n`).
/// Bytes that are not UTF-8 are replaced rather than ending the session.
pub fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(line) => line.to_string(),
        Cow::Owned(line) => {
            log::warn!("[reader] invalid UTF-8 replaced in {}", crate::clip(&line, RCVD_LOG_LIMIT));
            line
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Stub;
    use crate::session::Inconsistency;
    use crate::session::Session;
    use std::sync::Arc;
    use std::sync::Mutex;
    use tokio::io::AsyncWriteExt;
    use tokio::io::DuplexStream;

    /// Remembers every event it is handed.
    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<ServiceEvent>>>);

    impl Recorder {
        fn events(&self) -> Vec<ServiceEvent> {
            self.0.lock().unwrap().clone()
        }
        fn disconnects(&self) -> usize {
            self.events()
                .iter()
                .filter(|e| **e == ServiceEvent::Disconnect)
                .count()
        }
    }

    #[async_trait::async_trait]
    impl Handler for Recorder {
        async fn handle(&self, event: &ServiceEvent) -> Result<(), Inconsistency> {
            self.0.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    fn reader(near: DuplexStream, recorder: Recorder, lifeline: Lifeline) -> Reader<DuplexStream, Recorder> {
        Reader::new(
            BufReader::new(near),
            Session::new("bob", "").shared(),
            Dispatcher::new(Arc::new(Stub::default())),
            recorder,
            lifeline,
        )
    }

    async fn feed(bytes: &[u8]) -> Recorder {
        let (near, mut far) = tokio::io::duplex(1024);
        let recorder = Recorder::default();
        let task = tokio::spawn(reader(near, recorder.clone(), Lifeline::default()).run());
        far.write_all(bytes).await.unwrap();
        drop(far);
        task.await.unwrap();
        recorder
    }

    #[test]
    fn terminators_are_stripped() {
        assert_eq!(decode_line(b"time 1 2\r\n"), "time 1 2");
        assert_eq!(decode_line(b"time 1 2\n"), "time 1 2");
        assert_eq!(decode_line(b"time 1 2"), "time 1 2");
        assert_eq!(decode_line(b"caf\xe9"), "caf\u{fffd}");
    }
    #[tokio::test]
    async fn events_keep_arrival_order() {
        let recorder = feed(b"tell ann hi\nyell cid yo\nwhatever\r\ntime 2024-05-01 12:00:00\n").await;
        assert_eq!(
            recorder.events(),
            vec![
                ServiceEvent::Tell {
                    from: "ann".into(),
                    text: "hi".into()
                },
                ServiceEvent::Yell {
                    from: "cid".into(),
                    text: "yo".into()
                },
                ServiceEvent::CatchAll(vec!["whatever".into()]),
                ServiceEvent::Time {
                    date: "2024-05-01".into(),
                    time: "12:00:00".into()
                },
                ServiceEvent::Disconnect,
            ]
        );
    }
    #[tokio::test]
    async fn invalid_utf8_is_replaced_not_fatal() {
        let recorder = feed(b"tell ann hi\ntell ann caf\xe9\ntime 2024-05-01 12:00:00\n").await;
        let events = recorder.events();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[1],
            ServiceEvent::Tell {
                from: "ann".into(),
                text: "caf\u{fffd}".into()
            }
        );
        assert!(matches!(events[2], ServiceEvent::Time { .. }));
        assert_eq!(recorder.disconnects(), 1);
    }
    #[tokio::test]
    async fn last_line_without_newline_is_read() {
        let recorder = feed(b"error bye").await;
        assert_eq!(
            recorder.events(),
            vec![ServiceEvent::Error("bye".into()), ServiceEvent::Disconnect]
        );
    }
    #[tokio::test]
    async fn eof_disconnects_once() {
        let recorder = feed(b"").await;
        assert_eq!(recorder.events(), vec![ServiceEvent::Disconnect]);
    }
    #[tokio::test]
    async fn writer_side_cut_disconnects_once() {
        let (near, mut far) = tokio::io::duplex(1024);
        let recorder = Recorder::default();
        let lifeline = Lifeline::default();
        let task = tokio::spawn(reader(near, recorder.clone(), lifeline.clone()).run());
        far.write_all(b"tell ann hi\n").await.unwrap();
        while recorder.events().is_empty() {
            tokio::task::yield_now().await;
        }
        assert!(lifeline.terminate());
        task.await.unwrap();
        assert!(!lifeline.terminate());
        assert_eq!(recorder.disconnects(), 1);
        assert_eq!(recorder.events().len(), 2);
        drop(far);
    }
}
