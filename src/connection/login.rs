use super::*;
use crate::PROTOCOL_MAJOR;
use crate::config::Step;
use crate::dispatch::Dispatcher;
use crate::session::Shared;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

/// Entry point for talking to a server.
pub struct Connection;

impl Connection {
    /// Open a socket and run the id/password handshake.
    pub async fn login(host: &str, port: u16, id: &str, password: &str) -> Result<Login, LoginError> {
        log::info!("[connection] connecting to {}:{} as {}", host, port, id);
        let stream = TcpStream::connect((host, port))
            .await
            .inspect_err(|e| log::warn!("[connection] {}", e))
            .map_err(|_| LoginError::Connection)?;
        let (read, write) = stream.into_split();
        let mut login = Login {
            id: id.to_string(),
            source: BufReader::new(read),
            half: write,
        };
        login.send(id).await?;
        if login.recv().await? != "password:" {
            return Err(LoginError::ExpectedPassword);
        }
        login.write(password).await?;
        log::debug!("SENT: <password>");
        let welcome = login.recv().await?;
        if !welcome.starts_with("Welcome") {
            return Err(LoginError::ExpectedWelcome(welcome));
        }
        let words = welcome.split(' ').collect::<Vec<_>>();
        if let Some(version) = words
            .windows(2)
            .filter(|w| w[0] == "version")
            .map(|w| w[1])
            .find(|v| !Self::compatible(v))
        {
            return Err(LoginError::Version(version.to_string()));
        }
        if let Some(confirmed) = words.get(1) {
            login.id = confirmed.to_string();
        }
        log::info!("[connection] logged in as {}", login.id);
        Ok(login)
    }

    /// Only the major part of a version has to match.
    fn compatible(version: &str) -> bool {
        version.split('.').next() == Some(PROTOCOL_MAJOR.to_string().as_str())
    }
}

/// An authenticated connection whose loops have not started yet.
pub struct Login {
    id: String,
    source: BufReader<OwnedReadHalf>,
    half: OwnedWriteHalf,
}

impl Login {
    /// Client id as confirmed by the server's welcome line.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Send the initial commands, pausing where asked.
    pub async fn commands(&mut self, steps: &[Step]) -> Result<(), LoginError> {
        for step in steps {
            match step {
                Step::Pause(pause) => tokio::time::sleep(*pause).await,
                Step::Send(line) => self.send(line).await?,
            }
        }
        Ok(())
    }

    /// Start the reader and writer tasks.
    pub fn spawn<H>(
        self,
        queue: UnboundedReceiver<String>,
        shared: Shared,
        dispatcher: Dispatcher,
        handler: H,
    ) -> Link
    where
        H: Handler,
    {
        let lifeline = Lifeline::default();
        let writer = Writer::new(self.half, queue, lifeline.clone());
        let reader = Reader::new(self.source, shared, dispatcher, handler, lifeline.clone());
        Link {
            writer: tokio::spawn(writer.run()),
            reader: tokio::spawn(reader.run()),
        }
    }
}

impl Login {
    async fn write(&mut self, line: &str) -> Result<(), LoginError> {
        let ref mut half = self.half;
        async move {
            half.write_all(line.as_bytes()).await?;
            half.write_all(b"\n").await?;
            half.flush().await
        }
        .await
        .inspect_err(|e| log::warn!("[connection] {}", e))
        .map_err(|_| LoginError::Communication)
    }
    async fn send(&mut self, line: &str) -> Result<(), LoginError> {
        self.write(line).await?;
        log::debug!("SENT: {}", crate::clip(line, crate::SENT_LOG_LIMIT));
        Ok(())
    }
    async fn recv(&mut self) -> Result<String, LoginError> {
        let mut bytes = Vec::new();
        let read = self
            .source
            .read_until(b'\n', &mut bytes)
            .await
            .inspect_err(|e| log::warn!("[connection] {}", e))
            .map_err(|_| LoginError::Communication)?;
        if read == 0 {
            return Err(LoginError::Communication);
        }
        let line = decode_line(&bytes);
        log::debug!("RCVD: {}", crate::clip(&line, crate::RCVD_LOG_LIMIT));
        Ok(line)
    }
}

/// Handle on a running connection.
pub struct Link {
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl Link {
    /// Wait until both loops have ended and `Disconnect` has been handled.
    pub async fn closed(self) {
        if let Err(e) = self.reader.await {
            log::error!("[connection] reader failed: {}", e);
        }
        if let Err(e) = self.writer.await {
            log::error!("[connection] writer failed: {}", e);
        }
    }
}
