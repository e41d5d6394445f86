#![allow(dead_code)]
use clap::Parser;
use skatclient::Seat;
use skatclient::config::Config;
use skatclient::config::Timing;
use skatclient::game::*;
use skatclient::session::TableViewerId;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::io::Lines;
use tokio::net::TcpListener;
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::task::JoinHandle;

/// Plays a fixed move and counts how often it was asked to.
#[derive(Clone)]
pub struct Scripted {
    pub action: &'static str,
    pub decided: Arc<AtomicUsize>,
}

impl Scripted {
    pub fn new(action: &'static str) -> Self {
        Self {
            action,
            decided: Arc::new(AtomicUsize::new(0)),
        }
    }
    pub fn decided(&self) -> usize {
        self.decided.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Player for Scripted {
    fn reset(&self, _: Seat) {}
    fn notify(&self, _: Source, _: &str) {}
    async fn decide(&self, _: &dyn Game, _: Duration) -> String {
        self.decided.fetch_add(1, Ordering::SeqCst);
        self.action.to_string()
    }
    fn finish(&self, _: &str) {}
    fn interrupt(&self) {}
}

impl PlayerFactory for Scripted {
    fn build(&self, _: &TableViewerId) -> Arc<dyn Player> {
        Arc::new(self.clone())
    }
}

/// A card-play position with full hands, first trick.
pub fn cardplay() -> Snapshot {
    Snapshot {
        phase: Phase::Cardplay,
        cards: [10, 10, 10],
        trick_num: 1,
        ..Snapshot::default()
    }
}

/// Timing shrunk for tests. The watchdog stays quiet unless asked for.
pub fn timing() -> Timing {
    Timing {
        floor: Duration::from_millis(300),
        period: Duration::from_secs(3600),
        ..Timing::default()
    }
}

/// Scripted end of a loopback connection.
pub struct Server {
    lines: Lines<BufReader<OwnedReadHalf>>,
    half: OwnedWriteHalf,
}

impl Server {
    pub async fn listen() -> (TcpListener, u16) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        (listener, port)
    }
    pub async fn accept(listener: &TcpListener) -> Self {
        let (stream, _) = listener.accept().await.unwrap();
        let (read, half) = stream.into_split();
        Self {
            lines: BufReader::new(read).lines(),
            half,
        }
    }
    pub async fn send(&mut self, line: &str) {
        self.half.write_all(line.as_bytes()).await.unwrap();
        self.half.write_all(b"\n").await.unwrap();
        self.half.flush().await.unwrap();
    }
    /// Next line from the client; `None` once it hung up.
    pub async fn recv(&mut self) -> Option<String> {
        tokio::time::timeout(Duration::from_secs(5), self.lines.next_line())
            .await
            .expect("client went silent")
            .unwrap()
    }
    /// Run the login dialogue, answering with `welcome`.
    pub async fn handshake(&mut self, welcome: &str) {
        assert_eq!(self.recv().await.as_deref(), Some("bob"));
        self.send("password:").await;
        assert_eq!(self.recv().await.as_deref(), Some("secret"));
        self.send(welcome).await;
    }
}

/// Start a full client against `port` with the given rules and player.
pub fn launch(port: u16, timing: Timing, rules: Stub, player: Scripted) -> JoinHandle<anyhow::Result<()>> {
    let mut config = Config::parse_from([
        "skatclient".to_string(),
        "--host".to_string(),
        "127.0.0.1".to_string(),
        "--port".to_string(),
        port.to_string(),
        "--id".to_string(),
        "bob".to_string(),
        "--password".to_string(),
        "secret".to_string(),
    ]);
    config.timing = timing;
    tokio::spawn(skatclient::client::run(config, Arc::new(rules), Arc::new(player)))
}

/// Client connected and logged in as `bob`.
pub async fn session(timing: Timing, rules: Stub, player: Scripted) -> (Server, JoinHandle<anyhow::Result<()>>) {
    let (listener, port) = Server::listen().await;
    let client = launch(port, timing, rules, player);
    let mut server = Server::accept(&listener).await;
    server.handshake("Welcome bob version 15.0").await;
    (server, client)
}

/// `state` payload with the given four seat names.
pub fn state(names: [&str; 4], progress: bool) -> String {
    let rows = names
        .iter()
        .map(|n| format!("{} A 0 0 0 0 0 0 0 0", n))
        .collect::<Vec<_>>();
    let seated = names.iter().filter(|n| **n != ".").count();
    format!("{} {} {} {}", seated, names.join(" "), rows.join(" "), progress)
}
