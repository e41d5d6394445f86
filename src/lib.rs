//! Network runtime for an automated Skat participant.
//!
//! Holds one line-oriented TCP connection to a card server, classifies every
//! incoming line into a [`dispatch::ServiceEvent`], keeps per-table session
//! state behind a single lock, and runs a cancellable move computation for
//! each table the client is seated at.
//!
//! ## Architecture
//!
//! - [`connection`]: login handshake, reader and writer tasks, outbox
//! - [`dispatch`]: ordered matchers turning a line into an event
//! - [`session`]: registries of clients, tables, tournaments and player contexts
//! - [`game`]: capability traits for the rule engine and the decision algorithm
//! - [`control`]: move tasks and the timing/disclosure/resignation policy
//! - [`watchdog`]: periodic table eviction, keep-alive and uptime drain
//! - [`agent`]: reacts to events on behalf of the automated player
//! - [`client`]: wires everything together for one connection
pub mod agent;
pub mod client;
pub mod config;
pub mod connection;
pub mod control;
pub mod dispatch;
pub mod game;
pub mod protocol;
pub mod session;
pub mod watchdog;

use std::time::Duration;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Index of a player in the current game (0 = fore hand, 1 = middle, 2 = rear).
pub type Seat = usize;

// ============================================================================
// PROTOCOL PARAMETERS
// ============================================================================
/// Major protocol version this build speaks. Only the major part must match.
pub const PROTOCOL_MAJOR: u32 = 15;
/// Minor protocol version, informational.
pub const PROTOCOL_MINOR: u32 = 2;
/// Version string as announced in logs.
pub const VERSION: &str = const_format::concatcp!(PROTOCOL_MAJOR, ".", PROTOCOL_MINOR);
/// Players taking part in one game (and cards in one trick).
pub const GAME_PLAYERS: usize = 3;
/// Seats around one table (a fourth player sits out each game).
pub const TABLE_SEATS: usize = 4;
/// Seat name used by the server for observers and empty seats.
pub const NO_NAME: &str = ".";
/// Move token for showing the declarer's cards.
pub const SHOW_CARDS: &str = "SC";
/// Move token for resigning the game.
pub const RESIGN: &str = "RE";
/// Received lines longer than this are clipped in the log.
pub const RCVD_LOG_LIMIT: usize = 1000;
/// Sent lines longer than this are clipped in the log.
pub const SENT_LOG_LIMIT: usize = 100;

// ============================================================================
// MOVE CONTROL
// ============================================================================
/// Time budget handed to the player for every decision.
/// Fixed; the remaining table clock is not consulted.
pub const DECISION_BUDGET: Duration = Duration::from_secs(1);
/// Minimum time between decision start and sending a card early in a trick.
/// Hides how many candidate cards the hand held.
pub const THINK_FLOOR: Duration = Duration::from_secs(2);
/// Minimum time per move when pacing is switched on (`--delay`).
pub const PACE: Duration = Duration::from_secs(1);
/// Resignation and disclosure only apply up to this trick number.
pub const LAST_EARLY_TRICK: usize = 8;
/// Hand size from which the think-time floor applies.
pub const FLOOR_HAND_SIZE: usize = 6;

// ============================================================================
// WATCHDOG
// ============================================================================
/// Period of the table watchdog.
pub const WATCHDOG_PERIOD: Duration = Duration::from_secs(20);
/// Tables without a running game are left after this much silence.
pub const IDLE_LIMIT: Duration = Duration::from_secs(100);
/// Uptime after which a `--quit` client stops accepting games and exits.
pub const MAX_UPTIME: Duration = Duration::from_secs(24 * 60 * 60);
/// Pause inserted by `@` in the initial command string.
pub const COMMAND_PAUSE: Duration = Duration::from_millis(500);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("violent interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}

/// Shared session state can no longer be trusted: report and stop the process.
pub fn fatal(error: impl std::fmt::Display) -> ! {
    log::error!("fatal: {}", error);
    eprintln!("fatal: {}", error);
    std::process::exit(1);
}

/// Clip a line for logging without splitting a character.
pub fn clip(line: &str, limit: usize) -> String {
    match line.char_indices().nth(limit) {
        Some((i, _)) => format!("'{}' ...", &line[..i]),
        None => format!("'{}'", line),
    }
}
