use clap::Parser;
use std::time::Duration;

/// Command line of the automated client.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Automated Skat client", long_about = None)]
pub struct Config {
    #[arg(long, default_value = "localhost", help = "server host")]
    pub host: String,
    #[arg(long, default_value_t = 80, help = "server port")]
    pub port: u16,
    #[arg(long, default_value = "foo", help = "user name")]
    pub id: String,
    #[arg(long, default_value = "foo", help = "password")]
    pub password: String,
    #[arg(long, default_value = "", help = "initial commands (| separates, _ is a space, @ pauses)")]
    pub cmds: String,
    #[arg(long, help = "play no faster than one second per move")]
    pub delay: bool,
    #[arg(long, help = "stop taking games and exit after one day")]
    pub quit: bool,
    #[arg(long, default_value = "fish", help = "decision algorithm")]
    pub ai: String,
    #[arg(long, default_value = "", help = "client place tag")]
    pub place: String,
    #[arg(long = "kind", default_value = "", help = "player type passed to the player factory")]
    pub kind: String,
    #[arg(long = "params", default_value = "", help = "player parameters passed to the player factory")]
    pub params: String,
    #[arg(long = "library", default_value = "", help = "native player library passed to the player factory")]
    pub library: String,
    #[arg(skip)]
    pub timing: Timing,
}

impl Config {
    /// Initial command string as a sequence of sends and pauses.
    pub fn commands(&self) -> Vec<Step> {
        Step::parse(&self.cmds, self.timing.pause)
    }
    /// Timing with `--delay` applied.
    pub fn timing(&self) -> Timing {
        Timing {
            pace: self.delay.then_some(crate::PACE),
            ..self.timing
        }
    }
}

/// One item of the initial command string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Pause(Duration),
    Send(String),
}

impl Step {
    pub fn parse(cmds: &str, pause: Duration) -> Vec<Self> {
        cmds.split('|')
            .filter(|c| !c.is_empty())
            .map(|c| match c {
                "@" => Self::Pause(pause),
                c => Self::Send(c.replace('_', " ")),
            })
            .collect()
    }
}

/// Every duration the runtime waits on.
/// Defaults are the production constants; tests shrink them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Budget handed to the player per decision.
    pub budget: Duration,
    /// Think-time floor measured from decision start.
    pub floor: Duration,
    /// Minimum time per move, when pacing is on.
    pub pace: Option<Duration>,
    /// Watchdog period.
    pub period: Duration,
    /// Idle time after which a table without a game is left.
    pub idle: Duration,
    /// Uptime after which a quitting client drains.
    pub uptime: Duration,
    /// Pause inserted by `@` in the initial commands.
    pub pause: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            budget: crate::DECISION_BUDGET,
            floor: crate::THINK_FLOOR,
            pace: None,
            period: crate::WATCHDOG_PERIOD,
            idle: crate::IDLE_LIMIT,
            uptime: crate::MAX_UPTIME,
            pause: crate::COMMAND_PAUSE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn command_string() {
        let pause = Duration::from_millis(500);
        assert_eq!(
            Step::parse("join_T1_pw|@|tell_bob_hi", pause),
            vec![
                Step::Send("join T1 pw".into()),
                Step::Pause(pause),
                Step::Send("tell bob hi".into()),
            ]
        );
        assert!(Step::parse("", pause).is_empty());
    }
    #[test]
    fn defaults() {
        let config = Config::parse_from(["skatclient"]);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 80);
        assert_eq!(config.ai, "fish");
        assert!(!config.quit);
        assert_eq!(config.timing().pace, None);
        assert_eq!(config.timing().floor, crate::THINK_FLOOR);
    }
    #[test]
    fn delay_turns_on_pacing() {
        let config = Config::parse_from(["skatclient", "--delay", "--id", "bot", "--port", "4242"]);
        assert_eq!(config.timing().pace, Some(crate::PACE));
        assert_eq!(config.id, "bot");
        assert_eq!(config.port, 4242);
    }
}
