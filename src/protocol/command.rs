use crate::session::TableViewerId;
use std::fmt::Display;
use std::fmt::Formatter;

/// Commands the client sends to the server.
/// Table-scoped commands are addressed by the seat the client occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ready(TableViewerId),
    Play(TableViewerId, String),
    Leave(TableViewerId),
    Tell(TableViewerId, String),
    Join { table: String, password: String },
    Time,
}

impl Command {
    pub fn disclose(table: &TableViewerId) -> Self {
        Self::Play(table.clone(), crate::SHOW_CARDS.to_string())
    }
    pub fn resign(table: &TableViewerId) -> Self {
        Self::Play(table.clone(), crate::RESIGN.to_string())
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Ready(t) => write!(f, "table {} {} ready", t.table(), t.viewer()),
            Self::Play(t, m) => write!(f, "table {} {} play {}", t.table(), t.viewer(), m),
            Self::Leave(t) => write!(f, "table {} {} leave", t.table(), t.viewer()),
            Self::Tell(t, s) => write!(f, "table {} {} tell {}", t.table(), t.viewer(), s),
            Self::Join { table, password } => write!(f, "join {} {}", table, password),
            Self::Time => write!(f, "time"),
        }
    }
}
