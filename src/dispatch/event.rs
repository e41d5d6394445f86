use crate::game::Source;
use crate::session::TableViewerId;

/// Everything the server can tell us, one variant per message shape.
/// Produced by the dispatcher after session state has been updated.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceEvent {
    ClientJoined(String),
    ClientLeft(String),
    Yell {
        from: String,
        text: String,
    },
    Tell {
        from: String,
        text: String,
    },
    Text {
        id: String,
        text: String,
    },
    TableCreated {
        table: TableViewerId,
        player: bool,
    },
    TableDestroyed {
        table: TableViewerId,
        player: bool,
    },
    TableAdded(String),
    TableRemoved(String),
    TableStop(TableViewerId),
    TablePlay {
        table: TableViewerId,
        who: Source,
        action: String,
    },
    TableState(TableViewerId),
    TableTell {
        table: TableViewerId,
        from: String,
        text: String,
    },
    TableStart(TableViewerId),
    TableEnd {
        table: TableViewerId,
        history: String,
    },
    TableError {
        table: TableViewerId,
        text: String,
    },
    TableGo(TableViewerId),
    Invite {
        from: String,
        table: String,
        password: String,
    },
    Finger {
        name: String,
        info: String,
    },
    Time {
        date: String,
        time: String,
    },
    TourAdded(String),
    TourRemoved(String),
    Error(String),
    /// The connection is gone. Never parsed; delivered once by the reader.
    Disconnect,
    CatchAll(Vec<String>),
}

impl ServiceEvent {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClientJoined(_) => "clients+",
            Self::ClientLeft(_) => "clients-",
            Self::Yell { .. } => "yell",
            Self::Tell { .. } => "tell",
            Self::Text { .. } => "text",
            Self::TableCreated { .. } => "create",
            Self::TableDestroyed { .. } => "destroy",
            Self::TableAdded(_) => "tables+",
            Self::TableRemoved(_) => "tables-",
            Self::TableStop(_) => "stop",
            Self::TablePlay { .. } => "play",
            Self::TableState(_) => "state",
            Self::TableTell { .. } => "table tell",
            Self::TableStart(_) => "start",
            Self::TableEnd { .. } => "end",
            Self::TableError { .. } => "table error",
            Self::TableGo(_) => "go",
            Self::Invite { .. } => "invite",
            Self::Finger { .. } => "finger",
            Self::Time { .. } => "time",
            Self::TourAdded(_) => "tour+",
            Self::TourRemoved(_) => "tour-",
            Self::Error(_) => "error",
            Self::Disconnect => "disconnect",
            Self::CatchAll(_) => "catch-all",
        }
    }
}
