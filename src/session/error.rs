/// Session state contradicts what the server just told us.
///
/// None of these can be recovered from: the reader reports them and
/// stops the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    UnknownTable(String),
    DuplicateTable(String),
    NoContext(String),
    NoGame(String),
    Seat(String),
    Malformed(String),
    NoLegalMove(String),
}

impl std::fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTable(t) => write!(f, "table {} not created", t),
            Self::DuplicateTable(t) => write!(f, "table {} already exists", t),
            Self::NoContext(t) => write!(f, "no player context for {}", t),
            Self::NoGame(t) => write!(f, "no game at {}", t),
            Self::Seat(s) => write!(f, "viewer seat out of range: {}", s),
            Self::Malformed(s) => write!(f, "malformed table message: {}", s),
            Self::NoLegalMove(t) => write!(f, "no legal move at {}", t),
        }
    }
}

impl std::error::Error for Inconsistency {}
