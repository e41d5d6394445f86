/// Ways logging in to the server can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// The socket could not be opened.
    Connection,
    /// The server did not ask for a password after the id.
    ExpectedPassword,
    /// The server did not greet us; carries the line it sent instead.
    ExpectedWelcome(String),
    /// The server speaks another major protocol version.
    Version(String),
    /// The connection broke during the handshake.
    Communication,
}

impl std::fmt::Display for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection => write!(f, "connection error"),
            Self::ExpectedPassword => write!(f, "login error: expected password prompt"),
            Self::ExpectedWelcome(line) => write!(f, "login error: expected welcome : {}", line),
            Self::Version(v) => write!(f, "version mismatch: server {} client {}", v, crate::VERSION),
            Self::Communication => write!(f, "communication problem"),
        }
    }
}

impl std::error::Error for LoginError {}
