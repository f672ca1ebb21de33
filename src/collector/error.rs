use std::fmt;
use std::io;
use std::time::Duration;

/// Error produced while reading a data source.
#[derive(Debug)]
pub enum CollectError {
    /// I/O error reading a file or running a command.
    Io(io::Error),
    /// Text output had an unexpected shape.
    Parse(String),
    /// A JSON document could not be decoded.
    Json(serde_json::Error),
    /// An external command did not finish in time.
    Timeout(Duration),
    /// An external command exited unsuccessfully.
    Command(String),
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
            CollectError::Json(e) => write!(f, "invalid JSON: {}", e),
            CollectError::Timeout(d) => write!(f, "timed out after {:?}", d),
            CollectError::Command(msg) => write!(f, "command failed: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Io(e) => Some(e),
            CollectError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CollectError {
    fn from(e: io::Error) -> Self {
        CollectError::Io(e)
    }
}

impl From<serde_json::Error> for CollectError {
    fn from(e: serde_json::Error) -> Self {
        CollectError::Json(e)
    }
}
