use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    /// File read/write error.
    Io(String),
    /// Stored JSON did not deserialize.
    Parse(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "store I/O error: {msg}"),
            Self::Parse(msg) => write!(f, "store parse error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
