use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    /// Network error (DNS, connect, timeout).
    Network(String),
    /// Non-success HTTP status with response body.
    Http(u16, String),
    /// Response body was not what the endpoint promised.
    Parse(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http(code, msg) => write!(f, "HTTP {code}: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}
