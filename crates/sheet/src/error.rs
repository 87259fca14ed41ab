use std::fmt;

#[derive(Debug)]
pub enum SheetError {
    /// The share link has no recognizable `/spreadsheets/d/<id>` segment.
    InvalidSourceUrl(String),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSourceUrl(url) => {
                write!(f, "invalid spreadsheet URL (no resource id segment): {url}")
            }
        }
    }
}

impl std::error::Error for SheetError {}
