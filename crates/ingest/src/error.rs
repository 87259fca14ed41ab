use std::fmt;

/// Failure fetching page metadata for one card.
///
/// Always contained: the pipeline degrades to the already-resolved title
/// and no description, it never aborts the batch.
#[derive(Debug)]
pub struct MetadataError(pub String);

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "metadata fetch failed: {}", self.0)
    }
}

impl std::error::Error for MetadataError {}
