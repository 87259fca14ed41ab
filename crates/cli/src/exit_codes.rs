//! CLI Exit Code Registry
//!
//! Single source of truth for `pdeck` exit codes. Exit codes are part of
//! the shell contract — scripts rely on them.
//!
//! | Range | Domain    | Description                               |
//! |-------|-----------|-------------------------------------------|
//! | 0     | Universal | Success                                   |
//! | 1     | Universal | General error (unspecified)               |
//! | 2     | Universal | CLI usage error (bad args, missing file)  |
//! | 10-19 | ingest    | Sheet ingestion codes                     |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Ingest (10-19)
// =============================================================================

/// The configured spreadsheet link has no recognizable resource id.
pub const EXIT_INVALID_SOURCE: u8 = 10;

/// Export download failed (network error or non-success status).
pub const EXIT_FETCH: u8 = 11;

/// Card store could not be read or written.
pub const EXIT_STORE: u8 = 12;

/// Config file missing, unparseable, or invalid.
pub const EXIT_CONFIG: u8 = 13;
