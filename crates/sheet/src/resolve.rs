//! Share-link → CSV-export-URL resolution.

use regex::Regex;

use crate::error::SheetError;

/// Convert a shareable spreadsheet link into its CSV export equivalent.
///
/// The resource id is the `/spreadsheets/d/<id>` path segment. A sub-sheet
/// id (`gid=<digits>`, in the fragment or query) selects the tab to export
/// and defaults to the first one.
pub fn export_url(share_url: &str) -> Result<String, SheetError> {
    let id_re = Regex::new(r"/spreadsheets/d/([a-zA-Z0-9_-]+)").unwrap();
    let sheet_id = id_re
        .captures(share_url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| SheetError::InvalidSourceUrl(share_url.to_string()))?;

    let gid_re = Regex::new(r"[#&?]gid=(\d+)").unwrap();
    let gid = gid_re
        .captures(share_url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or("0");

    Ok(format!(
        "https://docs.google.com/spreadsheets/d/{sheet_id}/export?format=csv&gid={gid}"
    ))
}
