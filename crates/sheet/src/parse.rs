//! Lenient line-based CSV parsing.
//!
//! Not RFC 4180: fields are whitespace-trimmed, a stray enclosing quote
//! pair is stripped after splitting, blank lines vanish, and quoted fields
//! never span lines. This matches what spreadsheet CSV exports actually
//! need when the cells hold free-form pasted text.

use crate::record::SheetRecord;

/// Parse raw CSV text into ordered records keyed by header.
///
/// The first non-blank line is the header row. Rows whose values are all
/// empty after trimming are dropped. Empty input yields an empty vec.
pub fn parse_csv(text: &str) -> Vec<SheetRecord> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let headers: Vec<String> = match lines.next() {
        Some(header_line) => split_line(header_line)
            .iter()
            .map(|h| strip_enclosing_quotes(h).trim().to_string())
            .collect(),
        None => return Vec::new(),
    };

    let mut records = Vec::new();
    for line in lines {
        let values = split_line(line);

        let mut record = SheetRecord::new();
        for (i, header) in headers.iter().enumerate() {
            // Missing trailing fields map to empty string
            let raw = values.get(i).map(String::as_str).unwrap_or("");
            let value = strip_enclosing_quotes(raw).trim().to_string();
            record.insert(header.clone(), value);
        }

        if record.is_blank() {
            continue;
        }
        records.push(record);
    }

    records
}

/// Split one line into trimmed fields.
///
/// Single pass, two states. A `"` toggles quoting; `""` inside quotes
/// emits one literal quote; `,` splits only while unquoted; everything
/// else is captured verbatim.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Strip one pair of enclosing quote characters, if present.
fn strip_enclosing_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
