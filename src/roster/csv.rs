//! Minimal comma-separated reader/writer for the roster file.
//!
//! Handles double-quoted fields (embedded commas, `""` escapes). Multi-line
//! quoted fields are not supported; the roster schema never needs them.

/// Split one CSV line into fields. Returns `None` on an unterminated quote.
pub fn parse_line(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => current.push(c),
            }
        } else {
            match c {
                '"' if current.is_empty() => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
    }

    if in_quotes {
        return None;
    }
    fields.push(current);
    Some(fields)
}

/// Quote a field only when it needs it.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn format_line<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}
