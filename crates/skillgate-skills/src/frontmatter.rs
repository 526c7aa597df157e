//! Frontmatter extraction for skill definition files.
//!
//! A skill file opens with a header block delimited by `---` lines:
//!
//! ```text
//! ---
//! name: deploy-service
//! description: "Roll out a service to staging."
//! user-invocable: yes
//! ---
//!
//! # Deploy
//!
//! Instructions for the model go here...
//! ```
//!
//! Every value is kept as a string.  Interpretation of individual keys is
//! left to the scanner and the enricher.

use std::collections::BTreeMap;

/// Delimiter line that opens and closes the header block.
const DELIMITER: &str = "---";

/// Key/value pairs from a file's header block.
pub type Frontmatter = BTreeMap<String, String>;

/// Return the raw header block of `content`, without its delimiters.
///
/// Returns `None` when the content does not open with a delimiter line or
/// the block is never closed.
fn header_block(content: &str) -> Option<&str> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let first_line_end = content.find('\n').unwrap_or(content.len());
    if content[..first_line_end].trim_end() != DELIMITER {
        return None;
    }

    let after_first = content.get(first_line_end + 1..)?;
    let mut offset = 0;
    for line in after_first.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']).trim_end() == DELIMITER {
            return Some(&after_first[..offset]);
        }
        offset += line.len();
    }

    None
}

/// Whether `key` is a valid header identifier (`[A-Za-z0-9_-]+`).
fn is_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Strip one layer of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' || first == b'\'') && first == last {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parse a single `key: value` line.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if !is_key(key) {
        return None;
    }
    Some((key, unquote(value.trim())))
}

/// Extract every key of the header block.
///
/// Content without a well-formed block yields an empty map.  When a key
/// repeats, the last occurrence wins.
pub fn parse_frontmatter(content: &str) -> Frontmatter {
    let mut map = Frontmatter::new();
    let Some(block) = header_block(content) else {
        return map;
    };

    for line in block.lines() {
        if let Some((key, value)) = parse_line(line) {
            map.insert(key.to_owned(), value.to_owned());
        }
    }

    map
}

/// Look up only the requested keys of the header block.
///
/// This is the narrow read used during discovery.  A key repeated in the
/// block keeps its last value, as in [`parse_frontmatter`].
pub fn extract_fields<'a>(content: &'a str, keys: &[&str]) -> BTreeMap<String, &'a str> {
    let mut found = BTreeMap::new();
    let Some(block) = header_block(content) else {
        return found;
    };

    for line in block.lines() {
        if let Some((key, value)) = parse_line(line)
            && keys.contains(&key)
        {
            found.insert(key.to_owned(), value);
        }
    }

    found
}

/// Parse a loosely written boolean.
///
/// Accepts `true`/`yes`/`1` and `false`/`no`/`0` in any case.  Absent or
/// unrecognized values return `default`.
pub fn parse_bool(value: Option<&str>, default: bool) -> bool {
    let Some(value) = value else {
        return default;
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => true,
        "false" | "no" | "0" => false,
        _ => default,
    }
}
