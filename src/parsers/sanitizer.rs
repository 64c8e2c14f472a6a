//! Removal of block comments and raw string literals.
//!
//! Directive scanning is line based and knows nothing about C++ lexing, so
//! anything that merely looks like an `#include` inside a `/* ... */` comment
//! or an `R"( ... )"` literal has to disappear before the scan runs. Only
//! these two span kinds are handled. Ordinary string literals and `//`
//! comments never produce a match at the start of a line and are kept.

/// Longest delimiter a raw string literal may carry.
const MAX_RAW_DELIMITER: usize = 16;

/// Returns `source` with every block comment and raw string literal removed.
///
/// Removed spans include their opening and closing markers. A span that is
/// never closed runs to the end of the input. Everything outside the removed
/// spans, line breaks included, is copied unchanged.
pub fn strip_noise(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut output = String::with_capacity(source.len());
    let mut copied = 0;
    let mut pos = 0;

    while pos + 1 < bytes.len() {
        let span_end = match (bytes[pos], bytes[pos + 1]) {
            (b'/', b'*') => Some(find_from(source, pos + 2, "*/").unwrap_or(source.len())),
            (b'R', b'"') if is_raw_prefix(&source[..pos]) => raw_literal_end(source, pos),
            _ => None,
        };

        match span_end {
            Some(end) => {
                output.push_str(&source[copied..pos]);
                copied = end;
                pos = end;
            }
            None => pos += 1,
        }
    }

    output.push_str(&source[copied..]);
    output
}

/// Byte offset just past the first `needle` at or after `from`.
fn find_from(source: &str, from: usize, needle: &str) -> Option<usize> {
    source[from..]
        .find(needle)
        .map(|offset| from + offset + needle.len())
}

/// An `R` only opens a raw literal when it is not the tail of a longer
/// identifier. Encoding prefixes (`LR`, `uR`, `UR`, `u8R`) are allowed.
fn is_raw_prefix(head: &str) -> bool {
    let word_start = head.trim_end_matches(|c: char| c.is_alphanumeric() || c == '_');
    let word = &head[word_start.len()..];
    matches!(word, "" | "L" | "u" | "U" | "u8")
}

/// End offset of the raw literal whose `R"` sits at `start`, or `None` when
/// the text there is not a well-formed raw literal opening.
fn raw_literal_end(source: &str, start: usize) -> Option<usize> {
    let rest = &source[start + 2..];
    let delimiter = raw_delimiter(rest)?;
    let body = start + 2 + delimiter.len() + 1;
    let closing = format!("){delimiter}\"");
    Some(find_from(source, body, &closing).unwrap_or(source.len()))
}

fn raw_delimiter(rest: &str) -> Option<&str> {
    for (idx, ch) in rest.char_indices() {
        if ch == '(' {
            return Some(&rest[..idx]);
        }
        if idx >= MAX_RAW_DELIMITER
            || ch.is_whitespace()
            || matches!(ch, ')' | '\\' | '"')
        {
            return None;
        }
    }
    None
}
