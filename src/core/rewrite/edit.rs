use std::ops::Range;

/// A replacement of a byte range of a source text.
///
/// Insertions use an empty range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl TextEdit {
    pub fn replace(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(offset..offset, text)
    }
}

/// Apply edits to `source`, leaving everything outside the edited ranges untouched.
///
/// Overlapping edits keep the first one by start offset; out-of-bounds edits are dropped.
pub fn apply_edits(source: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by(|a, b| a.range.start.cmp(&b.range.start).then(a.range.end.cmp(&b.range.end)));

    let mut result = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in edits {
        let valid = edit.range.start >= cursor
            && edit.range.end <= source.len()
            && source.is_char_boundary(edit.range.start)
            && source.is_char_boundary(edit.range.end);
        if !valid {
            continue;
        }
        result.push_str(&source[cursor..edit.range.start]);
        result.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    result.push_str(&source[cursor..]);
    result
}

/// Escape `text` for use inside a string literal delimited by `quote`.
pub fn escape_in_quotes(text: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04x}", u32::from(c))),
            c if c == '\\' || c == quote => {
                escaped.push('\\');
                escaped.push(c);
            }
            '$' if quote == '`' => escaped.push_str("\\$"),
            c => escaped.push(c),
        }
    }
    escaped
}
