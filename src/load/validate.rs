// src/load/validate.rs
use crate::config::Dialect;

/// Split `line` on the delimiter, trim every field and keep the line only if
/// every field is a well-formed quoted value.
///
/// Empty segments left behind by trailing delimiters are discarded first, so
/// `"a";"b";` yields the same two fields as `"a";"b"`. A line with no fields
/// left is rejected.
pub fn parse_line(line: &str, dialect: &Dialect) -> Option<Vec<String>> {
    let mut parts: Vec<&str> = line.split(dialect.delimiter).collect();
    while parts.last().map_or(false, |p| p.is_empty()) {
        parts.pop();
    }
    if parts.is_empty() {
        return None;
    }

    let mut fields = Vec::with_capacity(parts.len());
    for part in parts {
        let field = trim_field(part);
        if !is_quoted_field(field, dialect) {
            return None;
        }
        fields.push(field.to_string());
    }
    Some(fields)
}

/// `"…"` with at least the two quote characters and no quote in between.
pub fn is_quoted_field(field: &str, dialect: &Dialect) -> bool {
    field
        .strip_prefix(dialect.quote)
        .and_then(|rest| rest.strip_suffix(dialect.quote))
        .map_or(false, |inner| !inner.contains(dialect.quote))
}

/// Strip the surrounding quotes from a validated field.
/// Anything not wrapped in quotes is returned as is.
pub fn dequote<'a>(field: &'a str, dialect: &Dialect) -> &'a str {
    field
        .strip_prefix(dialect.quote)
        .and_then(|rest| rest.strip_suffix(dialect.quote))
        .unwrap_or(field)
}

/// Strip ASCII control characters and spaces (everything up to `' '`) from
/// both ends. Unicode spaces such as NBSP are part of the field.
pub fn trim_field(raw: &str) -> &str {
    raw.trim_matches(|c: char| c <= ' ')
}

/// Blank values never take part in grouping.
///
/// A value is blank when it holds only separator whitespace. Non-breaking
/// spaces (U+00A0, U+2007, U+202F) and NEL count as content; the ASCII
/// information separators U+001C..=U+001F count as whitespace.
pub fn is_blank(value: &str) -> bool {
    value.chars().all(is_separator_space)
}

fn is_separator_space(c: char) -> bool {
    match c {
        '\u{1C}'..='\u{1F}' => true,
        '\u{85}' | '\u{A0}' | '\u{2007}' | '\u{202F}' => false,
        _ => c.is_whitespace(),
    }
}
