//! Escaping and line tokenizing for the text format.

use std::borrow::Cow;

/// Escape a metadata value for output.
///
/// Values containing a newline, carriage return, quote, backslash, or
/// leading whitespace are wrapped in double quotes; inside the wrap a
/// backslash becomes `\\` and a quote becomes `\'`. Substituting the quote
/// (rather than writing `\"`) keeps the closing delimiter the only bare
/// quote on the line, which is what lets [`logical_lines`] carry quote
/// state across embedded newlines. Everything else is written verbatim.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !needs_quoting(value) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\'"),
            c => out.push(c),
        }
    }
    out.push('"');
    Cow::Owned(out)
}

fn needs_quoting(value: &str) -> bool {
    value.starts_with([' ', '\t']) || value.contains(['\n', '\r', '"', '\\'])
}

/// Reverse of [`escape`]. Tolerates both wrapped and bare values;
/// `unescape(escape(v)) == v` holds byte-exact for any `v`.
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => {}
            '\\' => match chars.next() {
                Some('\'') => out.push('"'),
                Some(other) => out.push(other),
                None => {}
            },
            c => out.push(c),
        }
    }
    out
}

/// Iterator over logical lines: physical lines, except that an unclosed
/// quote carries the line across newline boundaries. Yields the 1-based
/// physical line number of each logical line's start; blank lines are
/// skipped and leading indentation is trimmed.
pub fn logical_lines(text: &str) -> LogicalLines<'_> {
    LogicalLines { rest: text, line_no: 1 }
}

pub struct LogicalLines<'a> {
    rest: &'a str,
    line_no: usize,
}

impl<'a> Iterator for LogicalLines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<(usize, &'a str)> {
        while !self.rest.is_empty() {
            let start_line = self.line_no;
            let bytes = self.rest.as_bytes();

            let mut in_quote = false;
            let mut i = 0;
            while i < bytes.len() {
                match bytes[i] {
                    b'"' => in_quote = !in_quote,
                    b'\n' | b'\r' if !in_quote => break,
                    b'\n' => self.line_no += 1,
                    _ => {}
                }
                i += 1;
            }
            let line = &self.rest[..i];

            // Consume the whole terminator run (skips blank lines too)
            let mut j = i;
            while j < bytes.len() && (bytes[j] == b'\n' || bytes[j] == b'\r') {
                if bytes[j] == b'\n' {
                    self.line_no += 1;
                }
                j += 1;
            }
            self.rest = &self.rest[j..];

            let trimmed = line.trim_start_matches([' ', '\t']);
            if !trimmed.is_empty() {
                return Some((start_line, trimmed));
            }
        }
        None
    }
}

/// Split a metadata line into key and value on the first whitespace run.
pub fn split_key_value(line: &str) -> (&str, &str) {
    match line.find([' ', '\t']) {
        Some(pos) => (&line[..pos], line[pos..].trim_start_matches([' ', '\t'])),
        None => (line, ""),
    }
}
