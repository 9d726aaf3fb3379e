//! Reader for line-oriented `key=value` property files.
//!
//! Schema manifests such as `META-INF/spring.schemas` are written in the
//! classic property-file syntax: `#` and `!` comments, backslash line
//! continuations, `=`/`:`/whitespace separators, and backslash escapes (which
//! is why namespace keys usually appear as `http\://...` on disk).

use std::borrow::Cow;

use thiserror::Error;

/// Characters treated as insignificant whitespace around keys and values.
const WHITESPACE: [char; 3] = [' ', '\t', '\u{c}'];

/// Errors produced while parsing a property file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertiesError {
    /// A `\uXXXX` escape was truncated, contained non-hex digits, or named a
    /// surrogate code point.
    #[error("malformed \\uXXXX escape on line {line}")]
    MalformedUnicodeEscape {
        /// One-based line on which the logical entry starts.
        line: usize,
    },
}

/// Result type alias using [`PropertiesError`].
pub type Result<T> = std::result::Result<T, PropertiesError>;

/// An ordered, immutable set of property entries.
///
/// Keys keep the position of their first appearance. A key repeated later in
/// the file takes the later value, matching how property files are normally
/// loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    /// Parses property-file text.
    ///
    /// # Errors
    ///
    /// Returns [`PropertiesError::MalformedUnicodeEscape`] when a `\u` escape
    /// cannot be decoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use schemapack_common::properties::Properties;
    ///
    /// let text = "# schemas\nhttp\\://example.org/schema/beans/spring-beans.xsd=beans.xsd\n";
    /// let properties = Properties::parse(text).expect("valid properties");
    /// assert_eq!(
    ///     properties.get("http://example.org/schema/beans/spring-beans.xsd"),
    ///     Some("beans.xsd")
    /// );
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut properties = Self::default();
        for line in logical_lines(text) {
            let (raw_key, raw_value) = split_entry(&line.text);
            let key = unescape(raw_key, line.number)?;
            let value = unescape(raw_value, line.number)?;
            properties.insert(key, value);
        }
        Ok(properties)
    }

    /// Returns the value recorded for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over entries in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the file declared no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(candidate, _)| *candidate == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

/// Decodes raw property-file bytes.
///
/// UTF-8 is tried first (a leading byte-order mark is dropped); anything else
/// is read as ISO-8859-1, the historical property-file encoding.
#[must_use]
pub fn decode_properties(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.strip_prefix('\u{feff}').unwrap_or(text)),
        Err(_) => Cow::Owned(bytes.iter().copied().map(char::from).collect()),
    }
}

/// A comment-free entry with continuations already joined.
struct LogicalLine {
    number: usize,
    text: String,
}

fn logical_lines(text: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut pending: Option<LogicalLine> = None;

    for (index, raw) in physical_lines(text).enumerate() {
        let trimmed = raw.trim_start_matches(WHITESPACE);
        let current = match pending.take() {
            Some(mut continued) => {
                let (body, _) = split_continuation(trimmed);
                continued.text.push_str(body);
                continued
            }
            None if trimmed.is_empty() || trimmed.starts_with(['#', '!']) => continue,
            None => LogicalLine {
                number: index + 1,
                text: split_continuation(trimmed).0.to_owned(),
            },
        };

        if split_continuation(trimmed).1 {
            pending = Some(current);
        } else {
            lines.push(current);
        }
    }

    lines.extend(pending);
    lines
}

/// Splits text on `\r\n`, `\r`, or `\n`; a final terminator adds no line.
fn physical_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
        let (line, tail) = rest.split_at(end);
        rest = tail
            .strip_prefix("\r\n")
            .or_else(|| tail.strip_prefix(['\r', '\n']))
            .unwrap_or(tail);
        Some(line)
    })
}

/// Strips a continuation backslash, reporting whether one was present.
///
/// Only an odd run of trailing backslashes continues the line; an even run
/// is a sequence of escaped backslashes.
fn split_continuation(line: &str) -> (&str, bool) {
    let trailing = line.chars().rev().take_while(|ch| *ch == '\\').count();
    if trailing % 2 == 1 {
        (line.strip_suffix('\\').unwrap_or(line), true)
    } else {
        (line, false)
    }
}

/// Splits a logical line into its still-escaped key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (offset, ch) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '=' || ch == ':' || WHITESPACE.contains(&ch) {
            key_end = offset;
            break;
        }
    }

    let (key, rest) = line.split_at(key_end);
    let rest = rest.trim_start_matches(WHITESPACE);
    let value = rest
        .strip_prefix(['=', ':'])
        .unwrap_or(rest)
        .trim_start_matches(WHITESPACE);
    (key, value)
}

fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            decoded.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => decoded.push('\t'),
            Some('n') => decoded.push('\n'),
            Some('r') => decoded.push('\r'),
            Some('f') => decoded.push('\u{c}'),
            Some('u') => decoded.push(decode_unicode(&mut chars, line)?),
            Some(other) => decoded.push(other),
            None => {}
        }
    }
    Ok(decoded)
}

fn decode_unicode(chars: &mut std::str::Chars<'_>, line: usize) -> Result<char> {
    let mut code = 0_u32;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|ch| ch.to_digit(16))
            .ok_or(PropertiesError::MalformedUnicodeEscape { line })?;
        code = code * 16 + digit;
    }
    char::from_u32(code).ok_or(PropertiesError::MalformedUnicodeEscape { line })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn entries(text: &str) -> Vec<(String, String)> {
        Properties::parse(text)
            .expect("properties parse")
            .iter()
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect()
    }

    #[rstest]
    #[case::equals("key=value")]
    #[case::colon("key:value")]
    #[case::spaced_equals("key = value")]
    #[case::whitespace_only("key value")]
    #[case::whitespace_then_colon("key   :   value")]
    #[case::leading_indent("   key=value")]
    fn separators_are_recognised(#[case] line: &str) {
        assert_eq!(entries(line), vec![("key".to_owned(), "value".to_owned())]);
    }

    #[rstest]
    fn comments_and_blank_lines_are_skipped() {
        let text = "# comment\n! also a comment\n\n   \nkey=value\n";
        assert_eq!(entries(text).len(), 1);
    }

    #[rstest]
    fn escaped_colons_in_keys_are_unescaped() {
        let text = "http\\://www.example.org/schema/beans/spring-beans.xsd=org/example/spring-beans.xsd";
        let parsed = Properties::parse(text).expect("parse");
        assert_eq!(
            parsed.get("http://www.example.org/schema/beans/spring-beans.xsd"),
            Some("org/example/spring-beans.xsd")
        );
    }

    #[rstest]
    fn continuation_lines_are_joined() {
        let text = "key=first\\\n    second\\\n\tthird\nnext=1\n";
        assert_eq!(
            entries(text),
            vec![
                ("key".to_owned(), "firstsecondthird".to_owned()),
                ("next".to_owned(), "1".to_owned()),
            ]
        );
    }

    #[rstest]
    fn even_backslash_run_does_not_continue() {
        let text = "path=C\\:\\\\\nother=x\n";
        assert_eq!(
            entries(text),
            vec![
                ("path".to_owned(), "C:\\".to_owned()),
                ("other".to_owned(), "x".to_owned()),
            ]
        );
    }

    #[rstest]
    fn comment_marker_inside_continuation_is_content() {
        let text = "key=a\\\n# not a comment\n";
        assert_eq!(entries(text), vec![("key".to_owned(), "a# not a comment".to_owned())]);
    }

    #[rstest]
    #[case::tab("a\\tb", "a\tb")]
    #[case::newline("a\\nb", "a\nb")]
    #[case::unicode("caf\\u00e9", "caf\u{e9}")]
    #[case::identity("a\\=b", "a=b")]
    fn value_escapes_are_decoded(#[case] raw: &str, #[case] expected: &str) {
        let parsed = Properties::parse(&format!("key={raw}")).expect("parse");
        assert_eq!(parsed.get("key"), Some(expected));
    }

    #[rstest]
    #[case::truncated("key=\\u12")]
    #[case::not_hex("key=\\u12zz")]
    #[case::surrogate("key=\\ud800")]
    fn malformed_unicode_escapes_report_the_line(#[case] line: &str) {
        let text = format!("# header\n{line}\n");
        assert_eq!(
            Properties::parse(&text),
            Err(PropertiesError::MalformedUnicodeEscape { line: 2 })
        );
    }

    #[rstest]
    fn key_without_value_maps_to_empty_string() {
        assert_eq!(entries("lonely"), vec![("lonely".to_owned(), String::new())]);
    }

    #[rstest]
    fn repeated_keys_keep_first_position_and_last_value() {
        let text = "a=1\nb=2\na=3\n";
        assert_eq!(
            entries(text),
            vec![
                ("a".to_owned(), "3".to_owned()),
                ("b".to_owned(), "2".to_owned()),
            ]
        );
    }

    #[rstest]
    #[case::crlf("a=1\r\nb=2\r\n")]
    #[case::bare_cr("a=1\rb=2\r")]
    #[case::mixed("a=1\rb=2\n")]
    fn windows_line_endings_are_accepted(#[case] text: &str) {
        assert_eq!(
            entries(text),
            vec![
                ("a".to_owned(), "1".to_owned()),
                ("b".to_owned(), "2".to_owned()),
            ]
        );
    }

    #[rstest]
    #[case::crlf("key=first\\\r\n  second\r\n")]
    #[case::bare_cr("key=first\\\r  second\r")]
    fn continuations_span_any_line_terminator(#[case] text: &str) {
        assert_eq!(
            entries(text),
            vec![("key".to_owned(), "firstsecond".to_owned())]
        );
    }

    #[rstest]
    fn decode_falls_back_to_latin1() {
        let bytes = [b'k', b'=', 0xE9];
        assert_eq!(decode_properties(&bytes), "k=\u{e9}");
    }

    #[rstest]
    fn decode_strips_utf8_bom() {
        let bytes = "\u{feff}k=v".as_bytes();
        assert_eq!(decode_properties(bytes), "k=v");
    }
}
