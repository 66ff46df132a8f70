//! Property sets and the two supported file formats.
//!
//! Flat `.properties` text is parsed with the Java rules: `#`/`!` comment
//! lines, keys terminated by an unescaped `=`, `:` or whitespace, backslash
//! line continuations and the usual escape sequences including `\uXXXX`.
//! Properties-XML documents hold `<entry key="...">value</entry>` elements
//! under a `<properties>` root; `<comment>` elements are ignored.

use indexmap::IndexMap;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Failure parsing a property resource body.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("invalid unicode escape '\\u{0}'")]
    InvalidUnicodeEscape(String),

    #[error("XML entry element is missing the 'key' attribute")]
    MissingEntryKey,

    #[error("malformed properties XML: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// An ordered key-value mapping loaded from one property resource.
///
/// Entries keep the order of their first occurrence; a duplicate key
/// overwrites the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    entries: IndexMap<String, String>,
}

impl PropertySet {
    /// Parses flat `.properties` text.
    pub fn from_properties(text: &str) -> Result<Self, FormatError> {
        let mut set = Self::default();
        let mut lines = text.lines();

        while let Some(line) = lines.next() {
            let line = line.trim_start_matches([' ', '\t', '\u{c}']);
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let mut logical = String::from(line);
            while has_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some(next) => logical.push_str(next.trim_start_matches([' ', '\t', '\u{c}'])),
                    None => break,
                }
            }

            let (key, value) = split_key_value(&logical);
            set.entries.insert(unescape(key)?, unescape(value)?);
        }

        Ok(set)
    }

    /// Parses a properties-XML document.
    pub fn from_xml(text: &str) -> Result<Self, FormatError> {
        let mut reader = Reader::from_str(text);
        let mut set = Self::default();

        loop {
            match reader.read_event()? {
                Event::Start(start) if start.name().as_ref() == b"entry" => {
                    let key = entry_key(&start)?;
                    let value = reader.read_text(start.name())?.into_owned();
                    set.entries.insert(key, value);
                }
                Event::Empty(start) if start.name().as_ref() == b"entry" => {
                    set.entries.insert(entry_key(&start)?, String::new());
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(set)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Looks up `name`, falling back to `default` when absent. A `None`
    /// default carries the absence through to the caller.
    pub fn get_or<'a>(&'a self, name: &str, default: Option<&'a str>) -> Option<&'a str> {
        self.get(name).or(default)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn entry_key(start: &quick_xml::events::BytesStart<'_>) -> Result<String, FormatError> {
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        if attribute.key.as_ref() == b"key" {
            return Ok(attribute.unescape_value()?.into_owned());
        }
    }
    Err(FormatError::MissingEntryKey)
}

/// A logical line continues when it ends with an odd number of backslashes.
fn has_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let bytes = line.as_bytes();
    let len = bytes.len();
    let is_ws = |b: u8| b == b' ' || b == b'\t' || b == 0x0c;

    let mut i = 0;
    let mut key_end = len;

    while i < len {
        match bytes[i] {
            b'\\' => i += if i + 1 < len { 2 } else { 1 },
            b'=' | b':' => {
                key_end = i;
                i += 1;
                break;
            }
            b if is_ws(b) => {
                key_end = i;
                while i < len && is_ws(bytes[i]) {
                    i += 1;
                }
                if i < len && (bytes[i] == b'=' || bytes[i] == b':') {
                    i += 1;
                }
                break;
            }
            _ => i += 1,
        }
    }

    if key_end == len {
        return (line, "");
    }

    while i < len && is_ws(bytes[i]) {
        i += 1;
    }

    (&line[..key_end], &line[i..])
}

fn unescape(input: &str) -> Result<String, FormatError> {
    if !input.contains('\\') {
        return Ok(input.to_string());
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            None => break,
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or(FormatError::InvalidUnicodeEscape(hex))?;
                out.push(code);
            }
            Some(other) => out.push(other),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_pairs() {
        let set = PropertySet::from_properties("a=1\nb = 2\nc:3\nd 4\n").unwrap();
        assert_eq!(set.get("a"), Some("1"));
        assert_eq!(set.get("b"), Some("2"));
        assert_eq!(set.get("c"), Some("3"));
        assert_eq!(set.get("d"), Some("4"));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let set = PropertySet::from_properties("# comment\n! also comment\n\n   \nkey=value\n")
            .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("key"), Some("value"));
    }

    #[test]
    fn test_line_continuation() {
        let set = PropertySet::from_properties("fruits=apple, \\\n    banana, \\\n    pear\n")
            .unwrap();
        assert_eq!(set.get("fruits"), Some("apple, banana, pear"));
    }

    #[test]
    fn test_escaped_backslash_is_not_a_continuation() {
        let set = PropertySet::from_properties("path=C\\\\\nnext=1\n").unwrap();
        assert_eq!(set.get("path"), Some("C\\"));
        assert_eq!(set.get("next"), Some("1"));
    }

    #[test]
    fn test_escapes() {
        let set =
            PropertySet::from_properties("tabbed=a\\tb\nkey\\ with\\ spaces=x\nuni=\\u00e9\n")
                .unwrap();
        assert_eq!(set.get("tabbed"), Some("a\tb"));
        assert_eq!(set.get("key with spaces"), Some("x"));
        assert_eq!(set.get("uni"), Some("é"));
    }

    #[test]
    fn test_escaped_separator_in_key() {
        let set = PropertySet::from_properties("a\\=b=c\n").unwrap();
        assert_eq!(set.get("a=b"), Some("c"));
    }

    #[test]
    fn test_key_without_separator() {
        let set = PropertySet::from_properties("lonely\n").unwrap();
        assert_eq!(set.get("lonely"), Some(""));
    }

    #[test]
    fn test_invalid_unicode_escape() {
        let result = PropertySet::from_properties("bad=\\u00zz\n");
        assert!(matches!(result, Err(FormatError::InvalidUnicodeEscape(_))));
    }

    #[test]
    fn test_duplicate_key_last_wins_first_position() {
        let set = PropertySet::from_properties("a=1\nb=2\na=3\n").unwrap();
        assert_eq!(set.get("a"), Some("3"));
        let keys: Vec<&str> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_xml_entries_in_order() {
        let set = PropertySet::from_xml(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <!DOCTYPE properties SYSTEM "http://java.sun.com/dtd/properties.dtd">
            <properties>
                <comment>ignored</comment>
                <entry key="first">1</entry>
                <entry key="second">two words</entry>
                <entry key="empty"/>
            </properties>"#,
        )
        .unwrap();
        let entries: Vec<(&str, &str)> = set.iter().collect();
        assert_eq!(
            entries,
            vec![("first", "1"), ("second", "two words"), ("empty", "")]
        );
    }

    #[test]
    fn test_xml_missing_key_attribute() {
        let result = PropertySet::from_xml("<properties><entry>v</entry></properties>");
        assert!(matches!(result, Err(FormatError::MissingEntryKey)));
    }

    #[test]
    fn test_xml_malformed() {
        let result = PropertySet::from_xml("<properties><entry key=\"a\">v</properties>");
        assert!(matches!(result, Err(FormatError::Xml(_))));
    }
}
