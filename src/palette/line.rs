#![forbid(unsafe_code)]

//! Line-oriented parsing of `#RRGGBB Name` entries

use crate::palette::color::Color;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Leading hex token followed by at least one whitespace character
const ENTRY_PATTERN: &str = r"^\s*#?[A-Za-z0-9]{6}\s+";

static ENTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ENTRY_PATTERN).expect("entry pattern is a valid regex"));

/// A single parsed `(color, name)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    pub color: Color,
    /// Remainder of the line with the hex token removed; may be empty
    pub name: String,
}

/// Extracts palette entries from lines of text
pub struct LineParser {
    pattern: &'static Regex,
}

impl LineParser {
    pub fn new() -> Self {
        LineParser {
            pattern: &ENTRY_REGEX,
        }
    }

    /// Parse a single line
    ///
    /// The line is accepted only if the entry pattern matches exactly once and
    /// the matched token decodes as a hex color.
    pub fn parse_line(&self, line: &str) -> Option<PaletteEntry> {
        let mut matches = self.pattern.find_iter(line);
        let token = matches.next()?.as_str();
        if matches.next().is_some() {
            debug!("skipping ambiguous line: {:?}", line);
            return None;
        }

        let Some(color) = Color::from_hex(token) else {
            debug!("skipping line with invalid hex token {:?}", token.trim());
            return None;
        };

        let name = line.replace(token, "").trim().to_string();
        Some(PaletteEntry { color, name })
    }

    /// Parse every line of `text`, keeping file order
    ///
    /// Lines are split on `\n`, `\r`, `\r\n` and the Unicode line and
    /// paragraph separators. Lines that don't parse are skipped.
    pub fn parse_lines(&self, text: &str) -> Vec<PaletteEntry> {
        text.split(is_newline)
            .filter_map(|line| self.parse_line(line))
            .collect()
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_with_hash() {
        let parser = LineParser::new();
        let entry = parser.parse_line("#BB8954 Dark Khaki").unwrap();
        assert_eq!(entry.name, "Dark Khaki");
        assert_eq!(entry.color.to_hex(), "#BB8954");
    }

    #[test]
    fn test_parse_line_without_hash_and_leading_whitespace() {
        let parser = LineParser::new();
        let entry = parser.parse_line("   00ff00\tGreen  ").unwrap();
        assert_eq!(entry.name, "Green");
        assert_eq!(entry.color, Color::from_rgb8(0, 255, 0));
    }

    #[test]
    fn test_parse_line_empty_name() {
        let parser = LineParser::new();
        let entry = parser.parse_line("#123456 ").unwrap();
        assert_eq!(entry.name, "");
    }

    #[test]
    fn test_parse_line_requires_trailing_whitespace() {
        let parser = LineParser::new();
        assert!(parser.parse_line("BADCOLOR").is_none());
        assert!(parser.parse_line("#FF0000").is_none());
        assert!(parser.parse_line("#FF0000Red").is_none());
    }

    #[test]
    fn test_parse_line_rejects_invalid_hex() {
        let parser = LineParser::new();
        assert!(parser.parse_line("BADCOL Not A Color").is_none());
        assert!(parser.parse_line("#ZZZZZZ Nope").is_none());
    }

    #[test]
    fn test_parse_line_rejects_non_matching() {
        let parser = LineParser::new();
        assert!(parser.parse_line("").is_none());
        assert!(parser.parse_line("// comment").is_none());
        assert!(parser.parse_line("Red #FF0000 ").is_none());
    }

    #[test]
    fn test_parse_line_second_token_stays_in_name() {
        let parser = LineParser::new();
        let entry = parser.parse_line("#FF0000 Red 00FF00 Green").unwrap();
        assert_eq!(entry.color, Color::from_rgb8(255, 0, 0));
        assert_eq!(entry.name, "Red 00FF00 Green");
    }

    #[test]
    fn test_parsers_share_compiled_pattern() {
        let first = LineParser::new();
        let second = LineParser::default();
        assert!(std::ptr::eq(first.pattern, second.pattern));
    }

    #[test]
    fn test_parse_lines_universal_newlines() {
        let parser = LineParser::new();
        let text = "#FF0000 Red\r\n#00FF00 Green\rjunk\n\n#0000FF Blue\u{2028}#FFFFFF White";
        let names: Vec<String> = parser
            .parse_lines(text)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Red", "Green", "Blue", "White"]);
    }
}
