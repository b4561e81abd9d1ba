//! Delimiter Resolution
//!
//! Reads the optional `//<declaration>\n` prefix of an input and produces the
//! effective delimiter set plus the remainder that still has to be tokenized.
//!
//! The grammar of the prefix line:
//! - `//;\n`         one custom delimiter, taken verbatim, added to the defaults
//! - `//[***][%]\n`  any number of bracketed delimiters, added to the defaults
//! - `//x[y]\n`      any `[` selects the bracket path; text outside brackets is ignored
//! - `//;` (no newline anywhere) is not a declaration at all; the input is used as-is

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::config::CalculatorConfig;

/// Marker that opens a delimiter declaration line.
pub const DECLARATION_MARKER: &str = "//";

static BRACKET_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*?)\]").expect("bracket group pattern is valid"));

// ============================================================================
// DELIMITER SET
// ============================================================================

/// An ordered, duplicate-free set of literal separator strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterSet {
    delimiters: Vec<String>,
}

impl DelimiterSet {
    /// The comma and newline defaults.
    pub fn defaults() -> Self {
        Self::from_config(&CalculatorConfig::default())
    }

    pub fn from_config(config: &CalculatorConfig) -> Self {
        let mut set = Self {
            delimiters: Vec::with_capacity(config.default_delimiters.len()),
        };
        for delimiter in &config.default_delimiters {
            set.insert(delimiter);
        }
        set
    }

    /// Adds a delimiter. Empty strings and duplicates are ignored.
    pub fn insert(&mut self, delimiter: &str) {
        if delimiter.is_empty() || self.contains(delimiter) {
            return;
        }
        self.delimiters.push(delimiter.to_string());
    }

    pub fn contains(&self, delimiter: &str) -> bool {
        self.delimiters.iter().any(|d| d == delimiter)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.delimiters.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.delimiters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delimiters.is_empty()
    }

    /// Compiles the set into a single literal alternation.
    ///
    /// Every member is escaped, and longer members come first so that an
    /// overlapping shorter delimiter (`*` inside `***`) never wins a match
    /// the longer one could have taken. Returns `None` for an empty set.
    /// Fails when the compiled pattern would exceed `size_limit` bytes.
    pub fn splitter(&self, size_limit: usize) -> Result<Option<Regex>, regex::Error> {
        if self.delimiters.is_empty() {
            return Ok(None);
        }

        let mut ordered: Vec<&str> = self.iter().collect();
        ordered.sort_by(|a, b| b.len().cmp(&a.len()));

        let pattern = ordered
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");

        RegexBuilder::new(&pattern)
            .size_limit(size_limit)
            .build()
            .map(Some)
    }
}

impl Default for DelimiterSet {
    fn default() -> Self {
        Self::defaults()
    }
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Which form of prefix line the input carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelimiterDeclaration {
    /// No `//` marker.
    None,
    /// `//` marker without any newline; the input is treated as ordinary text.
    Unterminated,
    /// `//<text>\n` without brackets. Empty text declares nothing.
    Single(String),
    /// `//[..][..]\n`; holds the non-empty groups in declaration order.
    Bracketed(Vec<String>),
}

/// Output of [`resolve`]: the delimiters to split on and what is left to split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub delimiters: DelimiterSet,
    pub remainder: &'a str,
    /// Byte offset of `remainder` inside the original input.
    pub offset: usize,
    pub declaration: DelimiterDeclaration,
}

/// Resolves delimiters with the default configuration.
pub fn resolve(input: &str) -> Resolution<'_> {
    resolve_with(input, &CalculatorConfig::default())
}

/// Resolves delimiters starting from the configured default set.
pub fn resolve_with<'a>(input: &'a str, config: &CalculatorConfig) -> Resolution<'a> {
    let mut delimiters = DelimiterSet::from_config(config);

    let Some(after_marker) = input.strip_prefix(DECLARATION_MARKER) else {
        return Resolution {
            delimiters,
            remainder: input,
            offset: 0,
            declaration: DelimiterDeclaration::None,
        };
    };

    let Some(newline) = after_marker.find('\n') else {
        tracing::debug!("declaration marker without newline, using input as-is");
        return Resolution {
            delimiters,
            remainder: input,
            offset: 0,
            declaration: DelimiterDeclaration::Unterminated,
        };
    };

    let text = &after_marker[..newline];
    let offset = DECLARATION_MARKER.len() + newline + 1;

    let declaration = parse_declaration(text);
    match &declaration {
        DelimiterDeclaration::Single(text) => delimiters.insert(text),
        DelimiterDeclaration::Bracketed(groups) => {
            for group in groups {
                delimiters.insert(group);
            }
        }
        DelimiterDeclaration::None | DelimiterDeclaration::Unterminated => {}
    }

    tracing::debug!(
        ?declaration,
        delimiters = ?delimiters.delimiters,
        "resolved custom delimiters"
    );

    Resolution {
        delimiters,
        remainder: &input[offset..],
        offset,
        declaration,
    }
}

fn parse_declaration(text: &str) -> DelimiterDeclaration {
    if !text.contains('[') {
        return DelimiterDeclaration::Single(text.to_string());
    }

    let groups = BRACKET_GROUP
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|group| !group.is_empty())
        .map(str::to_string)
        .collect();

    DelimiterDeclaration::Bracketed(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SPLITTER_SIZE_LIMIT;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_declaration_is_verbatim() {
        assert_eq!(parse_declaration(";"), DelimiterDeclaration::Single(";".into()));
        assert_eq!(parse_declaration("ab"), DelimiterDeclaration::Single("ab".into()));
        assert_eq!(parse_declaration(""), DelimiterDeclaration::Single(String::new()));
    }

    #[test]
    fn test_bracket_groups_are_non_greedy() {
        assert_eq!(
            parse_declaration("[***][*][%]"),
            DelimiterDeclaration::Bracketed(vec!["***".into(), "*".into(), "%".into()])
        );
    }

    #[test]
    fn test_empty_and_unclosed_groups_are_skipped() {
        assert_eq!(
            parse_declaration("[][x][abc"),
            DelimiterDeclaration::Bracketed(vec!["x".into()])
        );
        assert_eq!(parse_declaration("[abc"), DelimiterDeclaration::Bracketed(vec![]));
    }

    #[test]
    fn test_text_outside_brackets_is_ignored() {
        assert_eq!(
            parse_declaration("x[y]"),
            DelimiterDeclaration::Bracketed(vec!["y".into()])
        );
    }

    #[test]
    fn test_splitter_prefers_longest_delimiter() {
        let mut set = DelimiterSet::defaults();
        set.insert("*");
        set.insert("***");
        let splitter = set.splitter(DEFAULT_SPLITTER_SIZE_LIMIT).unwrap().unwrap();
        let first = splitter.find("1***2").unwrap();
        assert_eq!(first.as_str(), "***");
    }

    #[test]
    fn test_splitter_escapes_metacharacters() {
        let mut set = DelimiterSet::defaults();
        set.insert(".");
        let splitter = set.splitter(DEFAULT_SPLITTER_SIZE_LIMIT).unwrap().unwrap();
        assert!(!splitter.is_match("12"));
        assert!(splitter.is_match("1.2"));
    }

    #[test]
    fn test_empty_set_has_no_splitter() {
        let config = CalculatorConfig {
            default_delimiters: vec![],
            ..CalculatorConfig::default()
        };
        let set = DelimiterSet::from_config(&config);
        assert!(set.is_empty());
        assert!(set.splitter(DEFAULT_SPLITTER_SIZE_LIMIT).unwrap().is_none());
    }
}
