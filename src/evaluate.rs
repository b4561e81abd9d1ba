//! Tokenize & Evaluate
//!
//! Splits the remainder on the resolved delimiters, classifies each token and
//! folds the results into a sum plus the list of rejected negatives.

use std::num::IntErrorKind;

use miette::SourceSpan;

use crate::config::CalculatorConfig;
use crate::delimiters::{DelimiterSet, Resolution};
use crate::errors::{
    input_source, CalculatorError, MalformedNumberError, NegativeNumbersError, SourceArc,
};

// ============================================================================
// TOKENS
// ============================================================================

/// A trimmed, non-empty slice of the input awaiting an integer parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Byte offset of `text` inside the original input.
    pub offset: usize,
}

impl Token<'_> {
    pub fn span(&self) -> SourceSpan {
        (self.offset, self.text.len()).into()
    }
}

/// Splits `text` on every delimiter occurrence, trimming each piece and
/// dropping the ones left empty. `base` is added to every token offset.
pub fn tokenize<'a>(
    text: &'a str,
    delimiters: &DelimiterSet,
    base: usize,
    size_limit: usize,
) -> Result<Vec<Token<'a>>, CalculatorError> {
    let mut pieces = Vec::new();
    match delimiters.splitter(size_limit)? {
        Some(splitter) => {
            let mut start = 0;
            for m in splitter.find_iter(text) {
                pieces.push((start, &text[start..m.start()]));
                start = m.end();
            }
            pieces.push((start, &text[start..]));
        }
        None => pieces.push((0, text)),
    }

    Ok(pieces
        .into_iter()
        .filter_map(|(start, piece)| trim_piece(piece, base + start))
        .collect())
}

fn trim_piece(piece: &str, offset: usize) -> Option<Token<'_>> {
    let leading = piece.len() - piece.trim_start().len();
    let text = piece.trim();
    if text.is_empty() {
        return None;
    }
    Some(Token {
        text,
        offset: offset + leading,
    })
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// The three disjoint outcomes of reading a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedNumber {
    /// Rejected; reported in the error as its signed decimal rendering.
    Negative(String),
    /// `0..=max_value`; summed.
    InRange(i64),
    /// Above `max_value`; dropped.
    OutOfRange,
}

impl ParsedNumber {
    pub fn classify(value: i64, max_value: i64) -> Self {
        if value < 0 {
            Self::Negative(value.to_string())
        } else if value <= max_value {
            Self::InRange(value)
        } else {
            Self::OutOfRange
        }
    }

    /// Parses a token as a signed base-10 integer.
    ///
    /// Literals beyond `i64` keep their sign: positive ones are `OutOfRange`,
    /// negative ones are `Negative` with leading zeros removed. Anything else
    /// that fails to parse is `None`.
    pub fn parse(text: &str, max_value: i64) -> Option<Self> {
        match text.parse::<i64>() {
            Ok(value) => Some(Self::classify(value, max_value)),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Some(Self::OutOfRange),
                IntErrorKind::NegOverflow => {
                    let digits = text.trim_start_matches('-').trim_start_matches('0');
                    Some(Self::Negative(format!("-{digits}")))
                }
                _ => None,
            },
        }
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

#[derive(Debug)]
struct Tally {
    /// `None` once the running sum has left the `i64` range.
    sum: Option<i64>,
    negatives: Vec<(String, SourceSpan)>,
}

impl Default for Tally {
    fn default() -> Self {
        Self {
            sum: Some(0),
            negatives: Vec::new(),
        }
    }
}

/// Sums `remainder` split on `delimiters`, using the default configuration.
///
/// Error spans are relative to `remainder`.
pub fn evaluate(remainder: &str, delimiters: &DelimiterSet) -> Result<i64, CalculatorError> {
    let source = input_source(remainder);
    evaluate_tokens(
        remainder,
        delimiters,
        0,
        &CalculatorConfig::default(),
        &source,
    )
}

/// Sums a resolved input. Error spans point into `input`, the text the
/// resolution was made from.
pub fn evaluate_resolution(
    input: &str,
    resolution: &Resolution<'_>,
    config: &CalculatorConfig,
) -> Result<i64, CalculatorError> {
    let source = input_source(input);
    evaluate_tokens(
        resolution.remainder,
        &resolution.delimiters,
        resolution.offset,
        config,
        &source,
    )
}

fn evaluate_tokens(
    text: &str,
    delimiters: &DelimiterSet,
    base: usize,
    config: &CalculatorConfig,
    source: &SourceArc,
) -> Result<i64, CalculatorError> {
    let tokens = tokenize(text, delimiters, base, config.splitter_size_limit)?;

    let tally = tokens
        .iter()
        .try_fold(Tally::default(), |mut tally, token| {
            let parsed = ParsedNumber::parse(token.text, config.max_value).ok_or_else(|| {
                MalformedNumberError::new(token.text, token.span(), source.clone())
            })?;
            match parsed {
                ParsedNumber::Negative(value) => tally.negatives.push((value, token.span())),
                ParsedNumber::InRange(value) => {
                    tally.sum = tally.sum.and_then(|sum| sum.checked_add(value));
                }
                ParsedNumber::OutOfRange => {
                    tracing::trace!(token = token.text, "dropping out-of-range value");
                }
            }
            Ok::<_, MalformedNumberError>(tally)
        })?;

    if !tally.negatives.is_empty() {
        return Err(NegativeNumbersError::new(tally.negatives, source.clone()).into());
    }

    tally.sum.ok_or(CalculatorError::SumOverflow {
        max_value: config.max_value,
    })
}
