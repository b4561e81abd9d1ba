//! Calculator error handling.
//!
//! Every failure is a `miette` diagnostic carrying the original input, so a
//! caller that renders the report sees exactly which tokens were rejected.
//! The two input errors stay separate types because callers treat them
//! differently: negatives are a validation failure over well-formed input,
//! a malformed token means the input could not be read at all.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};
use thiserror::Error;

/// Name given to the input in rendered diagnostics.
pub const INPUT_SOURCE_NAME: &str = "input";

pub type SourceArc = Arc<NamedSource<String>>;

pub(crate) fn input_source(input: &str) -> SourceArc {
    Arc::new(NamedSource::new(INPUT_SOURCE_NAME, input.to_string()))
}

// ============================================================================
// NEGATIVE NUMBERS
// ============================================================================

/// One or more tokens parsed to a negative integer.
///
/// Values are kept in the order they appeared in the input, each as its
/// signed decimal rendering so that literals wider than `i64` survive.
#[derive(Debug, Error)]
#[error("negatives not allowed: {}", .negatives.join(","))]
pub struct NegativeNumbersError {
    negatives: Vec<String>,
    spans: Vec<SourceSpan>,
    src: SourceArc,
}

impl NegativeNumbersError {
    pub(crate) fn new(negatives: Vec<(String, SourceSpan)>, src: SourceArc) -> Self {
        let (negatives, spans) = negatives.into_iter().unzip();
        Self {
            negatives,
            spans,
            src,
        }
    }

    pub fn negatives(&self) -> &[String] {
        &self.negatives
    }

    pub fn spans(&self) -> &[SourceSpan] {
        &self.spans
    }
}

impl Diagnostic for NegativeNumbersError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("string_calculator::negatives"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("only zero and positive integers can be summed"))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(self.spans.iter().map(|span| {
            LabeledSpan::new_with_span(Some("negative value".to_string()), *span)
        })))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&*self.src)
    }
}

// ============================================================================
// MALFORMED NUMBER
// ============================================================================

/// A non-empty token that is not a base-10 integer literal.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid number '{token}'")]
#[diagnostic(
    code(string_calculator::malformed_number),
    help("tokens must be base-10 integers separated by declared delimiters")
)]
pub struct MalformedNumberError {
    token: String,
    #[source_code]
    src: SourceArc,
    #[label("not an integer")]
    span: SourceSpan,
}

impl MalformedNumberError {
    pub(crate) fn new(token: &str, span: SourceSpan, src: SourceArc) -> Self {
        Self {
            token: token.to_string(),
            src,
            span,
        }
    }

    /// The trimmed token text that failed to parse.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn span(&self) -> SourceSpan {
        self.span
    }
}

// ============================================================================
// CALCULATOR ERROR
// ============================================================================

#[derive(Debug, Error, Diagnostic)]
pub enum CalculatorError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    NegativeNumbers(#[from] NegativeNumbersError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MalformedNumber(#[from] MalformedNumberError),

    #[error("delimiter declaration could not be compiled")]
    #[diagnostic(
        code(string_calculator::delimiter_pattern),
        help("declare fewer or shorter delimiters")
    )]
    DelimiterPattern(#[from] regex::Error),

    #[error("sum of accepted values does not fit in i64 (max_value = {max_value})")]
    #[diagnostic(
        code(string_calculator::sum_overflow),
        help("lower max_value so the accepted values cannot overflow")
    )]
    SumOverflow { max_value: i64 },
}

/// Payload-free classification of a [`CalculatorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NegativeNumbers,
    MalformedNumber,
    DelimiterPattern,
    SumOverflow,
}

impl CalculatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NegativeNumbers(_) => ErrorKind::NegativeNumbers,
            Self::MalformedNumber(_) => ErrorKind::MalformedNumber,
            Self::DelimiterPattern(_) => ErrorKind::DelimiterPattern,
            Self::SumOverflow { .. } => ErrorKind::SumOverflow,
        }
    }

    /// The rejected negatives, if this is a negative-number failure.
    pub fn negatives(&self) -> Option<&[String]> {
        match self {
            Self::NegativeNumbers(err) => Some(err.negatives()),
            _ => None,
        }
    }
}
