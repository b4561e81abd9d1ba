//! Top-level entry: resolve delimiters, then evaluate.

use crate::config::CalculatorConfig;
use crate::delimiters::resolve_with;
use crate::errors::CalculatorError;
use crate::evaluate::evaluate_resolution;

/// Sums delimited integer strings under a fixed [`CalculatorConfig`].
///
/// # Examples
///
/// ```rust
/// use string_calculator::StringCalculator;
/// let calculator = StringCalculator::default();
/// assert_eq!(calculator.add("1\n2,3").unwrap(), 6);
/// assert_eq!(calculator.add("//[***]\n1***2").unwrap(), 3);
/// let err = calculator.add("1,-2,3,-4").unwrap_err();
/// assert_eq!(err.to_string(), "negatives not allowed: -2,-4");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringCalculator {
    config: CalculatorConfig,
}

impl StringCalculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    #[tracing::instrument(level = "trace", skip_all, fields(len = input.len()))]
    pub fn add(&self, input: &str) -> Result<i64, CalculatorError> {
        if input.is_empty() {
            return Ok(0);
        }

        let resolution = resolve_with(input, &self.config);
        let result = evaluate_resolution(input, &resolution, &self.config);

        match &result {
            Ok(sum) => tracing::debug!(sum, "evaluated input"),
            Err(err) => tracing::debug!(kind = ?err.kind(), "rejected input"),
        }
        result
    }
}

/// Sums `input` with the default configuration.
pub fn add(input: &str) -> Result<i64, CalculatorError> {
    StringCalculator::default().add(input)
}
