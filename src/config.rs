//! Calculator configuration.
//!
//! The value limit, the default delimiter set and the splitter size budget
//! are tunable. The declaration grammar itself is fixed.

use serde::{Deserialize, Serialize};

/// Largest value that still contributes to a sum.
pub const DEFAULT_MAX_VALUE: i64 = 1000;

/// Compiled-size budget for the delimiter splitter, in bytes.
pub const DEFAULT_SPLITTER_SIZE_LIMIT: usize = 10 * (1 << 20);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Values above this are dropped from the sum without error.
    pub max_value: i64,
    /// Delimiters active for every input, before any declaration is applied.
    pub default_delimiters: Vec<String>,
    /// Upper bound on the compiled splitter; larger declarations are rejected.
    pub splitter_size_limit: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_value: DEFAULT_MAX_VALUE,
            default_delimiters: vec![",".to_string(), "\n".to_string()],
            splitter_size_limit: DEFAULT_SPLITTER_SIZE_LIMIT,
        }
    }
}
