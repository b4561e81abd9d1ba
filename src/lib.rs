//! Sums the integers encoded in a delimited string.
//!
//! Inputs are comma or newline separated by default. A first line of the form
//! `//<delimiter>\n` or `//[delim][delim]...\n` declares extra delimiters.
//! Negative values are rejected as a group, values above 1000 are ignored.
//!
//! ```rust
//! assert_eq!(string_calculator::add("//[;][foo]\n1;2foo3;1001").unwrap(), 6);
//! ```

pub mod calculator;
pub mod config;
pub mod delimiters;
pub mod errors;
pub mod evaluate;

pub use crate::calculator::{add, StringCalculator};
pub use crate::config::CalculatorConfig;
pub use crate::delimiters::{resolve, DelimiterDeclaration, DelimiterSet, Resolution};
pub use crate::errors::{CalculatorError, ErrorKind, MalformedNumberError, NegativeNumbersError};
pub use crate::evaluate::{evaluate, ParsedNumber, Token};
