//! Bulk import of environment variables from `.env` style text.
//!
//! [`parser`] turns the text into validated records, [`executor`] sends the
//! valid ones to a [`client::VariableStore`] and reports how many settled
//! each way.

pub mod errors;
pub mod executor;
pub mod metrics_defs;
pub mod parser;
pub mod validation;

pub use errors::ImportError;
pub use executor::{ImportExecutor, ImportFailure, ImportOutcome};
pub use parser::{ParseError, ParseReport, ParsedVariable, Parser, parse};
