//! # fluentq
//!
//! A query templating and compilation engine with pluggable dialect quoting.
//!
//! ## Features
//!
//! - **Templates**: `%%i`, `%%s`, `%%l`, `%%b`, `%%f`, `%%d`, `%%t`, `%%sql`,
//!   `%%and` and `%%or` directives bound to positional arguments
//! - **Compile once, complete many times**: [`CompiledTemplate`] is immutable
//!   and can be shared across threads
//! - **Markers**: `[table.column]` identifiers and `"` string delimiters are
//!   rewritten for the target dialect
//! - **Dialect-agnostic**: all quoting goes through the [`Driver`] trait
//! - **Token stacks**: record a query as tokens and let the driver render it
//!
//! ## Templates
//!
//! ```ignore
//! use fluentq::{Compiler, Quoter, Value};
//!
//! let compiled = Compiler::new().compile("SELECT * FROM users WHERE id IN %%l")?;
//! let sql = compiled.complete(&Quoter::new(&driver), &[vec![1, 2, 3].into()])?;
//! assert_eq!(sql, "SELECT * FROM users WHERE id IN (1, 2, 3)");
//! ```
//!
//! ## Formatted sequences
//!
//! ```ignore
//! use fluentq::{Processor, ProcessMode, Segment, Value};
//!
//! let sql = Processor::new(&driver).process_formatted(
//!     &[Segment::text("UPDATE [users] SET %%and"), Value::map([("active", true)]).into()],
//!     ProcessMode::Build,
//! )?;
//! ```

pub mod compiler;
pub mod config;
pub mod directive;
pub mod driver;
pub mod error;
pub mod processor;
pub mod query;
pub mod quote;
pub mod token;
pub mod value;

mod trace;

#[cfg(test)]
mod test_support;

pub use compiler::{CompiledTemplate, Compiler, Fragment};
pub use config::{ProcessorConfig, UnknownDirectivePolicy};
pub use directive::{DIRECTIVE_PREFIX, Directive};
pub use driver::{BuildMode, Driver, EqualityMode, LogicalOperator};
pub use error::{QueryError, QueryResult};
pub use processor::{ProcessMode, Processor, Replacements};
pub use query::{CompiledQuery, Query};
pub use quote::Quoter;
pub use token::{Segment, Token, TokenStack};
pub use value::{Temporal, Value, ValueKind, ValueMap};
