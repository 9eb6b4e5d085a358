//! Dialect capability interface.
//!
//! A [`Driver`] supplies the dialect-specific quoting primitives the core
//! consumes. fluentq does not ship any dialect; implement the trait for the
//! database you target.

use crate::config::ProcessorConfig;
use crate::error::{QueryError, QueryResult};
use crate::token::TokenStack;
use crate::value::{Temporal, ValueKind};

/// Logical operator used to glue `%%and` / `%%or` groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

/// Equality rendering mode for key/value pairs.
///
/// - `Assigning` keeps the plain `=` form (e.g. `SET` clauses).
/// - `Comparing` may pick dialect forms such as `IS` for booleans and NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EqualityMode {
    Assigning,
    #[default]
    Comparing,
}

/// What a token stack is being rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// Final query with all directives expanded.
    #[default]
    Build,
    /// Template with directives left in place, to be compiled.
    Prepare,
}

/// Dialect-specific quoting primitives.
///
/// Every method must be a pure function of its input. The optional
/// capabilities (`quote_subquery`, `build_query`) fail with
/// [`QueryError::DriverCapabilityMissing`] unless overridden.
pub trait Driver {
    /// Quote and escape a string literal.
    fn quote_string(&self, value: &str) -> String;

    fn quote_integer(&self, value: i64) -> String;

    fn quote_float(&self, value: f64) -> String;

    fn quote_boolean(&self, value: bool) -> String;

    /// Quote an identifier path (`schema.table.column`).
    fn quote_identifier(&self, identifier: &str) -> String;

    fn quote_date_time(&self, value: Temporal) -> String;

    /// The dialect's NULL representation.
    fn null(&self) -> String;

    fn quote_operator(&self, operator: LogicalOperator) -> String;

    /// Equality operator for a value of `kind` under `mode`.
    fn quote_equality(&self, kind: ValueKind, mode: EqualityMode) -> String;

    /// Wrap already-built SQL as a sub-query.
    fn quote_subquery(&self, sql: &str) -> QueryResult<String> {
        let _ = sql;
        Err(QueryError::DriverCapabilityMissing("quote_subquery"))
    }

    /// Render a token stack into a query string (or a template, in
    /// [`BuildMode::Prepare`]).
    ///
    /// `config` is the caller's processor configuration; implementations
    /// render through `Processor::with_config` so both build modes follow
    /// the same unknown directive and raw fallback policies.
    fn build_query(
        &self,
        tokens: &TokenStack,
        mode: BuildMode,
        config: &ProcessorConfig,
    ) -> QueryResult<String> {
        let _ = (tokens, mode, config);
        Err(QueryError::DriverCapabilityMissing("build_query"))
    }
}

impl<D: Driver + ?Sized> Driver for &D {
    fn quote_string(&self, value: &str) -> String {
        (**self).quote_string(value)
    }

    fn quote_integer(&self, value: i64) -> String {
        (**self).quote_integer(value)
    }

    fn quote_float(&self, value: f64) -> String {
        (**self).quote_float(value)
    }

    fn quote_boolean(&self, value: bool) -> String {
        (**self).quote_boolean(value)
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        (**self).quote_identifier(identifier)
    }

    fn quote_date_time(&self, value: Temporal) -> String {
        (**self).quote_date_time(value)
    }

    fn null(&self) -> String {
        (**self).null()
    }

    fn quote_operator(&self, operator: LogicalOperator) -> String {
        (**self).quote_operator(operator)
    }

    fn quote_equality(&self, kind: ValueKind, mode: EqualityMode) -> String {
        (**self).quote_equality(kind, mode)
    }

    fn quote_subquery(&self, sql: &str) -> QueryResult<String> {
        (**self).quote_subquery(sql)
    }

    fn build_query(
        &self,
        tokens: &TokenStack,
        mode: BuildMode,
        config: &ProcessorConfig,
    ) -> QueryResult<String> {
        (**self).build_query(tokens, mode, config)
    }
}
