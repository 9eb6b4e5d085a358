//! ANSI-flavoured driver used by unit tests.

use crate::config::ProcessorConfig;
use crate::driver::{BuildMode, Driver, EqualityMode, LogicalOperator};
use crate::error::QueryResult;
use crate::processor::{ProcessMode, Processor};
use crate::token::{Segment, TokenStack};
use crate::value::{Temporal, ValueKind};

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TestDriver;

impl Driver for TestDriver {
    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    fn quote_integer(&self, value: i64) -> String {
        value.to_string()
    }

    fn quote_float(&self, value: f64) -> String {
        value.to_string()
    }

    fn quote_boolean(&self, value: bool) -> String {
        let keyword = if value { "TRUE" } else { "FALSE" };
        keyword.to_string()
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        identifier.to_string()
    }

    fn quote_date_time(&self, value: Temporal) -> String {
        match value {
            Temporal::Date(d) => format!("DATE '{}'", d.format("%Y-%m-%d")),
            Temporal::DateTime(dt) => format!("TIMESTAMP '{}'", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }

    fn null(&self) -> String {
        "NULL".to_string()
    }

    fn quote_operator(&self, operator: LogicalOperator) -> String {
        let keyword = match operator {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        };
        keyword.to_string()
    }

    fn quote_equality(&self, kind: ValueKind, mode: EqualityMode) -> String {
        let operator = match (mode, kind) {
            (EqualityMode::Comparing, ValueKind::Boolean | ValueKind::Null) => "IS",
            (EqualityMode::Comparing, ValueKind::List) => "IN",
            _ => "=",
        };
        operator.to_string()
    }

    fn quote_subquery(&self, sql: &str) -> QueryResult<String> {
        Ok(format!("({sql})"))
    }

    /// Upper-cases token names and renders arguments as segments.
    fn build_query(
        &self,
        tokens: &TokenStack,
        mode: BuildMode,
        config: &ProcessorConfig,
    ) -> QueryResult<String> {
        let mut segments = Vec::new();
        for token in tokens {
            if !token.is_raw() {
                segments.push(Segment::text(token.name().to_uppercase()));
            }
            segments.extend(token.arguments().iter().cloned().map(Segment::from));
        }
        let mode = match mode {
            BuildMode::Build => ProcessMode::Build,
            BuildMode::Prepare => ProcessMode::Compile,
        };
        Processor::with_config(self, config.clone()).process_formatted(&segments, mode)
    }
}

/// A driver with only the required capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MinimalDriver;

impl Driver for MinimalDriver {
    fn quote_string(&self, value: &str) -> String {
        TestDriver.quote_string(value)
    }

    fn quote_integer(&self, value: i64) -> String {
        value.to_string()
    }

    fn quote_float(&self, value: f64) -> String {
        value.to_string()
    }

    fn quote_boolean(&self, value: bool) -> String {
        TestDriver.quote_boolean(value)
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        identifier.to_string()
    }

    fn quote_date_time(&self, value: Temporal) -> String {
        TestDriver.quote_date_time(value)
    }

    fn null(&self) -> String {
        "NULL".to_string()
    }

    fn quote_operator(&self, operator: LogicalOperator) -> String {
        TestDriver.quote_operator(operator)
    }

    fn quote_equality(&self, kind: ValueKind, mode: EqualityMode) -> String {
        TestDriver.quote_equality(kind, mode)
    }
}
