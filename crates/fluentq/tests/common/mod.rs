#![allow(dead_code)]

use fluentq::{
    BuildMode, Driver, EqualityMode, LogicalOperator, ProcessMode, Processor, ProcessorConfig,
    QueryResult, Segment, Temporal, TokenStack, ValueKind,
};

/// Postgres-flavoured driver: double-quoted identifiers, typed date literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgDriver;

impl Driver for PgDriver {
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
        identifier
            .split('.')
            .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn quote_date_time(&self, value: Temporal) -> String {
        match value {
            Temporal::Date(d) => format!("'{}'::date", d.format("%Y-%m-%d")),
            Temporal::DateTime(dt) => format!("'{}'::timestamp", dt.format("%Y-%m-%d %H:%M:%S")),
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

    /// `order_by` renders as `ORDER BY`; raw tokens contribute only their arguments.
    fn build_query(
        &self,
        tokens: &TokenStack,
        mode: BuildMode,
        config: &ProcessorConfig,
    ) -> QueryResult<String> {
        let mut segments = Vec::new();
        for token in tokens {
            if !token.is_raw() {
                segments.push(Segment::text(token.name().replace('_', " ").to_uppercase()));
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
