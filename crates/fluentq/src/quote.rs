//! Value dispatcher.
//!
//! [`Quoter`] picks the driver primitive matching a value's kind and
//! provides the list/hash renderings directives are built on.

use crate::config::ProcessorConfig;
use crate::driver::{Driver, EqualityMode};
use crate::error::{QueryError, QueryResult};
use crate::value::{Temporal, Value, ValueMap};

/// Quotes values through a [`Driver`].
#[derive(Debug, Clone)]
pub struct Quoter<D> {
    driver: D,
    config: ProcessorConfig,
}

impl<D: Driver> Quoter<D> {
    /// Create a quoter with the default configuration.
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, ProcessorConfig::default())
    }

    pub fn with_config(driver: D, config: ProcessorConfig) -> Self {
        Self { driver, config }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Quote a single value by its kind.
    ///
    /// Dispatch order: text/symbol, integer, list, float, boolean,
    /// date/date-time, null. Maps render as assigning `key = value` pairs and
    /// sub-queries go through [`Driver::quote_subquery`]. Opaque values are
    /// rejected unless raw fallback is enabled.
    pub fn quote_value(&self, value: &Value) -> QueryResult<String> {
        let quoted = match value {
            Value::Text(s) | Value::Symbol(s) => self.driver.quote_string(s),
            Value::Integer(i) => self.driver.quote_integer(*i),
            Value::List(items) => format!("({})", self.process_array(items, ",")?),
            Value::Float(f) => self.driver.quote_float(*f),
            Value::Boolean(b) => self.driver.quote_boolean(*b),
            Value::Date(d) => self.driver.quote_date_time(Temporal::Date(*d)),
            Value::DateTime(dt) => self.driver.quote_date_time(Temporal::DateTime(*dt)),
            Value::Null => self.driver.null(),
            Value::Map(pairs) => self.process_hash(pairs, ",", EqualityMode::Assigning)?,
            Value::Subquery(sql) => self.driver.quote_subquery(sql)?,
            Value::Opaque(raw) => {
                if !self.config.raw_fallback {
                    return Err(QueryError::UnsupportedValueKind { kind: value.kind() });
                }
                raw.clone()
            }
        };
        Ok(quoted)
    }

    /// Quote each value and join them with `glue` followed by a space.
    pub fn process_array(&self, values: &[Value], glue: &str) -> QueryResult<String> {
        let separator = format!("{glue} ");
        let quoted = values
            .iter()
            .map(|v| self.quote_value(v))
            .collect::<QueryResult<Vec<_>>>()?;
        Ok(quoted.join(&separator))
    }

    /// Render `key <op> value` pairs joined by ` glue `.
    ///
    /// The operator comes from [`Driver::quote_equality`] for the value's kind
    /// and `mode`.
    pub fn process_hash(
        &self,
        pairs: &ValueMap,
        glue: &str,
        mode: EqualityMode,
    ) -> QueryResult<String> {
        let separator = format!(" {glue} ");
        let mut rendered = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            let operator = self.driver.quote_equality(value.kind(), mode);
            let key = self.quote_identifier(key);
            let value = self.quote_value(value)?;
            rendered.push(format!("{key} {operator} {value}"));
        }
        Ok(rendered.join(&separator))
    }

    /// Quote a sub-query. Text is taken as already-built SQL.
    pub fn quote_subquery(&self, value: &Value) -> QueryResult<String> {
        match value {
            Value::Subquery(sql) | Value::Text(sql) => self.driver.quote_subquery(sql),
            other => Err(QueryError::invalid_argument(
                "sql",
                format!("expected a sub-query, got {:?}", other.kind()),
            )),
        }
    }

    pub fn quote_identifier(&self, identifier: &str) -> String {
        self.driver.quote_identifier(identifier)
    }

    pub fn quote_identifiers<I, S>(&self, identifiers: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        identifiers
            .into_iter()
            .map(|id| self.quote_identifier(id.as_ref()))
            .collect()
    }

    /// Quote identifiers and join them with `", "`.
    pub fn process_identifiers<I, S>(&self, identifiers: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.quote_identifiers(identifiers).join(", ")
    }

    pub fn null(&self) -> String {
        self.driver.null()
    }

    /// The dialect's string delimiter: the last character of a quoted empty
    /// string.
    pub fn string_delimiter(&self) -> String {
        self.driver
            .quote_string("")
            .chars()
            .last()
            .map(String::from)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDriver;
    use chrono::NaiveDate;

    fn quoter() -> Quoter<TestDriver> {
        Quoter::new(TestDriver)
    }

    #[test]
    fn quotes_scalars_by_kind() {
        let q = quoter();
        assert_eq!(q.quote_value(&"O'Reilly".into()).unwrap(), "'O''Reilly'");
        assert_eq!(q.quote_value(&Value::symbol("active")).unwrap(), "'active'");
        assert_eq!(q.quote_value(&42.into()).unwrap(), "42");
        assert_eq!(q.quote_value(&1.5.into()).unwrap(), "1.5");
        assert_eq!(q.quote_value(&true.into()).unwrap(), "TRUE");
        assert_eq!(q.quote_value(&Value::Null).unwrap(), "NULL");
    }

    #[test]
    fn quotes_dates_through_date_time_primitive() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(q_date(d.into()), "DATE '2024-02-29'");
        let dt = d.and_hms_opt(13, 5, 0).unwrap();
        assert_eq!(q_date(dt.into()), "TIMESTAMP '2024-02-29 13:05:00'");
    }

    fn q_date(v: Value) -> String {
        quoter().quote_value(&v).unwrap()
    }

    #[test]
    fn nested_lists_are_parenthesized() {
        let v = Value::List(vec![1.into(), Value::List(vec!["a".into(), "b".into()])]);
        assert_eq!(quoter().quote_value(&v).unwrap(), "(1, ('a', 'b'))");
    }

    #[test]
    fn process_array_uses_glue() {
        let values = vec![Value::from(1), Value::from(2)];
        assert_eq!(quoter().process_array(&values, ",").unwrap(), "1, 2");
        assert_eq!(quoter().process_array(&values, " ||").unwrap(), "1 || 2");
        assert_eq!(quoter().process_array(&[], ",").unwrap(), "");
    }

    #[test]
    fn process_hash_comparing_vs_assigning() {
        let Value::Map(pairs) = Value::map([("flag", Value::Boolean(true)), ("n", Value::Null)])
        else {
            unreachable!()
        };
        assert_eq!(
            quoter()
                .process_hash(&pairs, "AND", EqualityMode::Comparing)
                .unwrap(),
            "flag IS TRUE AND n IS NULL"
        );
        assert_eq!(
            quoter()
                .process_hash(&pairs, ",", EqualityMode::Assigning)
                .unwrap(),
            "flag = TRUE , n = NULL"
        );
    }

    #[test]
    fn opaque_values_are_rejected_by_default() {
        let err = quoter().quote_value(&Value::opaque("x; DROP")).unwrap_err();
        assert!(matches!(
            err,
            QueryError::UnsupportedValueKind { kind: crate::ValueKind::Opaque }
        ));
    }

    #[test]
    fn opaque_values_pass_through_when_allowed() {
        let q = Quoter::with_config(TestDriver, ProcessorConfig::new().allow_raw_fallback());
        assert_eq!(q.quote_value(&Value::opaque("NOW()")).unwrap(), "NOW()");
    }

    #[test]
    fn subquery_is_wrapped() {
        assert_eq!(
            quoter().quote_subquery(&Value::subquery("SELECT 1")).unwrap(),
            "(SELECT 1)"
        );
        assert!(quoter().quote_subquery(&Value::from(1)).is_err());
    }

    #[test]
    fn identifiers_and_delimiter() {
        let q = quoter();
        assert_eq!(q.process_identifiers(["id", "users.name"]), "id, users.name");
        assert_eq!(q.string_delimiter(), "'");
    }
}
