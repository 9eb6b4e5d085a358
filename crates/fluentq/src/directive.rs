//! Directive table.
//!
//! The closed vocabulary of formatting directives (`%%i`, `%%s`, ...) and the
//! quoting operation each one performs on its bound argument.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::driver::{Driver, EqualityMode, LogicalOperator};
use crate::error::{QueryError, QueryResult};
use crate::quote::Quoter;
use crate::value::Value;

/// Marker that introduces a directive in a template.
pub const DIRECTIVE_PREFIX: &str = "%%";

/// A formatting directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `%%i`
    Integer,
    /// `%%s`
    String,
    /// `%%l`: parenthesized, comma-joined list
    List,
    /// `%%b`
    Boolean,
    /// `%%f`
    Float,
    /// `%%d`
    Date,
    /// `%%t`
    DateTime,
    /// `%%sql`: sub-query
    Sql,
    /// `%%and`: `k = v AND ...`
    And,
    /// `%%or`: `k = v OR ...`
    Or,
}

impl Directive {
    pub const ALL: [Directive; 10] = [
        Directive::Integer,
        Directive::String,
        Directive::List,
        Directive::Boolean,
        Directive::Float,
        Directive::Date,
        Directive::DateTime,
        Directive::Sql,
        Directive::And,
        Directive::Or,
    ];

    /// The directive's name as written after `%%`.
    pub fn name(self) -> &'static str {
        match self {
            Directive::Integer => "i",
            Directive::String => "s",
            Directive::List => "l",
            Directive::Boolean => "b",
            Directive::Float => "f",
            Directive::Date => "d",
            Directive::DateTime => "t",
            Directive::Sql => "sql",
            Directive::And => "and",
            Directive::Or => "or",
        }
    }

    /// Look up a directive by name (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// Run the directive's quoting operation on `value`.
    pub fn apply<D: Driver>(self, quoter: &Quoter<D>, value: &Value) -> QueryResult<String> {
        match self {
            Directive::Integer => quoter.quote_value(&self.to_integer(value)?),
            Directive::String => quoter.quote_value(&self.to_text(value)?),
            Directive::Boolean => quoter.quote_value(&Value::Boolean(value.is_truthy())),
            Directive::Float => quoter.quote_value(&self.to_float(value)?),
            Directive::List => {
                let items = match value {
                    Value::List(items) => quoter.process_array(items, ",")?,
                    Value::Map(pairs) => {
                        let values: Vec<Value> = pairs.values().cloned().collect();
                        quoter.process_array(&values, ",")?
                    }
                    single => quoter.quote_value(single)?,
                };
                Ok(format!("({items})"))
            }
            Directive::Date => quoter.quote_value(&self.to_date(value)?),
            Directive::DateTime => quoter.quote_value(&self.to_date_time(value)?),
            Directive::Sql => quoter.quote_subquery(value),
            Directive::And => self.group(quoter, value, LogicalOperator::And),
            Directive::Or => self.group(quoter, value, LogicalOperator::Or),
        }
    }

    fn group<D: Driver>(
        self,
        quoter: &Quoter<D>,
        value: &Value,
        operator: LogicalOperator,
    ) -> QueryResult<String> {
        let Value::Map(pairs) = value else {
            return Err(self.reject(value));
        };
        let glue = quoter.driver().quote_operator(operator);
        quoter.process_hash(pairs, &glue, EqualityMode::Comparing)
    }

    fn reject(self, value: &Value) -> QueryError {
        QueryError::invalid_argument(self.name(), format!("cannot use {:?}", value.kind()))
    }

    fn to_integer(self, value: &Value) -> QueryResult<Value> {
        let i = match value {
            Value::Integer(i) => *i,
            Value::Float(f) => self.float_to_integer(*f)?,
            Value::Boolean(b) => i64::from(*b),
            Value::Text(s) | Value::Symbol(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| QueryError::invalid_argument(self.name(), format!("{s:?}: {e}")))?,
            Value::Null => return Ok(Value::Null),
            other => return Err(self.reject(other)),
        };
        Ok(Value::Integer(i))
    }

    /// Truncate toward zero. Values outside the `i64` range are rejected
    /// rather than saturated.
    fn float_to_integer(self, f: f64) -> QueryResult<i64> {
        const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
        let t = f.trunc();
        if t.is_finite() && t >= -LIMIT && t < LIMIT {
            Ok(t as i64)
        } else {
            Err(QueryError::invalid_argument(
                self.name(),
                format!("{f} is outside the integer range"),
            ))
        }
    }

    fn to_float(self, value: &Value) -> QueryResult<Value> {
        let f = match value {
            Value::Float(f) => *f,
            Value::Integer(i) => *i as f64,
            Value::Text(s) | Value::Symbol(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| QueryError::invalid_argument(self.name(), format!("{s:?}: {e}")))?,
            Value::Null => return Ok(Value::Null),
            other => return Err(self.reject(other)),
        };
        Ok(Value::Float(f))
    }

    fn to_text(self, value: &Value) -> QueryResult<Value> {
        value
            .to_text()
            .map(|s| Value::Text(s.into_owned()))
            .ok_or_else(|| self.reject(value))
    }

    fn to_date(self, value: &Value) -> QueryResult<Value> {
        let date = match value {
            Value::Date(d) => *d,
            Value::DateTime(dt) => dt.date(),
            Value::Text(s) => parse_date(s).ok_or_else(|| self.unparsable(s))?,
            Value::Null => return Ok(Value::Null),
            other => return Err(self.reject(other)),
        };
        Ok(Value::Date(date))
    }

    fn to_date_time(self, value: &Value) -> QueryResult<Value> {
        let dt = match value {
            Value::DateTime(dt) => *dt,
            Value::Date(d) => d.and_time(NaiveTime::MIN),
            Value::Text(s) => parse_date_time(s).ok_or_else(|| self.unparsable(s))?,
            Value::Null => return Ok(Value::Null),
            other => return Err(self.reject(other)),
        };
        Ok(Value::DateTime(dt))
    }

    fn unparsable(self, s: &str) -> QueryError {
        QueryError::invalid_argument(self.name(), format!("unparsable date/time {s:?}"))
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DIRECTIVE_PREFIX}{}", self.name())
    }
}

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_date_time(s).map(|dt| dt.date()))
}

/// Accepts the common SQL/ISO forms, RFC 3339 (normalized to UTC), or a bare
/// date at midnight.
fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc()))
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}
