//! Bound parameter values and SQL-literal formatting.
//!
//! Converts the runtime value bound to a placeholder into the literal text
//! spliced into the logged statement.

use chrono::{NaiveDate, NaiveDateTime};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A bound parameter value as seen by the formatter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// A value outside the formatter's vocabulary. Carries the
    /// host-reported type name for the diagnostic record.
    Unsupported { type_name: String },
}

/// Outcome of formatting one value: either real literal text, or the
/// degraded empty literal for a type the formatter does not handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Formatted(String),
    Degraded { type_name: String },
}

impl Literal {
    /// The text spliced into the reconstructed statement. Degraded values
    /// render as an empty quoted literal.
    pub fn into_sql(self) -> String {
        match self {
            Literal::Formatted(text) => text,
            Literal::Degraded { .. } => "''".to_string(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Literal::Degraded { .. })
    }
}

/// Format a single bound value as SQL-literal text.
///
/// Numbers, booleans and null render bare; text and date/time values are
/// single-quoted. Embedded single quotes in text are copied verbatim, not
/// escaped: the logged SQL is meant for human inspection, not re-execution.
pub fn format_literal(value: &Value) -> Literal {
    match value {
        Value::Null => Literal::Formatted("null".to_string()),
        Value::Int(n) => Literal::Formatted(n.to_string()),
        Value::Float(n) => Literal::Formatted(n.to_string()),
        Value::Bool(b) => Literal::Formatted(b.to_string()),
        Value::Text(s) => Literal::Formatted(format!("'{}'", s)),
        Value::Date(d) => Literal::Formatted(format!("'{} 00:00:00'", d.format("%Y-%m-%d"))),
        Value::DateTime(dt) => Literal::Formatted(format!("'{}'", dt.format(DATETIME_FORMAT))),
        Value::Unsupported { type_name } => {
            tracing::debug!("sql literal formatting does not support type {}", type_name);
            Literal::Degraded {
                type_name: type_name.clone(),
            }
        }
    }
}

impl Value {
    /// An unsupported value with the given host-side type name.
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self::Unsupported {
            type_name: type_name.into(),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::unsupported("number")
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(_) => Value::unsupported("array"),
            serde_json::Value::Object(_) => Value::unsupported("object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sql(value: Value) -> String {
        format_literal(&value).into_sql()
    }

    #[test]
    fn test_null_renders_bare() {
        assert_eq!(sql(Value::Null), "null");
    }

    #[test]
    fn test_numbers_render_bare() {
        assert_eq!(sql(Value::Int(42)), "42");
        assert_eq!(sql(Value::Int(-7)), "-7");
        assert_eq!(sql(Value::Float(3.14)), "3.14");
    }

    #[test]
    fn test_booleans_render_bare() {
        assert_eq!(sql(Value::Bool(true)), "true");
        assert_eq!(sql(Value::Bool(false)), "false");
    }

    #[test]
    fn test_text_is_quoted_verbatim() {
        assert_eq!(sql(Value::from("Alice")), "'Alice'");
        // Embedded quotes pass through unescaped.
        assert_eq!(sql(Value::from("O'Brien")), "'O'Brien'");
    }

    #[test]
    fn test_datetime_format() {
        let dt = NaiveDate::from_ymd_opt(2020, 1, 6)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(sql(Value::DateTime(dt)), "'2020-01-06 10:00:00'");
    }

    #[test]
    fn test_date_gets_zero_time_of_day() {
        let d = NaiveDate::from_ymd_opt(2020, 1, 6).unwrap();
        assert_eq!(sql(Value::Date(d)), "'2020-01-06 00:00:00'");
    }

    #[test]
    fn test_unsupported_degrades_to_empty_literal() {
        let literal = format_literal(&Value::unsupported("Vec<u8>"));
        assert!(literal.is_degraded());
        assert_eq!(literal.into_sql(), "''");
    }

    #[test]
    fn test_from_json_value() {
        assert_eq!(Value::from(serde_json::json!(null)), Value::Null);
        assert_eq!(Value::from(serde_json::json!(1)), Value::Int(1));
        assert_eq!(Value::from(serde_json::json!(2.5)), Value::Float(2.5));
        assert_eq!(Value::from(serde_json::json!("x")), Value::from("x"));
        assert!(format_literal(&Value::from(serde_json::json!([1, 2]))).is_degraded());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(5i64)), Value::Int(5));
    }
}
