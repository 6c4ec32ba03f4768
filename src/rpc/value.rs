//! Typed RPC values.
//!
//! JSON has no date type and does not separate integers from doubles, so
//! values carry the XML-RPC type system: dates travel as
//! `{"dateTime.iso8601": "20070101T00:00:00"}`, integers are JSON numbers
//! without a fraction, doubles are JSON numbers with one.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Object key marking a date value.
pub const DATETIME_TAG: &str = "dateTime.iso8601";

/// Wire format for dates written by this service.
const DATETIME_FORMAT: &str = "%Y%m%dT%H:%M:%S";

/// Formats accepted on input, besides RFC 3339.
const ACCEPTED_FORMATS: [&str; 3] = ["%Y%m%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y%m%dT%H%M%S"];

/// A single positional parameter or result value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum RpcValue {
    Int(i64),
    Double(f64),
    Boolean(bool),
    String(String),
    DateTime(NaiveDateTime),
    Array(Vec<RpcValue>),
    Struct(BTreeMap<String, RpcValue>),
    Nil,
}

impl RpcValue {
    /// XML-RPC type name, as used in signatures and fault messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            RpcValue::Int(_) => "int",
            RpcValue::Double(_) => "double",
            RpcValue::Boolean(_) => "boolean",
            RpcValue::String(_) => "string",
            RpcValue::DateTime(_) => DATETIME_TAG,
            RpcValue::Array(_) => "array",
            RpcValue::Struct(_) => "struct",
            RpcValue::Nil => "nil",
        }
    }

    /// Builds a struct value from key/value pairs.
    pub fn structure<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, RpcValue)>,
        K: Into<String>,
    {
        RpcValue::Struct(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Midnight of `day` as a date value.
    pub fn date(day: NaiveDate) -> Self {
        RpcValue::DateTime(day.and_time(chrono::NaiveTime::MIN))
    }

    pub fn optional_string(value: Option<String>) -> Self {
        value.map(RpcValue::String).unwrap_or(RpcValue::Nil)
    }
}

impl From<i64> for RpcValue {
    fn from(v: i64) -> Self {
        RpcValue::Int(v)
    }
}

impl From<f64> for RpcValue {
    fn from(v: f64) -> Self {
        RpcValue::Double(v)
    }
}

impl From<bool> for RpcValue {
    fn from(v: bool) -> Self {
        RpcValue::Boolean(v)
    }
}

impl From<String> for RpcValue {
    fn from(v: String) -> Self {
        RpcValue::String(v)
    }
}

impl From<&str> for RpcValue {
    fn from(v: &str) -> Self {
        RpcValue::String(v.to_string())
    }
}

impl<T: Into<RpcValue>> From<Vec<T>> for RpcValue {
    fn from(v: Vec<T>) -> Self {
        RpcValue::Array(v.into_iter().map(Into::into).collect())
    }
}

/// Parses an ISO 8601 timestamp in any of the accepted layouts.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            // Keep the caller's wall clock; the offset must not move the day.
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

impl TryFrom<Value> for RpcValue {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Null => RpcValue::Nil,
            Value::Bool(b) => RpcValue::Boolean(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RpcValue::Int(i)
                } else if n.is_u64() {
                    return Err(format!("integer out of range: {n}"));
                } else {
                    RpcValue::Double(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => RpcValue::String(s),
            Value::Array(items) => RpcValue::Array(
                items
                    .into_iter()
                    .map(RpcValue::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => {
                if map.len() == 1
                    && let Some(tagged) = map.get(DATETIME_TAG)
                {
                    let raw = tagged
                        .as_str()
                        .ok_or_else(|| format!("{DATETIME_TAG} value must be a string"))?;
                    let parsed =
                        parse_datetime(raw).ok_or_else(|| format!("invalid {DATETIME_TAG}: {raw}"))?;
                    return Ok(RpcValue::DateTime(parsed));
                }
                RpcValue::Struct(
                    map.into_iter()
                        .map(|(k, v)| RpcValue::try_from(v).map(|v| (k, v)))
                        .collect::<Result<_, _>>()?,
                )
            }
        })
    }
}

impl From<RpcValue> for Value {
    fn from(value: RpcValue) -> Self {
        match value {
            RpcValue::Int(i) => Value::Number(i.into()),
            RpcValue::Double(d) => Number::from_f64(d).map(Value::Number).unwrap_or(Value::Null),
            RpcValue::Boolean(b) => Value::Bool(b),
            RpcValue::String(s) => Value::String(s),
            RpcValue::DateTime(dt) => {
                let mut map = Map::new();
                map.insert(DATETIME_TAG.to_string(), Value::String(format_datetime(&dt)));
                Value::Object(map)
            }
            RpcValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            RpcValue::Struct(fields) => {
                Value::Object(fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            RpcValue::Nil => Value::Null,
        }
    }
}
