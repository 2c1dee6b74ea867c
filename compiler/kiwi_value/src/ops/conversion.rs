//! Explicit conversions requested by type hints and builtins.

use chrono::NaiveDateTime;

use crate::{Value, ValueError, ValueResult, ValueType};

/// Accepted spellings when turning a string into a date.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

fn failed(value: &Value, target: ValueType) -> ValueError {
    ValueError::conversion(format!(
        "Cannot convert `{}` to `{target}`.",
        value.type_tag()
    ))
}

/// Floats truncate toward zero; strings parse as integers, then as
/// floats; dates give their Unix timestamp.
#[allow(clippy::cast_possible_truncation)]
pub fn to_integer(value: &Value) -> ValueResult {
    match value {
        Value::Integer(n) => Ok(Value::Integer(*n)),
        Value::Float(n) if n.is_finite() => Ok(Value::Integer(n.trunc() as i64)),
        Value::Boolean(b) => Ok(Value::Integer(i64::from(*b))),
        Value::String(s) => {
            let text = s.trim();
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::Integer(n));
            }
            match text.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(Value::Integer(f.trunc() as i64)),
                _ => Err(ValueError::conversion(format!(
                    "Cannot convert `{s}` to `integer`."
                ))),
            }
        }
        Value::Date(d) => Ok(Value::Integer(d.and_utc().timestamp())),
        other => Err(failed(other, ValueType::Integer)),
    }
}

#[allow(clippy::cast_precision_loss)]
pub fn to_float(value: &Value) -> ValueResult {
    match value {
        Value::Integer(n) => Ok(Value::Float(*n as f64)),
        Value::Float(n) => Ok(Value::Float(*n)),
        Value::Boolean(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| ValueError::conversion(format!("Cannot convert `{s}` to `float`."))),
        Value::Date(d) => Ok(Value::Float(d.and_utc().timestamp() as f64)),
        other => Err(failed(other, ValueType::Float)),
    }
}

/// Truthiness, except that the strings `true` and `false` (any case)
/// convert to the matching boolean.
pub fn to_boolean(value: &Value) -> Value {
    if let Value::String(s) = value {
        if s.eq_ignore_ascii_case("true") {
            return Value::Boolean(true);
        }
        if s.eq_ignore_ascii_case("false") {
            return Value::Boolean(false);
        }
    }
    Value::Boolean(value.is_truthy())
}

pub fn to_string_value(value: &Value) -> Value {
    Value::String(value.serialize())
}

fn to_date(value: &Value) -> ValueResult {
    match value {
        Value::Date(d) => Ok(Value::Date(*d)),
        Value::Integer(seconds) => chrono::DateTime::from_timestamp(*seconds, 0)
            .map(|dt| Value::Date(dt.naive_utc()))
            .ok_or_else(|| failed(value, ValueType::Date)),
        Value::String(s) => DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s.trim(), format).ok())
            .or_else(|| {
                chrono::NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .map(Value::Date)
            .ok_or_else(|| ValueError::conversion(format!("Cannot convert `{s}` to `date`."))),
        other => Err(failed(other, ValueType::Date)),
    }
}

/// Convert `value` to the primitive `target`.
///
/// Values already of the target tag pass through unchanged (same
/// handle for aggregates). Strings become lists of one-character
/// strings.
pub fn convert(value: &Value, target: ValueType) -> ValueResult {
    if value.type_tag() == target {
        return Ok(value.clone());
    }
    match target {
        ValueType::Integer => to_integer(value),
        ValueType::Float => to_float(value),
        ValueType::Boolean => Ok(to_boolean(value)),
        ValueType::String => Ok(to_string_value(value)),
        ValueType::Date => to_date(value),
        ValueType::List => match value {
            Value::String(s) => Ok(Value::list(
                s.chars().map(|c| Value::String(c.to_string())).collect(),
            )),
            Value::Hashmap(map) => Ok(Value::list(
                map.borrow()
                    .iter()
                    .map(|(k, v)| Value::list(vec![k.clone(), v.clone()]))
                    .collect(),
            )),
            other => Err(failed(other, target)),
        },
        ValueType::None => Ok(Value::None),
        _ => Err(failed(value, target)),
    }
}
