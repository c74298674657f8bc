//! Request bodies and the coercion applied to their fields.
//!
//! Any JSON value is accepted for each field; a value that does not coerce is
//! reported as an [`InputError`] rather than rejected at deserialization.

use platform_db::{EmployeeChanges, NewEmployee};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// A numeric field as it arrives on the wire.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IntInput {
    Number(f64),
    Text(String),
    Other(Value),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoerceError {
    #[error("{0:?} is not a number")]
    NotANumber(String),
    #[error("{0} does not fit in a 32-bit integer")]
    OutOfRange(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Name, salary, and age are required.")]
    Missing,
    #[error("invalid value for `{field}`: {source}")]
    Coerce {
        field: &'static str,
        source: CoerceError,
    },
    #[error("invalid value for `{field}`: expected a string, got {value}")]
    NotText { field: &'static str, value: String },
}

impl IntInput {
    /// `""` and `false` count as "not supplied", same as an absent field.
    fn is_blank(&self) -> bool {
        match self {
            IntInput::Text(text) => text.is_empty(),
            IntInput::Other(value) => is_blank_value(value),
            IntInput::Number(_) => false,
        }
    }

    pub fn coerce(&self) -> Result<i32, CoerceError> {
        match self {
            IntInput::Number(value) => truncate(*value),
            IntInput::Text(text) => parse_int(text),
            IntInput::Other(value) => Err(CoerceError::NotANumber(value.to_string())),
        }
    }
}

fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

fn truncate(value: f64) -> Result<i32, CoerceError> {
    let whole = value.trunc();
    if !whole.is_finite() || whole < f64::from(i32::MIN) || whole > f64::from(i32::MAX) {
        return Err(CoerceError::OutOfRange(value.to_string()));
    }
    Ok(whole as i32)
}

/// Parse the leading integer of `raw`: optional leading whitespace and sign,
/// then at least one digit, read as hexadecimal after a `0x`/`0X` prefix.
/// Anything after the digits is ignored, so `"30.9"` is 30 and `"12abc"` is 12.
pub fn parse_int(raw: &str) -> Result<i32, CoerceError> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let len = digits
        .bytes()
        .take_while(|byte| char::from(*byte).is_digit(radix))
        .count();
    if len == 0 {
        return Err(CoerceError::NotANumber(raw.to_string()));
    }
    let magnitude = i64::from_str_radix(&digits[..len], radix)
        .map_err(|_| CoerceError::OutOfRange(raw.to_string()))?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).map_err(|_| CoerceError::OutOfRange(raw.to_string()))
}

fn coerce_field(field: &'static str, input: &IntInput) -> Result<i32, InputError> {
    input
        .coerce()
        .map_err(|source| InputError::Coerce { field, source })
}

fn text_field(field: &'static str, value: Value) -> Result<String, InputError> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(InputError::NotText {
            field,
            value: other.to_string(),
        }),
    }
}

fn supplied(input: Option<IntInput>) -> Option<IntInput> {
    input.filter(|value| !value.is_blank())
}

/// `POST /api/employees` body. All three fields are required.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CreateEmployee {
    pub name: Option<Value>,
    pub salary: Option<IntInput>,
    pub age: Option<IntInput>,
}

impl CreateEmployee {
    pub fn into_new_employee(self) -> Result<NewEmployee, InputError> {
        let name = self.name.filter(|name| !is_blank_value(name));
        let (Some(name), Some(salary), Some(age)) =
            (name, supplied(self.salary), supplied(self.age))
        else {
            return Err(InputError::Missing);
        };
        Ok(NewEmployee {
            name: text_field("name", name)?,
            salary: coerce_field("salary", &salary)?,
            age: coerce_field("age", &age)?,
        })
    }
}

/// `PATCH /api/employees/{id}` body. Omitted fields keep their stored value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateEmployee {
    pub name: Option<Value>,
    pub salary: Option<IntInput>,
    pub age: Option<IntInput>,
}

impl UpdateEmployee {
    pub fn into_changes(self) -> Result<EmployeeChanges, InputError> {
        let name = self
            .name
            .map(|value| text_field("name", value))
            .transpose()?;
        let salary = supplied(self.salary)
            .map(|value| coerce_field("salary", &value))
            .transpose()?;
        let age = supplied(self.age)
            .map(|value| coerce_field("age", &value))
            .transpose()?;
        Ok(EmployeeChanges { name, salary, age })
    }
}
