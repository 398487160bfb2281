//! Request payload validation.
//!
//! Each resource declares its payload shape as a [`Schema`]: an ordered list
//! of [`Field`] rules built in `const` context (see [`schemas`]). Validating a
//! JSON body walks the fields in declared order and, per field, checks
//! presence, then type, then length/format. The first violation wins and is
//! reported as a single human-readable message; validation never panics.
//!
//! On success the sanitized body (integers coerced, undeclared keys
//! rejected) is returned and can be deserialized into a typed payload with
//! [`Schema::parse`].

/// Per-resource schemas.
pub mod schemas;

use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use validator::ValidateEmail;

/// Sanitized payload produced by a successful validation.
pub type Sanitized = Map<String, Value>;

/// The first rule a payload violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Human-readable message, surfaced verbatim in HTTP error bodies.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Value type and constraints of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string with optional character bounds (inclusive).
    Text { min: Option<usize>, max: Option<usize> },
    /// String shaped like `local@domain.tld`.
    Email,
    /// Whole number.
    Integer,
}

/// One declared key of a [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    kind: FieldKind,
    required: bool,
}

impl Field {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text {
                min: None,
                max: None,
            },
            required: false,
        }
    }

    pub const fn email(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Email,
            required: false,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            required: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Minimum length in characters. Only meaningful for text fields.
    pub const fn min(mut self, min: usize) -> Self {
        if let FieldKind::Text { max, .. } = self.kind {
            self.kind = FieldKind::Text {
                min: Some(min),
                max,
            };
        }
        self
    }

    /// Maximum length in characters. Only meaningful for text fields.
    pub const fn max(mut self, max: usize) -> Self {
        if let FieldKind::Text { min, .. } = self.kind {
            self.kind = FieldKind::Text {
                min,
                max: Some(max),
            };
        }
        self
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    fn check(&self, value: &Value) -> Result<Value, ValidationError> {
        let name = self.name;
        match self.kind {
            FieldKind::Text { min, max } => {
                let text = as_text(name, value)?;
                let length = text.chars().count();
                if let Some(min) = min
                    && length < min
                {
                    return Err(ValidationError::new(format!(
                        "\"{name}\" length must be at least {min} characters long"
                    )));
                }
                if let Some(max) = max
                    && length > max
                {
                    return Err(ValidationError::new(format!(
                        "\"{name}\" length must be less than or equal to {max} characters long"
                    )));
                }
                Ok(value.clone())
            }
            FieldKind::Email => {
                let text = as_text(name, value)?;
                if is_email(text) {
                    Ok(value.clone())
                } else {
                    Err(ValidationError::new(format!(
                        "\"{name}\" must be a valid email"
                    )))
                }
            }
            FieldKind::Integer => as_integer(name, value).map(Value::from),
        }
    }
}

/// Ordered set of field rules for one payload shape.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [Field],
    partial: bool,
}

impl Schema {
    pub const fn new(fields: &'static [Field]) -> Self {
        Self {
            fields,
            partial: false,
        }
    }

    /// Same rules with every field optional; used for `update` payloads.
    pub const fn partial(self) -> Self {
        Self {
            fields: self.fields,
            partial: true,
        }
    }

    pub const fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Validate a JSON body, returning the sanitized object or the first
    /// violated rule.
    pub fn validate(&self, input: &Value) -> Result<Sanitized, ValidationError> {
        let Value::Object(object) = input else {
            return Err(ValidationError::new("\"value\" must be of type object"));
        };

        let mut sanitized = Map::new();
        for field in self.fields {
            match object.get(field.name) {
                None if field.required && !self.partial => {
                    return Err(ValidationError::new(format!(
                        "\"{}\" is required",
                        field.name
                    )));
                }
                None => {}
                Some(value) => {
                    sanitized.insert(field.name.to_string(), field.check(value)?);
                }
            }
        }

        if let Some(unknown) = object
            .keys()
            .find(|key| !self.fields.iter().any(|field| field.name == key.as_str()))
        {
            return Err(ValidationError::new(format!("\"{unknown}\" is not allowed")));
        }

        Ok(sanitized)
    }

    /// Validate and deserialize into a typed payload.
    pub fn parse<T: DeserializeOwned>(&self, input: &Value) -> Result<T, ValidationError> {
        let sanitized = self.validate(input)?;
        serde_json::from_value(Value::Object(sanitized))
            .map_err(|e| ValidationError::new(e.to_string()))
    }
}

fn as_text<'a>(name: &str, value: &'a Value) -> Result<&'a str, ValidationError> {
    match value {
        Value::String(text) if text.is_empty() => Err(ValidationError::new(format!(
            "\"{name}\" is not allowed to be empty"
        ))),
        Value::String(text) => Ok(text),
        _ => Err(ValidationError::new(format!("\"{name}\" must be a string"))),
    }
}

fn as_integer(name: &str, value: &Value) -> Result<i64, ValidationError> {
    let not_a_number = || ValidationError::new(format!("\"{name}\" must be a number"));
    let not_an_integer = || ValidationError::new(format!("\"{name}\" must be an integer"));

    match value {
        Value::Number(number) => number_to_integer(number).ok_or_else(not_an_integer),
        Value::String(text) => {
            let trimmed = text.trim();
            if let Ok(integer) = trimmed.parse::<i64>() {
                return Ok(integer);
            }
            match trimmed.parse::<f64>() {
                Ok(float) if float.is_finite() && !trimmed.is_empty() => Err(not_an_integer()),
                _ => Err(not_a_number()),
            }
        }
        _ => Err(not_a_number()),
    }
}

fn number_to_integer(number: &Number) -> Option<i64> {
    if let Some(integer) = number.as_i64() {
        return Some(integer);
    }
    let float = number.as_f64()?;
    // Integral floats such as 5.0 count as integers; i64 bounds are exact at 2^63.
    if float.fract() == 0.0 && float >= -9_223_372_036_854_775_808.0 && float < 9_223_372_036_854_775_808.0
    {
        Some(float as i64)
    } else {
        None
    }
}

fn is_email(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) || !candidate.validate_email() {
        return false;
    }
    let Some((_, domain)) = candidate.rsplit_once('@') else {
        return false;
    };
    domain
        .split_once('.')
        .is_some_and(|(head, tail)| !head.is_empty() && !tail.is_empty() && !tail.ends_with('.'))
}
