//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` [`Error`] whose `details` carry
//! the offending `field`, a machine-readable `code`, and where useful the
//! rejected `value`, map `key`, or list `index`.

use std::str::FromStr;

use actix_web::error::JsonPayloadError;
use serde_json::{Value, json};

use crate::domain::{Error, ExerciseName, MuscleGroup, RepRange, TargetMuscleFactor};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    BlankName,
    InvalidMuscleGroup,
    InvalidTargetMuscleFactor,
    InvalidRepRange,
    InvalidId,
    MalformedBody,
    UnsupportedContentType,
    BodyTooLarge,
    UnreadableBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::BlankName => "blank_name",
            ErrorCode::InvalidMuscleGroup => "invalid_muscle_group",
            ErrorCode::InvalidTargetMuscleFactor => "invalid_target_muscle_factor",
            ErrorCode::InvalidRepRange => "invalid_rep_range",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::MalformedBody => "malformed_body",
            ErrorCode::UnsupportedContentType => "unsupported_content_type",
            ErrorCode::BodyTooLarge => "body_too_large",
            ErrorCode::UnreadableBody => "unreadable_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<Value>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }

    fn with_key(self, code: ErrorCode, key: &str, value: impl Into<Value>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "key": key,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }

    fn with_index(self, code: ErrorCode, index: usize, value: impl Into<Value>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "index": index,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Require a non-blank exercise name.
pub(crate) fn parse_exercise_name(
    value: Option<String>,
    field: FieldName,
) -> Result<ExerciseName, Error> {
    let value = value.ok_or_else(|| missing_field_error(field))?;
    ExerciseName::new(value.as_str()).map_err(|_| {
        let field = field.as_str();
        ValidationError::new(field, format!("{field} must not be blank"))
            .with_value(ErrorCode::BlankName, value)
    })
}

pub(crate) fn parse_muscle_group(key: &str, field: FieldName) -> Result<MuscleGroup, Error> {
    MuscleGroup::from_str(key).map_err(|_| {
        let field = field.as_str();
        ValidationError::new(field, format!("{field} contains an unknown muscle group"))
            .with_key(ErrorCode::InvalidMuscleGroup, key, key)
    })
}

/// Accept a factor by name (`"ONE"`, `"POINT_FIVE"`) or by value (`1`, `0.5`).
pub(crate) fn parse_target_muscle_factor(
    key: &str,
    value: Value,
    field: FieldName,
) -> Result<TargetMuscleFactor, Error> {
    let parsed = match &value {
        Value::String(name) => TargetMuscleFactor::from_str(name).ok(),
        Value::Number(number) => number.as_f64().and_then(TargetMuscleFactor::from_factor),
        _ => None,
    };
    parsed.ok_or_else(|| {
        let field = field.as_str();
        ValidationError::new(
            field,
            format!("{field} factors must be ONE, POINT_FIVE, 1.0 or 0.5"),
        )
        .with_key(ErrorCode::InvalidTargetMuscleFactor, key, value)
    })
}

pub(crate) fn parse_rep_range(
    index: usize,
    value: &str,
    field: FieldName,
) -> Result<RepRange, Error> {
    RepRange::from_str(value).map_err(|_| {
        let field = field.as_str();
        ValidationError::new(field, format!("{field} contains an unknown rep range"))
            .with_index(ErrorCode::InvalidRepRange, index, value)
    })
}

pub(crate) fn invalid_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be an integer"))
        .with_value(ErrorCode::InvalidId, value)
}

/// Classify a JSON extractor failure by what went wrong with the body.
pub(crate) fn json_body_error(err: &JsonPayloadError) -> Error {
    let (code, message) = match err {
        JsonPayloadError::Deserialize(reason) => (
            ErrorCode::MalformedBody,
            format!("request body is not valid JSON: {reason}"),
        ),
        JsonPayloadError::ContentType => (
            ErrorCode::UnsupportedContentType,
            "request body must be sent as application/json".to_owned(),
        ),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => (
            ErrorCode::BodyTooLarge,
            format!("request body is too large: {err}"),
        ),
        _ => (
            ErrorCode::UnreadableBody,
            format!("request body could not be read: {err}"),
        ),
    };
    ValidationError::new("body", message).with_code(code)
}
