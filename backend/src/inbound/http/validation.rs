//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain validation errors become `400 invalid_request` envelopes whose
//! `details` name the offending field and a stable machine code.

use serde_json::json;

use crate::domain::{
    CredentialsValidationError, Error, ProjectValidationError, TestCaseValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    EmptyField,
    InvalidUuid,
    UnknownStatus,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::EmptyField => "empty_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::UnknownStatus => "unknown_status",
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

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: FieldName,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field.as_str(),
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field.as_str(),
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn credentials_error(err: CredentialsValidationError) -> Error {
    ValidationError::new(FieldName::new(err.field()), err.to_string())
        .with_code(ErrorCode::EmptyField)
}

pub(crate) fn project_error(err: ProjectValidationError) -> Error {
    match err {
        ProjectValidationError::EmptyName => {
            ValidationError::new(FieldName::new("name"), err.to_string())
                .with_code(ErrorCode::EmptyField)
        }
    }
}

pub(crate) fn test_case_error(err: TestCaseValidationError) -> Error {
    let field = FieldName::new(err.field());
    let message = err.to_string();
    match err {
        TestCaseValidationError::EmptyTitle => {
            ValidationError::new(field, message).with_code(ErrorCode::EmptyField)
        }
        TestCaseValidationError::UnknownStatus { value } => {
            ValidationError::new(field, message).with_value(ErrorCode::UnknownStatus, value)
        }
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}
