use std::fmt;
use std::io;

use serde::Serialize;
use thiserror::Error;

/// Library-wide error type for worldgen operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// The world config failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The validated world could not be turned into a plan.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// No world config matched the requested name or path.
    #[error("World '{0}' not found (not a file, catalog entry, or built-in template)")]
    WorldNotFound(String),

    /// A path argument could not be used.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Exit code a CLI wrapper should report for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation(_) => exit_codes::VALIDATION,
            AppError::Plan(_) => exit_codes::PLAN,
            AppError::Io(_)
            | AppError::Configuration(_)
            | AppError::WorldNotFound(_)
            | AppError::InvalidPath(_)
            | AppError::ParseError { .. }
            | AppError::TomlParseError(_) => exit_codes::GENERAL,
        }
    }
}

/// Process exit codes exposed by the CLI.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const VALIDATION: i32 = 2;
    pub const PLAN: i32 = 3;
    pub const EXECUTION: i32 = 4;
    pub const PARTIALLY_FAILED: i32 = 5;
}

/// Category of a schema violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    Missing,
    WrongType,
    InvalidValue,
    UnknownReference,
    Duplicate,
    OutOfRange,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValidationErrorKind::Missing => "missing field",
            ValidationErrorKind::WrongType => "wrong type",
            ValidationErrorKind::InvalidValue => "invalid value",
            ValidationErrorKind::UnknownReference => "unknown reference",
            ValidationErrorKind::Duplicate => "duplicate",
            ValidationErrorKind::OutOfRange => "out of range",
        };
        f.write_str(label)
    }
}

/// First schema violation found in a world config.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Invalid world config at '{field}' ({kind}): {message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Dotted field path, e.g. `parentDirectories[1].name`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind, field: field.into(), message: message.into() }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("{} is required", field);
        Self::new(ValidationErrorKind::Missing, field, message)
    }

    pub fn wrong_type(field: impl Into<String>, expected: &str, found: &str) -> Self {
        Self::new(
            ValidationErrorKind::WrongType,
            field,
            format!("expected {}, found {}", expected, found),
        )
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::InvalidValue, field, message)
    }
}

/// Category of a planning failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanErrorKind {
    TooDeep,
    InvalidName,
    DuplicatePath,
    RelativeRoot,
}

impl fmt::Display for PlanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlanErrorKind::TooDeep => "too deep",
            PlanErrorKind::InvalidName => "invalid name",
            PlanErrorKind::DuplicatePath => "duplicate path",
            PlanErrorKind::RelativeRoot => "relative root",
        };
        f.write_str(label)
    }
}

/// Structural problem detected while deriving a plan.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Cannot plan scaffold at '{path}' ({kind}): {message}")]
pub struct PlanError {
    pub kind: PlanErrorKind,
    pub path: String,
    pub message: String,
}

impl PlanError {
    pub fn new(kind: PlanErrorKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind, path: path.into(), message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_field_and_kind() {
        let err = ValidationError::missing("metadata.version");
        assert_eq!(err.kind, ValidationErrorKind::Missing);
        assert_eq!(
            err.to_string(),
            "Invalid world config at 'metadata.version' (missing field): metadata.version is required"
        );
    }

    #[test]
    fn exit_codes_distinguish_pre_io_failures() {
        let validation = AppError::from(ValidationError::invalid("worldType", "bad"));
        let plan = AppError::from(PlanError::new(PlanErrorKind::TooDeep, "/ws/a", "too deep"));
        let other = AppError::config_error("broken");

        assert_eq!(validation.exit_code(), exit_codes::VALIDATION);
        assert_eq!(plan.exit_code(), exit_codes::PLAN);
        assert_eq!(other.exit_code(), exit_codes::GENERAL);
    }
}
