//! POSIX permission modes and the per-class permission policy.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::domain::config_value::ConfigValue;
use crate::domain::error::{ValidationError, ValidationErrorKind};

const MAX_MODE: u32 = 0o777;

/// A permission triple in `[0, 0o777]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode(u32);

impl Mode {
    pub const DEFAULT_DIRECTORY: Mode = Mode(0o755);
    pub const DEFAULT_FILE: Mode = Mode(0o644);
    pub const INTEGRITY_DIRECTORY: Mode = Mode(0o700);
    pub const INTEGRITY_FILE: Mode = Mode(0o600);

    pub fn new(bits: u32) -> Option<Self> {
        (bits <= MAX_MODE).then_some(Self(bits))
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Read a mode from a config scalar.
    ///
    /// Strings are octal notation (`"0755"`, `"755"`, `"0o755"`). Integers are
    /// read the same way from their decimal digits, so an unquoted `500` means
    /// `0o500`; an `8` or `9` digit is rejected.
    pub fn from_config(value: &ConfigValue, field: &str) -> Result<Self, ValidationError> {
        match value {
            ConfigValue::String(text) => Self::parse_octal(text, field),
            ConfigValue::Integer(int) => {
                if *int < 0 {
                    return Err(out_of_range(field, &int.to_string()));
                }
                Self::parse_octal(&int.to_string(), field)
            }
            other => Err(ValidationError::wrong_type(field, "octal permission mode", other.type_name())),
        }
    }

    fn parse_octal(text: &str, field: &str) -> Result<Self, ValidationError> {
        let digits = text.trim();
        let digits = digits.strip_prefix("0o").unwrap_or(digits);
        if digits.is_empty() || !digits.chars().all(|c| ('0'..='7').contains(&c)) {
            return Err(ValidationError::invalid(
                field,
                format!("'{}' is not an octal permission mode", text),
            ));
        }
        let bits = u32::from_str_radix(digits, 8).map_err(|_| out_of_range(field, text))?;
        Self::new(bits).ok_or_else(|| out_of_range(field, text))
    }
}

fn out_of_range(field: &str, text: &str) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::OutOfRange,
        field,
        format!("permission mode {} is outside 0000..0777", text),
    )
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Which half of the permission policy a path falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionClass {
    Default,
    Integrity,
}

/// The four modes a world applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    pub default_directory: Mode,
    pub default_file: Mode,
    pub integrity_directory: Mode,
    pub integrity_file: Mode,
}

impl PermissionSet {
    pub fn directory_mode(&self, class: PermissionClass) -> Mode {
        match class {
            PermissionClass::Default => self.default_directory,
            PermissionClass::Integrity => self.integrity_directory,
        }
    }

    pub fn file_mode(&self, class: PermissionClass) -> Mode {
        match class {
            PermissionClass::Default => self.default_file,
            PermissionClass::Integrity => self.integrity_file,
        }
    }
}

impl Default for PermissionSet {
    fn default() -> Self {
        Self {
            default_directory: Mode::DEFAULT_DIRECTORY,
            default_file: Mode::DEFAULT_FILE,
            integrity_directory: Mode::INTEGRITY_DIRECTORY,
            integrity_file: Mode::INTEGRITY_FILE,
        }
    }
}
