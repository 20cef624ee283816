//! Generic parsed-config value tree.
//!
//! The schema validator consumes this tree instead of `serde_yaml::Value`
//! so that key order is explicit and the YAML library stays at the edge.

use serde_yaml::Value;

use crate::domain::AppError;

/// A loosely-typed configuration value: mapping, sequence, or scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<ConfigValue>),
    /// Key/value pairs in source order.
    Mapping(Vec<(String, ConfigValue)>),
}

impl ConfigValue {
    /// Parse YAML text into a value tree.
    pub fn from_yaml_str(content: &str) -> Result<Self, AppError> {
        let value: Value = serde_yaml::from_str(content).map_err(|err| AppError::ParseError {
            what: "world config YAML".into(),
            details: err.to_string(),
        })?;
        Self::try_from(value)
    }

    /// Human-readable type name used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Sequence(_) => "sequence",
            ConfigValue::Mapping(_) => "mapping",
        }
    }

    /// Look up a key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        match self {
            ConfigValue::Mapping(entries) => {
                entries.iter().find(|(name, _)| name == key).map(|(_, value)| value)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, ConfigValue::Mapping(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }
}

impl TryFrom<Value> for ConfigValue {
    type Error = AppError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(flag) => ConfigValue::Bool(flag),
            Value::Number(number) => match number.as_i64() {
                Some(int) => ConfigValue::Integer(int),
                None => ConfigValue::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(text) => ConfigValue::String(text),
            Value::Sequence(items) => ConfigValue::Sequence(
                items.into_iter().map(ConfigValue::try_from).collect::<Result<_, _>>()?,
            ),
            Value::Mapping(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (key, value) in map {
                    entries.push((mapping_key(key)?, ConfigValue::try_from(value)?));
                }
                ConfigValue::Mapping(entries)
            }
            Value::Tagged(tagged) => ConfigValue::try_from(tagged.value)?,
        })
    }
}

fn mapping_key(key: Value) -> Result<String, AppError> {
    match key {
        Value::String(text) => Ok(text),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(AppError::ParseError {
            what: "world config YAML".into(),
            details: format!("unsupported mapping key: {:?}", other),
        }),
    }
}
