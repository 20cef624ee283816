//! World config fixtures shared by unit tests.

use crate::domain::world::{WorldConfig, validate};
use crate::domain::{ConfigValue, SCHEMA_VERSION};

pub const EXPECTED_VERSION: &str = SCHEMA_VERSION;

/// Smallest valid world: one integrity parent, one plain parent, no structure.
pub const MINIMAL_WORLD: &str = r#"worldType: RESEARCH_WORLD
description: "Minimal research world"
metadata:
  version: "1.0.22"
  constitutionVersion: "1.0.22"
  created: "${DATE}"
  author: "${USER}"
  creationTemplate: world.yaml.template
  integrityRequired: true
config:
  creationMethod: template
  scaffoldType: world
  atomicTransactions: true
  rollbackOnFailure: true
parentDirectories:
  - name: "00_admin"
    description: "Administrative records"
    integrity: true
  - name: "01_data"
    description: "Working data"
    integrity: false
permissions:
  defaultDirectory: "0755"
  defaultFile: "0644"
  integrityDirectory: "0700"
  integrityFile: "0600"
"#;

/// `MINIMAL_WORLD` with `extra` top-level YAML inserted before `permissions`.
pub fn world_yaml(extra: &str) -> String {
    let extra = extra.trim_start_matches('\n');
    MINIMAL_WORLD.replacen("permissions:\n", &format!("{}permissions:\n", extra), 1)
}

fn parse(yaml: &str) -> WorldConfig {
    let raw = ConfigValue::from_yaml_str(yaml).unwrap();
    validate(&raw, EXPECTED_VERSION).unwrap()
}

pub fn minimal_world() -> WorldConfig {
    parse(MINIMAL_WORLD)
}

/// Minimal world with `01_data/raw/2025` and `01_data/processed`.
pub fn world_with_structure() -> WorldConfig {
    parse(&world_yaml(
        r#"
subdirectories:
  - parent: "01_data"
    structure:
      - name: raw
        type: folder
        children:
          - name: "2025"
            type: folder
      - name: processed
        type: folder
"#,
    ))
}
