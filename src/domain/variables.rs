//! `${NAME}` placeholder expansion over a validated world.
//!
//! Resolution is pure: the current time and user are explicit inputs.
//! Unknown placeholders are kept verbatim.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::identifiers::is_variable_name;
use crate::domain::world::{ParentDir, StructureNode, SubdirGroup, WorldConfig};

pub const DATE_VARIABLE: &str = "DATE";
pub const USER_VARIABLE: &str = "USER";

/// Timestamp format substituted for `${DATE}`.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Values available for substitution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Variables {
    values: BTreeMap<String, String>,
}

impl Variables {
    /// The built-in `DATE` and `USER` variables.
    pub fn builtin(now: DateTime<Utc>, user: &str) -> Self {
        let mut values = BTreeMap::new();
        values.insert(DATE_VARIABLE.to_string(), now.format(DATE_FORMAT).to_string());
        values.insert(USER_VARIABLE.to_string(), user.to_string());
        Self { values }
    }

    /// Add extra variables. Names already defined keep their current value.
    pub fn with_extra(mut self, extra: &BTreeMap<String, String>) -> Self {
        for (name, value) in extra {
            self.values.entry(name.clone()).or_insert_with(|| value.clone());
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Expand every known `${NAME}` token in `text` in a single pass.
    pub fn expand(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                out.push_str(&rest[start..]);
                return out;
            };

            let name = &after[..end];
            if !is_variable_name(name) {
                // Not a token; keep the opener and rescan from just after it.
                out.push_str("${");
                rest = after;
                continue;
            }

            match self.values.get(name) {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[start..start + 2 + end + 1]),
            }
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        out
    }
}

/// Resolve `${DATE}` and `${USER}` throughout a world.
pub fn resolve(world: WorldConfig, now: DateTime<Utc>, user: &str) -> WorldConfig {
    resolve_with(world, &Variables::builtin(now, user))
}

/// Resolve every string field of a world against `variables`.
pub fn resolve_with(world: WorldConfig, variables: &Variables) -> WorldConfig {
    let expand = |text: String| variables.expand(&text);
    let expand_opt = |text: Option<String>| text.map(|value| variables.expand(&value));

    let WorldConfig {
        world_type,
        description,
        mut metadata,
        mut config,
        parent_directories,
        subdirectories,
        permissions,
    } = world;

    metadata.version = expand(metadata.version);
    metadata.constitution_version = expand(metadata.constitution_version);
    metadata.created = expand_opt(metadata.created);
    metadata.author = expand_opt(metadata.author);
    metadata.default_owner = expand_opt(metadata.default_owner);
    metadata.creation_template = expand(metadata.creation_template);
    config.creation_method = expand(config.creation_method);

    WorldConfig {
        world_type: expand(world_type),
        description: expand(description),
        metadata,
        config,
        parent_directories: parent_directories
            .into_iter()
            .map(|parent| ParentDir {
                name: expand(parent.name),
                description: expand(parent.description),
                ..parent
            })
            .collect(),
        subdirectories: subdirectories
            .into_iter()
            .map(|group| SubdirGroup {
                parent: expand(group.parent),
                description: expand_opt(group.description),
                structure: resolve_nodes(group.structure, variables),
            })
            .collect(),
        permissions,
    }
}

fn resolve_nodes(nodes: Vec<StructureNode>, variables: &Variables) -> Vec<StructureNode> {
    nodes
        .into_iter()
        .map(|node| StructureNode {
            name: variables.expand(&node.name),
            node_type: node.node_type,
            description: variables.expand(&node.description),
            children: resolve_nodes(node.children, variables),
        })
        .collect()
}
