//! Schema validation: `ConfigValue` → `WorldConfig`.
//!
//! Fields are visited in a fixed order (world, metadata, config,
//! parentDirectories, subdirectories, permissions) and the first violation
//! is returned, so the same invalid input always reports the same error.

use std::collections::HashSet;

use super::model::{
    CREATION_METHOD, CREATION_TEMPLATE, CreationConfig, FOLDER_NODE_TYPE, NodeType, ParentDir,
    ProjectScope, ScaffoldType, StructureNode, SubdirGroup, WorldConfig, WorldMetadata,
};
use super::permissions::{Mode, PermissionSet};
use crate::domain::config_value::ConfigValue;
use crate::domain::error::{ValidationError, ValidationErrorKind};
use crate::domain::identifiers::contains_whitespace;

/// Validate a parsed config against the world schema.
///
/// `expected_version` is the schema version both `metadata.version` and
/// `metadata.constitutionVersion` must equal.
pub fn validate(raw: &ConfigValue, expected_version: &str) -> Result<WorldConfig, ValidationError> {
    let root = Fields::root(raw)?;

    let world_type = root.non_empty_string("worldType")?;
    if contains_whitespace(&world_type) {
        return Err(ValidationError::invalid("worldType", "worldType must not contain whitespace"));
    }
    let description = root.non_empty_string("description")?;

    let metadata = validate_metadata(&root.nested("metadata")?, expected_version)?;
    let config = validate_creation_config(&root.nested("config")?)?;
    let parent_directories = validate_parents(&root)?;

    if metadata.integrity_required && !parent_directories.iter().any(|parent| parent.integrity) {
        tracing::warn!(world_type = %world_type, "integrityRequired is set but no parent directory sets integrity");
    }

    let subdirectories = validate_subdirectories(&root, &parent_directories)?;
    let permissions = validate_permissions(&root.nested("permissions")?)?;

    Ok(WorldConfig {
        world_type,
        description,
        metadata,
        config,
        parent_directories,
        subdirectories,
        permissions,
    })
}

fn validate_metadata(
    fields: &Fields<'_>,
    expected_version: &str,
) -> Result<WorldMetadata, ValidationError> {
    let version = fields.non_empty_string("version")?;
    check_version(fields, "version", &version, expected_version)?;
    let constitution_version = fields.non_empty_string("constitutionVersion")?;
    check_version(fields, "constitutionVersion", &constitution_version, expected_version)?;

    let created = fields.optional_string("created")?;
    let author = fields.optional_string("author")?;
    let default_owner = fields.optional_string("defaultOwner")?;

    let creation_template = fields.non_empty_string("creationTemplate")?;
    if creation_template != CREATION_TEMPLATE {
        return Err(ValidationError::invalid(
            fields.path("creationTemplate"),
            format!("must be '{}', found '{}'", CREATION_TEMPLATE, creation_template),
        ));
    }
    let integrity_required = fields.required_bool("integrityRequired")?;

    Ok(WorldMetadata {
        version,
        constitution_version,
        created,
        author,
        default_owner,
        creation_template,
        integrity_required,
    })
}

fn check_version(
    fields: &Fields<'_>,
    key: &str,
    actual: &str,
    expected: &str,
) -> Result<(), ValidationError> {
    if actual == expected {
        return Ok(());
    }
    Err(ValidationError::invalid(
        fields.path(key),
        format!("unsupported schema version '{}' (expected '{}')", actual, expected),
    ))
}

fn validate_creation_config(fields: &Fields<'_>) -> Result<CreationConfig, ValidationError> {
    let creation_method = fields.non_empty_string("creationMethod")?;
    if creation_method != CREATION_METHOD {
        return Err(ValidationError::invalid(
            fields.path("creationMethod"),
            format!("must be '{}', found '{}'", CREATION_METHOD, creation_method),
        ));
    }

    let scaffold_type = fields.non_empty_string("scaffoldType")?;
    let scaffold_type = ScaffoldType::parse(&scaffold_type).ok_or_else(|| {
        ValidationError::invalid(
            fields.path("scaffoldType"),
            format!("'{}' is not one of world, project, study", scaffold_type),
        )
    })?;

    let atomic_transactions = fields.optional_bool("atomicTransactions", true)?;
    let rollback_on_failure = fields.optional_bool("rollbackOnFailure", true)?;

    Ok(CreationConfig { creation_method, scaffold_type, atomic_transactions, rollback_on_failure })
}

fn validate_parents(root: &Fields<'_>) -> Result<Vec<ParentDir>, ValidationError> {
    let entries = root.required_sequence("parentDirectories")?;
    if entries.is_empty() {
        return Err(ValidationError::invalid(
            "parentDirectories",
            "at least one parent directory is required",
        ));
    }

    let mut seen = HashSet::new();
    let mut parents = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let fields = Fields::at(entry, format!("parentDirectories[{}]", index))?;

        let name = fields.non_empty_string("name")?;
        if contains_whitespace(&name) {
            return Err(ValidationError::invalid(
                fields.path("name"),
                format!("parent name '{}' must not contain whitespace", name),
            ));
        }
        if !seen.insert(name.clone()) {
            return Err(ValidationError::new(
                ValidationErrorKind::Duplicate,
                fields.path("name"),
                format!("parent directory '{}' is declared more than once", name),
            ));
        }

        let description = fields.optional_string("description")?.unwrap_or_default();
        let integrity = fields.optional_bool("integrity", false)?;
        let project_scope = match fields.optional_string("projectScope")? {
            None => ProjectScope::default(),
            Some(scope) => ProjectScope::parse(&scope).ok_or_else(|| {
                ValidationError::invalid(
                    fields.path("projectScope"),
                    format!("'{}' is not one of world, project", scope),
                )
            })?,
        };

        parents.push(ParentDir { name, description, integrity, project_scope });
    }
    Ok(parents)
}

fn validate_subdirectories(
    root: &Fields<'_>,
    parents: &[ParentDir],
) -> Result<Vec<SubdirGroup>, ValidationError> {
    let Some(entries) = root.optional_sequence("subdirectories")? else {
        return Ok(Vec::new());
    };

    let mut groups = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let fields = Fields::at(entry, format!("subdirectories[{}]", index))?;

        let parent = fields.non_empty_string("parent")?;
        if !parents.iter().any(|candidate| candidate.name == parent) {
            return Err(ValidationError::new(
                ValidationErrorKind::UnknownReference,
                fields.path("parent"),
                format!("parent '{}' does not name any entry in parentDirectories", parent),
            ));
        }
        let description = fields.optional_string("description")?;
        let structure = validate_nodes(fields.required_sequence("structure")?, &fields.path("structure"))?;

        groups.push(SubdirGroup { parent, description, structure });
    }
    Ok(groups)
}

fn validate_nodes(entries: &[ConfigValue], path: &str) -> Result<Vec<StructureNode>, ValidationError> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let fields = Fields::at(entry, format!("{}[{}]", path, index))?;

        let name = fields.non_empty_string("name")?;
        if !seen.insert(name.clone()) {
            return Err(ValidationError::new(
                ValidationErrorKind::Duplicate,
                fields.path("name"),
                format!("sibling folder '{}' is declared more than once", name),
            ));
        }

        let node_type = fields.non_empty_string("type")?;
        if node_type != FOLDER_NODE_TYPE {
            return Err(ValidationError::invalid(
                fields.path("type"),
                format!("unsupported node type '{}' (only '{}')", node_type, FOLDER_NODE_TYPE),
            ));
        }

        let description = fields.optional_string("description")?.unwrap_or_default();
        let children = match fields.optional_sequence("children")? {
            Some(children) => validate_nodes(children, &fields.path("children"))?,
            None => Vec::new(),
        };

        nodes.push(StructureNode { name, node_type: NodeType::Folder, description, children });
    }
    Ok(nodes)
}

fn validate_permissions(fields: &Fields<'_>) -> Result<PermissionSet, ValidationError> {
    Ok(PermissionSet {
        default_directory: fields.mode("defaultDirectory")?,
        default_file: fields.mode("defaultFile")?,
        integrity_directory: fields.mode("integrityDirectory")?,
        integrity_file: fields.mode("integrityFile")?,
    })
}

/// A mapping node plus the dotted path it was reached by.
struct Fields<'a> {
    value: &'a ConfigValue,
    prefix: String,
}

impl<'a> Fields<'a> {
    fn root(value: &'a ConfigValue) -> Result<Self, ValidationError> {
        if !value.is_mapping() {
            return Err(ValidationError::wrong_type("<root>", "mapping", value.type_name()));
        }
        Ok(Self { value, prefix: String::new() })
    }

    fn at(value: &'a ConfigValue, prefix: String) -> Result<Self, ValidationError> {
        if !value.is_mapping() {
            return Err(ValidationError::wrong_type(prefix, "mapping", value.type_name()));
        }
        Ok(Self { value, prefix })
    }

    fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() { key.to_string() } else { format!("{}.{}", self.prefix, key) }
    }

    /// Present and not null.
    fn lookup(&self, key: &str) -> Option<&'a ConfigValue> {
        self.value.get(key).filter(|value| !value.is_null())
    }

    fn required(&self, key: &str) -> Result<&'a ConfigValue, ValidationError> {
        self.lookup(key).ok_or_else(|| ValidationError::missing(self.path(key)))
    }

    fn nested(&self, key: &str) -> Result<Fields<'a>, ValidationError> {
        Fields::at(self.required(key)?, self.path(key))
    }

    fn non_empty_string(&self, key: &str) -> Result<String, ValidationError> {
        let value = self.required(key)?;
        let text = value
            .as_str()
            .ok_or_else(|| ValidationError::wrong_type(self.path(key), "string", value.type_name()))?;
        if text.trim().is_empty() {
            return Err(ValidationError::invalid(self.path(key), format!("{} must not be empty", key)));
        }
        Ok(text.to_string())
    }

    fn optional_string(&self, key: &str) -> Result<Option<String>, ValidationError> {
        match self.lookup(key) {
            None => Ok(None),
            Some(ConfigValue::String(text)) => Ok(Some(text.clone())),
            Some(other) => Err(ValidationError::wrong_type(self.path(key), "string", other.type_name())),
        }
    }

    fn required_bool(&self, key: &str) -> Result<bool, ValidationError> {
        let value = self.required(key)?;
        value
            .as_bool()
            .ok_or_else(|| ValidationError::wrong_type(self.path(key), "boolean", value.type_name()))
    }

    fn optional_bool(&self, key: &str, default: bool) -> Result<bool, ValidationError> {
        match self.lookup(key) {
            None => Ok(default),
            Some(value) => value.as_bool().ok_or_else(|| {
                ValidationError::wrong_type(self.path(key), "boolean", value.type_name())
            }),
        }
    }

    fn required_sequence(&self, key: &str) -> Result<&'a [ConfigValue], ValidationError> {
        let value = self.required(key)?;
        value
            .as_sequence()
            .ok_or_else(|| ValidationError::wrong_type(self.path(key), "sequence", value.type_name()))
    }

    fn optional_sequence(&self, key: &str) -> Result<Option<&'a [ConfigValue]>, ValidationError> {
        match self.lookup(key) {
            None => Ok(None),
            Some(value) => value.as_sequence().map(Some).ok_or_else(|| {
                ValidationError::wrong_type(self.path(key), "sequence", value.type_name())
            }),
        }
    }

    fn mode(&self, key: &str) -> Result<Mode, ValidationError> {
        Mode::from_config(self.required(key)?, &self.path(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EXPECTED_VERSION, MINIMAL_WORLD, world_yaml};

    fn run(yaml: &str) -> Result<WorldConfig, ValidationError> {
        let raw = ConfigValue::from_yaml_str(yaml).unwrap();
        validate(&raw, EXPECTED_VERSION)
    }

    #[test]
    fn minimal_world_validates() {
        let world = run(MINIMAL_WORLD).unwrap();

        assert_eq!(world.world_type, "RESEARCH_WORLD");
        assert_eq!(world.metadata.version, EXPECTED_VERSION);
        assert_eq!(world.config.scaffold_type, ScaffoldType::World);
        assert!(world.config.atomic_transactions);
        assert!(world.config.rollback_on_failure);
        let names: Vec<&str> = world.parent_directories.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["00_admin", "01_data"]);
        assert!(world.parent_directories[0].integrity);
        assert!(!world.parent_directories[1].integrity);
        assert!(world.subdirectories.is_empty());
        assert_eq!(world.permissions, PermissionSet::default());
    }

    #[test]
    fn nested_structure_is_projected_in_order() {
        let yaml = world_yaml(
            r#"
subdirectories:
  - parent: "01_data"
    description: "Data layout"
    structure:
      - name: raw
        type: folder
        description: "Raw captures"
        children:
          - name: "2025"
            type: folder
      - name: processed
        type: folder
"#,
        );
        let world = run(&yaml).unwrap();

        let group = &world.subdirectories[0];
        assert_eq!(group.parent, "01_data");
        assert_eq!(group.description.as_deref(), Some("Data layout"));
        assert_eq!(group.structure[0].name, "raw");
        assert_eq!(group.structure[0].children[0].name, "2025");
        assert_eq!(group.structure[1].name, "processed");
        assert!(group.structure[1].children.is_empty());
    }

    #[test]
    fn version_mismatch_names_metadata_version() {
        let yaml = MINIMAL_WORLD.replacen("version: \"1.0.22\"", "version: \"1.0.0\"", 1);
        let err = run(&yaml).unwrap_err();

        assert_eq!(err.field, "metadata.version");
        assert_eq!(err.kind, ValidationErrorKind::InvalidValue);
        assert!(err.message.contains("1.0.0"));
    }

    #[test]
    fn constitution_version_must_match_too() {
        let yaml = MINIMAL_WORLD.replace("constitutionVersion: \"1.0.22\"", "constitutionVersion: \"2.0.0\"");
        let err = run(&yaml).unwrap_err();
        assert_eq!(err.field, "metadata.constitutionVersion");
    }

    #[test]
    fn first_error_follows_fixed_traversal_order() {
        // Both worldType and permissions are broken; worldType is visited first.
        let yaml = MINIMAL_WORLD
            .replace("worldType: RESEARCH_WORLD", "worldType: \"\"")
            .replace("defaultDirectory: \"0755\"", "defaultDirectory: \"0999\"");

        let first = run(&yaml).unwrap_err();
        let second = run(&yaml).unwrap_err();
        assert_eq!(first, second);
        assert_eq!(first.field, "worldType");
    }

    #[test]
    fn missing_metadata_reported_before_config() {
        let yaml = MINIMAL_WORLD.replace("creationMethod: template", "creationMethod: copy");
        let yaml = yaml.replace("  integrityRequired: true\n", "");
        let err = run(&yaml).unwrap_err();

        assert_eq!(err.field, "metadata.integrityRequired");
        assert_eq!(err.kind, ValidationErrorKind::Missing);
    }

    #[test]
    fn literal_constraints() {
        let err = run(&MINIMAL_WORLD.replace("creationMethod: template", "creationMethod: copy"))
            .unwrap_err();
        assert_eq!(err.field, "config.creationMethod");

        let err = run(&MINIMAL_WORLD.replace("world.yaml.template", "other.template")).unwrap_err();
        assert_eq!(err.field, "metadata.creationTemplate");

        let err = run(&MINIMAL_WORLD.replace("scaffoldType: world", "scaffoldType: campaign"))
            .unwrap_err();
        assert_eq!(err.field, "config.scaffoldType");
    }

    #[test]
    fn wrong_type_is_reported() {
        let err = run(&MINIMAL_WORLD.replace("integrityRequired: true", "integrityRequired: \"yes\""))
            .unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::WrongType);
        assert_eq!(err.field, "metadata.integrityRequired");
    }

    #[test]
    fn dangling_parent_reference_is_rejected() {
        let yaml = world_yaml(
            r#"
subdirectories:
  - parent: "02_missing"
    structure:
      - name: inbox
        type: folder
"#,
        );
        let err = run(&yaml).unwrap_err();

        assert_eq!(err.kind, ValidationErrorKind::UnknownReference);
        assert_eq!(err.field, "subdirectories[0].parent");
    }

    #[test]
    fn duplicate_parent_names_are_rejected() {
        let yaml = MINIMAL_WORLD.replace("name: \"01_data\"", "name: \"00_admin\"");
        let err = run(&yaml).unwrap_err();

        assert_eq!(err.kind, ValidationErrorKind::Duplicate);
        assert_eq!(err.field, "parentDirectories[1].name");
    }

    #[test]
    fn duplicate_siblings_are_rejected() {
        let yaml = world_yaml(
            r#"
subdirectories:
  - parent: "01_data"
    structure:
      - name: raw
        type: folder
        children:
          - name: a
            type: folder
          - name: a
            type: folder
"#,
        );
        let err = run(&yaml).unwrap_err();

        assert_eq!(err.kind, ValidationErrorKind::Duplicate);
        assert_eq!(err.field, "subdirectories[0].structure[0].children[1].name");
    }

    #[test]
    fn node_type_must_be_folder() {
        let yaml = world_yaml(
            r#"
subdirectories:
  - parent: "01_data"
    structure:
      - name: readme
        type: file
"#,
        );
        let err = run(&yaml).unwrap_err();
        assert_eq!(err.field, "subdirectories[0].structure[0].type");
    }

    #[test]
    fn empty_parent_list_is_rejected() {
        let yaml = MINIMAL_WORLD
            .split("parentDirectories:")
            .next()
            .map(|head| format!("{}parentDirectories: []\npermissions:\n  defaultDirectory: \"0755\"\n  defaultFile: \"0644\"\n  integrityDirectory: \"0700\"\n  integrityFile: \"0600\"\n", head))
            .unwrap();
        let err = run(&yaml).unwrap_err();
        assert_eq!(err.field, "parentDirectories");
    }

    #[test]
    fn integrity_required_without_integrity_parent_is_accepted() {
        let yaml = MINIMAL_WORLD.replace("integrity: true", "integrity: false");
        let world = run(&yaml).unwrap();
        assert!(world.metadata.integrity_required);
        assert!(world.parent_directories.iter().all(|parent| !parent.integrity));
    }

    #[test]
    fn parent_name_with_whitespace_is_rejected() {
        let yaml = MINIMAL_WORLD.replace("name: \"01_data\"", "name: \"01 data\"");
        let err = run(&yaml).unwrap_err();
        assert_eq!(err.field, "parentDirectories[1].name");
    }

    #[test]
    fn permission_out_of_range() {
        let yaml = MINIMAL_WORLD.replace("integrityFile: \"0600\"", "integrityFile: \"1600\"");
        let err = run(&yaml).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::OutOfRange);
        assert_eq!(err.field, "permissions.integrityFile");
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        let raw = ConfigValue::from_yaml_str("- just\n- a list\n").unwrap();
        let err = validate(&raw, EXPECTED_VERSION).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::WrongType);
    }
}
