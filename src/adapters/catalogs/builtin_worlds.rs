//! Embedded catalog of built-in world templates.

use include_dir::{Dir, include_dir};

use crate::ports::{WorldDocument, WorldOrigin};

static BUILTIN_WORLDS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/assets/worlds");

/// All built-in worlds, sorted by name.
pub fn builtin_worlds() -> Vec<WorldDocument> {
    let mut worlds: Vec<WorldDocument> = BUILTIN_WORLDS_DIR
        .files()
        .filter_map(|file| {
            let name = world_name(file.path().file_name()?.to_str()?)?;
            let content = file.contents_utf8()?;
            Some(WorldDocument { name, origin: WorldOrigin::BuiltIn, content: content.to_string() })
        })
        .collect();
    worlds.sort_by(|a, b| a.name.cmp(&b.name));
    worlds
}

/// Lookup a built-in world by name.
pub fn builtin_world(name: &str) -> Option<WorldDocument> {
    builtin_worlds().into_iter().find(|world| world.name == name)
}

/// `project.yaml` → `project`; non-YAML files are ignored.
pub fn world_name(file_name: &str) -> Option<String> {
    file_name
        .strip_suffix(".yaml")
        .or_else(|| file_name.strip_suffix(".yml"))
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}
