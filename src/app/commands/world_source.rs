//! Resolve a `<WORLD>` argument to YAML text.

use std::fs;
use std::path::Path;

use crate::app::AppContext;
use crate::domain::AppError;
use crate::ports::{ScaffoldFilesystem, WorldCatalog, WorldDocument, WorldOrigin};

/// An existing file wins; otherwise the catalog is searched by name.
pub fn load_document<F: ScaffoldFilesystem, C: WorldCatalog>(
    ctx: &AppContext<F, C>,
    reference: &str,
) -> Result<WorldDocument, AppError> {
    let candidate = ctx.absolute(Path::new(reference));
    if candidate.is_file() {
        let content = fs::read_to_string(&candidate)?;
        let name = candidate
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(reference)
            .to_string();
        tracing::debug!(path = %candidate.display(), "loading world from file");
        return Ok(WorldDocument { name, origin: WorldOrigin::File(candidate), content });
    }

    ctx.catalog().get(reference)?.ok_or_else(|| AppError::WorldNotFound(reference.to_string()))
}
