//! Print a catalog world's source.

use crate::app::AppContext;
use crate::domain::AppError;
use crate::ports::{ScaffoldFilesystem, WorldCatalog, WorldDocument};

pub fn execute<F: ScaffoldFilesystem, C: WorldCatalog>(
    ctx: &AppContext<F, C>,
    name: &str,
) -> Result<WorldDocument, AppError> {
    ctx.catalog().get(name)?.ok_or_else(|| AppError::WorldNotFound(name.to_string()))
}
