pub mod builtin_worlds;
pub mod world_catalog_filesystem;

pub use self::world_catalog_filesystem::FilesystemWorldCatalog;
