pub mod catalogs;
pub mod filesystem;

pub use catalogs::FilesystemWorldCatalog;
pub use filesystem::LocalFilesystem;
