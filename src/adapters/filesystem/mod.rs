//! Local filesystem adapter for the scaffold executor.

mod scaffold_filesystem;

pub use scaffold_filesystem::LocalFilesystem;
