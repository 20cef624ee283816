mod memory_filesystem;

pub use self::memory_filesystem::MemoryFilesystem;
