pub mod domain;
pub mod ports;

#[allow(unused_imports)]
pub use domain::{EXPECTED_VERSION, MINIMAL_WORLD, minimal_world, world_with_structure, world_yaml};
#[allow(unused_imports)]
pub use ports::MemoryFilesystem;
