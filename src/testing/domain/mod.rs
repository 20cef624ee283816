mod world_fixtures;

pub use self::world_fixtures::{
    EXPECTED_VERSION, MINIMAL_WORLD, minimal_world, world_with_structure, world_yaml,
};
