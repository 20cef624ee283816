//! Engine configuration loading.
//!
//! Pure parsing lives in `domain::config`; this module finds the file and
//! resolves paths inside it.

mod load_config;

pub use load_config::{LoadedConfig, load_config};
