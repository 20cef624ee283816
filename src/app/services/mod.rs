//! Application services.

pub mod transaction;

pub use transaction::{CancelFlag, ExecutorOptions, execute};
