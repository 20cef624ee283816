//! Command implementations over an `AppContext`.

pub mod create;
pub mod list;
pub mod plan;
pub mod show;
pub mod validate;
mod world_source;

pub use world_source::load_document;
