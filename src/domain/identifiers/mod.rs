pub mod validation;

pub use validation::{contains_whitespace, is_safe_path_component, is_variable_name};
