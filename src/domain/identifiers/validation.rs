/// Returns true if the string contains any Unicode whitespace.
pub fn contains_whitespace(value: &str) -> bool {
    value.chars().any(char::is_whitespace)
}

/// Validates a single directory name for safe joining under a root.
///
/// Checks:
/// - Non-empty
/// - No path separators (/, \)
/// - Not "." or ".."
/// - No null bytes
///
/// Leading dots are allowed so reserved names such as `.integrity` pass.
pub fn is_safe_path_component(component: &str) -> bool {
    if component.is_empty() {
        return false;
    }
    if component.contains('/') || component.contains('\\') || component.contains('\0') {
        return false;
    }
    component != "." && component != ".."
}

/// Validates a `${NAME}` placeholder name.
///
/// Names are non-empty and contain neither whitespace nor placeholder delimiters.
pub fn is_variable_name(name: &str) -> bool {
    !name.is_empty() && !contains_whitespace(name) && !name.contains(['$', '{', '}'])
}
