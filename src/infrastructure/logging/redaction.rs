//! Masking of secret values for display.

const MASK: &str = "********";

/// Mask `value`, keeping only its length.
///
/// Empty values stay visibly empty so unset fields can be told apart.
pub fn redact(value: &str) -> String {
    if value.is_empty() {
        "<empty>".to_string()
    } else {
        format!("{MASK} ({} chars)", value.chars().count())
    }
}
