use super::hash::ContentHash;

/// Extension of every stored artifact.
pub const ARTIFACT_EXTENSION: &str = "jpg";

/// Checks if a key contains path traversal patterns.
pub fn contains_path_traversal(key: &str) -> bool {
    key == ".."
        || key.starts_with("../")
        || key.contains("/../")
        || key.ends_with("/..")
}

/// Validates a folder or object key (`clubs/42`, `clubs/42/<hash>.jpg`).
pub fn validate_key(key: &str) -> Result<&str, &'static str> {
    let trimmed = key.trim();

    if trimmed.is_empty() {
        return Err("Key cannot be empty");
    }

    if trimmed.len() > 512 {
        return Err("Key exceeds maximum length of 512 characters");
    }

    if trimmed.contains('\0') {
        return Err("Key must not contain null bytes");
    }

    if trimmed.contains('\\') {
        return Err("Key must not contain backslashes");
    }

    if trimmed.starts_with('/') {
        return Err("Key must not start with '/'");
    }

    if trimmed.ends_with('/') {
        return Err("Key must not end with '/'");
    }

    if contains_path_traversal(trimmed) {
        return Err("Key must not contain '..' traversal");
    }

    for segment in trimmed.split('/') {
        if segment.is_empty() {
            return Err("Key must not contain empty segments");
        }
        if segment.starts_with('.') {
            return Err("Key segments must not start with '.'");
        }
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'))
    {
        return Err("Key contains invalid characters (allowed: a-zA-Z0-9, /, -, _, .)");
    }

    Ok(trimmed)
}

/// Key of the artifact for `hash` inside `folder`.
pub fn artifact_key(folder: &str, hash: &ContentHash) -> String {
    format!("{folder}/{hash}.{ARTIFACT_EXTENSION}")
}

/// Whether `key` names an artifact (as opposed to some other file in the folder).
pub fn is_artifact_key(key: &str) -> bool {
    key.rsplit('/')
        .next()
        .and_then(|name| name.strip_suffix(ARTIFACT_EXTENSION))
        .is_some_and(|stem| stem.len() > 1 && stem.ends_with('.'))
}
