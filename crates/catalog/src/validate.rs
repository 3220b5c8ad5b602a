//! Shared field validation for catalog entities.

use reporthub_core::{DomainError, DomainResult};

/// Trimmed, non-empty short code.
pub(crate) fn entity_code(raw: impl Into<String>) -> DomainResult<String> {
    let code = raw.into().trim().to_string();
    if code.is_empty() {
        return Err(DomainError::validation("code cannot be empty"));
    }
    Ok(code)
}

/// Trimmed, non-empty display name.
pub(crate) fn entity_name(raw: impl Into<String>) -> DomainResult<String> {
    let name = raw.into().trim().to_string();
    if name.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(name)
}
