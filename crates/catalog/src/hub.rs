use serde::{Deserialize, Serialize};

use reporthub_core::{DomainResult, HubId};

use crate::validate;

/// Top level of the content hierarchy. Owns zero or more report groups.
///
/// Deactivating a hub does not touch its children; visibility computation
/// checks every ancestor's flag independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hub {
    pub id: HubId,
    pub code: String,
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
}

impl Hub {
    /// Create an active hub with validated fields.
    pub fn new(
        id: HubId,
        code: impl Into<String>,
        name: impl Into<String>,
        sort_order: i32,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            code: validate::entity_code(code)?,
            name: validate::entity_name(name)?,
            sort_order,
            is_active: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use reporthub_core::DomainError;

    use super::*;

    #[test]
    fn new_hub_is_active_and_trimmed() {
        let hub = Hub::new(HubId::new(), " FIN ", " Finance ", 1).unwrap();
        assert!(hub.is_active);
        assert_eq!(hub.code, "FIN");
        assert_eq!(hub.name, "Finance");
    }

    #[test]
    fn blank_code_is_rejected() {
        let err = Hub::new(HubId::new(), "   ", "Finance", 1).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
