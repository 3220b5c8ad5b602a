use serde::{Deserialize, Serialize};

use reporthub_core::{DomainResult, HubId, ReportGroupId};

use crate::validate;

/// A group of reports owned by a hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportGroup {
    pub id: ReportGroupId,
    pub hub_id: HubId,
    pub code: String,
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
}

impl ReportGroup {
    /// Create an active report group with validated fields.
    pub fn new(
        id: ReportGroupId,
        hub_id: HubId,
        code: impl Into<String>,
        name: impl Into<String>,
        sort_order: i32,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            hub_id,
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
    fn new_group_belongs_to_its_hub() {
        let hub_id = HubId::new();
        let group = ReportGroup::new(ReportGroupId::new(), hub_id, "OPS", "Operations", 2).unwrap();
        assert_eq!(group.hub_id, hub_id);
        assert!(group.is_active);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = ReportGroup::new(ReportGroupId::new(), HubId::new(), "OPS", "  ", 2).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
