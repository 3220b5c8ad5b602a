use serde::{Deserialize, Serialize};

use reporthub_core::{DepartmentId, DomainResult};

use crate::validate;

/// Orthogonal report grouping: a report may be visible only to specific
/// departments, and users belong to departments via the grant store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub code: String,
    pub name: String,
    pub is_active: bool,
}

impl Department {
    /// Create an active department with validated fields.
    pub fn new(
        id: DepartmentId,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            code: validate::entity_code(code)?,
            name: validate::entity_name(name)?,
            is_active: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use reporthub_core::DomainError;

    use super::*;

    #[test]
    fn new_department_is_active() {
        let department = Department::new(DepartmentId::new(), "HR", "Human Resources").unwrap();
        assert!(department.is_active);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Department::new(DepartmentId::new(), "HR", " ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
