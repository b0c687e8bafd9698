//! Who a notification is addressed to.

use serde::{Deserialize, Serialize};

use noticeboard_core::types::EmployeeId;

/// Recipient of a notification: one employee, or everyone.
///
/// Stored as the `(is_global, employee_id)` column pair; exactly one of
/// `is_global = true` and `employee_id IS NOT NULL` holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "employee_id", rename_all = "snake_case")]
pub enum Audience {
    /// Addressed to a single employee.
    Employee(EmployeeId),
    /// Addressed to all employees.
    Global,
}

impl Audience {
    /// Value of the `is_global` column.
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }

    /// Value of the `employee_id` column.
    pub fn employee_id(&self) -> Option<&EmployeeId> {
        match self {
            Self::Employee(id) => Some(id),
            Self::Global => None,
        }
    }
}
