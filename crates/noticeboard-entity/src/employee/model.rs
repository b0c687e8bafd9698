//! Employee entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use noticeboard_core::types::EmployeeId;

/// An employee as recorded by the HR system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    /// HR-issued identifier.
    pub employee_id: EmployeeId,
    /// Given name.
    pub name: String,
    /// Paternal surname.
    pub last_name_paternal: String,
    /// Maternal surname.
    pub last_name_maternal: Option<String>,
}

impl Employee {
    /// Display fields only.
    pub fn summary(&self) -> EmployeeSummary {
        EmployeeSummary {
            name: self.name.clone(),
            last_name_paternal: self.last_name_paternal.clone(),
            last_name_maternal: self.last_name_maternal.clone(),
        }
    }
}

/// The display subset of [`Employee`] attached to joined notification listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Given name.
    pub name: String,
    /// Paternal surname.
    pub last_name_paternal: String,
    /// Maternal surname.
    pub last_name_maternal: Option<String>,
}
