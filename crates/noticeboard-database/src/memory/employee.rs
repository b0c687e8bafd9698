//! In-memory employee directory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use noticeboard_core::result::AppResult;
use noticeboard_core::types::EmployeeId;
use noticeboard_entity::employee::Employee;

use crate::store::EmployeeDirectory;

/// Employee directory held in a shared map. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryEmployeeDirectory {
    employees: Arc<RwLock<HashMap<EmployeeId, Employee>>>,
}

impl MemoryEmployeeDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory seeded with `employees`.
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let map = employees
            .into_iter()
            .map(|e| (e.employee_id.clone(), e))
            .collect();
        Self {
            employees: Arc::new(RwLock::new(map)),
        }
    }

    /// Add or replace an employee.
    pub async fn insert(&self, employee: Employee) {
        self.employees
            .write()
            .await
            .insert(employee.employee_id.clone(), employee);
    }

    /// Look up an employee.
    pub async fn get(&self, employee_id: &EmployeeId) -> Option<Employee> {
        self.employees.read().await.get(employee_id).cloned()
    }
}

#[async_trait]
impl EmployeeDirectory for MemoryEmployeeDirectory {
    async fn exists(&self, employee_id: &EmployeeId) -> AppResult<bool> {
        Ok(self.employees.read().await.contains_key(employee_id))
    }
}
