//! PostgreSQL employee repository.

use async_trait::async_trait;
use sqlx::PgPool;

use noticeboard_core::error::{AppError, ErrorKind};
use noticeboard_core::result::AppResult;
use noticeboard_core::types::EmployeeId;

use crate::store::EmployeeDirectory;

/// Employee lookups against the `employees` table.
#[derive(Debug, Clone)]
pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    /// Create a new employee repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

}

#[async_trait]
impl EmployeeDirectory for PgEmployeeRepository {
    async fn exists(&self, employee_id: &EmployeeId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE employee_id = $1)",
        )
        .bind(employee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check employee existence", e)
        })
    }
}
