//! # noticeboard-database
//!
//! Persistence for Noticeboard: the [`NotificationStore`] and
//! [`EmployeeDirectory`] interfaces the service layer consumes, PostgreSQL
//! implementations backed by sqlx, and in-memory implementations for
//! single-node runs and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::{MemoryEmployeeDirectory, MemoryNotificationStore};
pub use repositories::{PgEmployeeRepository, PgNotificationRepository};
pub use store::{EmployeeDirectory, NotificationFilter, NotificationStore};
