//! PostgreSQL implementations of the store interfaces.

pub mod employee;
pub mod notification;

pub use employee::PgEmployeeRepository;
pub use notification::PgNotificationRepository;
