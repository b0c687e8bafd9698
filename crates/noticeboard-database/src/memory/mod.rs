//! In-process store implementations.
//!
//! Used when `database.provider = "memory"` and throughout the test suites.
//! Contents are lost when the process exits.

pub mod employee;
pub mod notification;

pub use employee::MemoryEmployeeDirectory;
pub use notification::MemoryNotificationStore;
