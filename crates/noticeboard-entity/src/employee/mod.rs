//! Employee domain entities (read-only from this system).

pub mod model;

pub use model::{Employee, EmployeeSummary};
