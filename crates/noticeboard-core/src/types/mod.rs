//! Core type definitions used across the Noticeboard workspace.

pub mod id;
pub mod window;

pub use id::{EmployeeId, NotificationId};
pub use window::DayWindow;
