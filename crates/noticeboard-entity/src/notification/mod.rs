//! Notification domain entities.

pub mod audience;
pub mod model;

pub use audience::Audience;
pub use model::{NewNotification, Notification, NotificationWithEmployee};
