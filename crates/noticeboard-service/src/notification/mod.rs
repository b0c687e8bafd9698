//! Notification service and the global publish seam.

pub mod publisher;
pub mod service;

pub use publisher::{GlobalPublisher, PublishOutcome};
pub use service::{CreateGlobal, CreateTargeted, NotificationService};
