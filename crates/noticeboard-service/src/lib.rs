//! # noticeboard-service
//!
//! Business logic for Noticeboard. [`NotificationService`] validates
//! requests, delegates reads and writes to the store interfaces from
//! `noticeboard-database`, and hands freshly created global notifications
//! to a [`GlobalPublisher`].
//!
//! Dependencies are injected at construction time as `Arc<dyn Trait>`.

pub mod notification;

pub use notification::{
    CreateGlobal, CreateTargeted, GlobalPublisher, NotificationService, PublishOutcome,
};
