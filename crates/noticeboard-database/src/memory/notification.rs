//! In-memory notification store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use noticeboard_core::error::AppError;
use noticeboard_core::result::AppResult;
use noticeboard_core::types::NotificationId;
use noticeboard_entity::notification::{NewNotification, Notification, NotificationWithEmployee};

use super::employee::MemoryEmployeeDirectory;
use crate::store::{NotificationFilter, NotificationStore};

/// Notification store held in a shared vector.
///
/// Joins resolve employees through the [`MemoryEmployeeDirectory`] given at
/// construction. Clones share state.
#[derive(Debug, Clone)]
pub struct MemoryNotificationStore {
    notifications: Arc<RwLock<Vec<Notification>>>,
    directory: MemoryEmployeeDirectory,
    unavailable: Arc<AtomicBool>,
    queries: Arc<AtomicUsize>,
}

impl MemoryNotificationStore {
    /// Create an empty store joined against `directory`.
    pub fn new(directory: MemoryEmployeeDirectory) -> Self {
        Self {
            notifications: Arc::new(RwLock::new(Vec::new())),
            directory,
            unavailable: Arc::new(AtomicBool::new(false)),
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make every subsequent operation fail with a database error until
    /// switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of read queries served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Number of stored notifications.
    pub async fn len(&self) -> usize {
        self.notifications.read().await.len()
    }

    /// Whether the store holds no notifications.
    pub async fn is_empty(&self) -> bool {
        self.notifications.read().await.is_empty()
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::database("Notification store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn create(&self, notification: NewNotification) -> AppResult<Notification> {
        self.check_available()?;
        let stored = Notification::from_new(NotificationId::new(), notification, Utc::now());
        self.notifications.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_all(&self, filter: &NotificationFilter) -> AppResult<Vec<Notification>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let mut found: Vec<Notification> = self
            .notifications
            .read()
            .await
            .iter()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect();
        found.sort_by_key(|n| n.timestamp);
        Ok(found)
    }

    async fn find_all_with_employee(&self) -> AppResult<Vec<NotificationWithEmployee>> {
        let notifications = self.find_all(&NotificationFilter::all()).await?;
        let mut joined = Vec::with_capacity(notifications.len());
        for notification in notifications {
            let employee = match &notification.employee_id {
                Some(id) => self.directory.get(id).await.map(|e| e.summary()),
                None => None,
            };
            joined.push(NotificationWithEmployee {
                notification,
                employee,
            });
        }
        Ok(joined)
    }
}
