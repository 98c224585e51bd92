//! User-facing notification operations.
//!
//! Every operation is scoped to the requesting user; cross-user reads or
//! mutations are not possible through this service.

use std::sync::Arc;

use uuid::Uuid;

use carelink_core::result::AppResult;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_database::stores::NotificationStore;
use carelink_entity::notification::Notification;

use crate::context::RequestContext;

/// A page of notifications plus the user's total unread count.
///
/// The unread count is always the total for the user, regardless of the
/// `unread_only` filter or the pagination window.
#[derive(Debug, Clone)]
pub struct NotificationList {
    /// The requested page.
    pub page: PageResponse<Notification>,
    /// Total unread notifications for the user.
    pub unread_count: i64,
}

/// Manages a user's own notifications.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// Lists notifications for the current user, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
        unread_only: bool,
    ) -> AppResult<NotificationList> {
        let items = self
            .notifications
            .find_by_user(ctx.user_id, page, unread_only)
            .await?;
        let unread_count = self.notifications.count_unread(ctx.user_id).await?;

        Ok(NotificationList {
            page: items,
            unread_count,
        })
    }

    /// Marks one of the current user's notifications as read.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> AppResult<Notification> {
        self.notifications
            .mark_read(notification_id, ctx.user_id)
            .await
    }

    /// Marks all of the current user's notifications as read. Idempotent.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.notifications.mark_all_read(ctx.user_id).await
    }

    /// Deletes one of the current user's notifications.
    pub async fn delete(&self, ctx: &RequestContext, notification_id: Uuid) -> AppResult<()> {
        self.notifications.delete(notification_id, ctx.user_id).await
    }
}
