use async_trait::async_trait;

use crate::ids::NotificationId;
use crate::notifications::AppNotification;
use crate::ports::errors::ServiceError;

#[async_trait]
pub trait NotificationsPort: Send + Sync {
    async fn list(&self) -> Result<Vec<AppNotification>, ServiceError>;

    async fn mark_as_read(&self, id: &NotificationId) -> Result<(), ServiceError>;

    async fn mark_all_as_read(&self) -> Result<(), ServiceError>;
}
