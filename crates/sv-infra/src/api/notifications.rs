use std::sync::Arc;

use async_trait::async_trait;

use sv_core::ports::{NotificationsPort, ServiceError};
use sv_core::{AppNotification, NotificationId};

use super::client::ApiClient;

pub struct HttpNotifications {
    client: Arc<ApiClient>,
}

impl HttpNotifications {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationsPort for HttpNotifications {
    async fn list(&self) -> Result<Vec<AppNotification>, ServiceError> {
        let notifications = self
            .client
            .get::<Vec<AppNotification>>("/notifications")
            .await?;
        Ok(notifications.unwrap_or_default())
    }

    async fn mark_as_read(&self, id: &NotificationId) -> Result<(), ServiceError> {
        self.client
            .post_empty(&format!("/notifications/{id}/read"))
            .await?;
        Ok(())
    }

    async fn mark_all_as_read(&self) -> Result<(), ServiceError> {
        self.client.post_empty("/notifications/read-all").await?;
        Ok(())
    }
}
