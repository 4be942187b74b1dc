use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use tokio::sync::RwLock;

use sv_core::notifications::NotificationType;
use sv_core::ports::{ClockPort, NotificationsPort, ServiceError};
use sv_core::{AppNotification, CaseId, NotificationId};

pub struct InMemoryNotifications {
    notifications: RwLock<Vec<AppNotification>>,
}

impl InMemoryNotifications {
    pub fn new(notifications: Vec<AppNotification>) -> Self {
        Self {
            notifications: RwLock::new(notifications),
        }
    }

    pub fn seeded(clock: Arc<dyn ClockPort>) -> Self {
        let now = clock.now();
        Self::new(vec![
            AppNotification {
                id: NotificationId::from("notif_1"),
                kind: NotificationType::Warning,
                title: "Réponse requise".into(),
                message: "L'IA attend vos réponses pour le dossier SOL-2025-0002.".into(),
                created_at: now,
                is_read: false,
                link: Some("/dashboard/cases/case_002".into()),
                case_id: Some(CaseId::from("case_002")),
            },
            AppNotification {
                id: NotificationId::from("notif_2"),
                kind: NotificationType::Info,
                title: "Analyse prête".into(),
                message: "L'analyse du dossier SOL-2025-0001 est disponible.".into(),
                created_at: now - Duration::hours(1),
                is_read: true,
                link: Some("/dashboard/cases/case_001".into()),
                case_id: Some(CaseId::from("case_001")),
            },
        ])
    }
}

#[async_trait]
impl NotificationsPort for InMemoryNotifications {
    async fn list(&self) -> Result<Vec<AppNotification>, ServiceError> {
        Ok(self.notifications.read().await.clone())
    }

    async fn mark_as_read(&self, id: &NotificationId) -> Result<(), ServiceError> {
        let mut notifications = self.notifications.write().await;
        let notification = notifications
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
        notification.is_read = true;
        Ok(())
    }

    async fn mark_all_as_read(&self) -> Result<(), ServiceError> {
        for notification in self.notifications.write().await.iter_mut() {
            notification.is_read = true;
        }
        Ok(())
    }
}
