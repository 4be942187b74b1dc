use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info_span, warn, Instrument};

use sv_core::ports::NotificationsPort;
use sv_core::{AppNotification, NotificationId};

use super::FeedState;

const LOAD_FAILED: &str = "unable to load notifications";

pub struct NotificationFeed {
    port: Arc<dyn NotificationsPort>,
    state: RwLock<FeedState<AppNotification>>,
}

impl NotificationFeed {
    pub fn new(port: Arc<dyn NotificationsPort>) -> Self {
        Self {
            port,
            state: RwLock::new(FeedState::default()),
        }
    }

    pub async fn mount(&self) {
        self.refetch().await;
    }

    pub async fn refetch(&self) {
        self.state.write().await.begin_load();
        let result = self
            .port
            .list()
            .instrument(info_span!("usecase.notifications.fetch"))
            .await;
        if let Err(err) = &result {
            warn!(error = %err, "notifications fetch failed");
        }
        self.state.write().await.finish_load(result, LOAD_FAILED);
    }

    pub async fn mark_as_read(&self, id: &NotificationId) {
        let changed = self.state.write().await.mark_read(std::slice::from_ref(id));
        debug!(notification_id = %id, changed, "notification marked as read");
        if let Err(err) = self.port.mark_as_read(id).await {
            warn!(notification_id = %id, error = %err, "mark as read not confirmed");
        }
    }

    pub async fn mark_all_as_read(&self) {
        let changed = self.state.write().await.mark_all_read();
        debug!(changed, "all notifications marked as read");
        if let Err(err) = self.port.mark_all_as_read().await {
            warn!(error = %err, "mark all as read not confirmed");
        }
    }

    pub async fn items(&self) -> Vec<AppNotification> {
        self.state.read().await.items.clone()
    }

    pub async fn unread_count(&self) -> usize {
        self.state.read().await.unread_count()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }
}
