use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, info_span, warn, Instrument};

use sv_core::ports::{MessagesPort, ServiceError};
use sv_core::{CaseId, CaseMessage, MessageId};

use super::FeedState;

const LOAD_FAILED: &str = "unable to load messages";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    #[error("no case selected")]
    NotMounted,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Keeps `is_sending` up while a send is in flight, cleared even when the
/// send future is dropped.
struct SendingFlag<'a>(&'a AtomicBool);

impl<'a> SendingFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for SendingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Messages of one case.
pub struct MessageFeed {
    port: Arc<dyn MessagesPort>,
    case_id: RwLock<Option<CaseId>>,
    state: RwLock<FeedState<CaseMessage>>,
    is_sending: AtomicBool,
}

impl MessageFeed {
    pub fn new(port: Arc<dyn MessagesPort>) -> Self {
        Self {
            port,
            case_id: RwLock::new(None),
            state: RwLock::new(FeedState::default()),
            is_sending: AtomicBool::new(false),
        }
    }

    /// Select the case and fetch its messages.
    ///
    /// Switching to another case drops the items of the previous one.
    pub async fn mount(&self, case_id: CaseId) {
        {
            let mut current = self.case_id.write().await;
            if current.as_ref() != Some(&case_id) {
                *self.state.write().await = FeedState::default();
            }
            *current = Some(case_id);
        }
        self.refetch().await;
    }

    /// Fetch again; does nothing before `mount`.
    ///
    /// A result that arrives after the feed moved to another case is discarded.
    pub async fn refetch(&self) {
        let Some(case_id) = self.case_id.read().await.clone() else {
            return;
        };
        self.state.write().await.begin_load();
        let result = self
            .port
            .list(&case_id)
            .instrument(info_span!("usecase.messages.fetch", case_id = %case_id))
            .await;
        if let Err(err) = &result {
            warn!(case_id = %case_id, error = %err, "messages fetch failed");
        }

        let current = self.case_id.read().await;
        if current.as_ref() != Some(&case_id) {
            debug!(case_id = %case_id, "discarding messages of a previous case");
            return;
        }
        self.state.write().await.finish_load(result, LOAD_FAILED);
    }

    /// Send a message; the server copy is appended once the call resolves.
    pub async fn send(&self, content: &str) -> Result<CaseMessage, FeedError> {
        let case_id = self
            .case_id
            .read()
            .await
            .clone()
            .ok_or(FeedError::NotMounted)?;

        let result = {
            let _sending = SendingFlag::raise(&self.is_sending);
            self.port.send(&case_id, content).await
        };

        let message = result?;
        info!(case_id = %case_id, message_id = %message.id, "message sent");
        self.state.write().await.items.push(message.clone());
        Ok(message)
    }

    pub async fn mark_as_read(&self, ids: &[MessageId]) {
        let Some(case_id) = self.case_id.read().await.clone() else {
            return;
        };
        let changed = self.state.write().await.mark_read(ids);
        debug!(case_id = %case_id, changed, "messages marked as read");
        if let Err(err) = self.port.mark_as_read(&case_id, ids).await {
            warn!(case_id = %case_id, error = %err, "mark as read not confirmed");
        }
    }

    pub async fn items(&self) -> Vec<CaseMessage> {
        self.state.read().await.items.clone()
    }

    pub async fn unread_count(&self) -> usize {
        self.state.read().await.unread_count()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub fn is_sending(&self) -> bool {
        self.is_sending.load(Ordering::SeqCst)
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }
}
