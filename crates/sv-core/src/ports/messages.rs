use async_trait::async_trait;

use crate::ids::{CaseId, MessageId};
use crate::messages::CaseMessage;
use crate::ports::errors::ServiceError;

#[async_trait]
pub trait MessagesPort: Send + Sync {
    async fn list(&self, case_id: &CaseId) -> Result<Vec<CaseMessage>, ServiceError>;

    async fn send(&self, case_id: &CaseId, content: &str) -> Result<CaseMessage, ServiceError>;

    async fn mark_as_read(&self, case_id: &CaseId, ids: &[MessageId]) -> Result<(), ServiceError>;
}
