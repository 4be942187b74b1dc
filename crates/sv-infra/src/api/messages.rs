use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use sv_core::ports::{MessagesPort, ServiceError};
use sv_core::{CaseId, CaseMessage, MessageId};

use super::client::{required, ApiClient};

#[derive(Serialize)]
struct SendMessageBody<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct MarkReadBody<'a> {
    ids: &'a [MessageId],
}

pub struct HttpMessages {
    client: Arc<ApiClient>,
}

impl HttpMessages {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessagesPort for HttpMessages {
    async fn list(&self, case_id: &CaseId) -> Result<Vec<CaseMessage>, ServiceError> {
        let messages = self
            .client
            .get::<Vec<CaseMessage>>(&format!("/cases/{case_id}/messages"))
            .await?;
        Ok(messages.unwrap_or_default())
    }

    async fn send(&self, case_id: &CaseId, content: &str) -> Result<CaseMessage, ServiceError> {
        let sent = self
            .client
            .send_json::<_, CaseMessage>(
                Method::POST,
                &format!("/cases/{case_id}/messages"),
                &SendMessageBody { content },
            )
            .await?;
        Ok(required(sent)?)
    }

    async fn mark_as_read(&self, case_id: &CaseId, ids: &[MessageId]) -> Result<(), ServiceError> {
        self.client
            .post_json_discard(
                &format!("/cases/{case_id}/messages/read"),
                &MarkReadBody { ids },
            )
            .await?;
        Ok(())
    }
}
