use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use tokio::sync::RwLock;

use sv_core::messages::{AuthorRole, MessageAuthor};
use sv_core::ports::{ClockPort, MessagesPort, ServiceError};
use sv_core::{CaseId, CaseMessage, MessageId, UserId};

pub struct InMemoryMessages {
    messages: RwLock<Vec<CaseMessage>>,
    clock: Arc<dyn ClockPort>,
}

impl InMemoryMessages {
    pub fn new(messages: Vec<CaseMessage>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            messages: RwLock::new(messages),
            clock,
        }
    }

    /// Two messages on `case_001`: one read from the client, one unread from their lawyer.
    pub fn seeded(clock: Arc<dyn ClockPort>) -> Self {
        let now = clock.now();
        let case_id = CaseId::from("case_001");
        let seed = vec![
            CaseMessage {
                id: MessageId::from("msg_1"),
                case_id: case_id.clone(),
                author: MessageAuthor {
                    id: UserId::from("usr_001"),
                    name: "Jean Dupont".into(),
                    role: AuthorRole::User,
                },
                content: "Bonjour, voici les pièces complémentaires.".into(),
                created_at: now - Duration::hours(2),
                is_read: true,
                attachments: None,
            },
            CaseMessage {
                id: MessageId::from("msg_2"),
                case_id,
                author: MessageAuthor {
                    id: UserId::from("law_123"),
                    name: "Me Durand".into(),
                    role: AuthorRole::Lawyer,
                },
                content: "Merci, j'ai bien reçu. Je reviens vers vous après analyse.".into(),
                created_at: now - Duration::hours(1),
                is_read: false,
                attachments: None,
            },
        ];
        Self::new(seed, clock)
    }
}

#[async_trait]
impl MessagesPort for InMemoryMessages {
    async fn list(&self, case_id: &CaseId) -> Result<Vec<CaseMessage>, ServiceError> {
        Ok(self
            .messages
            .read()
            .await
            .iter()
            .filter(|m| &m.case_id == case_id)
            .cloned()
            .collect())
    }

    async fn send(&self, case_id: &CaseId, content: &str) -> Result<CaseMessage, ServiceError> {
        let message = CaseMessage {
            id: MessageId::generate(),
            case_id: case_id.clone(),
            author: MessageAuthor {
                id: UserId::from("usr_mock"),
                name: "Vous".into(),
                role: AuthorRole::User,
            },
            content: content.to_string(),
            created_at: self.clock.now(),
            is_read: true,
            attachments: None,
        };
        self.messages.write().await.push(message.clone());
        Ok(message)
    }

    async fn mark_as_read(&self, case_id: &CaseId, ids: &[MessageId]) -> Result<(), ServiceError> {
        for message in self
            .messages
            .write()
            .await
            .iter_mut()
            .filter(|m| &m.case_id == case_id && ids.contains(&m.id))
        {
            message.is_read = true;
        }
        Ok(())
    }
}
