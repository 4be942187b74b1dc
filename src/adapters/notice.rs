use async_trait::async_trait;
use sv_core::ports::{Notice, NoticeLevel, NoticePort};
use tracing::{info, warn};

pub struct LoggingNotice;

#[async_trait]
impl NoticePort for LoggingNotice {
    async fn notify(&self, notice: Notice) {
        let description = notice.description.as_deref().unwrap_or("");
        match notice.level {
            NoticeLevel::Info => info!(title = %notice.title, %description, "notice"),
            NoticeLevel::Destructive => warn!(title = %notice.title, %description, "notice"),
        }
    }
}
