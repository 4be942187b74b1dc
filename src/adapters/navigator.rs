use async_trait::async_trait;
use sv_core::ports::NavigatorPort;
use tracing::info;

/// Route the wizard returns to after submission.
pub const CASES_ROUTE: &str = "/dashboard/cases";

pub struct LoggingNavigator;

#[async_trait]
impl NavigatorPort for LoggingNavigator {
    async fn leave_wizard(&self) {
        info!(route = CASES_ROUTE, "navigate");
    }
}
