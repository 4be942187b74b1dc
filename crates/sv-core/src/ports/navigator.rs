use async_trait::async_trait;

/// Navigation requests issued by the wizard.
#[async_trait]
pub trait NavigatorPort: Send + Sync {
    /// Leave the wizard once the case has been submitted.
    async fn leave_wizard(&self);
}
