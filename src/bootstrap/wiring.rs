//! # Dependency Injection
//!
//! The only place that depends on sv-app and sv-infra at the same time.
//! Builds concrete adapters, wraps them as `Arc<dyn Port>` and hands them
//! to the use cases. No business decisions are made here.

use std::sync::Arc;

use anyhow::Context;
use sv_app::{CaseWizard, MessageFeed, NotificationFeed};
use sv_core::ports::{
    ClockPort, DraftStorePort, MessagesPort, NavigatorPort, NoticePort, NotificationsPort,
};
use sv_infra::{
    ApiClient, FileDraftStore, HttpDraftStore, HttpMessages, HttpNotifications, InMemoryMessages,
    InMemoryNotifications, SimulatedLatency, SystemClock,
};
use tracing::info;

use super::config::ResolvedConfig;
use crate::adapters::{LoggingNavigator, LoggingNotice};

/// Use cases exposed to the host.
pub struct AppServices {
    pub wizard: CaseWizard,
    pub messages: MessageFeed,
    pub notifications: NotificationFeed,
}

struct Backends {
    drafts: Arc<dyn DraftStorePort>,
    messages: Arc<dyn MessagesPort>,
    notifications: Arc<dyn NotificationsPort>,
}

fn mock_backends(config: &ResolvedConfig, clock: Arc<dyn ClockPort>) -> Backends {
    let drafts = FileDraftStore::new(config.draft_path.clone(), clock.clone())
        .with_latency(SimulatedLatency::new(config.upload_latency));
    Backends {
        drafts: Arc::new(drafts),
        messages: Arc::new(InMemoryMessages::seeded(clock.clone())),
        notifications: Arc::new(InMemoryNotifications::seeded(clock)),
    }
}

fn http_backends(config: &ResolvedConfig) -> anyhow::Result<Backends> {
    let client = Arc::new(
        ApiClient::new(config.api_base_url.clone()).context("Failed to build HTTP client")?,
    );
    Ok(Backends {
        drafts: Arc::new(HttpDraftStore::new(client.clone())),
        messages: Arc::new(HttpMessages::new(client.clone())),
        notifications: Arc::new(HttpNotifications::new(client)),
    })
}

/// Wire all dependencies
///
/// Mock mode keeps the draft in a local JSON file and serves seeded feeds;
/// otherwise every port talks to the HTTP API at `api_base_url`.
pub fn wire_dependencies(config: &ResolvedConfig) -> anyhow::Result<AppServices> {
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let notice: Arc<dyn NoticePort> = Arc::new(LoggingNotice);
    let navigator: Arc<dyn NavigatorPort> = Arc::new(LoggingNavigator);

    let backends = if config.use_api_mock {
        info!(draft_path = %config.draft_path.display(), "using local mock backends");
        mock_backends(config, clock.clone())
    } else {
        info!(base_url = %config.api_base_url, "using HTTP backends");
        http_backends(config)?
    };

    Ok(AppServices {
        wizard: CaseWizard::new(
            backends.drafts,
            notice,
            navigator,
            clock,
            config.autosave_delay,
        ),
        messages: MessageFeed::new(backends.messages),
        notifications: NotificationFeed::new(backends.notifications),
    })
}
