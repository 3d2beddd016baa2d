//! Application state
//!
//! [`App`] owns the client-side pipeline and the state a front end renders:
//! validator → orchestrator → recent-links cache → notification.
//! Every failure is turned into exactly one error notification.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::RecentLinks;
use crate::client::{HttpTransport, ShortenClient};
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::config::StaticConfig;
use crate::errors::{ClientError, Result};
use crate::models::{LinkRecord, ShortenResult};
use crate::notification::{NotificationLevel, NotificationQueue};
use crate::storage::{AUTH_TOKEN_KEY, KeyValueStore, create_store};
use crate::validator;

pub const MSG_CREATED: &str = "Short link created!";
pub const MSG_ALREADY_EXISTS: &str = "This URL has already been shortened";
pub const MSG_COPIED: &str = "Link copied to clipboard!";
pub const MSG_HISTORY_CLEARED: &str = "Recent links cleared";

/// Raw form fields as typed by the user
#[derive(Debug, Clone, Default)]
pub struct ShortenForm {
    pub url: String,
    pub alias: Option<String>,
    pub expires_in_days: Option<String>,
}

impl ShortenForm {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub result: ShortenResult,
    /// Whether a new record was written to the recent-links cache
    pub recorded: bool,
}

/// Notification display durations
#[derive(Debug, Clone, Copy)]
pub struct NotificationSettings {
    pub ttl: Duration,
    pub error_ttl: Duration,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(3000),
            error_ttl: Duration::from_millis(5000),
        }
    }
}

/// Raises the loading flag for the lifetime of the guard
struct LoadingGuard<'a>(&'a mut bool);

impl<'a> LoadingGuard<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

pub struct App {
    client: ShortenClient,
    store: Arc<dyn KeyValueStore>,
    recent: RecentLinks,
    notifications: NotificationQueue,
    clipboard: Box<dyn Clipboard>,
    settings: NotificationSettings,
    loading: bool,
    last_result: Option<ShortenResult>,
    last_error: Option<String>,
}

impl App {
    /// Assemble the app; the recent-links cache is loaded from `store` here
    pub fn new(
        client: ShortenClient,
        store: Arc<dyn KeyValueStore>,
        clipboard: Box<dyn Clipboard>,
        settings: NotificationSettings,
    ) -> Self {
        let recent = RecentLinks::load(store.clone());
        debug!(
            "App initialized with {} store, {} recent links",
            store.backend_name(),
            recent.len()
        );

        Self {
            client,
            store,
            recent,
            notifications: NotificationQueue::new(),
            clipboard,
            settings,
            loading: false,
            last_result: None,
            last_error: None,
        }
    }

    pub fn from_config(config: &StaticConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new()?);
        let client = ShortenClient::new(&config.api.base_url, config.api.timeout(), transport)?;
        let store = create_store(&config.storage.path);
        let settings = NotificationSettings {
            ttl: config.notification.ttl(),
            error_ttl: config.notification.error_ttl(),
        };
        Ok(Self::new(
            client,
            store,
            Box::new(SystemClipboard::new()),
            settings,
        ))
    }

    /// Run one submission through the whole pipeline
    ///
    /// The exclusive borrow keeps a second submission from starting while
    /// this one is in flight.
    pub async fn submit(&mut self, form: &ShortenForm) -> Result<SubmitOutcome> {
        self.last_error = None;
        self.last_result = None;

        let request = match validator::validate(
            &form.url,
            form.alias.as_deref(),
            form.expires_in_days.as_deref(),
        ) {
            Ok(request) => request,
            Err(e) => return Err(self.fail(e.into())),
        };

        let token = self.auth_token();
        let response = {
            let _loading = LoadingGuard::raise(&mut self.loading);
            self.client.submit(&request, token.as_deref()).await
        };

        let result = match response {
            Ok(result) => result,
            Err(e) => return Err(self.fail(e)),
        };

        let recorded = if result.already_exists {
            self.notifications
                .show(MSG_ALREADY_EXISTS, NotificationLevel::Info, self.settings.ttl);
            false
        } else {
            let record = LinkRecord::new(&request.original_url, &result);
            let recorded = match self.recent.insert(record) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Failed to save {} to recent links: {}", result.short_url, e);
                    false
                }
            };
            self.notifications
                .show(MSG_CREATED, NotificationLevel::Success, self.settings.ttl);
            recorded
        };

        info!(
            "Shortened {} -> {} (already exists: {})",
            request.original_url, result.short_url, result.already_exists
        );

        self.last_result = Some(result.clone());
        Ok(SubmitOutcome { result, recorded })
    }

    /// Copy the short URL of the last successful submission
    pub fn copy_result(&mut self) -> Result<Option<String>> {
        let Some(short_url) = self.last_result.as_ref().map(|r| r.short_url.clone()) else {
            self.notifications.show(
                "Nothing to copy yet",
                NotificationLevel::Info,
                self.settings.ttl,
            );
            return Ok(None);
        };
        self.copy(&short_url)?;
        Ok(Some(short_url))
    }

    /// Copy a recent link by 0-based index
    ///
    /// Returns the copied URL, or `None` when there is no such record.
    pub fn copy_recent(&mut self, index: usize) -> Result<Option<String>> {
        let Some(short_url) = self.recent.get(index).map(|r| r.short.clone()) else {
            self.notifications.show(
                format!("No recent link #{}", index + 1),
                NotificationLevel::Info,
                self.settings.ttl,
            );
            return Ok(None);
        };
        self.copy(&short_url)?;
        Ok(Some(short_url))
    }

    pub fn clear_history(&mut self) -> Result<()> {
        match self.recent.clear() {
            Ok(()) => {
                self.notifications.show(
                    MSG_HISTORY_CLEARED,
                    NotificationLevel::Success,
                    self.settings.ttl,
                );
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn dismiss_notification(&self) {
        self.notifications.dismiss();
    }

    pub fn recent(&self) -> &RecentLinks {
        &self.recent
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_result(&self) -> Option<&ShortenResult> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    fn copy(&mut self, text: &str) -> Result<()> {
        match self.clipboard.copy_text(text) {
            Ok(()) => {
                self.notifications
                    .show(MSG_COPIED, NotificationLevel::Success, self.settings.ttl);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Record and surface an error, then hand it back to the caller
    fn fail(&mut self, err: ClientError) -> ClientError {
        let message = err.user_message();
        warn!("{} ({})", err.format_simple(), err.code());
        self.notifications
            .show(message.clone(), NotificationLevel::Error, self.settings.error_ttl);
        self.last_error = Some(message);
        err
    }

    fn auth_token(&self) -> Option<String> {
        match self.store.get(AUTH_TOKEN_KEY) {
            Ok(token) => token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to read auth token, continuing without it: {}", e);
                None
            }
        }
    }
}
