/// Popup controller: fills the id field on open, runs analysis on click
use serde::Deserialize;
use thiserror::Error;

use crate::client::{ReportClient, Transport};
use crate::config::PopupConfig;
use crate::lifetime::PopupLifetime;
use crate::render::{UiUpdate, no_result, render};
use crate::video_id::{VideoId, extract_video_id};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("active tab query failed: {0}")]
    TabQuery(String),
}

/// The extension runtime, as far as the popup needs it
#[allow(async_fn_in_trait)]
pub trait TabHost {
    /// URL of the active tab in the current window, if it has one
    async fn active_tab_url(&self) -> Result<Option<String>, HostError>;
}

/// Runtime message sent by the background script: `{ vid }`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VideoMessage {
    #[serde(default)]
    pub vid: Option<String>,
}

pub struct PopupController<H, T> {
    host: H,
    client: ReportClient<T>,
    config: PopupConfig,
    lifetime: PopupLifetime,
}

impl<H: TabHost, T: Transport> PopupController<H, T> {
    pub fn new(host: H, transport: T, config: PopupConfig) -> Self {
        PopupController {
            host,
            client: ReportClient::new(transport, &config),
            config,
            lifetime: PopupLifetime::new(),
        }
    }

    pub fn lifetime(&self) -> &PopupLifetime {
        &self.lifetime
    }

    /// Initial value of the id field: the active tab's video id, or blank
    pub async fn on_open(&self) -> String {
        match self.host.active_tab_url().await {
            Ok(Some(url)) => match extract_video_id(&url) {
                Some(id) => {
                    log::debug!("Active tab video id: {}", id);
                    id.into()
                }
                None => {
                    log::debug!("Active tab has no video id: {}", url);
                    String::new()
                }
            },
            Ok(None) => String::new(),
            Err(e) => {
                log::warn!("{}", e);
                String::new()
            }
        }
    }

    /// New value of the id field for a background message, if it carries a valid id
    pub fn on_video_message(&self, message: &VideoMessage) -> Option<String> {
        if self.lifetime.is_closed() {
            return None;
        }
        let raw = message.vid.as_deref()?;
        match VideoId::parse(raw) {
            Ok(id) => Some(id.into()),
            Err(e) => {
                log::debug!("Ignoring video message {:?}: {}", raw, e);
                None
            }
        }
    }

    /// Analyze the id currently in the input field.
    ///
    /// Returns `None` once the popup has closed; the caller must then leave
    /// the view alone. Overlapping calls are independent and whichever
    /// finishes last decides what is shown.
    pub async fn on_analyze(&self, input: &str) -> Option<Vec<UiUpdate>> {
        if self.lifetime.is_closed() {
            return None;
        }

        let updates = match VideoId::parse(input) {
            Ok(id) => {
                let report = self.client.fetch_report(&id, &self.lifetime).await;
                render(report.as_ref(), &self.config)
            }
            Err(e) => {
                log::debug!("Not analyzing {:?}: {}", input, e);
                no_result(&self.config)
            }
        };

        if self.lifetime.is_closed() {
            log::debug!("Dropping analysis result, popup already closed");
            return None;
        }
        Some(updates)
    }

    /// Popup is going away: abort in-flight requests and ignore late results
    pub fn teardown(&self) {
        self.lifetime.close();
    }
}
