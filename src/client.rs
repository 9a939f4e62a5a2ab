/// Report client: one GET per video id, every failure collapses to "no result"
use thiserror::Error;

use crate::config::PopupConfig;
use crate::lifetime::PopupLifetime;
use crate::report::Report;
use crate::video_id::VideoId;

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a fetch produced no report
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request cancelled because the popup closed")]
    Cancelled,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("backend answered with status {0}")]
    Status(u16),
    #[error("response body was empty")]
    EmptyBody,
    #[error("malformed report payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("payload carried no analysis")]
    EmptyReport,
}

/// Issues a single GET and hands back whatever the server answered
///
/// Implementations should abort the request when `lifetime` closes and
/// report that as [`FetchError::Cancelled`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: &str, lifetime: &PopupLifetime) -> Result<HttpResponse, FetchError>;
}

pub struct ReportClient<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> ReportClient<T> {
    pub fn new(transport: T, config: &PopupConfig) -> Self {
        ReportClient {
            transport,
            base_url: config.base_url.clone(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Endpoint for `id`; the id alphabet needs no percent-encoding
    pub fn report_url(&self, id: &VideoId) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, id)
        } else {
            format!("{}/{}", self.base_url, id)
        }
    }

    /// Fetch the report for `id`, or `None` when there is nothing to show.
    pub async fn fetch_report(&self, id: &VideoId, lifetime: &PopupLifetime) -> Option<Report> {
        match self.try_fetch(id, lifetime).await {
            Ok(report) => Some(report),
            Err(e @ (FetchError::Transport(_) | FetchError::Malformed(_))) => {
                log::warn!("No report for {}: {}", id, e);
                None
            }
            Err(e) => {
                log::debug!("No report for {}: {}", id, e);
                None
            }
        }
    }

    /// Like [`fetch_report`](Self::fetch_report) but keeps the reason for an empty result.
    pub async fn try_fetch(&self, id: &VideoId, lifetime: &PopupLifetime) -> Result<Report, FetchError> {
        if lifetime.is_closed() {
            return Err(FetchError::Cancelled);
        }

        let url = self.report_url(id);
        log::debug!("Requesting report: {}", url);

        let response = self.transport.get(&url, lifetime).await?;
        if lifetime.is_closed() {
            return Err(FetchError::Cancelled);
        }

        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }
        if response.body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        match Report::from_json(&response.body)? {
            Some(report) if !report.is_empty() => Ok(report),
            _ => Err(FetchError::EmptyReport),
        }
    }
}
