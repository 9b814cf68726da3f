//! Logbook submission adapter
//!
//! The logbook endpoint speaks classic form posts: a successful entry
//! answers with a redirect, a validation failure answers 200 with the
//! re-rendered form markup, and anything else is an error the caller
//! surfaces to the user. The authoritative record of a logged activity is
//! what this endpoint accepts; the local snapshot is only a convenience
//! cache.

use async_trait::async_trait;
use tracklet_core::LogbookSink;
use tracklet_domain::{LogbookEntry, LogbookOutcome, Result, TrackletError};

/// Submission client against the host application's logbook endpoint
#[derive(Clone)]
pub struct HttpLogbook {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLogbook {
    /// Build a logbook client.
    ///
    /// Uses its own `reqwest` client with redirects disabled; the redirect
    /// response itself is the success signal.
    ///
    /// # Errors
    /// Returns `TrackletError::Internal` if the HTTP client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| TrackletError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url: base_url.into() })
    }
}

#[async_trait]
impl LogbookSink for HttpLogbook {
    async fn submit(&self, entry: &LogbookEntry) -> Result<LogbookOutcome> {
        let url = format!("{}/logbook", self.base_url);
        let form = [
            ("service", entry.service.clone()),
            ("description", entry.description.clone()),
            ("hours", format!("{:.2}", entry.hours)),
            ("renderer", entry.renderer.clone()),
            ("date", entry.date.format("%Y-%m-%d").to_string()),
        ];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| TrackletError::Network(format!("Logbook submission failed: {e}")))?;

        let status = response.status();
        if status.is_redirection() {
            let redirect = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            tracing::info!(?redirect, "logbook.accepted");
            return Ok(LogbookOutcome::Accepted { redirect });
        }

        if status.is_success() {
            let form_markup = response.text().await.map_err(|e| {
                TrackletError::Network(format!("Failed to read logbook response: {e}"))
            })?;
            tracing::info!("logbook.rejected_with_form");
            return Ok(LogbookOutcome::Rejected { form_markup });
        }

        Err(TrackletError::Network(format!("Logbook endpoint answered {status}")))
    }
}
