//! Project/service lookup adapter
//!
//! Lookups feed autocomplete dropdowns; a failed lookup degrades to an
//! empty options list instead of an error, matching how the widget treats
//! a flaky host application.

use async_trait::async_trait;
use tracklet_core::ProjectDirectory;
use tracklet_domain::{Result, SelectOption};

/// Lookup client against the host application's project endpoints
#[derive(Clone)]
pub struct HttpDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDirectory {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    async fn fetch_options(&self, url: &str, query: &[(&str, &str)]) -> reqwest::Result<Vec<SelectOption>> {
        self.client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<SelectOption>>()
            .await
    }
}

#[async_trait]
impl ProjectDirectory for HttpDirectory {
    async fn search_projects(&self, query: &str) -> Result<Vec<SelectOption>> {
        let url = format!("{}/projects", self.base_url);
        match self.fetch_options(&url, &[("query", query)]).await {
            Ok(options) => Ok(options),
            Err(e) => {
                tracing::warn!(error = %e, "directory.project_lookup_failed");
                Ok(Vec::new())
            }
        }
    }

    async fn services_for_project(&self, project_id: &str) -> Result<Vec<SelectOption>> {
        let url = format!("{}/projects/{project_id}/services", self.base_url);
        match self.fetch_options(&url, &[]).await {
            Ok(options) => Ok(options),
            Err(e) => {
                tracing::warn!(error = %e, project_id, "directory.service_lookup_failed");
                Ok(Vec::new())
            }
        }
    }
}
