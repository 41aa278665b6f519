//! HTTP plumbing for the metrics endpoint and the export routes.

use tracing::{debug, warn};

use crate::error::RefreshError;
use crate::filters::FilterCriteria;
use crate::series::MetricsResponse;

const DATA_PATH: &str = "/admin/dashboard/data";
const EXPORT_EXCEL_PATH: &str = "/admin/dashboard/export/excel";
const EXPORT_PDF_PATH: &str = "/admin/dashboard/export/pdf";

/// Thin wrapper over a shared `reqwest::Client`. Cheap to clone; one per app.
#[derive(Debug, Clone, Default)]
pub struct MetricsClient {
    base_url: String,
    http: reqwest::Client,
}

impl MetricsClient {
    /// `base_url` is the backend origin, without a trailing slash. An empty
    /// base yields same-origin relative URLs (the web deployment).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues exactly one POST with the serialized criteria and returns the
    /// parsed payload. Transport and HTTP-status failures become
    /// `RefreshError::Transport`, carrying the server message when the error
    /// body is parseable. Payload-level classification (business error, empty
    /// result) is left to the caller.
    pub async fn fetch_metrics(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<MetricsResponse, RefreshError> {
        criteria.validate()?;

        let url = format!("{}{}", self.base_url, DATA_PATH);
        debug!(%url, "requesting dashboard metrics");

        let response = self
            .http
            .post(&url)
            .json(criteria)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "metrics request failed");
                RefreshError::generic_transport()
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            warn!(error = %err, "failed reading metrics response body");
            RefreshError::generic_transport()
        })?;

        if !status.is_success() {
            return Err(RefreshError::Transport(server_message(&body)));
        }

        serde_json::from_str(&body).map_err(|err| {
            warn!(error = %err, "metrics response was not valid JSON");
            RefreshError::generic_transport()
        })
    }

    pub fn excel_export_url(&self, criteria: &FilterCriteria) -> String {
        format!(
            "{}{}?{}",
            self.base_url,
            EXPORT_EXCEL_PATH,
            criteria.query_string()
        )
    }

    pub fn pdf_export_url(&self, criteria: &FilterCriteria) -> String {
        format!(
            "{}{}?{}",
            self.base_url,
            EXPORT_PDF_PATH,
            criteria.query_string()
        )
    }

    /// Raw GET used by the native shells to save a server-rendered export.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn fetch_export(&self, url: &str) -> Result<Vec<u8>, RefreshError> {
        let response = self.http.get(url).send().await.map_err(|err| {
            warn!(error = %err, "export request failed");
            RefreshError::generic_transport()
        })?;
        if !response.status().is_success() {
            return Err(RefreshError::Transport(
                "Export is not available right now".to_string(),
            ));
        }
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|_| RefreshError::generic_transport())
    }
}

/// Pull the `error` field out of a failure body, falling back to a generic
/// message when the body is opaque.
fn server_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct Envelope {
        error: Option<String>,
    }

    serde_json::from_str::<Envelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| "Unable to load dashboard data".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_urls_carry_serialized_filters() {
        let client = MetricsClient::new("https://cinema.example");
        let criteria = FilterCriteria::default_window();
        let url = client.excel_export_url(&criteria);
        assert!(url.starts_with("https://cinema.example/admin/dashboard/export/excel?fecha_inicio="));
        assert!(client
            .pdf_export_url(&criteria)
            .contains("/admin/dashboard/export/pdf?"));
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let client = MetricsClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn server_message_prefers_error_field() {
        assert_eq!(server_message(r#"{"error": "Acceso denegado"}"#), "Acceso denegado");
        assert_eq!(server_message("<html>502</html>"), "Unable to load dashboard data");
        assert_eq!(server_message(r#"{"error": "  "}"#), "Unable to load dashboard data");
    }
}
