//! Airtable REST client for the lists and links tables.
//!
//! Single-record reads go to `GET {api}/{base}/{lists table}/{record}`;
//! filtered reads go to `POST {api}/{base}/{links table}/listRecords` with a
//! `filterByFormula` body. Every call carries `Authorization: Bearer <token>`.

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use airlinks_core::constants::{AIRTABLE_API_URL, DEFAULT_TIMEOUT_SECONDS};
use airlinks_core::error::{AirlinksError, Result};
use airlinks_core::traits::RecordStore;
use airlinks_core::types::{Fields, ListRecordsResponse, Record, RecordResponse, Settings};

use crate::formula::record_id_filter;

/// HTTP client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AirtableConfig {
    /// API root, e.g. "https://api.airtable.com/v0"
    pub api_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            api_url: AIRTABLE_API_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl AirtableConfig {
    /// Creates a config pointing at a different API root.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }
}

/// Airtable client implementing [`RecordStore`].
///
/// Settings can be swapped at runtime; each call reads the current ones.
pub struct AirtableClient {
    config: AirtableConfig,
    settings: RwLock<Settings>,
    http_client: reqwest::Client,
}

impl AirtableClient {
    /// Creates a client against the public Airtable API.
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_config(settings, AirtableConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(settings: Settings, config: AirtableConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AirlinksError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            settings: RwLock::new(settings),
            http_client,
        })
    }

    /// Returns a copy of the current settings.
    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Replaces the settings.
    ///
    /// Returns true if the base or either table changed.
    pub fn update_settings(&self, settings: Settings) -> bool {
        let mut current = self.settings.write();
        let scope_changed = !current.same_scope(&settings);
        *current = settings;
        scope_changed
    }

    fn table_url(&self, base_id: &str, table_id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.api_url.trim_end_matches('/'),
            base_id,
            table_id
        )
    }
}

#[async_trait]
impl RecordStore for AirtableClient {
    type Scope = Settings;

    /// Snapshot of the current settings, validated.
    fn scope(&self) -> Result<Settings> {
        let settings = self.settings();
        settings.validate()?;
        Ok(settings)
    }

    #[instrument(skip(self, settings), fields(base = %settings.base_id))]
    async fn fetch_list(&self, settings: &Settings, list_id: &str) -> Result<Record> {
        let url = format!(
            "{}/{}",
            self.table_url(&settings.base_id, &settings.lists_table_id),
            list_id
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(settings.access_token.expose())
            .send()
            .await
            .map_err(|e| AirlinksError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::FORBIDDEN {
            debug!(list_id, %status, "List not retrievable");
            return Err(AirlinksError::NotFound(list_id.to_string()));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(list_id, %status, "Lists request failed");
            return Err(AirlinksError::Transport(format!(
                "lists request failed with status {}: {}",
                status, text
            )));
        }

        let body: RecordResponse = response
            .json()
            .await
            .map_err(|e| AirlinksError::Transport(e.to_string()))?;

        let record = body
            .into_record(list_id)
            .ok_or_else(|| AirlinksError::NotFound(list_id.to_string()))?;

        debug!(list_id, fields = record.fields.len(), "Fetched list record");
        Ok(record)
    }

    #[instrument(
        skip(self, settings, record_ids),
        fields(base = %settings.base_id, count = record_ids.len())
    )]
    async fn query_links(
        &self,
        settings: &Settings,
        record_ids: &[String],
        list_name: &str,
    ) -> Result<Vec<Fields>> {
        let url = format!(
            "{}/listRecords",
            self.table_url(&settings.base_id, &settings.links_table_id)
        );
        let body = serde_json::json!({
            "filterByFormula": record_id_filter(record_ids),
        });

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(settings.access_token.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| AirlinksError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(list_name, %status, "Links request failed");
            return Err(AirlinksError::Transport(format!(
                "links request failed with status {}: {}",
                status, text
            )));
        }

        let page: ListRecordsResponse = response
            .json()
            .await
            .map_err(|e| AirlinksError::Transport(e.to_string()))?;

        if page.offset.is_some() {
            debug!(list_name, "Further pages available, using the first page only");
        }

        if page.records.is_empty() {
            return Err(AirlinksError::EmptyResult(settings.links_table_id.clone()));
        }

        debug!(list_name, records = page.records.len(), "Queried link records");
        Ok(page.records.into_iter().map(|r| r.fields).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BASE: &str = "appAAAAAAAAA";
    const LISTS: &str = "tblLISTSLISTS";
    const LINKS: &str = "tblLINKSLINKS";

    fn test_settings() -> Settings {
        Settings::new("patTOKEN", BASE, LINKS, LISTS)
    }

    fn test_client(server: &MockServer) -> AirtableClient {
        AirtableClient::with_config(test_settings(), AirtableConfig::with_api_url(server.uri()))
            .unwrap()
    }

    async fn fetch(server: &MockServer) -> Result<Record> {
        test_client(server).fetch_list(&test_settings(), "recAAAAAAAAA").await
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_fetch_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/{}/{}/recAAAAAAAAA", BASE, LISTS)))
            .and(header("Authorization", "Bearer patTOKEN"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "recAAAAAAAAA",
                "fields": { "Name": "Reading", "Links": ["recBBBBBBBBB"] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let record = fetch(&server).await.unwrap();
        assert_eq!(record.id, "recAAAAAAAAA");
        assert_eq!(record.fields["Name"], "Reading");
    }

    #[tokio::test]
    async fn test_fetch_list_without_fields_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "recAAAAAAAAA" })))
            .mount(&server)
            .await;

        let err = fetch(&server).await.unwrap_err();
        assert!(matches!(err, AirlinksError::NotFound(id) if id == "recAAAAAAAAA"));
    }

    #[tokio::test]
    async fn test_fetch_list_404_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "NOT_FOUND" })),
            )
            .mount(&server)
            .await;

        let err = fetch(&server).await.unwrap_err();
        assert!(matches!(err, AirlinksError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_list_server_error_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let err = fetch(&server).await.unwrap_err();
        assert!(matches!(err, AirlinksError::Transport(ref msg) if msg.contains("503")));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_fetch_list_connection_refused_is_transport() {
        // Bind then release a port so nothing is listening on it.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = AirtableClient::with_config(
            test_settings(),
            AirtableConfig::with_api_url(format!("http://{}", addr)),
        )
        .unwrap();

        let err = client.fetch_list(&test_settings(), "recAAAAAAAAA").await.unwrap_err();
        assert!(matches!(err, AirlinksError::Transport(_)));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_scope_is_a_snapshot() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        let scope = client.scope().unwrap();
        let mut other_base = test_settings();
        other_base.base_id = "appBBBBBBBBB".into();
        client.update_settings(other_base);

        assert_eq!(scope.base_id, BASE);
        assert_eq!(client.scope().unwrap().base_id, "appBBBBBBBBB");
    }

    #[tokio::test]
    async fn test_fetch_list_bad_body_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = fetch(&server).await.unwrap_err();
        assert!(matches!(err, AirlinksError::Transport(_)));
    }

    #[tokio::test]
    async fn test_query_links() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/{}/{}/listRecords", BASE, LINKS)))
            .and(header("Authorization", "Bearer patTOKEN"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({
                "filterByFormula": "OR(RECORD_ID()='recBBBBBBBBB',RECORD_ID()='recCCCCCCCCC')"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [
                    { "id": "recBBBBBBBBB", "fields": { "Name": "B" } },
                    { "id": "recCCCCCCCCC", "fields": { "Name": "C" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let fields = test_client(&server)
            .query_links(&test_settings(), &ids(&["recBBBBBBBBB", "recCCCCCCCCC"]), "Reading")
            .await
            .unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1]["Name"], "C");
    }

    #[tokio::test]
    async fn test_query_links_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "records": [] })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .query_links(&test_settings(), &ids(&["recBBBBBBBBB"]), "Reading")
            .await
            .unwrap_err();
        assert!(matches!(err, AirlinksError::EmptyResult(table) if table == LINKS));
    }

    #[tokio::test]
    async fn test_query_links_ignores_further_pages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [{ "fields": { "Name": "B" } }],
                "offset": "itrNEXT/recBBBBBBBBB"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let fields = test_client(&server)
            .query_links(&test_settings(), &ids(&["recBBBBBBBBB"]), "Reading")
            .await
            .unwrap();
        assert_eq!(fields.len(), 1);
    }

    #[tokio::test]
    async fn test_query_links_unauthorized_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .query_links(&test_settings(), &ids(&["recBBBBBBBBB"]), "Reading")
            .await
            .unwrap_err();
        assert!(matches!(err, AirlinksError::Transport(_)));
    }

    #[tokio::test]
    async fn test_incomplete_settings_never_reach_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = AirtableClient::with_config(
            Settings::default(),
            AirtableConfig::with_api_url(server.uri()),
        )
        .unwrap();

        let err = client.scope().unwrap_err();
        assert!(matches!(err, AirlinksError::Config(_)));
    }

    #[tokio::test]
    async fn test_update_settings_reports_scope_change() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        let mut same_scope = test_settings();
        same_scope.set_access_token("patROTATED");
        assert!(!client.update_settings(same_scope));
        assert_eq!(client.settings().access_token.expose(), "patROTATED");

        let mut other_base = test_settings();
        other_base.base_id = "appBBBBBBBBB".into();
        assert!(client.update_settings(other_base));
    }

    #[test]
    fn test_config_default() {
        let config = AirtableConfig::default();
        assert_eq!(config.api_url, AIRTABLE_API_URL);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }
}
