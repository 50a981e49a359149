//! HTTP client for the upstream record API.

use serde::Deserialize;

use crate::{UpstreamConfig, UpstreamError, UpstreamRecord};

/// Records requested per list-records page.
const PAGE_SIZE: u32 = 100;

/// A single page of the list-records response.
#[derive(Debug, Deserialize)]
struct RecordPage {
    /// The records in this page.
    #[serde(default)]
    records: Vec<UpstreamRecord>,
    /// Continuation token; absent on the last page.
    offset: Option<String>,
}

/// Client for the upstream record API.
#[derive(Debug)]
pub struct UpstreamClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    /// Builds a client with the bearer token installed as a default
    /// header.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Config`] if the token is not a valid
    /// header value, or [`UpstreamError::Http`] if the client cannot be
    /// built.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|e| UpstreamError::Config(format!("invalid access token: {e}")))?;
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { http, config })
    }

    /// Fetches every record in the table, following continuation tokens
    /// until the upstream stops returning one.
    ///
    /// # Errors
    ///
    /// Returns the first [`UpstreamError`] encountered; no partial
    /// results are returned.
    pub async fn list_all_records(&self) -> Result<Vec<UpstreamRecord>, UpstreamError> {
        let mut all_records = Vec::new();
        let mut offset: Option<String> = None;
        let mut page_number = 0u32;

        // TODO: add a max-page safeguard; the loop trusts the upstream to
        // eventually omit the continuation token.
        loop {
            log::debug!("Fetching record page {page_number}");
            let page = self.fetch_page(offset.as_deref()).await?;
            all_records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
            page_number += 1;
        }

        log::info!("Fetched {} records from upstream", all_records.len());
        Ok(all_records)
    }

    /// Fetches a single record by id.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Status`] with the upstream's status code
    /// when the record does not exist.
    pub async fn get_record(&self, record_id: &str) -> Result<UpstreamRecord, UpstreamError> {
        let url = format!("{}/{record_id}", self.table_url());
        let response = self.http.get(&url).send().await?;
        read_json(response).await
    }

    async fn fetch_page(&self, offset: Option<&str>) -> Result<RecordPage, UpstreamError> {
        let mut request = self
            .http
            .get(self.table_url())
            .query(&[("pageSize", PAGE_SIZE.to_string())]);

        if let Some(view) = self.config.view.as_deref() {
            request = request.query(&[("view", view)]);
        }
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        let response = request.send().await?;
        read_json(response).await
    }

    fn table_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.config.api_url, self.config.base_id, self.config.table
        )
    }
}

/// Checks the response status and deserializes the JSON body.
///
/// Non-success responses capture the raw body for diagnostics instead of
/// attempting a parse.
async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status { status, body });
    }
    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_record_page_with_offset() {
        let page: RecordPage = serde_json::from_str(
            r#"{
                "records": [
                    { "id": "recAAAAAAAAAAAAAA", "fields": { "Name": "One" } }
                ],
                "offset": "itrNext/recAAAAAAAAAAAAAA"
            }"#,
        )
        .unwrap();

        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].id, "recAAAAAAAAAAAAAA");
        assert_eq!(page.offset.as_deref(), Some("itrNext/recAAAAAAAAAAAAAA"));
    }

    #[test]
    fn deserializes_final_page_without_offset() {
        let page: RecordPage = serde_json::from_str(r#"{ "records": [] }"#).unwrap();
        assert!(page.records.is_empty());
        assert!(page.offset.is_none());
    }

    #[test]
    fn defaults_missing_fields_map() {
        let record: UpstreamRecord =
            serde_json::from_str(r#"{ "id": "recBBBBBBBBBBBBBB" }"#).unwrap();
        assert!(record.fields.is_empty());
    }

    #[test]
    fn builds_table_url_from_config() {
        let client = UpstreamClient::new(UpstreamConfig::new("tok", "appBase", "Networks"))
            .expect("client");
        assert_eq!(
            client.table_url(),
            "https://api.airtable.com/v0/appBase/Networks"
        );
    }

    #[test]
    fn flags_not_found_status() {
        let err = UpstreamError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert!(err.is_not_found());

        let err = UpstreamError::Status {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: String::new(),
        };
        assert!(!err.is_not_found());
    }
}
