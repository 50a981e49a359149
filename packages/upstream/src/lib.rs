#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Client for the upstream tabular data store.
//!
//! The store exposes a REST API with bearer-token auth: a paginated
//! list-records endpoint (continuation-token based) and a single-record
//! fetch. Records come back as an id plus an arbitrary JSON field map;
//! nothing here interprets field contents; that is the normalization
//! layer's job.

pub mod client;

pub use client::UpstreamClient;

use serde::Deserialize;

/// Errors that can occur talking to the upstream data store.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream returned a non-success status.
    #[error("Upstream returned {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The raw response body, for diagnostics.
        body: String,
    },

    /// The client configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl UpstreamError {
    /// Whether the upstream reported the requested resource missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if status.as_u16() == 404)
    }
}

/// Connection settings for the upstream data store.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// API root, without a trailing slash.
    pub api_url: String,
    /// Bearer access token.
    pub token: String,
    /// Base (collection) identifier.
    pub base_id: String,
    /// Table name or identifier within the base.
    pub table: String,
    /// Optional named view to filter the listing server-side.
    pub view: Option<String>,
}

impl UpstreamConfig {
    /// Creates a config for the hosted API with no view filter.
    #[must_use]
    pub fn new(token: &str, base_id: &str, table: &str) -> Self {
        Self {
            api_url: "https://api.airtable.com/v0".to_owned(),
            token: token.to_owned(),
            base_id: base_id.to_owned(),
            table: table.to_owned(),
            view: None,
        }
    }

    /// Sets the named view used to filter the record listing.
    #[must_use]
    pub fn with_view(mut self, view: Option<String>) -> Self {
        self.view = view;
        self
    }
}

/// One record from the upstream table: an opaque id plus a field map of
/// arbitrary JSON values.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamRecord {
    /// Opaque record identifier.
    pub id: String,
    /// Field name to raw value. Absent in the response when the record
    /// has no populated fields.
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}
