#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the network map.
//!
//! Serves the `GeoJSON` collection consumed by the `MapLibre` frontend
//! plus the image-redirect endpoints that stand in for expiring signed
//! attachment URLs. All real decision logic lives in the `normalize` and
//! `features` crates; this layer is request wiring around them.

pub mod cache;
pub mod handlers;

use cache::UrlCache;
use network_map_upstream::UpstreamClient;

/// Shared application state.
pub struct AppState {
    /// Upstream record API client.
    pub client: UpstreamClient,
    /// Resolved-attachment URL cache backing the redirect endpoints.
    pub cache: UrlCache,
    /// Prefix for proxy URLs embedded in features; empty string for
    /// same-origin relative URLs.
    pub public_base_url: String,
}
