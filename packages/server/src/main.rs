#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server binary for the network map.
//!
//! Loads configuration from the environment, builds the upstream client
//! and URL cache once, and serves the `GeoJSON` and image-redirect
//! endpoints for the `MapLibre` frontend.

use std::time::Duration;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use network_map_server::cache::UrlCache;
use network_map_server::{AppState, handlers};
use network_map_upstream::{UpstreamClient, UpstreamConfig};

/// How long resolved attachment URLs stay valid in the redirect cache.
const URL_CACHE_TTL: Duration = Duration::from_secs(300);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let token = std::env::var("UPSTREAM_TOKEN").expect("UPSTREAM_TOKEN must be set");
    let base_id = std::env::var("UPSTREAM_BASE").expect("UPSTREAM_BASE must be set");
    let table = std::env::var("UPSTREAM_TABLE").expect("UPSTREAM_TABLE must be set");
    let view = std::env::var("UPSTREAM_VIEW").ok();
    let public_base_url = std::env::var("PUBLIC_BASE_URL").unwrap_or_default();

    let config = UpstreamConfig::new(&token, &base_id, &table).with_view(view);
    let client = UpstreamClient::new(config).expect("Failed to build upstream client");

    let state = web::Data::new(AppState {
        client,
        cache: UrlCache::new(URL_CACHE_TTL),
        public_base_url,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .route("/", web::get().to(handlers::health))
            .route(
                "/networks.geojson",
                web::get().to(handlers::networks_geojson),
            )
            .route(
                "/img/{record_id}/{index}",
                web::get().to(handlers::photo_redirect),
            )
            .route(
                "/image/{record_id}/{index}",
                web::get().to(handlers::image_redirect),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
