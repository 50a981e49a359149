//! HTTP handler functions for the network map API.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use network_map_features::{AttachmentKind, attachment_at, build_collection};
use network_map_normalize::pick_attachment_url;

use crate::AppState;
use crate::cache::CacheKey;

/// `GET /`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

/// `GET /networks.geojson`
///
/// Fetches every upstream record and returns the assembled feature
/// collection. Either the whole collection comes back or a single
/// top-level error does; records are only ever omitted for missing
/// geometry, which is policy, not failure.
pub async fn networks_geojson(state: web::Data<AppState>) -> HttpResponse {
    match state.client.list_all_records().await {
        Ok(records) => {
            let collection = build_collection(&records, &state.public_base_url);
            HttpResponse::Ok()
                .insert_header((header::CACHE_CONTROL, "public, max-age=300"))
                .json(collection)
        }
        Err(e) => {
            log::error!("Failed to fetch upstream records: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
    }
}

/// `GET /img/{record_id}/{index}`
pub async fn photo_redirect(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (record_id, index) = path.into_inner();
    resolve_redirect(&state, AttachmentKind::Photo, record_id, &index).await
}

/// `GET /image/{record_id}/{index}`
pub async fn image_redirect(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (record_id, index) = path.into_inner();
    resolve_redirect(&state, AttachmentKind::Image, record_id, &index).await
}

/// Resolves one attachment slot to a redirect.
///
/// Cache hits redirect without touching the upstream; misses fetch the
/// record fresh, pick the best URL for the attachment at that index, and
/// store it with a new TTL before redirecting.
async fn resolve_redirect(
    state: &AppState,
    kind: AttachmentKind,
    record_id: String,
    raw_index: &str,
) -> HttpResponse {
    let Ok(index) = raw_index.parse::<usize>() else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "index must be a non-negative integer"
        }));
    };

    let key = CacheKey {
        kind,
        record_id,
        index,
    };

    if let Some(url) = state.cache.get(&key) {
        return redirect_to(&url);
    }

    let record = match state.client.get_record(&key.record_id).await {
        Ok(record) => record,
        Err(e) if e.is_not_found() => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "record not found"
            }));
        }
        Err(e) => {
            log::error!("Failed to fetch record {}: {e}", key.record_id);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
    };

    let Some(url) = attachment_at(&record, kind, index).and_then(pick_attachment_url) else {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": "no attachment at that index"
        }));
    };

    state.cache.put(key, url.clone());
    redirect_to(&url)
}

fn redirect_to(url: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, url))
        .finish()
}
