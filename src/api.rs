//! HTTP handlers, thin collaborators over the asset and record stores.
//!
//! All validation and persistence semantics live in the stores; handlers
//! only move bytes, enforce the boundary payload cap, and shape JSON
//! responses.

use std::io;
use std::path::Path;

use actix_files::NamedFile;
use actix_web::{delete, get, post, web, HttpResponse};
use bytes::BytesMut;
use futures::StreamExt;
use log::{debug, warn};
use serde_json::json;

use crate::app_state::AppState;
use crate::error::ServiceError;
use crate::records::NewReview;

#[get("/")]
pub async fn index() -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open("static/index.html")?)
}

#[get("/test")]
pub async fn test_page() -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open("static/test_upload.html")?)
}

/// Raw-body upload. The original filename travels in the path and is used
/// only to derive the extension; the store assigns the persisted name.
#[post("/upload/{filename}")]
pub async fn upload(
    path: web::Path<String>,
    mut payload: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ServiceError> {
    let original_name = path.into_inner();
    debug!("Upload request for {}", original_name);

    // Boundary enforcement of the size cap: stop reading as soon as the
    // stream exceeds it instead of buffering the whole payload.
    let limit = app_state.config.assets.max_file_size;
    let mut bytes = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            warn!("Error reading upload payload: {}", e);
            ServiceError::Validation("Error reading upload payload".to_string())
        })?;
        if (bytes.len() + chunk.len()) as u64 > limit {
            return Err(ServiceError::PayloadTooLarge { limit });
        }
        bytes.extend_from_slice(&chunk);
    }

    let asset = app_state.asset_store.store(&original_name, &bytes)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Photo uploaded successfully!",
        "filename": asset.filename,
        "url": asset.url(),
    })))
}

/// Catalog listing, newest first. `upload_time` formatting is a
/// presentation concern only, the stores keep full timestamps.
#[get("/photos")]
pub async fn photos(app_state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let assets = app_state.asset_store.list()?;
    let listing: Vec<_> = assets
        .iter()
        .map(|asset| {
            json!({
                "filename": asset.filename,
                "url": asset.url(),
                "upload_time": asset.upload_time.format("%B %d, %Y").to_string(),
                "size": asset.size,
            })
        })
        .collect();
    Ok(HttpResponse::Ok().json(listing))
}

#[get("/uploads/{filename}")]
pub async fn uploaded_file(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<NamedFile, ServiceError> {
    let filename = path.into_inner();
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ServiceError::NotFound(filename));
    }
    let file_path = Path::new(&app_state.config.assets.upload_dir).join(&filename);
    NamedFile::open(file_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ServiceError::NotFound(filename.clone()),
        _ => ServiceError::StorageIo {
            op: "read",
            path: filename.clone(),
            source: e,
        },
    })
}

#[delete("/photos/{filename}")]
pub async fn delete_photo(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ServiceError> {
    let filename = path.into_inner();
    app_state.asset_store.delete(&filename)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Photo deleted successfully!",
    })))
}

#[get("/reviews")]
pub async fn reviews(app_state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let reviews = app_state.record_store.load_all()?;
    Ok(HttpResponse::Ok().json(reviews))
}

#[post("/reviews")]
pub async fn create_review(
    fields: web::Json<NewReview>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ServiceError> {
    let review = app_state.record_store.insert(fields.into_inner())?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "review": review,
    })))
}
