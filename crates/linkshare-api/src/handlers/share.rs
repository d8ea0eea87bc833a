//! Public share access: metadata, download, and owner preview.

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;

use linkshare_core::error::AppError;
use linkshare_service::access::{LinkMetadata, RequestSource};
use linkshare_service::share::ServedFile;

use crate::dto::request::{DownloadQuery, MetadataQuery};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ApiQuery, MaybeIdentity};
use crate::state::AppState;

/// GET /api/share/{link_id}
pub async fn link_metadata(
    State(state): State<AppState>,
    requester: MaybeIdentity,
    Path(link_id): Path<String>,
    ApiQuery(query): ApiQuery<MetadataQuery>,
) -> Result<Json<ApiResponse<LinkMetadata>>, ApiError> {
    let source = match query.source.as_deref() {
        Some("dashboard") => RequestSource::OwnerDashboard,
        _ => RequestSource::Public,
    };
    let metadata = state
        .share_access
        .metadata(&link_id, requester.identity(), source)
        .await?;
    Ok(Json(ApiResponse::ok(metadata)))
}

/// GET /api/share/{link_id}/download
pub async fn download(
    State(state): State<AppState>,
    requester: MaybeIdentity,
    Path(link_id): Path<String>,
    ApiQuery(query): ApiQuery<DownloadQuery>,
) -> Result<Response, ApiError> {
    let file = state
        .share_access
        .download(&link_id, requester.identity(), query.filename.as_deref())
        .await?;
    Ok(file_response(file)?)
}

/// GET /api/share/{link_id}/preview
pub async fn preview(
    State(state): State<AppState>,
    requester: MaybeIdentity,
    Path(link_id): Path<String>,
) -> Result<Response, ApiError> {
    let file = state
        .share_access
        .preview(&link_id, requester.identity())
        .await?;
    Ok(file_response(file)?)
}

/// Stream a served file with no-store caching headers.
fn file_response(file: ServedFile) -> Result<Response, AppError> {
    let content = file.content;
    let disposition = HeaderValue::from_str(&content.content_disposition)
        .map_err(|e| AppError::internal(format!("Invalid Content-Disposition: {e}")))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content.content_type)
        .header(header::CONTENT_LENGTH, content.content_length)
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(header::CACHE_CONTROL, "no-store, must-revalidate")
        .header(header::PRAGMA, "no-cache")
        .header(header::EXPIRES, "0")
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .body(Body::from_stream(content.stream))
        .map_err(|e| AppError::internal(format!("Failed to build response: {e}")))
}
