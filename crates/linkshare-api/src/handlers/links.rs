//! The owner's link management.

use axum::Json;
use axum::extract::{Path, State};

use linkshare_core::types::pagination::PageResponse;
use linkshare_entity::link::ShareLink;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{ApiQuery, AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/links
pub async fn list_links(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ShareLink>>>, ApiError> {
    let page = state
        .share_service
        .list_mine(&auth, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// DELETE /api/links/{link_id}
pub async fn delete_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(link_id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.share_service.delete(&auth, &link_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Link deleted"))))
}
