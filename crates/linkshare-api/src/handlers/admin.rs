//! Platform administration.

use axum::Json;
use axum::extract::State;

use linkshare_entity::link::LinkStats;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<LinkStats>>, ApiError> {
    let stats = state.share_service.stats(&auth).await?;
    Ok(Json(ApiResponse::ok(stats)))
}
