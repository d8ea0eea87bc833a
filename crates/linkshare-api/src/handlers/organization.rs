//! Organization membership endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use linkshare_entity::link::ShareLink;
use linkshare_entity::organization::MemberView;
use linkshare_service::UserOrganization;
use linkshare_service::organization::CreateOrganizationInput;

use crate::dto::request::{OrganizationActionRequest, validate};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// GET /api/organization
pub async fn get_organization(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Option<UserOrganization>>>, ApiError> {
    let org = state
        .organization_service
        .get_user_organization(auth.user_id)
        .await?;
    Ok(Json(ApiResponse::ok(org)))
}

/// GET /api/organization/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<MemberView>>>, ApiError> {
    let members = state.organization_service.members(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(members)))
}

/// GET /api/organization/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ShareLink>>>, ApiError> {
    let files = state
        .organization_service
        .organization_files(auth.user_id)
        .await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// POST /api/organization
///
/// Responds with the caller's view of the organization, so the join code is
/// only returned to its admin.
pub async fn organization_action(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<OrganizationActionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Option<UserOrganization>>>), ApiError> {
    let status = match req {
        OrganizationActionRequest::Create(create) => {
            validate(&create)?;
            state
                .organization_service
                .create_organization(
                    auth.user_id,
                    CreateOrganizationInput {
                        name: create.name,
                        description: create.description,
                        max_members: create.max_members,
                    },
                )
                .await?;
            StatusCode::CREATED
        }
        OrganizationActionRequest::Join(join) => {
            validate(&join)?;
            state
                .organization_service
                .join_organization(join.secret_key.trim(), auth.user_id)
                .await?;
            StatusCode::OK
        }
    };

    let org = state
        .organization_service
        .get_user_organization(auth.user_id)
        .await?;
    Ok((status, Json(ApiResponse::ok(org))))
}

/// DELETE /api/organization
pub async fn leave_organization(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .organization_service
        .leave_organization(auth.user_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Left the organization",
    ))))
}
