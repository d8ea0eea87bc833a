//! Multipart upload creating a share link.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use bytes::Bytes;

use linkshare_core::error::AppError;
use linkshare_service::UploadRequest;
use linkshare_service::share::CreatedLink;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ApiMultipart, AuthUser};
use crate::state::AppState;

/// POST /api/upload
///
/// Fields: `file`, optional `expires_in_hours`, `max_views`, and
/// `share_with_organization`.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiMultipart(mut multipart): ApiMultipart,
) -> Result<(StatusCode, Json<ApiResponse<CreatedLink>>), ApiError> {
    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;
    let mut expires_in_hours: Option<u32> = None;
    let mut max_views: Option<i32> = None;
    let mut share_with_organization = false;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                file_name = field.file_name().map(String::from);
                data = Some(field.bytes().await?);
            }
            "expires_in_hours" => {
                expires_in_hours = Some(parse_field(&text(field).await?, &name)?);
            }
            "max_views" => {
                max_views = Some(parse_field(&text(field).await?, &name)?);
            }
            "share_with_organization" => {
                share_with_organization = matches!(
                    text(field).await?.trim().to_ascii_lowercase().as_str(),
                    "true" | "1" | "on" | "yes"
                );
            }
            _ => {}
        }
    }

    let file_name = file_name.ok_or_else(|| AppError::validation("file is required"))?;
    let data = data.ok_or_else(|| AppError::validation("file data is required"))?;

    let created = state
        .share_service
        .upload(
            &auth,
            UploadRequest {
                file_name,
                data,
                expires_in_hours,
                max_views,
                share_with_organization,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    Ok(field.text().await?)
}

fn parse_field<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid {name}")))
}
