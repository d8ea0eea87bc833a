//! Translation of sqlx failures into application errors.

use linkshare_core::error::{AppError, ErrorKind};

/// Unique constraint guarding organization join codes.
pub(crate) const SECRET_KEY_CONSTRAINT: &str = "organizations_secret_key_key";
/// Unique constraint guarding one organization per user.
pub(crate) const MEMBERSHIP_USER_CONSTRAINT: &str = "memberships_user_id_key";

/// Map a sqlx error, recognising the unique constraints the domain cares about.
///
/// Anything unrecognised is a `Store` failure.
pub(crate) fn map_sqlx(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let constraint = e
            .as_database_error()
            .filter(|d| d.is_unique_violation())
            .map(|d| d.constraint().unwrap_or_default().to_owned());

        match constraint.as_deref() {
            Some(SECRET_KEY_CONSTRAINT) => {
                AppError::with_source(ErrorKind::Conflict, "Secret key already in use", e)
            }
            Some(MEMBERSHIP_USER_CONSTRAINT) => AppError::with_source(
                ErrorKind::AlreadyInOrganization,
                "User already belongs to an organization",
                e,
            ),
            Some(_) => AppError::with_source(ErrorKind::Conflict, context, e),
            None => AppError::with_source(ErrorKind::Store, context, e),
        }
    }
}
