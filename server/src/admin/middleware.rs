//! Admin authorization middleware.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use super::types::AdminError;
use crate::auth::AuthUser;

/// Middleware that requires the authenticated identity to be staff
/// (teacher or creator). Runs after `require_auth`.
pub async fn require_staff(request: Request, next: Next) -> Result<Response, AdminError> {
    let auth = request
        .extensions()
        .get::<AuthUser>()
        .ok_or(AdminError::NotStaff)?;

    if !auth.role.is_staff() {
        return Err(AdminError::NotStaff);
    }

    Ok(next.run(request).await)
}
