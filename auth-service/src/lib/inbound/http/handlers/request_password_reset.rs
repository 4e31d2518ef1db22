use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::auth::models::PasswordResetInput;
use crate::inbound::http::router::AppState;

pub const PASSWORD_RESET_REQUESTED_MESSAGE: &str =
    "If the email exists, a password reset link has been sent";

pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<PasswordResetRequestBody>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let issued = state
        .auth_service
        .request_password_reset(PasswordResetInput { email: body.email })
        .await?;

    // TODO: hand the issued token to a mail sender once one is wired in.
    if let Some(issued) = issued {
        tracing::info!(
            user_id = %issued.user_id,
            expires_at = %issued.expires_at,
            "Password reset token ready for delivery"
        );
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new(PASSWORD_RESET_REQUESTED_MESSAGE),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PasswordResetRequestBody {
    email: String,
}
