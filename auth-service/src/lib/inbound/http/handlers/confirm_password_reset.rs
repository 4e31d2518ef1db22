use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::auth::models::ConfirmPasswordResetInput;
use crate::inbound::http::router::AppState;

pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(body): Json<ConfirmPasswordResetRequestBody>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state
        .auth_service
        .confirm_password_reset(ConfirmPasswordResetInput {
            token: body.token,
            new_password: body.new_password,
        })
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new("Password has been reset"),
    ))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ConfirmPasswordResetRequestBody {
    token: String,
    new_password: String,
}
