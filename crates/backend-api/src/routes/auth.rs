use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::validate::{missing_fields, text_field};
use crate::{ApiError, AppState};

const LOGIN_REQUIRED_FIELDS: &[&str] = &["email", "password"];

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let missing = missing_fields(LOGIN_REQUIRED_FIELDS, &body);
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(missing));
    }

    let digest = state.hasher().digest(&text_field(&body, "password"));

    // Unknown email and wrong password deliberately collapse to the same
    // response so the endpoint cannot be used to probe for accounts.
    let user = state
        .users()
        .find_by_credentials(&text_field(&body, "email"), &digest)
        .await?
        .ok_or_else(|| ApiError::not_found("invalid credentials"))?;

    let token = state.tokens().issue(&user.public_profile())?;

    Ok(Json(TokenResponse { token }))
}
