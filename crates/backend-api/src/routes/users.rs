use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::validate::{missing_fields, text_field};
use crate::{ApiError, AppState};
use accountd_database::{NewUser, PublicProfile};

/// Required create fields, in the order missing-field errors report them.
const CREATE_REQUIRED_FIELDS: &[&str] = &[
    "name",
    "email",
    "address",
    "phone",
    "password",
    "confirm_password",
];

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: String,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let missing = missing_fields(CREATE_REQUIRED_FIELDS, &body);
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(missing));
    }

    let password = text_field(&body, "password");
    if password != text_field(&body, "confirm_password") {
        return Err(ApiError::bad_request("passwords doesn't match"));
    }

    let new_user = NewUser {
        name: text_field(&body, "name"),
        email: text_field(&body, "email"),
        address: text_field(&body, "address"),
        phone: text_field(&body, "phone"),
        password: state.hasher().digest(&password),
    };

    let user = state.users().create(&new_user).await?;
    info!(id = user.id, "user created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: "user created".to_string(),
        }),
    ))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<PublicProfile>, ApiError> {
    let user = state
        .users()
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("user with ID {user_id} doesn't exist")))?;

    Ok(Json(user.public_profile()))
}
