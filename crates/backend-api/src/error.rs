use accountd_auth::AuthError;
use accountd_database::UserError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub fields: Option<Vec<String>>,
    pub info: Option<Vec<String>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            fields: None,
            info: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// 400 listing every missing required field, in declaration order.
    pub fn missing_fields(fields: Vec<String>) -> Self {
        Self {
            fields: Some(fields),
            ..Self::bad_request("missing required fields")
        }
    }

    /// 400 with one human-readable message per conflicting unique field.
    pub fn duplicated_info(info: Vec<String>) -> Self {
        Self {
            info: Some(info),
            ..Self::bad_request("duplicated info error")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            fields: self.fields,
            info: self.info,
        });
        (self.status, body).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::Duplicate(fields) => Self::duplicated_info(
                fields
                    .iter()
                    .map(|field| format!("user with this {field} already exists"))
                    .collect(),
            ),
            UserError::Database(message) => {
                error!(%message, "database error");
                Self::internal_server_error("internal error")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        error!(error = ?error, "auth error");
        Self::internal_server_error("internal error")
    }
}
