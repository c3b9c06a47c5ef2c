use crate::errors::{ApiError, ErrorResponse, SessionError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    BadGateway(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(msg) => {
                HttpError::ServiceUnavailable(format!("Backend unreachable: {msg}"))
            }
            ApiError::Unauthorized => {
                HttpError::Unauthorized("Session expired, please log in again".into())
            }
            ApiError::Forbidden(msg) => HttpError::Forbidden(msg),
            ApiError::NotFound => HttpError::NotFound("Not found".into()),
            ApiError::Validation(msg) => HttpError::BadRequest(msg),
            ApiError::Status { code, message } => {
                HttpError::BadGateway(format!("Backend returned {code}: {message}"))
            }
            ApiError::Decode(msg) => HttpError::BadGateway(format!("Malformed backend response: {msg}")),
            ApiError::InvalidUrl(msg) => HttpError::Internal(msg),
        }
    }
}

impl From<SessionError> for HttpError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => {
                HttpError::Unauthorized("Invalid credentials".into())
            }
            SessionError::Expired | SessionError::NotAuthenticated => {
                HttpError::Unauthorized("You are not logged in".into())
            }
            SessionError::Api(api) => api.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            HttpError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            HttpError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
        });

        (status, body).into_response()
    }
}
