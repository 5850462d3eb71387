use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::models::api_response::ApiResponse;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CustomError {
    #[error("Invalid address: {0}")]
    InvalidAddressError(String),

    #[error("Invalid amount: {0}")]
    InvalidAmountError(String),

    #[error("Token not found: {0}")]
    TokenNotFoundError(String),

    #[error("The native asset cannot be removed")]
    NativeAssetNotRemovableError,

    #[error("No token is pending removal")]
    NoPendingRemovalError,

    #[error("Failed to remove token {address}: {reason}")]
    RemovalFailedError { address: String, reason: String },

    #[error("Buying is not available on chain {0}")]
    BuyNotAllowedError(u64),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Internal server error")]
    InternalServerError,

    #[error("Invalid input: {0}")]
    ValidationError(String),
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    code: u16,
    message: String,
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match self {
            CustomError::InvalidAddressError(_)
            | CustomError::InvalidAmountError(_)
            | CustomError::NativeAssetNotRemovableError
            | CustomError::BuyNotAllowedError(_)
            | CustomError::ValidationError(_) => StatusCode::BAD_REQUEST,
            CustomError::TokenNotFoundError(_) => StatusCode::NOT_FOUND,
            CustomError::NoPendingRemovalError => StatusCode::CONFLICT,
            CustomError::RemovalFailedError { .. } => StatusCode::BAD_GATEWAY,
            CustomError::ConfigError(_) | CustomError::InternalServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let api_error = ApiError {
            code: status.as_u16(),
            message: self.to_string(),
        };

        let response = ApiResponse {
            status: "FAILURE".to_string(),
            code: api_error.code,
            result: None::<()>,
            error: Some(api_error),
        };

        HttpResponse::build(status).json(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn native_removal_is_a_client_error() {
        assert_eq!(
            CustomError::NativeAssetNotRemovableError.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CustomError::NoPendingRemovalError.status_code(),
            StatusCode::CONFLICT
        );
    }

    #[actix_web::test]
    async fn error_response_uses_failure_envelope() {
        let resp = CustomError::TokenNotFoundError("0xabc".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "FAILURE");
        assert_eq!(json["code"], 404);
        assert_eq!(json["error"]["message"], "Token not found: 0xabc");
        assert!(json["result"].is_null());
    }
}
