use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

use crate::errors::ApiError;

/// Envelope shared by every `/api/v1` response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub code: u16,
    pub result: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(code: StatusCode, result: T) -> Self {
        Self {
            status: "SUCCESS".to_string(),
            code: code.as_u16(),
            result: Some(result),
            error: None,
        }
    }
}

pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(StatusCode::OK, data))
}

/// Used when the request kicked off work that finishes after the response.
pub fn accepted_response<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Accepted().json(ApiResponse::success(StatusCode::ACCEPTED, data))
}
