use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            total: Some(total),
        }
    }

    pub fn empty() -> Self {
        Self {
            page: None,
            per_page: None,
            total: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FlashData {
    pub level: FlashLevel,
    pub redirect_to: String,
}

/// One-shot status message delivered with a `303 See Other` back to a listing.
#[derive(Debug, Clone)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
    pub redirect_to: &'static str,
}

impl Flash {
    pub fn success(message: impl Into<String>, redirect_to: &'static str) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
            redirect_to,
        }
    }

    pub fn error(message: impl Into<String>, redirect_to: &'static str) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
            redirect_to,
        }
    }
}

impl IntoResponse for Flash {
    fn into_response(self) -> Response {
        let body = ApiResponse::success(
            self.message,
            FlashData {
                level: self.level,
                redirect_to: self.redirect_to.to_string(),
            },
            Some(Meta::empty()),
        );
        (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, self.redirect_to)],
            Json(body),
        )
            .into_response()
    }
}
