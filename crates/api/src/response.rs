//! Shared response envelope types for API handlers.
//!
//! Every success response carries a human-readable `message`; responses with
//! a payload add `data`. Use these instead of ad-hoc `serde_json::json!`.

use serde::Serialize;

/// `{ "message": "...", "data": T }` envelope.
///
/// ```ignore
/// Ok(Json(DataResponse::new("Plot found.", PlotDto::from(plot))))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub message: String,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// `{ "message": "..." }` envelope for responses without a payload.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
