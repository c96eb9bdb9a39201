use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

macro_rules! json_response {
    ($status:expr , $json:tt) => {
        ($status, Json(json!($json))).into_response()
    };
}

/// `{"success": false, "message": ...}` with the given status.
pub fn failure_response(status: StatusCode, message: &str) -> Response {
    json_response!(status, {"success": false, "message": message})
}
