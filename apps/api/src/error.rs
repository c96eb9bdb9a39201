use std::any::Any;

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{helpers::failure_response, jikan::JikanError};

pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong!";

#[derive(Debug, Error)]
pub enum AppError {
    /// Caller sent something unusable. The message is shown as-is.
    #[error("{0}")]
    BadRequest(String),

    /// The anime API call failed. Only `message` reaches the caller.
    #[error("{message}: {source}")]
    Upstream {
        message: &'static str,
        #[source]
        source: JikanError,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// For `map_err`: tags an upstream failure with the message the caller sees.
    pub fn upstream(message: &'static str) -> impl FnOnce(JikanError) -> Self {
        move |source| Self::Upstream { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => {
                tracing::debug!("Rejected request: {}", message);
                failure_response(StatusCode::BAD_REQUEST, &message)
            }
            AppError::Upstream { message, source } => {
                tracing::error!(error = %source, "{}", message);
                failure_response(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "Unhandled error");
                failure_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Query rejected: {}", rejection.body_text());
        Self::bad_request("Invalid query parameters")
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Path rejected: {}", rejection.body_text());
        Self::bad_request("Invalid path parameters")
    }
}

/// Response for a handler that panicked. Used with `CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = detail, "Request handler panicked");

    failure_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, routing::get, Router};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn upstream_errors_hide_the_source() {
        let err = AppError::upstream("Failed to fetch anime details")(JikanError::Api {
            status: 500,
            message: "database exploded at node 7".to_string(),
        });

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "message": "Failed to fetch anime details" })
        );
    }

    #[tokio::test]
    async fn bad_requests_are_client_errors() {
        let response = AppError::bad_request("Query parameter required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "message": "Query parameter required" })
        );
    }

    #[tokio::test]
    async fn internal_errors_use_the_generic_message() {
        let response = AppError::from(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "message": INTERNAL_ERROR_MESSAGE })
        );
    }

    #[tokio::test]
    async fn panics_become_the_failure_envelope() {
        async fn boom() -> &'static str {
            panic!("handler blew up")
        }

        let app: Router = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(handle_panic));

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "message": "Something went wrong!" })
        );
    }
}
