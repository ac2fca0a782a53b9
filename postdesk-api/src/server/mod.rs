use axum::{
    Router,
    extract::{
        FromRef, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use json::Json;
use postdesk_db::client::DbClient;
use postdesk_service::{CustomerService, PostService, ServiceError};
use serde::{Deserialize, Serialize};
use std::{any::Any, sync::Arc};
use thiserror::Error;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::error;

mod json;
mod routes;

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, Debug, FromRef)]
pub struct ServerState {
    pub customers: Arc<CustomerService>,
    pub posts: Arc<PostService>,
}

impl ServerState {
    #[must_use]
    pub fn new(db: &DbClient) -> Self {
        Self {
            customers: Arc::new(CustomerService::new(db)),
            posts: Arc::new(PostService::new(db)),
        }
    }
}

pub fn routes() -> ServerRouter {
    routes::routes()
        .fallback(fallback)
        .method_not_allowed_fallback(method_not_allowed)
}

/// The complete application: routes, request tracing, and the panic boundary.
pub fn app(state: ServerState) -> Router {
    routes()
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub async fn method_not_allowed(request: Request) -> ServerError {
    let (parts, _) = request.into_parts();
    ServerError::MethodNotAllowed(parts.method, parts.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Method {0} is not supported on {1}")]
    MethodNotAllowed(Method, Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Incoming JSON rejected: {0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("JSON response could not be serialized: {0}")]
    JsonResponse(#[from] serde_json::Error),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_) => StatusCode::NOT_FOUND,
            ServerError::MethodNotAllowed(..) => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::PathRejection(_) => StatusCode::BAD_REQUEST,
            ServerError::JsonRejection(rejection) => rejection.status(),
            // Business rule violations are not distinguished from internal failures.
            ServerError::JsonResponse(_) | ServerError::Service(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        error!(error = %self, %status, "Replying with error");

        let error_response = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(error_response)).into_response()
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "Request handler panicked".to_owned()
    };

    error!(%message, "Request handler panicked");

    let error_response = ErrorResponse { error: message };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)).into_response()
}

#[cfg(test)]
mod tests {
    use crate::server::panic_response;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::panic::panic_any;
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    async fn panicking(handler_path: &str) -> (StatusCode, Value) {
        let app = Router::new()
            .route(
                "/str",
                get(async || -> () {
                    panic!("boom");
                }),
            )
            .route(
                "/string",
                get(async || -> () {
                    let code = 42;
                    panic!("boom {code}");
                }),
            )
            .route(
                "/other",
                get(async || -> () {
                    panic_any(17_u32);
                }),
            )
            .layer(CatchPanicLayer::custom(panic_response));

        let request = Request::builder()
            .uri(handler_path)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn str_panic_becomes_500() {
        let (status, body) = panicking("/str").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "boom" }));
    }

    #[tokio::test]
    async fn formatted_panic_becomes_500() {
        let (status, body) = panicking("/string").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "boom 42" }));
    }

    #[tokio::test]
    async fn opaque_panic_payload_gets_generic_message() {
        let (status, body) = panicking("/other").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Request handler panicked" }));
    }
}
