use std::any::Any;
use std::collections::BTreeMap;

use axum::body::Body;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Request;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::QueryRejection;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use service::validation::to_field_map;
use service::ServiceError;

pub const MALFORMED_BODY: &str = "Malformed JSON request or unreadable body.";
pub const VALIDATION_FAILED: &str = "Validation failed for one or more fields";
pub const UNEXPECTED: &str = "An unexpected error occurred. Please contact support if the problem persists.";

/// Wire shape of every error response.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<String, String>>,
}

/// Error returned by handlers and extractors. `detail` is only logged.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
    pub field_errors: Option<BTreeMap<String, String>>,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, message: message.into(), field_errors: None, detail }
    }

    pub fn bad_request(message: impl Into<String>, detail: Option<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED, Some(detail.into()))
    }

    pub fn with_field_errors(mut self, field_errors: BTreeMap<String, String>) -> Self {
        self.field_errors = Some(field_errors);
        self
    }

    fn body(&self) -> ErrorBody {
        ErrorBody {
            timestamp: Utc::now(),
            status: self.status.as_u16(),
            error: reason(self.status),
            message: self.message.clone(),
            path: String::new(),
            field_errors: self.field_errors.clone(),
        }
    }
}

fn reason(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Error").to_string()
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let detail = self.detail.as_deref().unwrap_or_default();
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), message = %self.message, detail, "request failed");
        } else {
            warn!(status = self.status.as_u16(), message = %self.message, detail, "request rejected");
        }
        let body = self.body();
        let mut res = render(self.status, &body);
        // Picked up by `error_envelope` to stamp the request path.
        res.extensions_mut().insert(body);
        res
    }
}

fn render(status: StatusCode, body: &ErrorBody) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))], bytes).into_response(),
        Err(e) => {
            error!(error = %e, "failed to serialize error body");
            status.into_response()
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errors) => {
                Self::bad_request(VALIDATION_FAILED, None).with_field_errors(to_field_map(&errors))
            }
            ServiceError::ProductNotFound(_) | ServiceError::CategoryNotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, e.to_string(), None)
            }
            ServiceError::CategoryAlreadyExists(_) | ServiceError::CategoryInUse(_) => {
                Self::new(StatusCode::CONFLICT, e.to_string(), None)
            }
            ServiceError::InvalidQuery(msg) => Self::bad_request(msg, None),
            ServiceError::Db(detail) => Self::internal(detail),
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        match r {
            JsonRejection::MissingJsonContentType(_) => Self::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Content-Type must be application/json.",
                Some(r.body_text()),
            ),
            other => Self::bad_request(MALFORMED_BODY, Some(other.body_text())),
        }
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self {
        Self::bad_request(format!("Invalid path parameter: {}", r.body_text()), None)
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self {
        Self::bad_request(format!("Invalid query parameter: {r}"), None)
    }
}

/// Startup failures surfaced by `run`.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("migration failed: {0}")]
    Migration(String),
}

/// Router-wide middleware: stamps the request path onto every error body and
/// wraps bare error responses (405 from the router, for instance) in the
/// same envelope.
pub async fn error_envelope(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let method = req.method().clone();
    let mut res = next.run(req).await;

    if let Some(mut body) = res.extensions_mut().remove::<ErrorBody>() {
        body.path = path;
        return replace_body(res, &body);
    }

    let status = res.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return res;
    }
    let message = match status {
        StatusCode::METHOD_NOT_ALLOWED => {
            let allowed = res
                .headers()
                .get(header::ALLOW)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            format!("HTTP method '{method}' is not supported for this endpoint. Supported methods: [{allowed}]")
        }
        StatusCode::NOT_FOUND => format!("No endpoint {method} {path}."),
        s if s.is_server_error() => UNEXPECTED.to_string(),
        s => reason(s),
    };
    if status.is_server_error() {
        error!(status = status.as_u16(), %method, %path, "request failed");
    } else {
        warn!(status = status.as_u16(), %method, %path, "request rejected");
    }
    let body = ErrorBody {
        timestamp: Utc::now(),
        status: status.as_u16(),
        error: reason(status),
        message,
        path,
        field_errors: None,
    };
    replace_body(res, &body)
}

fn replace_body(res: Response, body: &ErrorBody) -> Response {
    let bytes = match serde_json::to_vec(body) {
        Ok(b) => b,
        Err(e) => {
            error!(error = %e, "failed to serialize error body");
            return res;
        }
    };
    let (mut parts, _) = res.into_parts();
    parts.headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}

/// Router fallback for unknown paths.
pub async fn not_found(method: Method, uri: axum::http::Uri) -> JsonApiError {
    JsonApiError::new(StatusCode::NOT_FOUND, format!("No endpoint {method} {}.", uri.path()), None)
}

/// Used by `CatchPanicLayer`; the panic payload is logged, never returned.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    JsonApiError::internal(detail).into_response()
}
