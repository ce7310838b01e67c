use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use service::validation::Validate;

use crate::errors::JsonApiError;

/// JSON body that must also pass `Validate` before the handler runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.check()?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, StatusCode};
    use service::category::CategoryDto;

    fn request(body: &str) -> Request {
        axum::http::Request::post("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_payload() {
        let ValidJson(dto) = ValidJson::<CategoryDto>::from_request(request(r#"{"code":"A","name":"Alpha"}"#), &())
            .await
            .unwrap();
        assert_eq!(dto, CategoryDto::new("A", "Alpha"));
    }

    #[tokio::test]
    async fn rejects_invalid_payload_with_field_errors() {
        let err = ValidJson::<CategoryDto>::from_request(request(r#"{"code":"A"}"#), &()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.field_errors.unwrap().contains_key("name"));
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let err = ValidJson::<CategoryDto>::from_request(request("{not json"), &()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, crate::errors::MALFORMED_BODY);
    }
}
