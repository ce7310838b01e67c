use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::{Query, WithRejection};
use serde::Serialize;
use tracing::info;

use service::pagination::Page;
use service::product::{ProductDto, ProductQueryParams};

use crate::errors::JsonApiError;
use crate::extract::ValidJson;
use crate::state::AppState;

/// Paged listing body: `{content, page: {size, number, totalElements, totalPages}}`.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: PageMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u64,
    pub number: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        let page_meta = PageMetadata {
            size: page.size,
            number: page.page,
            total_elements: page.total_count,
            total_pages: page.total_pages(),
        };
        Self { content: page.items, page: page_meta }
    }
}

#[utoipa::path(
    post, path = "/api/products", tag = "products",
    request_body = crate::openapi::ProductDoc,
    responses(
        (status = 201, description = "Product created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Invalid product input", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Category not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<ProductDto>,
) -> Result<impl IntoResponse, JsonApiError> {
    let created = state.products.create(dto).await?;
    let location = format!("/api/products/{}", created.id.unwrap_or_default());
    info!(%location, "product create request served");
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    get, path = "/api/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = crate::openapi::ProductDoc),
        (status = 404, description = "Product not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, JsonApiError>,
) -> Result<Json<ProductDto>, JsonApiError> {
    Ok(Json(state.products.find_by_id(id).await?))
}

#[utoipa::path(
    get, path = "/api/products", tag = "products",
    params(
        ("page" = Option<u64>, Query, description = "0-based page index (default 0)"),
        ("size" = Option<u64>, Query, description = "Page size (default 10, max 100)"),
        ("sortBy" = Option<String>, Query, description = "id | name | price | quantity | description | category"),
        ("direction" = Option<String>, Query, description = "asc | desc"),
        ("minPrice" = Option<f64>, Query, description = "Inclusive lower price bound"),
        ("maxPrice" = Option<f64>, Query, description = "Inclusive upper price bound"),
        ("categoryCodes" = Option<Vec<String>>, Query, description = "Repeatable or comma separated"),
        ("name" = Option<String>, Query, description = "Case-insensitive substring of the name")
    ),
    responses(
        (status = 200, description = "Products retrieved", body = crate::openapi::ProductPageDoc),
        (status = 400, description = "Invalid query", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ProductQueryParams>, JsonApiError>,
) -> Result<Json<PageResponse<ProductDto>>, JsonApiError> {
    let page = state.products.get_all(params).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    put, path = "/api/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = crate::openapi::ProductDoc,
    responses(
        (status = 200, description = "Product updated", body = crate::openapi::ProductDoc),
        (status = 400, description = "Invalid product input", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Product or category not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, JsonApiError>,
    ValidJson(dto): ValidJson<ProductDto>,
) -> Result<Json<ProductDto>, JsonApiError> {
    Ok(Json(state.products.update(id, dto).await?))
}

#[utoipa::path(
    delete, path = "/api/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, JsonApiError>,
) -> Result<StatusCode, JsonApiError> {
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_response_uses_camel_case_metadata() {
        let page = Page { items: vec![1, 2], total_count: 21, page: 2, size: 10 };
        let json = serde_json::to_value(PageResponse::from(page)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "content": [1, 2],
                "page": {"size": 10, "number": 2, "totalElements": 21, "totalPages": 3}
            })
        );
    }
}
