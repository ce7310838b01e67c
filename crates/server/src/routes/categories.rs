use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;

use service::category::CategoryDto;

use crate::errors::JsonApiError;
use crate::extract::ValidJson;
use crate::state::AppState;

#[utoipa::path(
    post, path = "/api/categories", tag = "categories",
    request_body = crate::openapi::CategoryDoc,
    responses(
        (status = 201, description = "Category created", body = crate::openapi::CategoryDoc),
        (status = 400, description = "Invalid category input", body = crate::openapi::ErrorBodyDoc),
        (status = 409, description = "Code already exists", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<CategoryDto>,
) -> Result<impl IntoResponse, JsonApiError> {
    let created = state.categories.create(dto).await?;
    let location = format!("/api/categories/{}", created.code.as_deref().unwrap_or_default());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    get, path = "/api/categories", tag = "categories",
    responses((status = 200, description = "All categories ordered by name", body = [crate::openapi::CategoryDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategoryDto>>, JsonApiError> {
    Ok(Json(state.categories.get_all().await?))
}

#[utoipa::path(
    get, path = "/api/categories/{code}", tag = "categories",
    params(("code" = String, Path, description = "Category code")),
    responses(
        (status = 200, description = "Category found", body = crate::openapi::CategoryDoc),
        (status = 404, description = "Category not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    WithRejection(Path(code), _): WithRejection<Path<String>, JsonApiError>,
) -> Result<Json<CategoryDto>, JsonApiError> {
    Ok(Json(state.categories.find_by_code(&code).await?))
}

#[utoipa::path(
    put, path = "/api/categories/{code}", tag = "categories",
    params(("code" = String, Path, description = "Category code")),
    request_body = crate::openapi::CategoryDoc,
    responses(
        (status = 200, description = "Category updated", body = crate::openapi::CategoryDoc),
        (status = 400, description = "Invalid category input", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Category not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    WithRejection(Path(code), _): WithRejection<Path<String>, JsonApiError>,
    ValidJson(dto): ValidJson<CategoryDto>,
) -> Result<Json<CategoryDto>, JsonApiError> {
    Ok(Json(state.categories.update(&code, dto).await?))
}

#[utoipa::path(
    delete, path = "/api/categories/{code}", tag = "categories",
    params(("code" = String, Path, description = "Category code")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found", body = crate::openapi::ErrorBodyDoc),
        (status = 409, description = "Category still referenced by products", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    WithRejection(Path(code), _): WithRejection<Path<String>, JsonApiError>,
) -> Result<StatusCode, JsonApiError> {
    state.categories.delete(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}
