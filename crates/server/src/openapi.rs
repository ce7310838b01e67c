use std::collections::BTreeMap;

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CategoryDoc {
    #[schema(example = "ELEC", max_length = 50)]
    pub code: String,
    #[schema(example = "Electronics", max_length = 100)]
    pub name: String,
}

#[derive(ToSchema)]
pub struct ProductDoc {
    /// Assigned by the server; ignored on input.
    pub id: Option<i64>,
    #[schema(example = "Laptop", max_length = 100)]
    pub name: String,
    #[schema(example = 999.99, minimum = 0.1)]
    pub price: f64,
    pub category: CategoryDoc,
    #[schema(example = "14 inch ultrabook", max_length = 1000)]
    pub description: String,
    #[schema(example = 3, minimum = 1)]
    pub quantity: i32,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PageMetadataDoc {
    pub size: u64,
    pub number: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

#[derive(ToSchema)]
pub struct ProductPageDoc {
    pub content: Vec<ProductDoc>,
    pub page: PageMetadataDoc,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ErrorBodyDoc {
    pub timestamp: String,
    #[schema(example = 400)]
    pub status: u16,
    #[schema(example = "Bad Request")]
    pub error: String,
    pub message: String,
    #[schema(example = "/api/products")]
    pub path: String,
    pub field_errors: Option<BTreeMap<String, String>>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Product Catalog API", description = "CRUD, filtering and paging for products and categories"),
    paths(
        crate::routes::health,
        crate::routes::products::create,
        crate::routes::products::get,
        crate::routes::products::list,
        crate::routes::products::update,
        crate::routes::products::delete,
        crate::routes::categories::create,
        crate::routes::categories::list,
        crate::routes::categories::get,
        crate::routes::categories::update,
        crate::routes::categories::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CategoryDoc,
            ProductDoc,
            PageMetadataDoc,
            ProductPageDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products", description = "CRUD operations for products"),
        (name = "categories", description = "CRUD operations for categories")
    )
)]
pub struct ApiDoc;
