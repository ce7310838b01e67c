use async_trait::async_trait;

use super::domain::Product;
use super::query::ProductQuery;
use crate::errors::ServiceError;
use crate::pagination::Page;

/// Persistence contract for products. Reads return the product joined with
/// its category.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert when `id` is `None`, otherwise replace the row with that id.
    async fn save(&self, product: Product) -> Result<Product, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError>;
    /// Filter, sort and paginate in one pass.
    async fn find_all(&self, query: &ProductQuery) -> Result<Page<Product>, ServiceError>;
    /// Returns true if a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn count_by_category(&self, code: &str) -> Result<u64, ServiceError>;
}
