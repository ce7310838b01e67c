use async_trait::async_trait;

use super::domain::Category;
use crate::errors::ServiceError;

/// Persistence contract for categories, keyed by `code`.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a new row. An existing code is `CategoryAlreadyExists`.
    async fn insert(&self, category: Category) -> Result<Category, ServiceError>;
    /// Replace the name of an existing row. A missing code is `CategoryNotFound`.
    async fn update(&self, category: Category) -> Result<Category, ServiceError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Category>, ServiceError>;
    async fn find_all_ordered_by_name(&self) -> Result<Vec<Category>, ServiceError>;
    /// Returns true if a row was removed. A referenced row is `CategoryInUse`.
    async fn delete_by_code(&self, code: &str) -> Result<bool, ServiceError>;
}
