use thiserror::Error;

use crate::validation::FieldError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed for one or more fields")]
    Validation(Vec<FieldError>),
    #[error("Product not found with id {0}")]
    ProductNotFound(i64),
    #[error("Category not found with code {0}")]
    CategoryNotFound(String),
    #[error("Category already exists with code {0}")]
    CategoryAlreadyExists(String),
    #[error("Category {0} is still referenced by products")]
    CategoryInUse(String),
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn invalid_field(field: &str, message: &str) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}
