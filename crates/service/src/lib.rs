//! Service layer for the product catalog.
//! - Validation, mapping and business rules live here, independent of HTTP.
//! - Persistence sits behind repository traits with SeaORM and in-memory
//!   implementations.

pub mod errors;
pub mod pagination;
pub mod validation;
pub mod category;
pub mod product;
pub mod memory;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
