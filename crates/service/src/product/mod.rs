//! Product aggregate: domain, payload, mapping, query parsing, filtering,
//! persistence and service.

pub mod domain;
pub mod dto;
pub mod mapper;
pub mod query;
pub mod specification;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::Product;
pub use dto::ProductDto;
pub use query::{ProductQuery, ProductQueryParams, ProductSortField};
pub use service::ProductService;
pub use specification::ProductFilter;
