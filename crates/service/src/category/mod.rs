//! Category aggregate: domain, payload, mapping, persistence and service.

pub mod domain;
pub mod dto;
pub mod mapper;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::Category;
pub use dto::CategoryDto;
pub use service::CategoryService;
