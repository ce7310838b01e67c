//! SeaORM entities and connection management for the catalog schema.

pub mod errors;
pub mod db;
pub mod category;
pub mod product;
