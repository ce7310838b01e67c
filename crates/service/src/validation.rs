//! Field validation rules shared by the product and category payloads.
//!
//! Limits match the column sizes declared in the `migration` crate.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::ServiceError;

pub const PRODUCT_NAME_MAX: usize = 100;
pub const PRODUCT_DESCRIPTION_MAX: usize = 1000;
pub const CATEGORY_CODE_MAX: usize = 50;
pub const CATEGORY_NAME_MAX: usize = 100;
pub const PRODUCT_QUANTITY_MIN: i32 = 1;

/// Smallest accepted product price (0.1).
pub fn product_price_min() -> Decimal { Decimal::new(1, 1) }

/// Message catalog returned to clients in `fieldErrors`.
pub mod messages {
    pub const ID_BAD_VALUE: &str = "Id of a product must be strictly positive integer";
    pub const NAME_EMPTY: &str = "Name of a product cannot be null or empty";
    pub const NAME_TOO_LONG: &str = "Name of a product must be at most 100 characters";
    pub const PRICE_EMPTY: &str = "Price of a product cannot be null or empty";
    pub const PRICE_BAD_VALUE: &str = "Price of a product must be positive decimal";
    pub const CATEGORY_EMPTY: &str = "Category of a product cannot be null or empty";
    pub const CATEGORY_TOO_LONG: &str = "Category of a product must be at most 50 characters";
    pub const DESCRIPTION_EMPTY: &str = "Description of a product cannot be null or empty";
    pub const DESCRIPTION_TOO_LONG: &str = "Description of a product must be at most 1000 characters";
    pub const QUANTITY_EMPTY: &str = "Quantity of a product cannot be null or empty";
    pub const QUANTITY_BAD_VALUE: &str = "Quantity of a product must be strictly positive integer";

    pub const CATEGORY_CODE_EMPTY: &str = "Code of a category cannot be null or empty";
    pub const CATEGORY_CODE_TOO_LONG: &str = "Code of a category must be at most 50 characters";
    pub const CATEGORY_NAME_EMPTY: &str = "Name of a category cannot be null or empty";
    pub const CATEGORY_NAME_TOO_LONG: &str = "Name of a category must be at most 100 characters";
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Collapse errors into `field -> message`; the first message per field wins.
pub fn to_field_map(errors: &[FieldError]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for e in errors {
        map.entry(e.field.clone()).or_insert_with(|| e.message.clone());
    }
    map
}

/// Implemented by every inbound payload.
pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;

    fn check(&self) -> Result<(), ServiceError> {
        let errors = self.validate();
        if errors.is_empty() { Ok(()) } else { Err(ServiceError::Validation(errors)) }
    }
}

/// Required text: present, not blank, at most `max` characters.
pub fn required_text(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<&str>,
    max: usize,
    empty_msg: &str,
    too_long_msg: &str,
) {
    match value {
        Some(v) if !v.trim().is_empty() => {
            if v.chars().count() > max {
                errors.push(FieldError::new(field, too_long_msg));
            }
        }
        _ => errors.push(FieldError::new(field, empty_msg)),
    }
}
