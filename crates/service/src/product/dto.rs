use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::CategoryDto;
use crate::validation::{self, messages, FieldError, Validate};

/// Product payload exchanged with clients. `price` travels as a JSON number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<CategoryDto>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<i32>,
}

impl Validate for ProductDto {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if matches!(self.id, Some(id) if id < 0) {
            errors.push(FieldError::new("id", messages::ID_BAD_VALUE));
        }

        validation::required_text(
            &mut errors,
            "name",
            self.name.as_deref(),
            validation::PRODUCT_NAME_MAX,
            messages::NAME_EMPTY,
            messages::NAME_TOO_LONG,
        );

        match self.price {
            None => errors.push(FieldError::new("price", messages::PRICE_EMPTY)),
            Some(p) if p < validation::product_price_min() => {
                errors.push(FieldError::new("price", messages::PRICE_BAD_VALUE))
            }
            Some(_) => {}
        }

        match &self.category {
            None => errors.push(FieldError::new("category", messages::CATEGORY_EMPTY)),
            Some(c) => validation::required_text(
                &mut errors,
                "category.code",
                c.code.as_deref(),
                validation::CATEGORY_CODE_MAX,
                messages::CATEGORY_EMPTY,
                messages::CATEGORY_TOO_LONG,
            ),
        }

        validation::required_text(
            &mut errors,
            "description",
            self.description.as_deref(),
            validation::PRODUCT_DESCRIPTION_MAX,
            messages::DESCRIPTION_EMPTY,
            messages::DESCRIPTION_TOO_LONG,
        );

        match self.quantity {
            None => errors.push(FieldError::new("quantity", messages::QUANTITY_EMPTY)),
            Some(q) if q < validation::PRODUCT_QUANTITY_MIN => {
                errors.push(FieldError::new("quantity", messages::QUANTITY_BAD_VALUE))
            }
            Some(_) => {}
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProductDto {
        ProductDto {
            id: None,
            name: Some("Laptop".into()),
            price: Some(Decimal::new(99999, 2)),
            category: Some(CategoryDto { code: Some("ELEC".into()), name: None }),
            description: Some("14 inch".into()),
            quantity: Some(5),
        }
    }

    fn fields(dto: &ProductDto) -> Vec<String> {
        dto.validate().into_iter().map(|e| e.field).collect()
    }

    #[test]
    fn valid_payload_has_no_errors() {
        assert!(valid().validate().is_empty());
    }

    #[test]
    fn empty_payload_reports_every_required_field() {
        assert_eq!(
            fields(&ProductDto::default()),
            ["name", "price", "category", "description", "quantity"]
        );
    }

    #[test]
    fn price_below_minimum_is_rejected() {
        let dto = ProductDto { price: Some(Decimal::new(-5, 0)), ..valid() };
        assert_eq!(dto.validate(), vec![FieldError::new("price", messages::PRICE_BAD_VALUE)]);
        let edge = ProductDto { price: Some(Decimal::new(1, 1)), ..valid() };
        assert!(edge.validate().is_empty());
    }

    #[test]
    fn negative_id_and_zero_quantity_are_rejected() {
        let dto = ProductDto { id: Some(-1), quantity: Some(0), ..valid() };
        assert_eq!(fields(&dto), ["id", "quantity"]);
        assert!(ProductDto { id: Some(0), ..valid() }.validate().is_empty());
    }

    #[test]
    fn blank_nested_category_code_is_reported_on_path() {
        let dto = ProductDto { category: Some(CategoryDto { code: Some(" ".into()), name: Some("x".into()) }), ..valid() };
        assert_eq!(dto.validate(), vec![FieldError::new("category.code", messages::CATEGORY_EMPTY)]);
    }

    #[test]
    fn price_round_trips_as_json_number() {
        let dto = ProductDto { price: Some(Decimal::new(125, 1)), ..valid() };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["price"], serde_json::json!(12.5));
        let back: ProductDto = serde_json::from_value(json).unwrap();
        assert_eq!(back.price, Some(Decimal::new(125, 1)));
    }

    #[test]
    fn missing_price_deserializes_to_none() {
        let dto: ProductDto = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert!(dto.price.is_none());
    }
}
