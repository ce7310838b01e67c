use rust_decimal::Decimal;

use crate::category::Category;

/// A catalog product. `id` is `None` until the store assigns one.
#[derive(Debug, Clone, Default)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub price: Decimal,
    pub category: Option<Category>,
    pub description: String,
    pub quantity: i32,
}

impl Product {
    pub fn category_code(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.code.as_str())
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => {
                self.id == other.id
                    && self.name == other.name
                    && self.price == other.price
                    && self.category == other.category
                    && self.description == other.description
                    && self.quantity == other.quantity
            }
        }
    }
}

impl From<(models::product::Model, Option<models::category::Model>)> for Product {
    fn from((row, category): (models::product::Model, Option<models::category::Model>)) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
            price: row.price,
            category: category.map(Category::from),
            description: row.description,
            quantity: row.quantity,
        }
    }
}
