//! Product <-> `ProductDto` conversion.

use super::{Product, ProductDto};
use crate::category::{mapper as category_mapper, CategoryDto};

/// Never copies `id`; the store or the service assigns it.
impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Self {
            id: None,
            name: dto.name.unwrap_or_default(),
            price: dto.price.unwrap_or_default(),
            category: category_mapper::to_entity(dto.category),
            description: dto.description.unwrap_or_default(),
            quantity: dto.quantity.unwrap_or_default(),
        }
    }
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: Some(p.name),
            price: Some(p.price),
            category: p.category.map(CategoryDto::from),
            description: Some(p.description),
            quantity: Some(p.quantity),
        }
    }
}

pub fn to_entity(dto: Option<ProductDto>) -> Option<Product> { dto.map(Product::from) }

pub fn to_dto(entity: Option<Product>) -> Option<ProductDto> { entity.map(ProductDto::from) }

pub fn to_dto_list(entities: Option<Vec<Product>>) -> Vec<ProductDto> {
    entities.into_iter().flatten().map(ProductDto::from).collect()
}

pub fn to_entity_list(dtos: Option<Vec<ProductDto>>) -> Vec<Product> {
    dtos.into_iter().flatten().map(Product::from).collect()
}
