//! Category <-> `CategoryDto` conversion. Absent input maps to absent output.

use super::{Category, CategoryDto};

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Self {
            code: dto.code.unwrap_or_default(),
            name: dto.name.unwrap_or_default(),
        }
    }
}

impl From<Category> for CategoryDto {
    fn from(entity: Category) -> Self {
        Self { code: Some(entity.code), name: Some(entity.name) }
    }
}

pub fn to_entity(dto: Option<CategoryDto>) -> Option<Category> { dto.map(Category::from) }

pub fn to_dto(entity: Option<Category>) -> Option<CategoryDto> { entity.map(CategoryDto::from) }

pub fn to_dto_list(entities: Option<Vec<Category>>) -> Vec<CategoryDto> {
    entities.into_iter().flatten().map(CategoryDto::from).collect()
}

pub fn to_entity_list(dtos: Option<Vec<CategoryDto>>) -> Vec<Category> {
    dtos.into_iter().flatten().map(Category::from).collect()
}
