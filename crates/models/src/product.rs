use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::category;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub price: Decimal,
    pub category_code: String,
    pub description: String,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryCode)
                .to(category::Column::Code)
                .into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QuerySelect, QueryTrait};

    #[test]
    fn find_also_related_joins_on_category_code() {
        let sql = Entity::find()
            .find_also_related(category::Entity)
            .limit(1)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#"LEFT JOIN "categories" ON "products"."category_code" = "categories"."code""#), "{sql}");
    }
}
