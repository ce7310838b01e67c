//! Create `products` table.
//! Each product belongs to exactly one category; deleting a referenced
//! category is rejected by the FK.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Product::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Product::Name, 100).not_null())
                    .col(decimal_len(Product::Price, 19, 2).not_null())
                    .col(string_len(Product::CategoryCode, 50).not_null())
                    .col(string_len(Product::Description, 1000).not_null())
                    .col(integer(Product::Quantity).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_category")
                            .from(Product::Table, Product::CategoryCode)
                            .to(Category::Table, Category::Code)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product {
    #[sea_orm(iden = "products")]
    Table,
    Id,
    Name,
    Price,
    CategoryCode,
    Description,
    Quantity,
}

#[derive(DeriveIden)]
enum Category {
    #[sea_orm(iden = "categories")]
    Table,
    Code,
}
