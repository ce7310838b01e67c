use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Products: category filter and "products by category" lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_products_category_code")
                    .table(Product::Table)
                    .col(Product::CategoryCode)
                    .to_owned(),
            )
            .await?;

        // Products: price range filter
        manager
            .create_index(
                Index::create()
                    .name("idx_products_price")
                    .table(Product::Table)
                    .col(Product::Price)
                    .to_owned(),
            )
            .await?;

        // Categories: listing is always ordered by name
        manager
            .create_index(
                Index::create()
                    .name("idx_categories_name")
                    .table(Category::Table)
                    .col(Category::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_products_category_code").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_products_price").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_categories_name").table(Category::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Product {
    #[sea_orm(iden = "products")]
    Table,
    CategoryCode,
    Price,
}

#[derive(DeriveIden)]
enum Category {
    #[sea_orm(iden = "categories")]
    Table,
    Name,
}
