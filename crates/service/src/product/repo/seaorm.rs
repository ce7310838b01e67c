use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use tracing::debug;

use models::{category, product};

use crate::errors::ServiceError;
use crate::pagination::Page;
use crate::product::domain::Product;
use crate::product::query::{ProductQuery, ProductSortField};
use crate::product::repository::ProductRepository;
use crate::validation::messages;

/// SeaORM-backed product repository.
#[derive(Clone)]
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn save(&self, p: Product) -> Result<Product, ServiceError> {
        let category = p
            .category
            .clone()
            .ok_or_else(|| ServiceError::invalid_field("category", messages::CATEGORY_EMPTY))?;
        let am = product::ActiveModel {
            id: p.id.map(Set).unwrap_or(NotSet),
            name: Set(p.name.clone()),
            price: Set(p.price),
            category_code: Set(category.code.clone()),
            description: Set(p.description.clone()),
            quantity: Set(p.quantity),
        };
        let missing_category = |e: DbErr| match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => ServiceError::CategoryNotFound(category.code.clone()),
            _ => e.into(),
        };
        let row = match p.id {
            Some(id) => am.update(&self.db).await.map_err(|e| match e {
                DbErr::RecordNotUpdated => ServiceError::ProductNotFound(id),
                other => missing_category(other),
            })?,
            None => am.insert(&self.db).await.map_err(missing_category)?,
        };
        debug!(id = row.id, "product saved");
        Ok(Product {
            id: Some(row.id),
            name: row.name,
            price: row.price,
            category: Some(category),
            description: row.description,
            quantity: row.quantity,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        let row = product::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .one(&self.db)
            .await?;
        Ok(row.map(Product::from))
    }

    async fn find_all(&self, query: &ProductQuery) -> Result<Page<Product>, ServiceError> {
        let mut select = product::Entity::find().find_also_related(category::Entity);
        if let Some(cond) = query.filter.condition() {
            select = select.filter(cond);
        }
        select = select.order_by(query.sort.column(), Order::from(query.direction));
        if query.sort != ProductSortField::Id {
            select = select.order_by(product::Column::Id, Order::Asc);
        }

        let paginator = select.paginate(&self.db, query.page.size);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(query.page.page).await?;
        debug!(total, returned = rows.len(), "product page fetched");
        Ok(Page::new(rows.into_iter().map(Product::from).collect(), total, query.page))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let res = product::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn count_by_category(&self, code: &str) -> Result<u64, ServiceError> {
        let n = product::Entity::find()
            .filter(product::Column::CategoryCode.eq(code))
            .count(&self.db)
            .await?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::repo::SeaOrmCategoryRepository;
    use crate::category::repository::CategoryRepository;
    use crate::category::Category;
    use crate::pagination::{PageRequest, SortDirection};
    use crate::product::ProductFilter;
    use crate::test_support::get_db;
    use rust_decimal::Decimal;

    fn draft(name: &str, price: i64, code: &str) -> Product {
        Product {
            id: None,
            name: name.into(),
            price: Decimal::new(price, 2),
            category: Some(Category::new(code, "Test")),
            description: "integration".into(),
            quantity: 1,
        }
    }

    #[tokio::test]
    async fn crud_and_filtered_paging_against_postgres() {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return; }
        let Ok(db) = get_db().await else { return; };
        let categories = SeaOrmCategoryRepository::new(db.clone());
        let products = SeaOrmProductRepository::new(db);
        let code = format!("T{}", &uuid::Uuid::new_v4().simple().to_string()[..10]);
        categories.insert(Category::new(&code, "Test")).await.unwrap();

        let a = products.save(draft("Alpha widget", 1000, &code)).await.unwrap();
        let b = products.save(draft("Beta widget", 2000, &code)).await.unwrap();
        let c = products.save(draft("Gamma gadget", 3000, &code)).await.unwrap();
        assert_eq!(products.count_by_category(&code).await.unwrap(), 3);

        let query = ProductQuery {
            filter: ProductFilter {
                category_codes: vec![code.clone()],
                name: Some("WIDGET".into()),
                ..Default::default()
            },
            sort: ProductSortField::Price,
            direction: SortDirection::Desc,
            page: PageRequest { page: 0, size: 1 },
        };
        let page = products.find_all(&query).await.unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, b.id);
        assert_eq!(page.items[0].category_code(), Some(code.as_str()));

        let mut renamed = a.clone();
        renamed.name = "Alpha renamed".into();
        products.save(renamed).await.unwrap();
        let found = products.find_by_id(a.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.name, "Alpha renamed");
        assert_eq!(found.category.unwrap().name, "Test");

        for p in [a, b, c] {
            assert!(products.delete_by_id(p.id.unwrap()).await.unwrap());
        }
        assert_eq!(products.count_by_category(&code).await.unwrap(), 0);
        assert!(categories.delete_by_code(&code).await.unwrap());
    }

    #[tokio::test]
    async fn foreign_key_violations_map_to_domain_errors() {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return; }
        let Ok(db) = get_db().await else { return; };
        let categories = SeaOrmCategoryRepository::new(db.clone());
        let products = SeaOrmProductRepository::new(db);
        let code = format!("F{}", &uuid::Uuid::new_v4().simple().to_string()[..10]);

        let err = products.save(draft("Orphan", 100, &code)).await.unwrap_err();
        assert!(matches!(err, ServiceError::CategoryNotFound(c) if c == code));

        categories.insert(Category::new(&code, "Test")).await.unwrap();
        let p = products.save(draft("Held", 100, &code)).await.unwrap();
        assert!(matches!(categories.delete_by_code(&code).await, Err(ServiceError::CategoryInUse(_))));

        assert!(products.delete_by_id(p.id.unwrap()).await.unwrap());
        assert!(categories.delete_by_code(&code).await.unwrap());
    }

    #[tokio::test]
    async fn updating_a_missing_row_is_not_found() {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return; }
        let Ok(db) = get_db().await else { return; };
        let products = SeaOrmProductRepository::new(db);
        let mut ghost = draft("Ghost", 100, "NONE");
        ghost.id = Some(i64::MAX);
        assert!(matches!(products.save(ghost).await, Err(ServiceError::ProductNotFound(_))));
    }
}
