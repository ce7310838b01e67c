use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set, SqlErr, Unchanged};
use tracing::debug;

use models::category;

use crate::category::domain::Category;
use crate::category::repository::CategoryRepository;
use crate::errors::ServiceError;

/// SeaORM-backed category repository.
#[derive(Clone)]
pub struct SeaOrmCategoryRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn insert(&self, c: Category) -> Result<Category, ServiceError> {
        let am = category::ActiveModel { code: Set(c.code.clone()), name: Set(c.name.clone()) };
        category::Entity::insert(am).exec_without_returning(&self.db).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::CategoryAlreadyExists(c.code.clone()),
                _ => e.into(),
            }
        })?;
        debug!(code = %c.code, "category inserted");
        Ok(c)
    }

    async fn update(&self, c: Category) -> Result<Category, ServiceError> {
        let am = category::ActiveModel { code: Unchanged(c.code.clone()), name: Set(c.name.clone()) };
        let row = am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ServiceError::CategoryNotFound(c.code.clone()),
            other => other.into(),
        })?;
        debug!(code = %row.code, "category updated");
        Ok(Category::from(row))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Category>, ServiceError> {
        let row = category::Entity::find_by_id(code.to_string()).one(&self.db).await?;
        Ok(row.map(Category::from))
    }

    async fn find_all_ordered_by_name(&self) -> Result<Vec<Category>, ServiceError> {
        let rows = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .order_by_asc(category::Column::Code)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, ServiceError> {
        let res = category::Entity::delete_by_id(code.to_string()).exec(&self.db).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => ServiceError::CategoryInUse(code.to_string()),
                _ => e.into(),
            }
        })?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn unique_code(prefix: &str) -> String {
        format!("{prefix}-{}", &uuid::Uuid::new_v4().simple().to_string()[..12])
    }

    fn mock_repo(db: MockDatabase) -> SeaOrmCategoryRepository {
        SeaOrmCategoryRepository::new(db.into_connection())
    }

    #[tokio::test]
    async fn update_of_vanished_row_is_not_found() {
        // UPDATE .. RETURNING matched nothing
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([Vec::<category::Model>::new()]);
        let err = mock_repo(db).update(Category::new("GONE", "Name")).await.unwrap_err();
        assert!(matches!(err, ServiceError::CategoryNotFound(code) if code == "GONE"));
    }

    #[tokio::test]
    async fn update_returns_the_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![category::Model { code: "MISC".into(), name: "Renamed".into() }]]);
        let updated = mock_repo(db).update(Category::new("MISC", "Renamed")).await.unwrap();
        assert_eq!(updated.name, "Renamed");
    }

    #[tokio::test]
    async fn insert_and_update_never_resurrect_rows() {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return; }
        let Ok(db) = get_db().await else { return; };
        let repo = SeaOrmCategoryRepository::new(db);
        let code = unique_code("CAT");

        assert!(matches!(repo.update(Category::new(&code, "Ghost")).await, Err(ServiceError::CategoryNotFound(_))));
        assert!(repo.find_by_code(&code).await.unwrap().is_none());

        repo.insert(Category::new(&code, "First")).await.unwrap();
        assert!(matches!(
            repo.insert(Category::new(&code, "Again")).await,
            Err(ServiceError::CategoryAlreadyExists(_))
        ));
        repo.update(Category::new(&code, "Second")).await.unwrap();
        let found = repo.find_by_code(&code).await.unwrap().unwrap();
        assert_eq!(found.name, "Second");

        assert!(repo.find_all_ordered_by_name().await.unwrap().iter().any(|c| c.code == code));
        assert!(repo.delete_by_code(&code).await.unwrap());
        assert!(!repo.delete_by_code(&code).await.unwrap());
        assert!(repo.find_by_code(&code).await.unwrap().is_none());
    }
}
