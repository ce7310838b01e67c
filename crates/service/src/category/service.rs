use std::sync::Arc;

use tracing::{info, instrument};

use super::dto::CategoryDto;
use super::mapper;
use super::repository::CategoryRepository;
use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;
use crate::validation::Validate;

/// Category use cases.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { categories, products }
    }

    /// Create a category. Codes are unique.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::category::{CategoryDto, CategoryService};
    /// use service::memory::InMemoryStore;
    /// let store = Arc::new(InMemoryStore::default());
    /// let svc = CategoryService::new(store.clone(), store);
    /// let created = tokio_test::block_on(svc.create(CategoryDto::new("MISC", "Miscellaneous"))).unwrap();
    /// assert_eq!(created.code.as_deref(), Some("MISC"));
    /// assert!(tokio_test::block_on(svc.create(CategoryDto::new("MISC", "Other"))).is_err());
    /// ```
    #[instrument(skip(self, dto), fields(code = ?dto.code))]
    pub async fn create(&self, dto: CategoryDto) -> Result<CategoryDto, ServiceError> {
        dto.check()?;
        let entity: super::Category = dto.into();
        if self.categories.find_by_code(&entity.code).await?.is_some() {
            return Err(ServiceError::CategoryAlreadyExists(entity.code));
        }
        let saved = self.categories.insert(entity).await?;
        info!(code = %saved.code, "category_created");
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn find_by_code(&self, code: &str) -> Result<CategoryDto, ServiceError> {
        self.categories
            .find_by_code(code)
            .await?
            .map(CategoryDto::from)
            .ok_or_else(|| ServiceError::CategoryNotFound(code.to_string()))
    }

    /// All categories, ordered by name.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<CategoryDto>, ServiceError> {
        let all = self.categories.find_all_ordered_by_name().await?;
        Ok(mapper::to_dto_list(Some(all)))
    }

    /// Replace the name of an existing category. The code in `dto` is ignored.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::category::{CategoryDto, CategoryService};
    /// use service::memory::InMemoryStore;
    /// let store = Arc::new(InMemoryStore::default());
    /// let svc = CategoryService::new(store.clone(), store);
    /// tokio_test::block_on(svc.create(CategoryDto::new("MISC", "Miscellaneous"))).unwrap();
    /// let updated = tokio_test::block_on(svc.update("MISC", CategoryDto::new("OTHER", "Misc Items"))).unwrap();
    /// assert_eq!(updated, CategoryDto::new("MISC", "Misc Items"));
    /// ```
    #[instrument(skip(self, dto))]
    pub async fn update(&self, code: &str, dto: CategoryDto) -> Result<CategoryDto, ServiceError> {
        dto.check()?;
        if self.categories.find_by_code(code).await?.is_none() {
            return Err(ServiceError::CategoryNotFound(code.to_string()));
        }
        let mut entity: super::Category = dto.into();
        entity.code = code.to_string();
        let saved = self.categories.update(entity).await?;
        info!(code = %saved.code, "category_updated");
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, code: &str) -> Result<(), ServiceError> {
        if self.categories.find_by_code(code).await?.is_none() {
            return Err(ServiceError::CategoryNotFound(code.to_string()));
        }
        let referencing = self.products.count_by_category(code).await?;
        if referencing > 0 {
            return Err(ServiceError::CategoryInUse(code.to_string()));
        }
        if !self.categories.delete_by_code(code).await? {
            return Err(ServiceError::CategoryNotFound(code.to_string()));
        }
        info!(code, "category_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::memory::InMemoryStore;
    use crate::product::{ProductDto, ProductService};
    use async_trait::async_trait;
    use rust_decimal::Decimal;

    /// Reports every code as present, as if a delete lands right after the lookup.
    struct DeletedAfterLookup(InMemoryStore);

    #[async_trait]
    impl CategoryRepository for DeletedAfterLookup {
        async fn insert(&self, c: Category) -> Result<Category, ServiceError> { self.0.insert(c).await }
        async fn update(&self, c: Category) -> Result<Category, ServiceError> { self.0.update(c).await }
        async fn find_by_code(&self, code: &str) -> Result<Option<Category>, ServiceError> {
            Ok(Some(Category::new(code, "stale")))
        }
        async fn find_all_ordered_by_name(&self) -> Result<Vec<Category>, ServiceError> {
            self.0.find_all_ordered_by_name().await
        }
        async fn delete_by_code(&self, code: &str) -> Result<bool, ServiceError> { self.0.delete_by_code(code).await }
    }

    fn services() -> (CategoryService, ProductService) {
        let store = Arc::new(InMemoryStore::default());
        (
            CategoryService::new(store.clone(), store.clone()),
            ProductService::new(store.clone(), store),
        )
    }

    #[tokio::test]
    async fn get_all_orders_by_name() {
        let (svc, _) = services();
        svc.create(CategoryDto::new("Z", "Alpha")).await.unwrap();
        svc.create(CategoryDto::new("A", "Zulu")).await.unwrap();
        let names: Vec<_> = svc.get_all().await.unwrap().into_iter().filter_map(|c| c.name).collect();
        assert_eq!(names, ["Alpha", "Zulu"]);
    }

    #[tokio::test]
    async fn duplicate_code_conflicts() {
        let (svc, _) = services();
        svc.create(CategoryDto::new("MISC", "Misc")).await.unwrap();
        let err = svc.create(CategoryDto::new("MISC", "Again")).await.unwrap_err();
        assert!(matches!(err, ServiceError::CategoryAlreadyExists(code) if code == "MISC"));
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected_before_lookup() {
        let (svc, _) = services();
        let err = svc.create(CategoryDto { code: None, name: Some("N".into()) }).await.unwrap_err();
        match err {
            ServiceError::Validation(errs) => assert_eq!(errs[0].field, "code"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_category_is_not_found() {
        let (svc, _) = services();
        assert!(matches!(svc.find_by_code("NOPE").await, Err(ServiceError::CategoryNotFound(_))));
        assert!(matches!(
            svc.update("NOPE", CategoryDto::new("NOPE", "x")).await,
            Err(ServiceError::CategoryNotFound(_))
        ));
        assert!(matches!(svc.delete("NOPE").await, Err(ServiceError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn update_racing_a_delete_is_not_found_and_creates_nothing() {
        let repo = Arc::new(DeletedAfterLookup(InMemoryStore::default()));
        let svc = CategoryService::new(repo.clone(), Arc::new(InMemoryStore::default()));
        let err = svc.update("GONE", CategoryDto::new("GONE", "Back again")).await.unwrap_err();
        assert!(matches!(err, ServiceError::CategoryNotFound(code) if code == "GONE"));
        assert!(repo.0.find_by_code("GONE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn referenced_category_cannot_be_deleted() {
        let (categories, products) = services();
        categories.create(CategoryDto::new("ELEC", "Electronics")).await.unwrap();
        let created = products
            .create(ProductDto {
                name: Some("Lamp".into()),
                price: Some(Decimal::new(1999, 2)),
                category: Some(CategoryDto { code: Some("ELEC".into()), name: None }),
                description: Some("Desk lamp".into()),
                quantity: Some(3),
                ..ProductDto::default()
            })
            .await
            .unwrap();

        assert!(matches!(categories.delete("ELEC").await, Err(ServiceError::CategoryInUse(_))));
        products.delete(created.id.unwrap()).await.unwrap();
        categories.delete("ELEC").await.unwrap();
        assert!(categories.get_all().await.unwrap().is_empty());
    }
}
