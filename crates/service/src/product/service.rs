use std::sync::Arc;

use tracing::{info, instrument};

use super::dto::ProductDto;
use super::query::{ProductQuery, ProductQueryParams};
use super::repository::ProductRepository;
use super::Product;
use crate::category::repository::CategoryRepository;
use crate::category::Category;
use crate::errors::ServiceError;
use crate::pagination::{Page, PageLimits};
use crate::validation::{messages, Validate};

/// Product use cases. Independent of the web framework.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
    limits: PageLimits,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { products, categories, limits: PageLimits::default() }
    }

    pub fn with_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Validate and persist a new product under an existing category.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use rust_decimal::Decimal;
    /// use service::category::{CategoryDto, CategoryService};
    /// use service::memory::InMemoryStore;
    /// use service::product::{ProductDto, ProductService};
    /// let store = Arc::new(InMemoryStore::default());
    /// let categories = CategoryService::new(store.clone(), store.clone());
    /// let products = ProductService::new(store.clone(), store);
    /// tokio_test::block_on(categories.create(CategoryDto::new("ELEC", "Electronics"))).unwrap();
    /// let dto = ProductDto {
    ///     name: Some("Laptop".into()),
    ///     price: Some(Decimal::new(99999, 2)),
    ///     category: Some(CategoryDto { code: Some("ELEC".into()), name: None }),
    ///     description: Some("14 inch".into()),
    ///     quantity: Some(3),
    ///     ..ProductDto::default()
    /// };
    /// let created = tokio_test::block_on(products.create(dto)).unwrap();
    /// assert!(created.id.is_some());
    /// assert_eq!(created.category.unwrap().name.as_deref(), Some("Electronics"));
    /// ```
    #[instrument(skip(self, dto), fields(name = ?dto.name))]
    pub async fn create(&self, dto: ProductDto) -> Result<ProductDto, ServiceError> {
        dto.check()?;
        let mut entity = Product::from(dto);
        entity.category = Some(self.resolve_category(entity.category.take()).await?);
        let saved = self.products.save(entity).await?;
        info!(id = ?saved.id, "product_created");
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<ProductDto, ServiceError> {
        self.products
            .find_by_id(id)
            .await?
            .map(ProductDto::from)
            .ok_or(ServiceError::ProductNotFound(id))
    }

    /// Filtered, sorted, paginated listing.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::memory::InMemoryStore;
    /// use service::product::{ProductQueryParams, ProductService};
    /// let store = Arc::new(InMemoryStore::default());
    /// let products = ProductService::new(store.clone(), store);
    /// let page = tokio_test::block_on(products.get_all(ProductQueryParams::default())).unwrap();
    /// assert_eq!(page.total_count, 0);
    /// assert_eq!(page.size, 10);
    /// ```
    #[instrument(skip(self, params))]
    pub async fn get_all(&self, params: ProductQueryParams) -> Result<Page<ProductDto>, ServiceError> {
        let query = ProductQuery::from_params(params, self.limits)?;
        let page = self.products.find_all(&query).await?;
        Ok(page.map(ProductDto::from))
    }

    /// Full replacement of an existing product. The id in `dto` is ignored.
    #[instrument(skip(self, dto))]
    pub async fn update(&self, id: i64, dto: ProductDto) -> Result<ProductDto, ServiceError> {
        dto.check()?;
        if self.products.find_by_id(id).await?.is_none() {
            return Err(ServiceError::ProductNotFound(id));
        }
        let mut entity = Product::from(dto);
        entity.id = Some(id);
        entity.category = Some(self.resolve_category(entity.category.take()).await?);
        let saved = self.products.save(entity).await?;
        info!(id, "product_updated");
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if self.products.find_by_id(id).await?.is_none() {
            return Err(ServiceError::ProductNotFound(id));
        }
        if !self.products.delete_by_id(id).await? {
            return Err(ServiceError::ProductNotFound(id));
        }
        info!(id, "product_deleted");
        Ok(())
    }

    /// Swap the caller's category reference for the stored one.
    async fn resolve_category(&self, requested: Option<Category>) -> Result<Category, ServiceError> {
        let code = requested
            .map(|c| c.code)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ServiceError::invalid_field("category", messages::CATEGORY_EMPTY))?;
        self.categories
            .find_by_code(&code)
            .await?
            .ok_or(ServiceError::CategoryNotFound(code))
    }
}
