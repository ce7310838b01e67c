//! In-memory implementation of both repositories, used by tests, doc examples
//! and the HTTP end-to-end suite.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::category::repository::CategoryRepository;
use crate::category::Category;
use crate::errors::ServiceError;
use crate::pagination::{Page, SortDirection};
use crate::product::query::{ProductQuery, ProductSortField};
use crate::product::repository::ProductRepository;
use crate::product::Product;
use crate::validation::messages;

#[derive(Clone, Debug)]
struct ProductRow {
    product: Product,
    category_code: String,
}

/// Products reference categories by code and are joined on read, like the
/// relational schema.
#[derive(Debug)]
pub struct InMemoryStore {
    categories: Mutex<BTreeMap<String, Category>>,
    products: Mutex<BTreeMap<i64, ProductRow>>,
    next_id: AtomicI64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            categories: Mutex::new(BTreeMap::new()),
            products: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryStore {
    fn join(&self, row: &ProductRow) -> Product {
        let mut p = row.product.clone();
        p.category = lock(&self.categories).get(&row.category_code).cloned();
        p
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn insert(&self, category: Category) -> Result<Category, ServiceError> {
        let mut categories = lock(&self.categories);
        if categories.contains_key(&category.code) {
            return Err(ServiceError::CategoryAlreadyExists(category.code));
        }
        categories.insert(category.code.clone(), category.clone());
        Ok(category)
    }

    async fn update(&self, category: Category) -> Result<Category, ServiceError> {
        match lock(&self.categories).get_mut(&category.code) {
            Some(stored) => {
                stored.name = category.name.clone();
                Ok(category)
            }
            None => Err(ServiceError::CategoryNotFound(category.code)),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Category>, ServiceError> {
        Ok(lock(&self.categories).get(code).cloned())
    }

    async fn find_all_ordered_by_name(&self) -> Result<Vec<Category>, ServiceError> {
        let mut all: Vec<_> = lock(&self.categories).values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
        Ok(all)
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, ServiceError> {
        let referenced = lock(&self.products).values().any(|r| r.category_code == code);
        if referenced {
            return Err(ServiceError::CategoryInUse(code.to_string()));
        }
        Ok(lock(&self.categories).remove(code).is_some())
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn save(&self, mut product: Product) -> Result<Product, ServiceError> {
        let category_code = product
            .category_code()
            .map(str::to_string)
            .ok_or_else(|| ServiceError::invalid_field("category", messages::CATEGORY_EMPTY))?;
        if !lock(&self.categories).contains_key(&category_code) {
            return Err(ServiceError::CategoryNotFound(category_code));
        }
        let mut products = lock(&self.products);
        let id = match product.id {
            Some(id) if products.contains_key(&id) => id,
            Some(id) => return Err(ServiceError::ProductNotFound(id)),
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        product.id = Some(id);
        products.insert(id, ProductRow { product: product.clone(), category_code });
        Ok(product)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        let row = lock(&self.products).get(&id).cloned();
        Ok(row.map(|r| self.join(&r)))
    }

    async fn find_all(&self, query: &ProductQuery) -> Result<Page<Product>, ServiceError> {
        let rows: Vec<ProductRow> = lock(&self.products).values().cloned().collect();
        let mut matched: Vec<Product> = rows
            .iter()
            .map(|r| self.join(r))
            .filter(|p| query.filter.matches(p))
            .collect();
        matched.sort_by(|a, b| {
            let primary = query.sort.compare(a, b);
            let primary = match query.direction {
                SortDirection::Asc => primary,
                SortDirection::Desc => primary.reverse(),
            };
            if query.sort == ProductSortField::Id {
                primary
            } else {
                primary.then_with(|| a.id.cmp(&b.id))
            }
        });
        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(usize::try_from(query.page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(query.page.size).unwrap_or(usize::MAX))
            .collect();
        Ok(Page::new(items, total, query.page))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(lock(&self.products).remove(&id).is_some())
    }

    async fn count_by_category(&self, code: &str) -> Result<u64, ServiceError> {
        Ok(lock(&self.products).values().filter(|r| r.category_code == code).count() as u64)
    }
}
