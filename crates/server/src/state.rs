use std::sync::Arc;

use service::category::repository::CategoryRepository;
use service::category::CategoryService;
use service::memory::InMemoryStore;
use service::pagination::PageLimits;
use service::product::repository::ProductRepository;
use service::product::ProductService;

/// Shared handler state: one service per aggregate.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
    pub categories: CategoryService,
}

impl AppState {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
        limits: PageLimits,
    ) -> Self {
        Self {
            products: ProductService::new(products.clone(), categories.clone()).with_limits(limits),
            categories: CategoryService::new(categories, products),
        }
    }

    /// State backed by a fresh `InMemoryStore`.
    pub fn in_memory(limits: PageLimits) -> Self {
        let store = Arc::new(InMemoryStore::default());
        Self::new(store.clone(), store, limits)
    }
}
