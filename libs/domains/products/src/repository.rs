use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Category, CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// This trait defines the data access interface for products.
/// Implementations can use different storage backends (PostgreSQL, in-memory).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product; the store assigns the id
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// List all products
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Find products by exact name
    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>>;

    /// Find products by category
    async fn find_by_category(&self, category: Category) -> ProductResult<Vec<Product>>;

    /// Find products by availability
    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>>;

    /// Find products by exact price
    async fn find_by_price(&self, price: Decimal) -> ProductResult<Vec<Product>>;

    /// Update an existing product
    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: i32) -> ProductResult<bool>;

    /// Count all products
    async fn count(&self) -> ProductResult<u64>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<i32, Product>>>,
    next_id: AtomicI32,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI32::new(1),
        }
    }

    fn sorted(mut products: Vec<Product>) -> Vec<Product> {
        products.sort_by_key(|p| p.id);
        products
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = Product {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            available: input.available,
            category: input.category,
        };
        products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(Self::sorted(products.values().cloned().collect()))
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(Self::sorted(
            products.values().filter(|p| p.name == name).cloned().collect(),
        ))
    }

    async fn find_by_category(&self, category: Category) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(Self::sorted(
            products
                .values()
                .filter(|p| p.category == category)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(Self::sorted(
            products
                .values()
                .filter(|p| p.available == available)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_price(&self, price: Decimal) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(Self::sorted(
            products.values().filter(|p| p.price == price).cloned().collect(),
        ))
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);

        tracing::info!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        let removed = products.remove(&id).is_some();
        if removed {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }

    async fn count(&self) -> ProductResult<u64> {
        let products = self.products.read().await;
        Ok(products.len() as u64)
    }
}
