//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The service layer handles validation, filter dispatch, and orchestrates
/// repository operations.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List products, applying at most one filter
    ///
    /// Filters are considered in a fixed order: name, then category, then
    /// availability, then price. With no filter present, every product is
    /// returned.
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        if let Some(name) = filter.name {
            return self.repository.find_by_name(&name).await;
        }
        if let Some(category) = filter.category {
            return self.repository.find_by_category(category).await;
        }
        if let Some(available) = filter.available {
            return self.repository.find_by_availability(available).await;
        }
        if let Some(price) = filter.price {
            // Query strings may carry the price quoted; tolerate that before
            // requiring an exact decimal.
            let cleaned = price.trim().trim_matches('"');
            let price = cleaned.parse().map_err(|_| {
                ProductError::Validation(format!("Invalid price value: {}", cleaned))
            })?;
            return self.repository.find_by_price(price).await;
        }

        self.repository.list().await
    }

    /// Update an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    /// Count all products
    #[instrument(skip(self))]
    pub async fn count_products(&self) -> ProductResult<u64> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::repository::MockProductRepository;
    use rust_decimal::Decimal;

    fn sample_product(id: i32) -> Product {
        Product {
            id,
            name: "Fedora".to_string(),
            description: "A red hat".to_string(),
            price: Decimal::new(1250, 2),
            available: true,
            category: Category::Cloths,
        }
    }

    fn sample_create() -> CreateProduct {
        CreateProduct {
            name: "Fedora".to_string(),
            description: "A red hat".to_string(),
            price: Decimal::new(1250, 2),
            available: true,
            category: Category::Cloths,
        }
    }

    #[tokio::test]
    async fn test_create_product_delegates_to_repository() {
        let mut mock = MockProductRepository::new();
        mock.expect_create()
            .times(1)
            .returning(|_| Ok(sample_product(1)));

        let service = ProductService::new(mock);
        let product = service.create_product(sample_create()).await.unwrap();

        assert_eq!(product.id, 1);
    }

    #[tokio::test]
    async fn test_create_product_rejects_empty_name() {
        let mut mock = MockProductRepository::new();
        mock.expect_create().times(0);

        let service = ProductService::new(mock);
        let mut input = sample_create();
        input.name = String::new();

        let result = service.create_product(input).await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut mock = MockProductRepository::new();
        mock.expect_get_by_id().returning(|_| Ok(None));

        let service = ProductService::new(mock);
        let result = service.get_product(42).await;

        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_list_products_without_filter_lists_all() {
        let mut mock = MockProductRepository::new();
        mock.expect_list()
            .times(1)
            .returning(|| Ok(vec![sample_product(1), sample_product(2)]));

        let service = ProductService::new(mock);
        let products = service.list_products(ProductFilter::default()).await.unwrap();

        assert_eq!(products.len(), 2);
    }

    #[tokio::test]
    async fn test_list_products_dispatches_name_filter() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_by_name()
            .withf(|name| name == "Fedora")
            .times(1)
            .returning(|_| Ok(vec![sample_product(1)]));

        let service = ProductService::new(mock);
        let filter = ProductFilter {
            name: Some("Fedora".to_string()),
            ..Default::default()
        };

        let products = service.list_products(filter).await.unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_list_products_dispatches_category_filter() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_by_category()
            .withf(|category| *category == Category::Tools)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = ProductService::new(mock);
        let filter = ProductFilter {
            category: Some(Category::Tools),
            ..Default::default()
        };

        assert!(service.list_products(filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_products_dispatches_availability_filter() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_by_availability()
            .withf(|available| !available)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = ProductService::new(mock);
        let filter = ProductFilter {
            available: Some(false),
            ..Default::default()
        };

        assert!(service.list_products(filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_products_parses_quoted_price() {
        let mut mock = MockProductRepository::new();
        let expected: Decimal = "42.0".parse().unwrap();
        mock.expect_find_by_price()
            .withf(move |price| *price == expected)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = ProductService::new(mock);
        let filter = ProductFilter {
            price: Some(" \"42.0\" ".to_string()),
            ..Default::default()
        };

        assert!(service.list_products(filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_products_rejects_malformed_price() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_by_price().times(0);

        let service = ProductService::new(mock);
        let filter = ProductFilter {
            price: Some("not-a-price".to_string()),
            ..Default::default()
        };

        let result = service.list_products(filter).await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_name_filter_takes_precedence() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(vec![]));
        mock.expect_find_by_category().times(0);

        let service = ProductService::new(mock);
        let filter = ProductFilter {
            name: Some("Fedora".to_string()),
            category: Some(Category::Cloths),
            ..Default::default()
        };

        assert!(service.list_products(filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_product_propagates_not_found() {
        let mut mock = MockProductRepository::new();
        mock.expect_update()
            .returning(|id, _| Err(ProductError::NotFound(id)));

        let service = ProductService::new(mock);
        let result = service.update_product(7, UpdateProduct::default()).await;

        assert!(matches!(result, Err(ProductError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_delete_product_missing_is_not_found() {
        let mut mock = MockProductRepository::new();
        mock.expect_delete().returning(|_| Ok(false));

        let service = ProductService::new(mock);
        let result = service.delete_product(7).await;

        assert!(matches!(result, Err(ProductError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_delete_product_success() {
        let mut mock = MockProductRepository::new();
        mock.expect_delete().returning(|_| Ok(true));

        let service = ProductService::new(mock);
        assert!(service.delete_product(7).await.is_ok());
    }

    #[tokio::test]
    async fn test_count_products() {
        let mut mock = MockProductRepository::new();
        mock.expect_count().returning(|| Ok(12));

        let service = ProductService::new(mock);
        assert_eq!(service.count_products().await.unwrap(), 12);
    }
}
