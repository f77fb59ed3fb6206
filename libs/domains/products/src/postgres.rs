use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{Category, CreateProduct, Product, UpdateProduct},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository backed by SeaORM.
///
/// Every operation is a single statement round-trip; consistency relies on
/// the store's statement-level atomicity.
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_all_where(
        &self,
        condition: sea_orm::sea_query::SimpleExpr,
    ) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(condition)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();

        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        self.find_all_where(entity::Column::Name.eq(name)).await
    }

    async fn find_by_category(&self, category: Category) -> ProductResult<Vec<Product>> {
        self.find_all_where(entity::Column::Category.eq(category))
            .await
    }

    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>> {
        self.find_all_where(entity::Column::Available.eq(available))
            .await
    }

    async fn find_by_price(&self, price: Decimal) -> ProductResult<Vec<Product>> {
        self.find_all_where(entity::Column::Price.eq(price)).await
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        // Fetch the existing row; a missing id is a domain error, not a
        // silent upsert.
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let mut product: Product = model.into();
        product.apply_update(input);

        let active_model = entity::ActiveModel {
            id: Set(product.id),
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            available: Set(product.available),
            category: Set(product.category),
        };

        let updated_model = active_model.update(&self.db).await?;

        tracing::info!(product_id = id, "Updated product");
        Ok(updated_model.into())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self) -> ProductResult<u64> {
        let count = entity::Entity::find().count(&self.db).await?;
        Ok(count)
    }
}
