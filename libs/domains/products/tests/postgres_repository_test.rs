//! PostgreSQL repository integration tests
//!
//! These tests run against a disposable Postgres container and are ignored
//! by default; run them with `cargo test -- --ignored` when Docker is
//! available.

use domain_products::*;
use rust_decimal::Decimal;
use test_utils::TestDatabase;

fn fedora() -> CreateProduct {
    CreateProduct {
        name: "Fedora".to_string(),
        description: "A red hat".to_string(),
        price: Decimal::new(1250, 2),
        available: true,
        category: Category::Cloths,
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_and_get_round_trip() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let created = repo.create(fedora()).await.unwrap();
    assert!(created.id >= 1);

    let found = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found, created);
    assert_eq!(found.price, Decimal::new(1250, 2));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_preserves_id_and_count() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let created = repo.create(fedora()).await.unwrap();
    let updated = repo
        .update(
            created.id,
            UpdateProduct {
                description: Some("testing".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.description, "testing");
    assert_eq!(repo.count().await.unwrap(), 1);

    let missing = repo.update(created.id + 100, UpdateProduct::default()).await;
    assert!(matches!(missing, Err(ProductError::NotFound(_))));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_delete_and_find_filters() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let mut ids = Vec::new();
    for (name, category, available) in [
        ("Hat", Category::Cloths, true),
        ("Hat", Category::Cloths, false),
        ("Hammer", Category::Tools, true),
    ] {
        let created = repo
            .create(CreateProduct {
                name: name.to_string(),
                description: String::new(),
                price: Decimal::new(999, 2),
                available,
                category,
            })
            .await
            .unwrap();
        ids.push(created.id);
    }

    assert_eq!(repo.find_by_name("Hat").await.unwrap().len(), 2);
    assert_eq!(
        repo.find_by_category(Category::Tools).await.unwrap().len(),
        1
    );
    assert_eq!(repo.find_by_availability(false).await.unwrap().len(), 1);
    assert_eq!(
        repo.find_by_price(Decimal::new(999, 2)).await.unwrap().len(),
        3
    );

    assert!(repo.delete(ids[0]).await.unwrap());
    assert!(!repo.delete(ids[0]).await.unwrap());
    assert!(repo.get_by_id(ids[0]).await.unwrap().is_none());
    assert_eq!(repo.count().await.unwrap(), 2);
}
