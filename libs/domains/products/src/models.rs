use rust_decimal::Decimal;
use sea_orm::{DeriveActiveEnum, EnumIter};
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Product category
///
/// Stored in the database as its uppercase name. Categories are a closed
/// set; an unrecognized name is a deserialization error.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Category {
    #[sea_orm(string_value = "UNKNOWN")]
    Unknown,
    #[sea_orm(string_value = "CLOTHS")]
    Cloths,
    #[sea_orm(string_value = "FOOD")]
    Food,
    #[sea_orm(string_value = "HOUSEWARES")]
    Housewares,
    #[sea_orm(string_value = "AUTOMOTIVE")]
    Automotive,
    #[sea_orm(string_value = "TOOLS")]
    Tools,
}

/// Product entity - a single catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Surrogate key assigned by the store on insert
    pub id: i32,
    /// Product name
    pub name: String,
    /// Product description (may be empty)
    pub description: String,
    /// Exact decimal price, serialized as a string
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    /// Whether the product is available for purchase
    pub available: bool,
    /// Product category
    pub category: Category,
}

/// DTO for creating a new product
///
/// Carries no id: the store assigns one on insert. All five business
/// attributes are required.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

/// DTO for updating an existing product
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "9.99")]
    pub price: Option<Decimal>,
    pub available: Option<bool>,
    pub category: Option<Category>,
}

/// Query filters for listing products
///
/// At most one filter is applied, in the order name, category, available,
/// price. The price arrives as a raw string and is parsed by the service so
/// a malformed value becomes a validation error rather than a silent miss.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ProductFilter {
    /// Exact name match
    pub name: Option<String>,
    /// Filter by category
    pub category: Option<Category>,
    /// Filter by availability
    pub available: Option<bool>,
    /// Exact price match (decimal string, quotes tolerated)
    pub price: Option<String>,
}

impl Product {
    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(available) = update.available {
            self.available = available;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Product {
        Product {
            id: 1,
            name: "Fedora".to_string(),
            description: "A red hat".to_string(),
            price: Decimal::new(1250, 2),
            available: true,
            category: Category::Cloths,
        }
    }

    #[test]
    fn test_product_serializes_by_name() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Fedora",
                "description": "A red hat",
                "price": "12.50",
                "available": true,
                "category": "CLOTHS"
            })
        );
    }

    #[test]
    fn test_product_round_trip() {
        let product = sample();
        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_create_product_rejects_empty_object() {
        let result: Result<CreateProduct, _> = serde_json::from_value(json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_product_rejects_non_mapping() {
        let result: Result<CreateProduct, _> = serde_json::from_str("\"not a product\"");
        assert!(result.is_err());

        let result: Result<CreateProduct, _> = serde_json::from_str("[1, 2, 3]");
        assert!(result.is_err());
    }

    #[test]
    fn test_create_product_rejects_string_available() {
        let result: Result<CreateProduct, _> = serde_json::from_value(json!({
            "name": "Fedora",
            "description": "A red hat",
            "price": "12.50",
            "available": "true",
            "category": "CLOTHS"
        }));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("boolean"), "got: {}", err);
    }

    #[test]
    fn test_create_product_rejects_unknown_category() {
        let result: Result<CreateProduct, _> = serde_json::from_value(json!({
            "name": "Fedora",
            "description": "A red hat",
            "price": "12.50",
            "available": true,
            "category": "FURNITURE"
        }));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("FURNITURE"), "got: {}", err);
    }

    #[test]
    fn test_create_product_requires_category() {
        let result: Result<CreateProduct, _> = serde_json::from_value(json!({
            "name": "Fedora",
            "description": "A red hat",
            "price": "12.50",
            "available": true
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_category_display_matches_wire_name() {
        assert_eq!(Category::Housewares.to_string(), "HOUSEWARES");
        assert_eq!("TOOLS".parse::<Category>().unwrap(), Category::Tools);
        assert!("tools".parse::<Category>().is_err());
    }

    #[test]
    fn test_apply_update_overwrites_present_fields_only() {
        let mut product = sample();
        product.apply_update(UpdateProduct {
            description: Some("An updated description".to_string()),
            ..Default::default()
        });

        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Fedora");
        assert_eq!(product.description, "An updated description");
        assert_eq!(product.price, Decimal::new(1250, 2));
        assert_eq!(product.category, Category::Cloths);
    }

    #[test]
    fn test_price_is_decimal_exact() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "name": "Widget",
            "description": "",
            "price": "19.99",
            "available": false,
            "category": "TOOLS"
        }))
        .unwrap();

        assert_eq!(product.price, Decimal::new(1999, 2));
        assert_eq!(product.description, "");
        assert!(!product.available);
    }
}
