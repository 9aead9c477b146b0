use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A catalog entry offered for purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom = "validate_name")]
    pub name: String,

    #[validate(range(min = 0.0, message = "Price must be non-negative"))]
    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("Name is required"));
    }
    Ok(())
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// The cart unit bought when this product is added once.
    pub fn to_line_item(&self) -> LineItem {
        LineItem::from(self)
    }
}

/// One purchased unit. Two line items are the same product iff both
/// `name` and `price` match exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub price: f64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    pub fn same_product(&self, other: &LineItem) -> bool {
        self.name == other.name && self.price == other.price
    }
}

impl From<&Product> for LineItem {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_product() {
        let product = Product::new("Hat", 270.0).with_image("/images/hat.png");
        assert!(product.validate().is_ok());
        assert_eq!(product.image.as_deref(), Some("/images/hat.png"));
    }

    #[test]
    fn test_product_rejects_blank_name_and_negative_price() {
        assert!(Product::new("", 10.0).validate().is_err());
        assert!(Product::new("   ", 10.0).validate().is_err());
        assert!(Product::new("Hat", -1.0).validate().is_err());
    }

    #[test]
    fn test_line_item_identity_ignores_image() {
        let plain = Product::new("Hat", 270.0);
        let pictured = Product::new("Hat", 270.0).with_image("hat.png");
        assert!(plain.to_line_item().same_product(&pictured.to_line_item()));
        assert!(!plain
            .to_line_item()
            .same_product(&LineItem::new("Hat", 271.0)));
        assert!(!plain
            .to_line_item()
            .same_product(&LineItem::new("hat", 270.0)));
    }

    #[test]
    fn test_product_deserializes_without_image() {
        let product: Product = serde_json::from_str(r#"{"name":"Scarf","price":150}"#).unwrap();
        assert_eq!(product, Product::new("Scarf", 150.0));
    }
}
