//! Product records and the caller-supplied field sets that create and update them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Key that callers can never set through a payload's extra fields.
const ID_KEY: &str = "id";

/// A catalog entry.
///
/// Fields the caller attaches beyond the typed ones are kept in `extra` and
/// serialized inline, so the wire shape is one flat object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Assigned by the store, never changed afterwards
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}

/// Caller-supplied product fields, as sent in a create or update body.
///
/// Every field is optional; `null` is treated the same as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}

/// Partial update applied by `PUT /api/products/{id}`.
pub type ProductPatch = ProductPayload;

/// Why a create payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductValidationError {
    #[error("Name and price are required")]
    MissingNameOrPrice,
}

/// A create payload that passed validation, ready to receive an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) price: f64,
    pub(crate) category: String,
    pub(crate) in_stock: bool,
    pub(crate) extra: Map<String, Value>,
}

impl TryFrom<ProductPayload> for NewProduct {
    type Error = ProductValidationError;

    fn try_from(payload: ProductPayload) -> Result<Self, Self::Error> {
        let ProductPayload {
            name,
            description,
            price,
            category,
            in_stock,
            mut extra,
        } = payload;

        let (Some(name), Some(price)) = (name.filter(|n| !n.is_empty()), price) else {
            return Err(ProductValidationError::MissingNameOrPrice);
        };

        extra.remove(ID_KEY);

        Ok(Self {
            name,
            description: description.unwrap_or_default(),
            price,
            category: category.unwrap_or_default(),
            in_stock: in_stock.unwrap_or_default(),
            extra,
        })
    }
}

impl NewProduct {
    /// Attach an id, producing the stored record.
    #[must_use]
    pub fn with_id(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            in_stock: self.in_stock,
            extra: self.extra,
        }
    }
}

impl Product {
    /// Merge the fields present in `patch` into this record.
    ///
    /// The id is never touched, even when the patch carries one.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
        for (key, value) in patch.extra {
            if key != ID_KEY {
                self.extra.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> ProductPayload {
        serde_json::from_value(value).expect("payload")
    }

    #[test]
    fn create_requires_name_and_price() {
        let cases = [
            (json!({ "name": "Lamp", "price": 20 }), true, "both present"),
            (json!({ "price": 20 }), false, "missing name"),
            (json!({ "name": "Lamp" }), false, "missing price"),
            (json!({ "name": null, "price": 20 }), false, "null name"),
            (json!({ "name": "", "price": 20 }), false, "empty name"),
            (json!({ "name": "Lamp", "price": null }), false, "null price"),
            (json!({ "name": "Lamp", "price": 0 }), true, "zero price"),
        ];

        for (body, should_pass, desc) in cases {
            let result = NewProduct::try_from(payload(body));
            assert_eq!(result.is_ok(), should_pass, "case '{desc}': {result:?}");
        }
    }

    #[test]
    fn create_defaults_optional_fields() {
        let product = NewProduct::try_from(payload(json!({ "name": "Lamp", "price": 20.5 })))
            .expect("valid")
            .with_id("abc".into());

        assert_eq!(product.id, "abc");
        assert_eq!(product.description, "");
        assert_eq!(product.category, "");
        assert!(!product.in_stock);
        assert!(product.extra.is_empty());
    }

    #[test]
    fn create_keeps_extra_fields_but_drops_id() {
        let new = NewProduct::try_from(payload(json!({
            "id": "caller-chosen",
            "name": "Lamp",
            "price": 20,
            "color": "red"
        })))
        .expect("valid");

        assert!(!new.extra.contains_key("id"));
        assert_eq!(new.extra.get("color"), Some(&json!("red")));
    }

    #[test]
    fn product_serializes_flat_camel_case() {
        let mut extra = Map::new();
        extra.insert("color".into(), json!("red"));
        let product = Product {
            id: "1".into(),
            name: "Lamp".into(),
            description: "Desk lamp".into(),
            price: 20.0,
            category: "Home".into(),
            in_stock: true,
            extra,
        };

        let value = serde_json::to_value(&product).expect("serialize");
        assert_eq!(value["inStock"], json!(true));
        assert_eq!(value["color"], json!("red"));
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn apply_merges_present_fields_and_preserves_id() {
        let mut product = NewProduct::try_from(payload(json!({
            "name": "Lamp",
            "price": 20,
            "category": "Home"
        })))
        .expect("valid")
        .with_id("original".into());

        product.apply(payload(json!({
            "id": "hijacked",
            "price": 25,
            "inStock": true,
            "category": null,
            "warranty": "2y"
        })));

        assert_eq!(product.id, "original");
        assert_eq!(product.name, "Lamp");
        assert!((product.price - 25.0).abs() < f64::EPSILON);
        assert!(product.in_stock);
        assert_eq!(product.category, "Home");
        assert_eq!(product.extra.get("warranty"), Some(&json!("2y")));
        assert!(!product.extra.contains_key("id"));
    }
}
