use crate::model::{Resource, ResourceKind};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use store_framework::{Filterable, StoreEntity};

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a product in the catalogue.
///
/// `level` is a free-form tier label; the dashboard groups products by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    /// Stored reference of the product image.
    #[serde(default)]
    pub images: String,
    #[serde(default)]
    pub level: String,
}

/// DTO for Product creation and updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub images: String,
    pub level: String,
}

impl ProductDraft {
    pub fn new(title: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            price,
            ..Self::default()
        }
    }
}

impl StoreEntity for Product {
    type Id = ProductId;
    type Draft = ProductDraft;

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price,
            images: self.images.clone(),
            level: self.level.clone(),
        }
    }
}

impl Filterable for Product {
    fn search_text(&self) -> &str {
        &self.title
    }

    fn range_value(&self) -> Option<f64> {
        Some(self.price)
    }
}

impl Resource for Product {
    const KIND: ResourceKind = ResourceKind::Products;
}
