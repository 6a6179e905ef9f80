use serde::{Deserialize, Serialize};

use crate::{Review, Slug};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub brand: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Decimal string, e.g. "199.00".
    pub price: String,
    #[serde(default = "Product::default_currency")]
    pub currency: String,
    /// Reviews of the product itself. Empty means no `aggregateRating`.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    fn default_currency() -> String {
        "USD".to_string()
    }
}

/// Paid-campaign page under `/lp/{slug}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingPage {
    pub slug: Slug,
    pub title: String,
    pub headline: String,
    pub summary: String,
    /// Weak reference into the service catalog.
    #[serde(default)]
    pub service: Option<Slug>,
    #[serde(default)]
    pub offer: Option<String>,
    #[serde(default)]
    pub product: Option<Product>,
}
