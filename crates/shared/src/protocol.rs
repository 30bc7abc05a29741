use serde::{Deserialize, Serialize};

use crate::domain::ProductId;

/// A catalog item as the listing endpoint returns it.
///
/// Only `id` matters to pagination; the remaining fields are display data for
/// whichever card renderer draws the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One page of the product listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListProductsQuery {
    pub page: u32,
}
