//! Display strings for products. Nothing here validates the wire values.

use chrono::{DateTime, Local, NaiveDateTime};
use shared::domain::Product;

pub const CREATE_SUCCESS_MESSAGE: &str = "product created successfully";
pub const NO_PRODUCTS_FOUND: &str = "no products found";

/// Shown for products stored without a price.
pub const MISSING_PRICE: &str = "$null";

const CREATED_AT_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(price) => format!("${price}"),
        None => MISSING_PRICE.to_string(),
    }
}

/// Renders a wire timestamp in local time. Offset-less timestamps are taken
/// as local wall time; unparseable input is shown verbatim.
pub fn format_created_at(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed
            .with_timezone(&Local)
            .format(CREATED_AT_FORMAT)
            .to_string();
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
        .map(|naive| naive.format(CREATED_AT_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub created_at: String,
}

impl ProductCard {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: format_price(product.price),
            created_at: format_created_at(&product.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRow {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl SearchRow {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: format_price(product.price),
        }
    }
}

#[cfg(test)]
#[path = "tests/present_tests.rs"]
mod tests;
