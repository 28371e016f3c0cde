//! Storefront catalog browsing: filtering, sorting and pagination over products.

use super::Product;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const MAX_PAGE_SIZE: usize = 100;

/// Query string accepted by the product listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
    pub category: Option<String>,
    /// `all` disables the filter.
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub min_price: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_price: Option<u64>,
    /// `price-asc`, `price-desc`; anything else sorts newest first.
    pub sort_by: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<usize>,
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<usize>,
}

/// Blank or unparseable numbers count as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub products: Vec<Product>,
    pub total_count: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

impl CatalogQuery {
    fn matches(&self, product: &Product) -> bool {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        if let Some(needle) = search {
            if !product.name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if let Some(category) = active(&self.category) {
            if product.category != category {
                return false;
            }
        }
        if let Some(brand) = active(&self.brand) {
            if product.brand != brand {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        true
    }

    /// Filters, sorts and slices `products`, which must be in creation order.
    pub fn apply(&self, products: Vec<Product>) -> CatalogPage {
        let mut matching: Vec<Product> = products
            .into_iter()
            .rev()
            .filter(|p| self.matches(p))
            .collect();

        match self.sort_by.as_deref() {
            Some("price-asc") => matching.sort_by_key(|p| p.price),
            Some("price-desc") => matching.sort_by(|a, b| b.price.cmp(&a.price)),
            _ => {}
        }

        let limit = match self.limit {
            Some(0) | None => DEFAULT_PAGE_SIZE,
            Some(n) => n.min(MAX_PAGE_SIZE),
        };
        let page = self.page.filter(|p| *p > 0).unwrap_or(1);
        let total_count = matching.len();
        let products = matching
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();

        CatalogPage {
            products,
            total_count,
            current_page: page,
            total_pages: total_count.div_ceil(limit),
        }
    }
}

fn active(filter: &Option<String>) -> Option<&str> {
    filter
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
}
