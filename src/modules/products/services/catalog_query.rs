use serde::Deserialize;

use crate::core::Result;
use crate::modules::products::models::{Product, ProductCategory};

/// Category value the front-end sends for "no filter"
pub const ALL_CATEGORIES: &str = "Semua";

/// Raw query string for catalog listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Catalog search and category filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    search: Option<String>,
    category: Option<ProductCategory>,
}

impl ProductFilter {
    pub fn new(search: Option<&str>, category: Option<&str>) -> Result<Self> {
        let search = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);

        let category = match category.map(str::trim) {
            None | Some("") => None,
            Some(value) if value.eq_ignore_ascii_case(ALL_CATEGORIES) => None,
            Some(value) => Some(value.parse()?),
        };

        Ok(Self { search, category })
    }

    pub fn from_query(query: &ProductQuery) -> Result<Self> {
        Self::new(query.search.as_deref(), query.category.as_deref())
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }

        match &self.search {
            Some(term) => {
                product.name.to_lowercase().contains(term)
                    || product.category.as_str().to_lowercase().contains(term)
            }
            None => true,
        }
    }

    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}
