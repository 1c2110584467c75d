use siteerp_core::{DomainResult, ProjectId, Selector, text_matches};

use crate::product::Product;
use crate::status::StockStatus;

/// Inventory listing filter: free-text search plus status and project
/// selectors, all ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name or the SKU.
    pub search: String,
    pub status: Selector<StockStatus>,
    pub project: Selector<ProjectId>,
}

impl ProductFilter {
    /// Build from listing query values (`"all"` or blank means no restriction).
    pub fn parse(search: &str, status: &str, project: &str) -> DomainResult<Self> {
        Ok(Self {
            search: search.to_string(),
            status: status.parse()?,
            project: project.parse()?,
        })
    }

    pub fn matches(&self, product: &Product) -> bool {
        text_matches(&self.search, &[product.name(), product.sku()])
            && self.status.matches(&product.status())
            && self.project.matches_option(product.project_id())
    }
}

/// Order-preserving filter over any sequence of products.
pub fn filter_products<'a, I>(products: I, filter: &ProductFilter) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products.into_iter().filter(|p| filter.matches(p)).collect()
}
