//! Fetch-and-parse for each storefront page
//!
//! A page load either replaces the page's records wholesale or reports why
//! it could not; it never leaves partially applied state behind. Transport
//! and format failures become page states rather than errors. Only
//! cancellation is returned as an `Err`.

use super::collection::{discount_banner, sort_reviews};
use super::sheet_parser::{ParseStats, parse_catalog, parse_products, parse_reviews};
use crate::app::adapters::sheet_source::{FetchRoute, SheetLoader};
use crate::app::models::{CatalogItem, Review, StoreProduct};
use crate::config::StorefrontConfig;
use crate::constants::{DEFAULT_DISCOUNT_BANNER, DEFAULT_PRODUCT_IMAGE};
use crate::{Error, Result};
use tracing::{info, warn};

/// Outcome of loading one page's sheet
#[derive(Debug, Clone)]
pub enum PageState<T> {
    /// At least one record survived parsing
    Ready { records: Vec<T>, stats: ParseStats },
    /// The sheet parsed but held no valid rows
    Empty { stats: ParseStats },
    /// Required columns were missing from the header
    FormatError { message: String },
    /// The sheet could not be fetched
    Unavailable { message: String },
}

impl<T> PageState<T> {
    pub fn records(&self) -> &[T] {
        match self {
            PageState::Ready { records, .. } => records,
            _ => &[],
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, PageState::Ready { .. })
    }

    fn from_parse(records: Vec<T>, stats: ParseStats) -> Self {
        if records.is_empty() {
            PageState::Empty { stats }
        } else {
            PageState::Ready { records, stats }
        }
    }
}

/// Loaded showcase page
#[derive(Debug, Clone)]
pub struct StorePage {
    pub products: Vec<StoreProduct>,
    pub banner: String,

    /// True when the built-in sample products stand in for the sheet
    pub from_sample: bool,

    pub stats: ParseStats,
}

/// Loads the three storefront sheets
#[derive(Clone)]
pub struct PageLoader {
    loader: SheetLoader,
    config: StorefrontConfig,
}

impl PageLoader {
    pub fn new(loader: SheetLoader, config: StorefrontConfig) -> Self {
        Self { loader, config }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Order-builder catalog, fetched directly
    pub async fn load_catalog(&self) -> Result<PageState<CatalogItem>> {
        let text = match self
            .loader
            .fetch(&self.config.catalog_url, &FetchRoute::Direct)
            .await
        {
            Ok(text) => text,
            Err(e) => return unavailable(e),
        };

        match parse_catalog(&text) {
            Ok(result) => Ok(PageState::from_parse(result.records, result.stats)),
            Err(e @ Error::SheetFormat { .. }) => {
                warn!("Catalog sheet rejected: {}", e);
                Ok(PageState::FormatError {
                    message: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Showcase products; falls back to the sample set when unreachable
    pub async fn load_store(&self) -> Result<StorePage> {
        let fetched = self
            .loader
            .fetch(&self.config.products_url, &FetchRoute::Direct)
            .await;

        let (products, stats, from_sample) = match fetched {
            Ok(text) => {
                let result = parse_products(&text)?;
                (result.records, result.stats, false)
            }
            Err(e @ Error::Cancelled { .. }) => return Err(e),
            Err(e) => {
                warn!("Product sheet unavailable, using sample data: {}", e);
                (sample_products(), ParseStats::new(), true)
            }
        };

        let banner = discount_banner(&products, DEFAULT_DISCOUNT_BANNER);
        Ok(StorePage {
            products,
            banner,
            from_sample,
            stats,
        })
    }

    /// Reviews through the proxy first, then directly; sorted for display
    pub async fn load_reviews(&self) -> Result<PageState<Review>> {
        let route = FetchRoute::ProxyThenDirect {
            proxy_prefix: self.config.proxy_prefix.clone(),
        };
        let text = match self.loader.fetch(&self.config.reviews_url, &route).await {
            Ok(text) => text,
            Err(e) => return unavailable(e),
        };

        let mut result = parse_reviews(&text)?;
        sort_reviews(&mut result.records);
        info!("Loaded {} reviews", result.records.len());
        Ok(PageState::from_parse(result.records, result.stats))
    }
}

fn unavailable<T>(error: Error) -> Result<PageState<T>> {
    match error {
        Error::Cancelled { .. } => Err(error),
        other => {
            warn!("Sheet unavailable: {}", other);
            Ok(PageState::Unavailable {
                message: other.to_string(),
            })
        }
    }
}

/// Showcase products used when the product sheet cannot be fetched
pub fn sample_products() -> Vec<StoreProduct> {
    let samples: [(i64, &str, i64, i64, &str, &str); 6] = [
        (
            1,
            "Premium Almonds",
            1200,
            15,
            DEFAULT_PRODUCT_IMAGE,
            "Our premium almonds are carefully selected for their size, flavor, and nutritional value. Rich in vitamins, minerals, and healthy fats, these almonds are perfect for snacking or adding to your favorite recipes.",
        ),
        (
            2,
            "Organic Cashew Nuts",
            1400,
            10,
            "https://images.unsplash.com/photo-1554679663-49c2955a2111?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&q=80",
            "These organic cashew nuts are creamy, buttery, and packed with nutrients. Grown without pesticides, they're a healthy and delicious snack that's rich in copper, magnesium, and zinc.",
        ),
        (
            3,
            "Walnut Halves",
            1100,
            5,
            "https://images.unsplash.com/photo-1592415486684-3f85ce7b6e6e?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&q=80",
            "Our walnut halves are fresh, crunchy, and full of flavor. Rich in omega-3 fatty acids and antioxidants, these walnuts are perfect for baking, cooking, or enjoying as a healthy snack.",
        ),
        (
            4,
            "Premium Turmeric Powder",
            800,
            20,
            "https://images.unsplash.com/photo-1590502509897-5d5dac2dcc61?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&q=80",
            "Our premium turmeric powder is made from the finest turmeric roots, carefully dried and ground to preserve its vibrant color and potent health benefits. Add this golden spice to your dishes for both flavor and wellness.",
        ),
        (
            5,
            "Cinnamon Sticks",
            900,
            12,
            "https://images.unsplash.com/photo-1593620659530-7f33ba5d5a64?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&q=80",
            "These fragrant cinnamon sticks are sourced from the highest quality cinnamon trees. Perfect for adding warm, sweet flavor to both sweet and savory dishes, as well as beverages like tea and coffee.",
        ),
        (
            6,
            "Mixed Nuts Gift Pack",
            2500,
            18,
            "https://images.unsplash.com/photo-1540293744254-4cfc44c22f5a?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&q=80",
            "This premium mixed nuts gift pack contains a selection of our finest almonds, cashews, walnuts, and pistachios. Beautifully packaged, it makes the perfect gift for any occasion.",
        ),
    ];

    samples
        .iter()
        .map(|(id, name, price, discount, image, description)| StoreProduct {
            id: *id,
            name: name.to_string(),
            price: *price,
            discount_label: format!("{}% off", discount),
            discount_percent: *discount,
            image_url: image.to_string(),
            description: description.to_string(),
        })
        .collect()
}
