use crate::abstract_trait::ProductQueryRepositoryTrait;
use async_trait::async_trait;
use shared::{
    domain::responses::ProductStatistics,
    errors::RepositoryError,
    model::{Product, ProductStatus},
    storage::SharedDocument,
};
use tracing::info;

#[derive(Clone)]
pub struct ProductQueryRepository {
    state: SharedDocument,
}

impl ProductQueryRepository {
    pub fn new(state: SharedDocument) -> Self {
        Self { state }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(&self, include_inactive: bool) -> Result<Vec<Product>, RepositoryError> {
        let doc = self.state.read().await;
        let products = if include_inactive {
            doc.products.clone()
        } else {
            doc.products.iter().filter(|p| p.is_active()).cloned().collect()
        };
        info!("🔍 Fetched {} products", products.len());
        Ok(products)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, RepositoryError> {
        let doc = self.state.read().await;
        Ok(doc.find_product(id).cloned())
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, RepositoryError> {
        let doc = self.state.read().await;
        Ok(doc.products.iter().find(|p| p.sku == sku).cloned())
    }

    async fn find_by_category(&self, category_id: &str) -> Result<Vec<Product>, RepositoryError> {
        let doc = self.state.read().await;
        Ok(doc
            .products
            .iter()
            .filter(|p| p.category_id == category_id && p.is_active())
            .cloned()
            .collect())
    }

    async fn find_low_stock(&self) -> Result<Vec<Product>, RepositoryError> {
        let doc = self.state.read().await;
        Ok(doc
            .products
            .iter()
            .filter(|p| p.is_active() && p.is_low_stock())
            .cloned()
            .collect())
    }

    async fn find_out_of_stock(&self) -> Result<Vec<Product>, RepositoryError> {
        let doc = self.state.read().await;
        Ok(doc
            .products
            .iter()
            .filter(|p| p.is_active() && p.is_out_of_stock())
            .cloned()
            .collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, RepositoryError> {
        let needle = term.to_lowercase();
        let doc = self.state.read().await;
        Ok(doc
            .products
            .iter()
            .filter(|p| {
                p.is_active()
                    && (p.name.to_lowercase().contains(&needle)
                        || p.sku.to_lowercase().contains(&needle)
                        || p.description.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn statistics(&self) -> Result<ProductStatistics, RepositoryError> {
        let doc = self.state.read().await;

        let active: Vec<&Product> = doc.products.iter().filter(|p| p.is_active()).collect();
        let total_units = active.iter().map(|p| p.stock.quantity).sum();
        let inventory_value = active
            .iter()
            .map(|p| p.pricing.sell_price * p.stock.quantity as f64)
            .sum();

        let with_margin: Vec<f64> = doc
            .products
            .iter()
            .filter(|p| p.pricing.margin != 0.0)
            .map(|p| p.pricing.margin)
            .collect();
        let average_margin = if with_margin.is_empty() {
            0.0
        } else {
            let raw = with_margin.iter().sum::<f64>() / with_margin.len() as f64;
            (raw * 100.0).round() / 100.0
        };

        Ok(ProductStatistics {
            total_products: doc.products.len(),
            active_products: active.len(),
            inactive_products: doc
                .products
                .iter()
                .filter(|p| p.status == ProductStatus::Inactive)
                .count(),
            total_units,
            inventory_value,
            low_stock_products: active.iter().filter(|p| p.is_low_stock()).count(),
            out_of_stock_products: active.iter().filter(|p| p.is_out_of_stock()).count(),
            average_margin,
        })
    }
}
