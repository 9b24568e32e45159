use crate::abstract_trait::{ProductCommandRepositoryTrait, StockAdjusterTrait};
use async_trait::async_trait;
use chrono::Utc;
use shared::{
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    errors::RepositoryError,
    model::{
        DEFAULT_LOCATION, DEFAULT_MAX_QUANTITY, DEFAULT_MIN_QUANTITY, DeleteOutcome,
        InventoryDocument, Pricing, Product, ProductStatus, StockLevels,
    },
    storage::{DocumentStore, SharedDocument},
};
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct ProductCommandRepository {
    state: SharedDocument,
    store: DocumentStore,
}

impl ProductCommandRepository {
    pub fn new(state: SharedDocument, store: DocumentStore) -> Self {
        Self { state, store }
    }

    async fn persist(
        &self,
        doc: &mut InventoryDocument,
        next: InventoryDocument,
        context: &str,
    ) -> Result<(), RepositoryError> {
        self.store.save(&next).await.map_err(|e| {
            error!("❌ Failed to persist {context}: {e:?}");
            RepositoryError::from(e)
        })?;
        *doc = next;
        Ok(())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<Product, RepositoryError> {
        let mut doc = self.state.write().await;
        let mut next = doc.clone();

        if req.name.trim().is_empty() {
            return Err(RepositoryError::MissingField("name"));
        }
        if req.sku.trim().is_empty() {
            return Err(RepositoryError::MissingField("sku"));
        }
        if req.category_id.trim().is_empty() {
            return Err(RepositoryError::MissingField("categoryId"));
        }

        // SKU uniqueness spans every product, inactive ones included.
        if next.products.iter().any(|p| p.sku == req.sku.trim()) {
            return Err(RepositoryError::DuplicateSku(req.sku.trim().to_string()));
        }

        if next.find_category(&req.category_id).is_none() {
            return Err(RepositoryError::NotFound);
        }

        if req.sell_price < req.purchase_price && req.sell_price > 0.0 {
            warn!("⚠ Sell price is below purchase price for SKU {}", req.sku);
        }

        let now = Utc::now();
        let product = Product {
            id: next.next_product_id(),
            sku: req.sku.trim().to_string(),
            name: req.name.trim().to_string(),
            description: req.description.trim().to_string(),
            category_id: req.category_id.clone(),
            pricing: Pricing::new(req.purchase_price, req.sell_price),
            stock: StockLevels {
                quantity: req.quantity,
                min_quantity: req.min_quantity.unwrap_or(DEFAULT_MIN_QUANTITY),
                max_quantity: req.max_quantity.unwrap_or(DEFAULT_MAX_QUANTITY),
                location: req
                    .location
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            },
            status: ProductStatus::Active,
            created_at: now,
            modified_at: now,
        };

        next.products.push(product.clone());
        next.touch();
        self.persist(&mut doc, next, "product creation").await?;

        info!("✓ Product created: {} ({})", product.name, product.id);
        Ok(product)
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<Product, RepositoryError> {
        let mut doc = self.state.write().await;
        let mut next = doc.clone();

        if !next.products.iter().any(|p| p.id == req.id) {
            return Err(RepositoryError::NotFound);
        }

        if let Some(sku) = &req.sku {
            let collides = next
                .products
                .iter()
                .any(|p| p.sku == sku.trim() && p.id != req.id);
            if collides {
                return Err(RepositoryError::DuplicateSku(sku.trim().to_string()));
            }
        }

        let product = next
            .find_product_mut(&req.id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(sku) = &req.sku {
            product.sku = sku.trim().to_string();
        }
        if let Some(name) = &req.name {
            product.name = name.trim().to_string();
        }
        if let Some(description) = &req.description {
            product.description = description.trim().to_string();
        }
        if let Some(category_id) = &req.category_id {
            product.category_id = category_id.clone();
        }
        if let Some(status) = req.status {
            product.status = status;
        }

        // Sub-objects merge one field at a time, never wholesale.
        if let Some(pricing) = &req.pricing {
            if let Some(purchase_price) = pricing.purchase_price {
                product.pricing.purchase_price = purchase_price;
            }
            if let Some(sell_price) = pricing.sell_price {
                product.pricing.sell_price = sell_price;
            }
            if let Some(currency) = &pricing.currency {
                product.pricing.currency = currency.clone();
            }
            product.pricing.recompute_margin();

            if product.pricing.sell_price < product.pricing.purchase_price
                && product.pricing.sell_price > 0.0
            {
                warn!("⚠ Sell price is below purchase price for SKU {}", product.sku);
            }
        }
        if let Some(stock) = &req.stock {
            if let Some(min_quantity) = stock.min_quantity {
                product.stock.min_quantity = min_quantity;
            }
            if let Some(max_quantity) = stock.max_quantity {
                product.stock.max_quantity = max_quantity;
            }
            if let Some(location) = &stock.location {
                product.stock.location = location.clone();
            }
        }

        product.modified_at = Utc::now();
        let updated = product.clone();

        next.touch();
        self.persist(&mut doc, next, "product update").await?;

        info!("✓ Product updated: {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    async fn adjust_stock(&self, id: &str, delta: i64) -> Result<Product, RepositoryError> {
        let mut doc = self.state.write().await;
        let mut next = doc.clone();

        let product = next.find_product_mut(id).ok_or(RepositoryError::NotFound)?;

        let new_quantity = product.stock.quantity + delta;
        if new_quantity < 0 {
            return Err(RepositoryError::InsufficientStock {
                available: product.stock.quantity,
                requested: delta.abs(),
            });
        }

        product.stock.quantity = new_quantity;
        product.modified_at = Utc::now();
        let updated = product.clone();

        next.touch();
        self.persist(&mut doc, next, "stock adjustment").await?;

        info!(
            "✓ Stock adjusted for {} ({delta:+}): now {}",
            updated.id, updated.stock.quantity
        );
        Ok(updated)
    }

    async fn activate_product(&self, id: &str) -> Result<Product, RepositoryError> {
        let mut doc = self.state.write().await;
        let mut next = doc.clone();

        let product = next.find_product_mut(id).ok_or(RepositoryError::NotFound)?;
        product.status = ProductStatus::Active;
        product.modified_at = Utc::now();
        let updated = product.clone();

        next.touch();
        self.persist(&mut doc, next, "product activation").await?;

        info!("✓ Product reactivated: {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    async fn delete_product(&self, id: &str) -> Result<DeleteOutcome, RepositoryError> {
        let mut doc = self.state.write().await;
        let mut next = doc.clone();

        let index = next
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        let outcome = if next.product_has_movements(id) {
            // Movements keep their product reference resolvable: archive
            // instead of removing.
            let product = &mut next.products[index];
            product.status = ProductStatus::Inactive;
            product.modified_at = Utc::now();
            let archived = product.clone();
            info!("✓ Product archived (has movements): {} ({id})", archived.name);
            DeleteOutcome::Deactivated(archived)
        } else {
            let removed = next.products.remove(index);
            info!("✓ Product removed permanently: {} ({id})", removed.name);
            DeleteOutcome::Removed(removed.id)
        };

        next.touch();
        self.persist(&mut doc, next, "product deletion").await?;

        Ok(outcome)
    }
}

#[async_trait]
impl StockAdjusterTrait for ProductCommandRepository {
    async fn adjust_stock(
        &self,
        product_id: &str,
        delta: i64,
    ) -> Result<Product, RepositoryError> {
        ProductCommandRepositoryTrait::adjust_stock(self, product_id, delta).await
    }
}
