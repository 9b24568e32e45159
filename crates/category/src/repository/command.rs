use crate::abstract_trait::CategoryCommandRepositoryTrait;
use async_trait::async_trait;
use chrono::Utc;
use shared::{
    domain::requests::{CreateCategoryRequest, UpdateCategoryRequest},
    errors::RepositoryError,
    model::{Category, DEFAULT_CATEGORY_COLOR, DEFAULT_CATEGORY_ICON},
    storage::{DocumentStore, SharedDocument},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct CategoryCommandRepository {
    state: SharedDocument,
    store: DocumentStore,
}

impl CategoryCommandRepository {
    pub fn new(state: SharedDocument, store: DocumentStore) -> Self {
        Self { state, store }
    }
}

#[async_trait]
impl CategoryCommandRepositoryTrait for CategoryCommandRepository {
    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<Category, RepositoryError> {
        let mut doc = self.state.write().await;
        let mut next = doc.clone();

        let now = Utc::now();
        let category = Category {
            id: next.next_category_id(),
            name: req.name.trim().to_string(),
            description: req.description.trim().to_string(),
            icon: req
                .icon
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string()),
            color: req
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
            active: true,
            created_at: now,
            modified_at: now,
        };

        next.categories.push(category.clone());
        next.touch();
        self.store.save(&next).await.map_err(|e| {
            error!("❌ Failed to persist category creation: {e:?}");
            RepositoryError::from(e)
        })?;
        *doc = next;

        info!("✓ Category created: {} ({})", category.name, category.id);
        Ok(category)
    }

    async fn update_category(
        &self,
        req: &UpdateCategoryRequest,
    ) -> Result<Category, RepositoryError> {
        let mut doc = self.state.write().await;
        let mut next = doc.clone();

        let category = next
            .categories
            .iter_mut()
            .find(|c| c.id == req.id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = &req.name {
            category.name = name.trim().to_string();
        }
        if let Some(description) = &req.description {
            category.description = description.trim().to_string();
        }
        if let Some(icon) = &req.icon {
            category.icon = icon.clone();
        }
        if let Some(color) = &req.color {
            category.color = color.clone();
        }
        if let Some(active) = req.active {
            category.active = active;
        }
        category.modified_at = Utc::now();
        let updated = category.clone();

        next.touch();
        self.store.save(&next).await.map_err(|e| {
            error!("❌ Failed to persist category update: {e:?}");
            RepositoryError::from(e)
        })?;
        *doc = next;

        info!("✓ Category updated: {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    async fn delete_category(&self, id: &str) -> Result<(), RepositoryError> {
        let mut doc = self.state.write().await;
        let mut next = doc.clone();

        let index = next
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;

        // Blocked while any product, of any status, still points here.
        // Nothing re-validates references afterwards: this is the only
        // integrity gate the system has ever had.
        let product_count = next.category_reference_count(id);
        if product_count > 0 {
            return Err(RepositoryError::CategoryInUse {
                id: id.to_string(),
                product_count,
            });
        }

        next.categories.remove(index);
        next.touch();
        self.store.save(&next).await.map_err(|e| {
            error!("❌ Failed to persist category deletion: {e:?}");
            RepositoryError::from(e)
        })?;
        *doc = next;

        info!("✓ Category removed: {id}");
        Ok(())
    }
}
