use chrono::Utc;
use product::abstract_trait::{ProductCommandServiceTrait, ProductQueryServiceTrait};
use product::repository::{ProductCommandRepository, ProductQueryRepository};
use product::service::{ProductCommandService, ProductQueryService};
use prometheus_client::registry::Registry;
use shared::domain::requests::{
    CreateProductRequest, PricingUpdate, StockLevelsUpdate, UpdateProductRequest,
};
use shared::domain::responses::ProductDeleteResponse;
use shared::errors::{RepositoryError, ServiceError};
use shared::model::{
    Category, InventoryDocument, Movement, MovementStatus, MovementType, ProductStatus, ReasonCode,
};
use shared::storage::{DocumentStore, SharedDocument};
use std::sync::Arc;
use tokio::sync::RwLock;

fn seed_category(id: &str) -> Category {
    let now = Utc::now();
    Category {
        id: id.to_string(),
        name: "Electronics".to_string(),
        description: String::new(),
        icon: "📂".to_string(),
        color: "#4ECDC4".to_string(),
        active: true,
        created_at: now,
        modified_at: now,
    }
}

fn harness() -> (ProductCommandService, ProductQueryService, SharedDocument) {
    let mut doc = InventoryDocument::default();
    doc.categories.push(seed_category("CAT-001"));

    let state: SharedDocument = Arc::new(RwLock::new(doc));
    let store = DocumentStore::in_memory();
    let mut registry = Registry::default();

    let command = ProductCommandService::new(
        Arc::new(ProductCommandRepository::new(state.clone(), store.clone())),
        &mut registry,
    );
    let query = ProductQueryService::new(
        Arc::new(ProductQueryRepository::new(state.clone())),
        &mut registry,
    );

    (command, query, state)
}

fn create_request(sku: &str, name: &str) -> CreateProductRequest {
    CreateProductRequest {
        sku: sku.to_string(),
        name: name.to_string(),
        description: String::new(),
        category_id: "CAT-001".to_string(),
        purchase_price: 50.0,
        sell_price: 75.0,
        quantity: 10,
        min_quantity: None,
        max_quantity: None,
        location: None,
    }
}

fn movement_for(product_id: &str) -> Movement {
    Movement {
        id: "MOV-00001".to_string(),
        movement_type: MovementType::Entry,
        product_id: product_id.to_string(),
        quantity: 1,
        reason: ReasonCode::Purchase,
        timestamp: Utc::now(),
        user: "warehouse@acme.test".to_string(),
        notes: String::new(),
        status: MovementStatus::Completed,
    }
}

#[tokio::test]
async fn create_applies_defaults_and_derives_margin() {
    let (command, _, _) = harness();

    let product = command
        .create_product(&create_request("SKU-001", "Widget"))
        .await
        .unwrap()
        .data;

    assert_eq!(product.id, "PROD-001");
    assert_eq!(product.min_quantity, 5);
    assert_eq!(product.max_quantity, 100);
    assert_eq!(product.location, "Main Warehouse");
    assert_eq!(product.currency, "USD");
    assert_eq!(product.status, ProductStatus::Active);
    assert_eq!(product.margin, 50.0);
}

#[tokio::test]
async fn create_rejects_duplicate_sku() {
    let (command, _, _) = harness();

    command
        .create_product(&create_request("SKU-001", "Widget"))
        .await
        .unwrap();

    let err = command
        .create_product(&create_request("SKU-001", "A different widget"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::DuplicateSku(sku)) if sku == "SKU-001"
    ));
}

#[tokio::test]
async fn sku_uniqueness_includes_inactive_products() {
    let (command, _, _) = harness();

    let product = command
        .create_product(&create_request("SKU-001", "Widget"))
        .await
        .unwrap()
        .data;

    command
        .update_product(&UpdateProductRequest {
            id: product.id.clone(),
            sku: None,
            name: None,
            description: None,
            category_id: None,
            status: Some(ProductStatus::Inactive),
            pricing: None,
            stock: None,
        })
        .await
        .unwrap();

    let err = command
        .create_product(&create_request("SKU-001", "Replacement widget"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::DuplicateSku(_))
    ));
}

#[tokio::test]
async fn create_rejects_missing_required_fields() {
    let (command, _, _) = harness();

    let missing_name = CreateProductRequest {
        name: " ".to_string(),
        ..create_request("SKU-001", "x")
    };
    let err = command.create_product(&missing_name).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::MissingField("name"))
    ));

    let missing_sku = CreateProductRequest {
        sku: String::new(),
        ..create_request("x", "Widget")
    };
    let err = command.create_product(&missing_sku).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::MissingField("sku"))
    ));

    let missing_category = CreateProductRequest {
        category_id: String::new(),
        ..create_request("SKU-001", "Widget")
    };
    let err = command.create_product(&missing_category).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::MissingField("categoryId"))
    ));
}

#[tokio::test]
async fn create_rejects_unknown_category() {
    let (command, _, _) = harness();

    let request = CreateProductRequest {
        category_id: "CAT-404".to_string(),
        ..create_request("SKU-001", "Widget")
    };
    let err = command.create_product(&request).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::NotFound)
    ));
}

#[tokio::test]
async fn update_merges_pricing_field_by_field() {
    let (command, _, _) = harness();

    let product = command
        .create_product(&create_request("SKU-001", "Widget"))
        .await
        .unwrap()
        .data;

    let updated = command
        .update_product(&UpdateProductRequest {
            id: product.id.clone(),
            sku: None,
            name: None,
            description: None,
            category_id: None,
            status: None,
            pricing: Some(PricingUpdate {
                purchase_price: None,
                sell_price: Some(100.0),
                currency: None,
            }),
            stock: Some(StockLevelsUpdate {
                min_quantity: Some(2),
                max_quantity: None,
                location: None,
            }),
        })
        .await
        .unwrap()
        .data;

    // Untouched fields survive the merge; margin tracks the new price.
    assert_eq!(updated.purchase_price, 50.0);
    assert_eq!(updated.sell_price, 100.0);
    assert_eq!(updated.margin, 100.0);
    assert_eq!(updated.min_quantity, 2);
    assert_eq!(updated.max_quantity, 100);
    assert_eq!(updated.quantity, 10);
}

#[tokio::test]
async fn update_rejects_sku_collision_with_other_product() {
    let (command, _, _) = harness();

    command
        .create_product(&create_request("SKU-001", "Widget"))
        .await
        .unwrap();
    let second = command
        .create_product(&create_request("SKU-002", "Gadget"))
        .await
        .unwrap()
        .data;

    let err = command
        .update_product(&UpdateProductRequest {
            id: second.id.clone(),
            sku: Some("SKU-001".to_string()),
            name: None,
            description: None,
            category_id: None,
            status: None,
            pricing: None,
            stock: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::DuplicateSku(_))
    ));

    // Re-asserting its own SKU is not a collision.
    command
        .update_product(&UpdateProductRequest {
            id: second.id,
            sku: Some("SKU-002".to_string()),
            name: None,
            description: None,
            category_id: None,
            status: None,
            pricing: None,
            stock: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn adjust_stock_applies_signed_deltas() {
    let (command, _, _) = harness();

    let product = command
        .create_product(&create_request("SKU-001", "Widget"))
        .await
        .unwrap()
        .data;

    let after_entry = command.adjust_stock(&product.id, 5).await.unwrap().data;
    assert_eq!(after_entry.quantity, 15);

    let after_exit = command.adjust_stock(&product.id, -15).await.unwrap().data;
    assert_eq!(after_exit.quantity, 0);
}

#[tokio::test]
async fn adjust_stock_never_goes_negative() {
    let (command, query, _) = harness();

    let product = command
        .create_product(&create_request("SKU-001", "Widget"))
        .await
        .unwrap()
        .data;

    let err = command.adjust_stock(&product.id, -11).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::InsufficientStock {
            available: 10,
            requested: 11
        })
    ));

    // Rejected adjustment leaves the stored quantity untouched.
    let unchanged = query.find_by_id(&product.id).await.unwrap().data;
    assert_eq!(unchanged.quantity, 10);
}

#[tokio::test]
async fn delete_without_movements_removes_the_record() {
    let (command, query, _) = harness();

    let product = command
        .create_product(&create_request("SKU-001", "Widget"))
        .await
        .unwrap()
        .data;

    let outcome = command.delete_product(&product.id).await.unwrap().data;
    assert!(matches!(
        outcome,
        ProductDeleteResponse::Removed { ref id } if *id == product.id
    ));

    let err = query.find_by_id(&product.id).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::NotFound)
    ));
}

#[tokio::test]
async fn delete_with_movements_archives_instead() {
    let (command, query, state) = harness();

    let product = command
        .create_product(&create_request("SKU-001", "Widget"))
        .await
        .unwrap()
        .data;

    state
        .write()
        .await
        .movements
        .push(movement_for(&product.id));

    let outcome = command.delete_product(&product.id).await.unwrap().data;
    match outcome {
        ProductDeleteResponse::Deactivated { product: archived } => {
            assert_eq!(archived.status, ProductStatus::Inactive);
        }
        other => panic!("expected Deactivated, got {other:?}"),
    }

    // Still present, just inactive; reactivation brings it back.
    let stored = query.find_by_id(&product.id).await.unwrap().data;
    assert_eq!(stored.status, ProductStatus::Inactive);

    let restored = command.activate_product(&product.id).await.unwrap().data;
    assert_eq!(restored.status, ProductStatus::Active);
}

#[tokio::test]
async fn stock_queries_classify_products() {
    let (command, query, _) = harness();

    command
        .create_product(&CreateProductRequest {
            quantity: 0,
            ..create_request("SKU-001", "Out of stock widget")
        })
        .await
        .unwrap();
    command
        .create_product(&CreateProductRequest {
            quantity: 3,
            min_quantity: Some(5),
            ..create_request("SKU-002", "Low stock widget")
        })
        .await
        .unwrap();
    command
        .create_product(&CreateProductRequest {
            quantity: 50,
            ..create_request("SKU-003", "Healthy widget")
        })
        .await
        .unwrap();

    let low = query.find_low_stock().await.unwrap().data;
    assert_eq!(low.len(), 2);

    let out = query.find_out_of_stock().await.unwrap().data;
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].sku, "SKU-001");
}

#[tokio::test]
async fn search_matches_name_sku_and_description() {
    let (command, query, _) = harness();

    command
        .create_product(&CreateProductRequest {
            description: "Industrial fastener".to_string(),
            ..create_request("SKU-001", "Hex Bolt")
        })
        .await
        .unwrap();
    command
        .create_product(&create_request("SKU-002", "Washer"))
        .await
        .unwrap();

    assert_eq!(query.search("bolt").await.unwrap().data.len(), 1);
    assert_eq!(query.search("sku-002").await.unwrap().data.len(), 1);
    assert_eq!(query.search("fastener").await.unwrap().data.len(), 1);
    assert_eq!(query.search("nothing").await.unwrap().data.len(), 0);
}

#[tokio::test]
async fn statistics_summarize_active_inventory() {
    let (command, query, _) = harness();

    command
        .create_product(&create_request("SKU-001", "Widget"))
        .await
        .unwrap();
    command
        .create_product(&CreateProductRequest {
            quantity: 2,
            sell_price: 10.0,
            purchase_price: 5.0,
            ..create_request("SKU-002", "Gadget")
        })
        .await
        .unwrap();

    let stats = query.statistics().await.unwrap().data;
    assert_eq!(stats.total_products, 2);
    assert_eq!(stats.active_products, 2);
    assert_eq!(stats.total_units, 12);
    assert_eq!(stats.inventory_value, 75.0 * 10.0 + 10.0 * 2.0);
    assert_eq!(stats.average_margin, 75.0);
}
