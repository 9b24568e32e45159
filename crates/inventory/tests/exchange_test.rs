use category::abstract_trait::CategoryCommandServiceTrait;
use inventory::AppState;
use movement::abstract_trait::MovementCommandServiceTrait;
use product::abstract_trait::ProductCommandServiceTrait;
use shared::domain::requests::{
    CreateCategoryRequest, CreateProductRequest, RecordMovementRequest,
};
use shared::domain::responses::ExportDocument;
use shared::errors::ServiceError;
use shared::model::ReasonCode;

const USER: &str = "warehouse@acme.test";

async fn populated_state() -> AppState {
    let state = AppState::in_memory().await.unwrap();
    let di = &state.di_container;

    di.category_command
        .create_category(&CreateCategoryRequest {
            name: "Electronics".to_string(),
            description: "Gadgets".to_string(),
            icon: Some("🖥️".to_string()),
            color: Some("#FF6B6B".to_string()),
        })
        .await
        .unwrap();

    let product = di
        .product_command
        .create_product(&CreateProductRequest {
            sku: "SKU-001".to_string(),
            name: "Widget".to_string(),
            description: String::new(),
            category_id: "CAT-001".to_string(),
            purchase_price: 40.0,
            sell_price: 60.0,
            quantity: 0,
            min_quantity: None,
            max_quantity: None,
            location: None,
        })
        .await
        .unwrap()
        .data;

    di.movement_command
        .record_entry(&RecordMovementRequest {
            product_id: product.id.clone(),
            quantity: 25,
            reason: ReasonCode::InitialReceipt,
            user: USER.to_string(),
            notes: "Opening stock".to_string(),
        })
        .await
        .unwrap();
    di.movement_command
        .record_exit(&RecordMovementRequest {
            product_id: product.id,
            quantity: 5,
            reason: ReasonCode::CustomerSale,
            user: USER.to_string(),
            notes: String::new(),
        })
        .await
        .unwrap();

    state
}

#[tokio::test]
async fn export_carries_the_metadata_envelope() {
    let state = populated_state().await;

    let json = state
        .di_container
        .exchange
        .export_document()
        .await
        .unwrap()
        .data;

    let parsed: ExportDocument = serde_json::from_str(&json).unwrap();
    let metadata = parsed.metadata.unwrap();
    assert_eq!(metadata.version, "1.0");
    assert_eq!(metadata.totals.categories, 1);
    assert_eq!(metadata.totals.products, 1);
    assert_eq!(metadata.totals.movements, 2);
    assert!(parsed.last_updated.is_some());

    // Pretty-printed, per the interchange contract.
    assert!(json.contains('\n'));
}

#[tokio::test]
async fn export_import_round_trip_reproduces_collections() {
    let source = populated_state().await;
    let json = source
        .di_container
        .exchange
        .export_document()
        .await
        .unwrap()
        .data;

    let target = AppState::in_memory().await.unwrap();
    let summary = target
        .di_container
        .exchange
        .import_document(&json)
        .await
        .unwrap()
        .data;

    assert_eq!(summary.categories, 1);
    assert_eq!(summary.products, 1);
    assert_eq!(summary.movements, 2);

    let source_doc = source.document.read().await;
    let target_doc = target.document.read().await;
    assert_eq!(source_doc.categories, target_doc.categories);
    assert_eq!(source_doc.products, target_doc.products);
    assert_eq!(source_doc.movements, target_doc.movements);
}

#[tokio::test]
async fn imported_ledger_still_verifies_consistent() {
    use movement::abstract_trait::MovementQueryServiceTrait;

    let source = populated_state().await;
    let json = source
        .di_container
        .exchange
        .export_document()
        .await
        .unwrap()
        .data;

    let target = AppState::in_memory().await.unwrap();
    target
        .di_container
        .exchange
        .import_document(&json)
        .await
        .unwrap();

    let report = target
        .di_container
        .movement_query
        .verify_consistency("PROD-001")
        .await
        .unwrap()
        .data;
    assert!(report.is_consistent);
    assert_eq!(report.recorded_quantity, 20);
}

#[tokio::test]
async fn import_replaces_existing_collections() {
    let source = populated_state().await;
    let json = source
        .di_container
        .exchange
        .export_document()
        .await
        .unwrap()
        .data;

    let target = populated_state().await;
    target
        .di_container
        .category_command
        .create_category(&CreateCategoryRequest {
            name: "To be replaced".to_string(),
            description: String::new(),
            icon: None,
            color: None,
        })
        .await
        .unwrap();
    assert_eq!(target.document.read().await.categories.len(), 2);

    target
        .di_container
        .exchange
        .import_document(&json)
        .await
        .unwrap();

    assert_eq!(target.document.read().await.categories.len(), 1);
}

#[tokio::test]
async fn malformed_import_leaves_state_untouched() {
    let state = populated_state().await;
    let revision_before = state.document.read().await.revision;

    let err = state
        .di_container
        .exchange
        .import_document("{ not json at all")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidImportFormat(_)));

    let doc = state.document.read().await;
    assert_eq!(doc.revision, revision_before);
    assert_eq!(doc.products.len(), 1);
    assert_eq!(doc.movements.len(), 2);

    let persisted = state.store.load().await.unwrap().unwrap();
    assert_eq!(persisted.revision, revision_before);
}

#[tokio::test]
async fn import_accepts_a_bare_document_without_metadata() {
    let state = AppState::in_memory().await.unwrap();

    let summary = state
        .di_container
        .exchange
        .import_document(r#"{"categories": [], "products": [], "movements": []}"#)
        .await
        .unwrap()
        .data;

    assert_eq!(summary.categories, 0);
    assert_eq!(summary.products, 0);
    assert_eq!(summary.movements, 0);
}
