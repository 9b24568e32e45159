use chrono::Utc;
use movement::abstract_trait::{MovementCommandServiceTrait, MovementQueryServiceTrait};
use movement::repository::{MovementCommandRepository, MovementQueryRepository};
use movement::service::{MovementCommandService, MovementQueryService};
use product::repository::ProductCommandRepository;
use prometheus_client::registry::Registry;
use shared::domain::requests::{
    AuditFilter, MovementFilter, RecordAdjustmentRequest, RecordMovementRequest,
};
use shared::errors::{RepositoryError, ServiceError};
use shared::model::{
    AuditAction, Category, InventoryDocument, MovementType, Pricing, Product, ProductStatus,
    ReasonCode, StockLevels,
};
use shared::storage::{DocumentStore, SharedDocument};
use std::sync::Arc;
use tokio::sync::RwLock;

const USER: &str = "warehouse@acme.test";

fn seed_product(id: &str, sku: &str, quantity: i64) -> Product {
    let now = Utc::now();
    Product {
        id: id.to_string(),
        sku: sku.to_string(),
        name: format!("Product {sku}"),
        description: String::new(),
        category_id: "CAT-001".to_string(),
        pricing: Pricing::new(50.0, 75.0),
        stock: StockLevels {
            quantity,
            min_quantity: 2,
            max_quantity: 100,
            location: "Main Warehouse".to_string(),
        },
        status: ProductStatus::Active,
        created_at: now,
        modified_at: now,
    }
}

fn harness(
    products: Vec<Product>,
) -> (MovementCommandService, MovementQueryService, SharedDocument) {
    let now = Utc::now();
    let mut doc = InventoryDocument::default();
    doc.categories.push(Category {
        id: "CAT-001".to_string(),
        name: "Electronics".to_string(),
        description: String::new(),
        icon: "📂".to_string(),
        color: "#4ECDC4".to_string(),
        active: true,
        created_at: now,
        modified_at: now,
    });
    doc.products = products;

    let state: SharedDocument = Arc::new(RwLock::new(doc));
    let store = DocumentStore::in_memory();
    let mut registry = Registry::default();

    let adjuster = Arc::new(ProductCommandRepository::new(state.clone(), store.clone()));
    let command = MovementCommandService::new(
        Arc::new(MovementCommandRepository::new(
            state.clone(),
            store.clone(),
            adjuster,
        )),
        &mut registry,
    );
    let query = MovementQueryService::new(
        Arc::new(MovementQueryRepository::new(state.clone())),
        &mut registry,
    );

    (command, query, state)
}

fn entry(product_id: &str, quantity: i64, reason: ReasonCode) -> RecordMovementRequest {
    RecordMovementRequest {
        product_id: product_id.to_string(),
        quantity,
        reason,
        user: USER.to_string(),
        notes: String::new(),
    }
}

async fn quantity_of(state: &SharedDocument, product_id: &str) -> i64 {
    state
        .read()
        .await
        .find_product(product_id)
        .unwrap()
        .stock
        .quantity
}

#[tokio::test]
async fn entry_increases_stock_and_appends_to_ledger() {
    let (command, _, state) = harness(vec![seed_product("P1", "SKU-001", 10)]);

    let movement = command
        .record_entry(&entry("P1", 5, ReasonCode::Purchase))
        .await
        .unwrap()
        .data;

    assert_eq!(movement.id, "MOV-00001");
    assert_eq!(movement.movement_type, MovementType::Entry);
    assert_eq!(quantity_of(&state, "P1").await, 15);

    let doc = state.read().await;
    assert_eq!(doc.movements.len(), 1);
    assert_eq!(doc.audit_log.len(), 1);
    assert_eq!(doc.audit_log[0].action, AuditAction::EntryRecorded);
}

#[tokio::test]
async fn exit_can_drain_stock_to_zero_but_not_below() {
    let (command, _, state) = harness(vec![seed_product("P1", "SKU-001", 10)]);

    let movement = command
        .record_exit(&entry("P1", 10, ReasonCode::CustomerSale))
        .await
        .unwrap()
        .data;
    assert_eq!(movement.quantity, 10);
    assert_eq!(quantity_of(&state, "P1").await, 0);

    let err = command
        .record_exit(&entry("P1", 1, ReasonCode::CustomerSale))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::InsufficientStock {
            available: 0,
            requested: 1
        })
    ));
    assert_eq!(quantity_of(&state, "P1").await, 0);
}

#[tokio::test]
async fn entry_with_exit_reason_is_rejected_without_side_effects() {
    let (command, _, state) = harness(vec![seed_product("P1", "SKU-001", 10)]);

    let err = command
        .record_entry(&entry("P1", 5, ReasonCode::CustomerSale))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::InvalidReasonCode {
            reason: ReasonCode::CustomerSale,
            movement_type: MovementType::Entry,
        })
    ));

    let doc = state.read().await;
    assert_eq!(doc.find_product("P1").unwrap().stock.quantity, 10);
    assert!(doc.movements.is_empty());
    assert!(doc.audit_log.is_empty());
}

#[tokio::test]
async fn unknown_product_fails_first() {
    let (command, _, _) = harness(vec![]);

    // Every other field is invalid too; the product check wins.
    let err = command
        .record_entry(&RecordMovementRequest {
            product_id: "P404".to_string(),
            quantity: 0,
            reason: ReasonCode::CustomerSale,
            user: String::new(),
            notes: String::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::MissingProduct(id)) if id == "P404"
    ));
}

#[tokio::test]
async fn non_positive_quantity_is_rejected() {
    let (command, _, _) = harness(vec![seed_product("P1", "SKU-001", 10)]);

    for quantity in [0, -4] {
        let err = command
            .record_entry(&entry("P1", quantity, ReasonCode::Purchase))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repo(RepositoryError::InvalidQuantity(q)) if q == quantity
        ));
    }
}

#[tokio::test]
async fn stock_availability_is_checked_before_reason() {
    let (command, _, _) = harness(vec![seed_product("P1", "SKU-001", 10)]);

    // Both the quantity and the reason are wrong for an exit; availability
    // is the check that must fire.
    let err = command
        .record_exit(&entry("P1", 25, ReasonCode::Purchase))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::InsufficientStock {
            available: 10,
            requested: 25
        })
    ));
}

#[tokio::test]
async fn reason_is_checked_before_user() {
    let (command, _, _) = harness(vec![seed_product("P1", "SKU-001", 10)]);

    let err = command
        .record_entry(&RecordMovementRequest {
            user: String::new(),
            ..entry("P1", 5, ReasonCode::CustomerSale)
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::InvalidReasonCode { .. })
    ));
}

#[tokio::test]
async fn blank_user_is_rejected_last() {
    let (command, _, state) = harness(vec![seed_product("P1", "SKU-001", 10)]);

    let err = command
        .record_entry(&RecordMovementRequest {
            user: "  ".to_string(),
            ..entry("P1", 5, ReasonCode::Purchase)
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::MissingUser)
    ));
    assert_eq!(quantity_of(&state, "P1").await, 10);
}

#[tokio::test]
async fn adjustment_direction_follows_the_sign() {
    let (command, _, state) = harness(vec![seed_product("P1", "SKU-001", 10)]);

    let up = command
        .record_adjustment(&RecordAdjustmentRequest {
            product_id: "P1".to_string(),
            quantity: 4,
            user: USER.to_string(),
            note: String::new(),
        })
        .await
        .unwrap()
        .data;
    assert_eq!(up.movement_type, MovementType::Entry);
    assert_eq!(up.reason, ReasonCode::InventoryAdjustment);
    assert_eq!(quantity_of(&state, "P1").await, 14);

    let down = command
        .record_adjustment(&RecordAdjustmentRequest {
            product_id: "P1".to_string(),
            quantity: -6,
            user: USER.to_string(),
            note: "Cycle count correction".to_string(),
        })
        .await
        .unwrap()
        .data;
    assert_eq!(down.movement_type, MovementType::Exit);
    assert_eq!(down.quantity, 6);
    assert_eq!(quantity_of(&state, "P1").await, 8);
}

#[tokio::test]
async fn adjustment_below_available_stock_is_rejected() {
    let (command, _, state) = harness(vec![seed_product("P1", "SKU-001", 10)]);

    let err = command
        .record_adjustment(&RecordAdjustmentRequest {
            product_id: "P1".to_string(),
            quantity: -11,
            user: USER.to_string(),
            note: String::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::InsufficientStock { .. })
    ));
    assert_eq!(quantity_of(&state, "P1").await, 10);
}

#[tokio::test]
async fn movement_ids_are_sequential() {
    let (command, _, _) = harness(vec![seed_product("P1", "SKU-001", 10)]);

    let first = command
        .record_entry(&entry("P1", 1, ReasonCode::Purchase))
        .await
        .unwrap()
        .data;
    let second = command
        .record_entry(&entry("P1", 1, ReasonCode::Purchase))
        .await
        .unwrap()
        .data;

    assert_eq!(first.id, "MOV-00001");
    assert_eq!(second.id, "MOV-00002");
}

#[tokio::test]
async fn consistency_holds_after_any_mix_of_movements() {
    let (command, query, _) = harness(vec![seed_product("P1", "SKU-001", 0)]);

    command
        .record_entry(&entry("P1", 20, ReasonCode::InitialReceipt))
        .await
        .unwrap();
    command
        .record_exit(&entry("P1", 7, ReasonCode::CustomerSale))
        .await
        .unwrap();
    command
        .record_entry(&entry("P1", 3, ReasonCode::CustomerReturn))
        .await
        .unwrap();

    let report = query.verify_consistency("P1").await.unwrap().data;
    assert!(report.is_consistent);
    assert_eq!(report.recorded_quantity, 16);
    assert_eq!(report.computed_quantity, 16);
    assert_eq!(report.total_movements, 3);
}

#[tokio::test]
async fn consistency_mismatch_is_reported_not_repaired() {
    let (command, query, state) = harness(vec![seed_product("P1", "SKU-001", 0)]);

    command
        .record_entry(&entry("P1", 20, ReasonCode::InitialReceipt))
        .await
        .unwrap();

    // Corrupt the stored quantity behind the ledger's back.
    state
        .write()
        .await
        .find_product_mut("P1")
        .unwrap()
        .stock
        .quantity = 99;

    let err = query.verify_consistency("P1").await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::InconsistentStock {
            recorded: 99,
            computed: 20,
            ..
        })
    ));

    // Detection only: the stored figure stays corrupted.
    assert_eq!(quantity_of(&state, "P1").await, 99);
}

#[tokio::test]
async fn consistency_check_for_unknown_product_is_not_found() {
    let (_, query, _) = harness(vec![]);

    let err = query.verify_consistency("P404").await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::NotFound)
    ));
}

#[tokio::test]
async fn stock_history_replays_running_balance() {
    let (command, query, _) = harness(vec![seed_product("P1", "SKU-001", 0)]);

    command
        .record_entry(&entry("P1", 10, ReasonCode::InitialReceipt))
        .await
        .unwrap();
    command
        .record_exit(&entry("P1", 4, ReasonCode::CustomerSale))
        .await
        .unwrap();
    command
        .record_entry(&entry("P1", 2, ReasonCode::CustomerReturn))
        .await
        .unwrap();

    let history = query.stock_history("P1").await.unwrap().data;
    let balances: Vec<i64> = history.iter().map(|h| h.resulting_quantity).collect();
    assert_eq!(balances, vec![10, 6, 8]);
    let changes: Vec<i64> = history.iter().map(|h| h.change).collect();
    assert_eq!(changes, vec![10, -4, 2]);
}

#[tokio::test]
async fn filters_narrow_by_type_and_product() {
    let (command, query, _) = harness(vec![
        seed_product("P1", "SKU-001", 10),
        seed_product("P2", "SKU-002", 10),
    ]);

    command
        .record_entry(&entry("P1", 5, ReasonCode::Purchase))
        .await
        .unwrap();
    command
        .record_exit(&entry("P1", 2, ReasonCode::CustomerSale))
        .await
        .unwrap();
    command
        .record_exit(&entry("P2", 1, ReasonCode::DamageLoss))
        .await
        .unwrap();

    let exits = query
        .find_all(&MovementFilter {
            movement_type: Some(MovementType::Exit),
            ..MovementFilter::default()
        })
        .await
        .unwrap()
        .data;
    assert_eq!(exits.len(), 2);

    let p1_only = query.find_by_product("P1").await.unwrap().data;
    assert_eq!(p1_only.len(), 2);

    let recent = query.find_recent(7).await.unwrap().data;
    assert_eq!(recent.len(), 3);
}

#[tokio::test]
async fn statistics_aggregate_by_direction_and_reason() {
    let (command, query, _) = harness(vec![seed_product("P1", "SKU-001", 0)]);

    command
        .record_entry(&entry("P1", 10, ReasonCode::Purchase))
        .await
        .unwrap();
    command
        .record_entry(&entry("P1", 5, ReasonCode::Purchase))
        .await
        .unwrap();
    command
        .record_exit(&entry("P1", 3, ReasonCode::CustomerSale))
        .await
        .unwrap();

    let stats = query.statistics().await.unwrap().data;
    assert_eq!(stats.total_movements, 3);
    assert_eq!(stats.total_entries, 2);
    assert_eq!(stats.total_exits, 1);
    assert_eq!(stats.units_in, 15);
    assert_eq!(stats.units_out, 3);
    assert_eq!(stats.net_balance, 12);
    assert_eq!(stats.entries_by_reason.get("PURCHASE"), Some(&15));
    assert_eq!(stats.exits_by_reason.get("CUSTOMER_SALE"), Some(&3));
    assert_eq!(stats.active_users, vec![USER.to_string()]);
}

#[tokio::test]
async fn audit_log_tracks_committed_movements_only() {
    let (command, query, _) = harness(vec![seed_product("P1", "SKU-001", 10)]);

    command
        .record_entry(&entry("P1", 5, ReasonCode::Purchase))
        .await
        .unwrap();
    command
        .record_exit(&entry("P1", 2, ReasonCode::CustomerSale))
        .await
        .unwrap();
    // Rejected: must not leave an audit trace.
    command
        .record_exit(&entry("P1", 999, ReasonCode::CustomerSale))
        .await
        .unwrap_err();

    let all = query.audit_log(&AuditFilter::default()).await.unwrap().data;
    assert_eq!(all.len(), 2);

    let exits_only = query
        .audit_log(&AuditFilter {
            action: Some(AuditAction::ExitRecorded),
            ..AuditFilter::default()
        })
        .await
        .unwrap()
        .data;
    assert_eq!(exits_only.len(), 1);
    assert_eq!(exits_only[0].movement.quantity, 2);
}

#[tokio::test]
async fn top_moved_ranks_by_movement_count() {
    let (command, query, _) = harness(vec![
        seed_product("P1", "SKU-001", 0),
        seed_product("P2", "SKU-002", 0),
    ]);

    for _ in 0..3 {
        command
            .record_entry(&entry("P1", 1, ReasonCode::Purchase))
            .await
            .unwrap();
    }
    command
        .record_entry(&entry("P2", 50, ReasonCode::Purchase))
        .await
        .unwrap();

    let ranked = query.top_moved(10).await.unwrap().data;
    assert_eq!(ranked[0].product_id, "P1");
    assert_eq!(ranked[0].total_movements, 3);
    assert_eq!(ranked[1].product_id, "P2");
    assert_eq!(ranked[1].total_entries, 50);

    let capped = query.top_moved(1).await.unwrap().data;
    assert_eq!(capped.len(), 1);
}
