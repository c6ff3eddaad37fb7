//! End-to-end order lifecycle against an in-memory store:
//! table -> cart -> rounds -> bill -> settlement -> sales summary.

use chrono::TimeZone;
use floor_server::core::ServerState;
use floor_server::db::models::{FloorTableCreate, MenuItem, MenuItemCreate};
use floor_server::db::repository::{FloorTableRepository, MenuItemRepository, OrderRepository};
use floor_server::orders::{CartSession, FlowError, OrderService, SettlementEngine};
use floor_server::orders::receipt::render_receipt;
use floor_server::reports::SalesService;
use shared::order::CartLineInput;
use shared::{FloorEvent, MenuCategory, OrderStatus, PaymentMethod, TableStatus};

struct Fixture {
    state: ServerState,
    table_id: String,
    pad_thai: MenuItem,
    iced_tea: MenuItem,
}

async fn setup() -> Fixture {
    let state = ServerState::in_memory().await.expect("in-memory db");

    let tables = FloorTableRepository::new(state.db.clone());
    let table = tables
        .create(FloorTableCreate {
            table_number: "A1".into(),
            seats: Some(4),
        })
        .await
        .expect("create table");

    let menu = MenuItemRepository::new(state.db.clone());
    let pad_thai = menu
        .create(MenuItemCreate {
            name: "Pad Thai".into(),
            description: None,
            price: 60.0,
            category: MenuCategory::Main,
            image_url: None,
            is_recommended: Some(true),
            is_available: Some(true),
        })
        .await
        .expect("create item");
    let iced_tea = menu
        .create(MenuItemCreate {
            name: "Iced Tea".into(),
            description: None,
            price: 25.0,
            category: MenuCategory::Drink,
            image_url: None,
            is_recommended: None,
            is_available: Some(true),
        })
        .await
        .expect("create item");

    Fixture {
        table_id: table.id.as_ref().expect("table id").to_string(),
        state,
        pad_thai,
        iced_tea,
    }
}

fn item_id(item: &MenuItem) -> String {
    item.id.as_ref().expect("item id").to_string()
}

fn lines(items: &[(&MenuItem, i32)]) -> Vec<CartLineInput> {
    items
        .iter()
        .map(|(item, quantity)| CartLineInput {
            menu_item_id: item_id(item),
            quantity: *quantity,
            note: None,
        })
        .collect()
}

#[tokio::test]
async fn submit_occupies_empty_table_and_is_idempotent() {
    let fx = setup().await;
    let service = OrderService::new(fx.state.db.clone(), fx.state.events.clone());
    let tables = FloorTableRepository::new(fx.state.db.clone());

    let mut cart = service
        .build_cart(&fx.table_id, lines(&[(&fx.pad_thai, 2), (&fx.iced_tea, 1)]))
        .await
        .expect("build cart");
    assert_eq!(cart.total(), 145.0);

    let order = service.submit(&mut cart).await.expect("submit");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, 145.0);
    assert_eq!(order.table_number, "A1");
    assert!(cart.is_empty(), "cart cleared after submit");

    let table = tables.find_by_id(&fx.table_id).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Occupied);

    // Second round on an occupied table leaves the status alone
    let mut cart2 = service
        .build_cart(&fx.table_id, lines(&[(&fx.iced_tea, 1)]))
        .await
        .unwrap();
    service.submit(&mut cart2).await.expect("second round");
    let table = tables.find_by_id(&fx.table_id).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Occupied);
}

#[tokio::test]
async fn submit_empty_cart_fails_and_leaves_table_untouched() {
    let fx = setup().await;
    let service = OrderService::new(fx.state.db.clone(), fx.state.events.clone());
    let tables = FloorTableRepository::new(fx.state.db.clone());

    let mut cart = CartSession::new(fx.table_id.clone());
    let err = service.submit(&mut cart).await.unwrap_err();
    assert!(matches!(err, FlowError::EmptyCart));

    let table = tables.find_by_id(&fx.table_id).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Empty);
}

#[tokio::test]
async fn submit_on_unknown_table_fails() {
    let fx = setup().await;
    let service = OrderService::new(fx.state.db.clone(), fx.state.events.clone());

    let mut cart = CartSession::new("floor_table:nonexistent");
    cart.add_item(&item_id(&fx.pad_thai), "Pad Thai", 60.0);

    let err = service.submit(&mut cart).await.unwrap_err();
    assert!(matches!(err, FlowError::TableNotFound(_)));
    assert!(!cart.is_empty(), "cart untouched on failure");
}

#[tokio::test]
async fn unavailable_items_are_rejected_at_snapshot_time() {
    let fx = setup().await;
    let menu = MenuItemRepository::new(fx.state.db.clone());
    menu.update(
        &item_id(&fx.pad_thai),
        floor_server::db::models::MenuItemUpdate {
            name: None,
            description: None,
            price: None,
            category: None,
            image_url: None,
            is_recommended: None,
            is_available: Some(false),
        },
    )
    .await
    .expect("make unavailable");

    let service = OrderService::new(fx.state.db.clone(), fx.state.events.clone());
    let err = service
        .build_cart(&fx.table_id, lines(&[(&fx.pad_thai, 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::MenuItemUnavailable(_)));
}

#[tokio::test]
async fn bill_merges_rounds_and_settle_frees_table() {
    let fx = setup().await;
    let service = OrderService::new(fx.state.db.clone(), fx.state.events.clone());
    let engine = SettlementEngine::new(fx.state.db.clone(), fx.state.events.clone());
    let tables = FloorTableRepository::new(fx.state.db.clone());
    let orders = OrderRepository::new(fx.state.db.clone());

    // Round 1: 2x Pad Thai + 1x Iced Tea = 145
    let mut cart = service
        .build_cart(&fx.table_id, lines(&[(&fx.pad_thai, 2), (&fx.iced_tea, 1)]))
        .await
        .unwrap();
    service.submit(&mut cart).await.unwrap();

    // Round 2: 1x Pad Thai = 60
    let mut cart = service
        .build_cart(&fx.table_id, lines(&[(&fx.pad_thai, 1)]))
        .await
        .unwrap();
    service.submit(&mut cart).await.unwrap();

    let bill = engine.compute_bill(&fx.table_id).await.unwrap();
    assert_eq!(bill.order_ids.len(), 2);
    assert_eq!(bill.grand_total, 205.0);
    // Lines merged across rounds by menu item
    assert_eq!(bill.lines.len(), 2);
    let pad_thai_line = bill
        .lines
        .iter()
        .find(|line| line.name == "Pad Thai")
        .unwrap();
    assert_eq!(pad_thai_line.quantity, 3);

    // Receipt preview has no persisted effect
    let receipt = render_receipt(
        &bill,
        "Test House",
        chrono_tz::Asia::Bangkok.from_utc_datetime(&chrono::Utc::now().naive_utc()),
    );
    assert!(receipt.contains("Pad Thai x3"));
    assert!(receipt.contains("Grand total: 205.00"));
    for order in engine.outstanding(&fx.table_id).await.unwrap() {
        assert_eq!(order.status, OrderStatus::Pending);
    }

    // Settle
    let settled = engine
        .settle(&fx.table_id, PaymentMethod::Cash)
        .await
        .unwrap();
    assert_eq!(settled.grand_total, 205.0);

    let table = tables.find_by_id(&fx.table_id).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Empty);

    for id in &settled.order_ids {
        let order = orders.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Paid);
        assert_eq!(order.payment_method, Some(PaymentMethod::Cash));
        assert!(order.paid_date.is_some());
    }

    // Nothing left to pay
    let err = engine
        .settle(&fx.table_id, PaymentMethod::Cash)
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::NoOutstandingOrders(_)));

    // Settled revenue shows up in today's sales
    let sales_service = SalesService::new(fx.state.db.clone(), chrono_tz::Asia::Bangkok);
    let today = chrono::Utc::now()
        .with_timezone(&chrono_tz::Asia::Bangkok)
        .date_naive();
    let sales = sales_service.daily(today).await.unwrap();
    assert_eq!(sales.total_revenue, 205.0);
    assert_eq!(sales.order_count, 2);
    assert_eq!(sales.by_payment_method.cash, 205.0);
    assert_eq!(sales.by_payment_method.transfer, 0.0);
}

#[tokio::test]
async fn settle_retry_never_recharges_an_already_paid_order() {
    let fx = setup().await;
    let service = OrderService::new(fx.state.db.clone(), fx.state.events.clone());
    let engine = SettlementEngine::new(fx.state.db.clone(), fx.state.events.clone());
    let tables = FloorTableRepository::new(fx.state.db.clone());
    let orders = OrderRepository::new(fx.state.db.clone());

    let mut cart = service
        .build_cart(&fx.table_id, lines(&[(&fx.pad_thai, 2)]))
        .await
        .unwrap();
    let first = service.submit(&mut cart).await.unwrap();
    let mut cart = service
        .build_cart(&fx.table_id, lines(&[(&fx.iced_tea, 1)]))
        .await
        .unwrap();
    let second = service.submit(&mut cart).await.unwrap();

    // Simulate a settle that died after the first per-order update: the
    // first round is already PAID while the table is still occupied
    let first_id = first.id_string();
    assert!(
        orders
            .mark_paid(&first_id, PaymentMethod::Transfer, 1_700_000_000_000)
            .await
            .unwrap()
    );
    let table = tables.find_by_id(&fx.table_id).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Occupied);

    // The retry only sees the remaining round and completes the job
    let bill = engine
        .settle(&fx.table_id, PaymentMethod::Cash)
        .await
        .unwrap();
    assert_eq!(bill.order_ids, vec![second.id_string()]);
    assert_eq!(bill.grand_total, 25.0);

    let table = tables.find_by_id(&fx.table_id).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Empty);

    // The already-paid round kept its original settlement untouched
    let first_after = orders.find_by_id(&first_id).await.unwrap().unwrap();
    assert_eq!(first_after.payment_method, Some(PaymentMethod::Transfer));
    assert_eq!(first_after.paid_date, Some(1_700_000_000_000));

    // And a direct re-mark is a no-op rather than an error
    assert!(
        !orders
            .mark_paid(&first_id, PaymentMethod::Cash, 1_800_000_000_000)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn settle_without_outstanding_orders_fails_cleanly() {
    let fx = setup().await;
    let engine = SettlementEngine::new(fx.state.db.clone(), fx.state.events.clone());
    let tables = FloorTableRepository::new(fx.state.db.clone());

    let err = engine
        .settle(&fx.table_id, PaymentMethod::Transfer)
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::NoOutstandingOrders(_)));

    let table = tables.find_by_id(&fx.table_id).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Empty);
}

#[tokio::test]
async fn floor_events_are_published() {
    let fx = setup().await;
    let mut rx = fx.state.events.subscribe();
    let service = OrderService::new(fx.state.db.clone(), fx.state.events.clone());
    let engine = SettlementEngine::new(fx.state.db.clone(), fx.state.events.clone());

    let mut cart = service
        .build_cart(&fx.table_id, lines(&[(&fx.pad_thai, 1)]))
        .await
        .unwrap();
    service.submit(&mut cart).await.unwrap();
    engine
        .settle(&fx.table_id, PaymentMethod::Transfer)
        .await
        .unwrap();

    let mut got_placed = false;
    let mut got_settled = false;
    let mut got_status_change = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            FloorEvent::OrderPlaced { table_id, .. } => {
                assert_eq!(table_id, fx.table_id);
                got_placed = true;
            }
            FloorEvent::OrderSettled {
                payment_method,
                grand_total,
                ..
            } => {
                assert_eq!(payment_method, PaymentMethod::Transfer);
                assert_eq!(grand_total, 60.0);
                got_settled = true;
            }
            FloorEvent::TableStatusChanged { .. } => got_status_change = true,
        }
    }
    assert!(got_placed && got_settled && got_status_change);
}
