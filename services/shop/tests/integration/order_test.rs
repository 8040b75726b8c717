use std::time::Duration;

use rust_decimal::Decimal;
use uuid::Uuid;

use medicart_shop::domain::repository::NotificationPort;
use medicart_shop::domain::types::{
    AddressPatch, MAX_AMOUNT, ORDER_STATUS_PROCESSING, RequestedItem,
};
use medicart_shop::error::ShopServiceError;
use medicart_shop::infra::notify::{NotificationDispatcher, NotificationQueue};
use medicart_shop::usecase::address::{DeleteAddressUseCase, UpdateAddressUseCase};
use medicart_shop::usecase::order::{CreateOrderInput, CreateOrderUseCase, ListOrdersUseCase};
use medicart_testing::auth::TestAuth;

use crate::helpers::{
    MemAccounts, MemAddresses, MemOrders, MemProducts, RecordingChat, RecordingMailer,
    RecordingOutbox, TEST_JWT_SECRET, dhaka_savar, test_account, test_address, test_product,
};

const OPERATOR_EMAIL: &str = "orders@medicart.test";
const OPERATOR_PHONE: &str = "+8801800000000";

struct Fixture {
    accounts: MemAccounts,
    addresses: MemAddresses,
    products: MemProducts,
    orders: MemOrders,
    account_id: Uuid,
    address_id: Uuid,
    token: String,
}

fn fixture() -> Fixture {
    let account = test_account("rahim@example.com");
    let address = test_address(account.id, dhaka_savar());
    let token = TestAuth::standard(account.id).token();
    Fixture {
        account_id: account.id,
        address_id: address.id,
        accounts: MemAccounts::with(vec![account]),
        addresses: MemAddresses::with(vec![address]),
        products: MemProducts::with(vec![
            test_product(1, "Napa 500mg", Decimal::new(10, 0)),
            test_product(2, "Seclo 20mg", Decimal::new(725, 2)),
        ]),
        orders: MemOrders::default(),
        token,
    }
}

fn create_order<N: NotificationPort>(
    f: &Fixture,
    notifications: N,
) -> CreateOrderUseCase<MemAccounts, MemAddresses, MemProducts, MemOrders, N> {
    CreateOrderUseCase {
        accounts: f.accounts.clone(),
        addresses: f.addresses.clone(),
        products: f.products.clone(),
        orders: f.orders.clone(),
        notifications,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        operator_email: OPERATOR_EMAIL.to_owned(),
        operator_phone: OPERATOR_PHONE.to_owned(),
    }
}

fn input(address_id: Uuid, items: &[(i32, i32)], total: Decimal) -> CreateOrderInput {
    CreateOrderInput {
        items: items
            .iter()
            .map(|&(product_id, quantity)| RequestedItem {
                product_id,
                quantity,
            })
            .collect(),
        total,
        address_id,
    }
}

// ── CreateOrder ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_place_order_with_catalog_snapshot_and_queue_four_notifications() {
    let f = fixture();
    let outbox = RecordingOutbox::default();

    let order = create_order(&f, outbox.clone())
        .execute(&f.token, input(f.address_id, &[(1, 2)], Decimal::new(20, 0)))
        .await
        .unwrap();

    assert_eq!(order.account_id, f.account_id);
    assert_eq!(order.status, ORDER_STATUS_PROCESSING);
    assert_eq!(order.total, Decimal::new(20, 0));
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].name, "Napa 500mg");
    assert_eq!(order.items[0].price, Decimal::new(10, 0));
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(order.shipping.division, "Dhaka");
    assert_eq!(order.shipping.district, "Dhaka");
    assert_eq!(order.shipping.city, "Savar");
    assert_eq!(order.shipping.phone, "+8801700000002");
    assert_eq!(f.orders.rows.lock().unwrap().len(), 1);

    let queued = outbox.queued_handle();
    let queued = queued.lock().unwrap();
    assert_eq!(queued.len(), 4);
    let targets: Vec<(&str, &str)> = queued.iter().map(|n| (n.channel(), n.target())).collect();
    assert!(targets.contains(&("email", "rahim@example.com")));
    assert!(targets.contains(&("email", OPERATOR_EMAIL)));
    assert!(targets.contains(&("chat", "+8801700000002")));
    assert!(targets.contains(&("chat", OPERATOR_PHONE)));
}

#[tokio::test]
async fn should_return_order_even_when_every_notification_fails() {
    let f = fixture();
    let (queue, rx) = NotificationQueue::channel();
    let mailer = RecordingMailer::failing();
    let chat = RecordingChat {
        failing: true,
        ..Default::default()
    };
    let dispatcher =
        tokio::spawn(NotificationDispatcher::new(mailer.clone(), chat.clone()).run(rx));

    let usecase = create_order(&f, queue);
    let order = usecase
        .execute(&f.token, input(f.address_id, &[(1, 2)], Decimal::new(20, 0)))
        .await
        .unwrap();
    drop(usecase);

    tokio::time::timeout(Duration::from_secs(5), dispatcher)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(order.total, Decimal::new(20, 0));
    assert_eq!(f.orders.rows.lock().unwrap().len(), 1);
    assert_eq!(mailer.sent_handle().lock().unwrap().len(), 2);
    assert_eq!(chat.sent.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_keep_snapshot_after_address_changes_or_is_deleted() {
    let f = fixture();
    let order = create_order(&f, RecordingOutbox::default())
        .execute(&f.token, input(f.address_id, &[(1, 2)], Decimal::new(20, 0)))
        .await
        .unwrap();

    UpdateAddressUseCase {
        repo: f.addresses.clone(),
    }
    .execute(
        f.account_id,
        f.address_id,
        AddressPatch {
            city: Some("Dhamrai".to_owned()),
            phone: Some("+8801799999999".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    f.products.rows.lock().unwrap()[0].price = Decimal::new(12, 0);

    let stored = f.orders.rows.lock().unwrap()[0].clone();
    assert_eq!(stored.shipping, order.shipping);
    assert_eq!(stored.shipping.city, "Savar");
    assert_eq!(stored.items, order.items);

    DeleteAddressUseCase {
        repo: f.addresses.clone(),
    }
    .execute(f.account_id, f.address_id)
    .await
    .unwrap();

    let listed = ListOrdersUseCase {
        orders: f.orders.clone(),
    }
    .execute(f.account_id)
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].shipping.city, "Savar");
    assert_eq!(listed[0].items[0].price, Decimal::new(10, 0));
}

#[tokio::test]
async fn should_price_items_from_catalog_within_a_cent() {
    let f = fixture();
    // 2 x 10.00 + 3 x 7.25 = 41.75
    let order = create_order(&f, RecordingOutbox::default())
        .execute(
            &f.token,
            input(f.address_id, &[(1, 2), (2, 3)], Decimal::new(4174, 2)),
        )
        .await
        .unwrap();

    assert_eq!(order.total, Decimal::new(4175, 2));
}

#[tokio::test]
async fn should_reject_total_that_does_not_match_catalog() {
    let f = fixture();
    let outbox = RecordingOutbox::default();

    let result = create_order(&f, outbox.clone())
        .execute(&f.token, input(f.address_id, &[(1, 2)], Decimal::new(2, 0)))
        .await;

    assert!(matches!(result, Err(ShopServiceError::TotalMismatch)));
    assert!(f.orders.rows.lock().unwrap().is_empty());
    assert!(outbox.queued_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_extreme_client_totals_as_mismatch() {
    let f = fixture();
    let usecase = create_order(&f, RecordingOutbox::default());

    for total in [Decimal::MIN, Decimal::MAX] {
        let result = usecase
            .execute(&f.token, input(f.address_id, &[(1, 2)], total))
            .await;
        assert!(matches!(result, Err(ShopServiceError::TotalMismatch)));
    }
    assert!(f.orders.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_quantity_above_line_limit() {
    let f = fixture();

    let result = create_order(&f, RecordingOutbox::default())
        .execute(
            &f.token,
            input(f.address_id, &[(1, i32::MAX)], Decimal::new(21_474_836_470, 0)),
        )
        .await;

    assert!(matches!(result, Err(ShopServiceError::InvalidQuantity)));
    assert!(f.orders.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_total_too_large_to_store() {
    let f = fixture();
    f.products
        .rows
        .lock()
        .unwrap()
        .push(test_product(3, "Cold chain kit", MAX_AMOUNT));
    let outbox = RecordingOutbox::default();

    let result = create_order(&f, outbox.clone())
        .execute(&f.token, input(f.address_id, &[(3, 2)], MAX_AMOUNT * Decimal::TWO))
        .await;

    assert!(matches!(result, Err(ShopServiceError::AmountOutOfRange)));
    assert!(f.orders.rows.lock().unwrap().is_empty());
    assert!(outbox.queued_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_empty_order_bad_quantity_and_unknown_product() {
    let f = fixture();
    let usecase = create_order(&f, RecordingOutbox::default());

    assert!(matches!(
        usecase
            .execute(&f.token, input(f.address_id, &[], Decimal::ZERO))
            .await,
        Err(ShopServiceError::EmptyOrder)
    ));
    assert!(matches!(
        usecase
            .execute(&f.token, input(f.address_id, &[(1, 0)], Decimal::ZERO))
            .await,
        Err(ShopServiceError::InvalidQuantity)
    ));
    assert!(matches!(
        usecase
            .execute(&f.token, input(f.address_id, &[(99, 1)], Decimal::new(10, 0)))
            .await,
        Err(ShopServiceError::UnknownProduct)
    ));
    assert!(f.orders.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_bad_token() {
    let f = fixture();
    let forged = TestAuth::standard(f.account_id).token() + "x";

    let result = create_order(&f, RecordingOutbox::default())
        .execute(&forged, input(f.address_id, &[(1, 2)], Decimal::new(20, 0)))
        .await;

    assert!(matches!(result, Err(ShopServiceError::InvalidToken)));
}

#[tokio::test]
async fn should_reject_token_for_unknown_account() {
    let f = fixture();
    let token = TestAuth::standard(Uuid::now_v7()).token();

    let result = create_order(&f, RecordingOutbox::default())
        .execute(&token, input(f.address_id, &[(1, 2)], Decimal::new(20, 0)))
        .await;

    assert!(matches!(result, Err(ShopServiceError::UnresolvedAccount)));
}

#[tokio::test]
async fn should_not_ship_to_another_accounts_address() {
    let f = fixture();
    let other = test_account("other@example.com");
    let other_token = TestAuth::standard(other.id).token();
    f.accounts.rows.lock().unwrap().push(other);

    let result = create_order(&f, RecordingOutbox::default())
        .execute(&other_token, input(f.address_id, &[(1, 2)], Decimal::new(20, 0)))
        .await;

    assert!(matches!(result, Err(ShopServiceError::UnresolvedAddress)));
    assert!(f.orders.rows.lock().unwrap().is_empty());
}

// ── ListOrders ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_own_orders_newest_first() {
    let f = fixture();
    let usecase = create_order(&f, RecordingOutbox::default());
    let first = usecase
        .execute(&f.token, input(f.address_id, &[(1, 1)], Decimal::new(10, 0)))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = usecase
        .execute(&f.token, input(f.address_id, &[(1, 2)], Decimal::new(20, 0)))
        .await
        .unwrap();

    let listed = ListOrdersUseCase {
        orders: f.orders.clone(),
    }
    .execute(f.account_id)
    .await
    .unwrap();

    let ids: Vec<Uuid> = listed.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert!(
        ListOrdersUseCase { orders: f.orders }
            .execute(Uuid::now_v7())
            .await
            .unwrap()
            .is_empty()
    );
}
