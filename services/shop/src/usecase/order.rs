use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use medicart_auth_types::token::validate_access_token;

use crate::domain::repository::{
    AccountRepository, AddressRepository, NotificationPort, OrderRepository, ProductRepository,
};
use crate::domain::types::{
    Account, MAX_QUANTITY, Notification, ORDER_STATUS_PROCESSING, Order, OrderItem,
    RequestedItem, ShippingSnapshot, order_total, total_matches,
};
use crate::error::ShopServiceError;

// ── CreateOrder ──────────────────────────────────────────────────────────────

pub struct CreateOrderInput {
    pub items: Vec<RequestedItem>,
    pub total: Decimal,
    pub address_id: Uuid,
}

pub struct CreateOrderUseCase<A, D, P, O, N>
where
    A: AccountRepository,
    D: AddressRepository,
    P: ProductRepository,
    O: OrderRepository,
    N: NotificationPort,
{
    pub accounts: A,
    pub addresses: D,
    pub products: P,
    pub orders: O,
    pub notifications: N,
    pub jwt_secret: String,
    pub operator_email: String,
    pub operator_phone: String,
}

impl<A, D, P, O, N> CreateOrderUseCase<A, D, P, O, N>
where
    A: AccountRepository,
    D: AddressRepository,
    P: ProductRepository,
    O: OrderRepository,
    N: NotificationPort,
{
    /// Place an order for the token's subject.
    ///
    /// The order is durable once persisted. Notifications are queued after
    /// that and never change the outcome.
    pub async fn execute(
        &self,
        token: &str,
        input: CreateOrderInput,
    ) -> Result<Order, ShopServiceError> {
        let info = validate_access_token(token, &self.jwt_secret)
            .map_err(|_| ShopServiceError::InvalidToken)?;
        let account = self
            .accounts
            .find_by_id(info.account_id)
            .await?
            .ok_or(ShopServiceError::UnresolvedAccount)?;
        let address = self
            .addresses
            .find_owned(account.id, input.address_id)
            .await?
            .ok_or(ShopServiceError::UnresolvedAddress)?;

        let items = self.resolve_items(&input.items).await?;
        let total = order_total(&items).ok_or(ShopServiceError::AmountOutOfRange)?;
        if !total_matches(input.total, total) {
            return Err(ShopServiceError::TotalMismatch);
        }

        let order = Order {
            id: Uuid::now_v7(),
            account_id: account.id,
            items,
            total,
            shipping: ShippingSnapshot::from(&address),
            status: ORDER_STATUS_PROCESSING.to_owned(),
            created_at: Utc::now(),
        };
        self.orders.create(&order).await?;
        tracing::info!(order_id = %order.id, account_id = %account.id, total = %order.total, "order placed");

        for notification in self.notifications_for(&account, &order) {
            self.notifications.enqueue(notification);
        }
        Ok(order)
    }

    /// Look every line up in the catalog and snapshot its current name and price.
    async fn resolve_items(
        &self,
        requested: &[RequestedItem],
    ) -> Result<Vec<OrderItem>, ShopServiceError> {
        if requested.is_empty() {
            return Err(ShopServiceError::EmptyOrder);
        }
        if requested
            .iter()
            .any(|item| !(1..=MAX_QUANTITY).contains(&item.quantity))
        {
            return Err(ShopServiceError::InvalidQuantity);
        }

        let mut ids: Vec<i32> = requested.iter().map(|item| item.product_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let catalog: HashMap<i32, _> = self
            .products
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        requested
            .iter()
            .map(|item| {
                let product = catalog
                    .get(&item.product_id)
                    .ok_or(ShopServiceError::UnknownProduct)?;
                Ok(OrderItem {
                    product_id: product.id,
                    name: product.name.clone(),
                    quantity: item.quantity,
                    price: product.price,
                })
            })
            .collect()
    }

    fn notifications_for(&self, account: &Account, order: &Order) -> [Notification; 4] {
        let summary = summarize(order);
        [
            Notification::Email {
                to: account.email.clone(),
                subject: "Your Medicart order is confirmed".to_owned(),
                body: format!("Hi {},\n\nThanks for your order.\n\n{summary}", account.name),
            },
            Notification::Email {
                to: self.operator_email.clone(),
                subject: format!("New order {}", order.id),
                body: format!("{} ({}) placed an order.\n\n{summary}", account.name, account.email),
            },
            Notification::Chat {
                phone: order.shipping.phone.clone(),
                text: format!(
                    "Medicart: your order {} for {} is being processed.",
                    order.id, order.total
                ),
            },
            Notification::Chat {
                phone: self.operator_phone.clone(),
                text: format!(
                    "New order {} from {} totalling {}.",
                    order.id, order.shipping.recipient_name, order.total
                ),
            },
        ]
    }
}

fn summarize(order: &Order) -> String {
    let mut lines: Vec<String> = order
        .items
        .iter()
        .map(|item| format!("{} x{} @ {}", item.name, item.quantity, item.price))
        .collect();
    lines.push(format!("Total: {}", order.total));
    let s = &order.shipping;
    lines.push(format!(
        "Ship to: {}, {}, {}, {}, {} ({})",
        s.recipient_name, s.address_line, s.city, s.district, s.division, s.phone
    ));
    lines.join("\n")
}

// ── ListOrders ───────────────────────────────────────────────────────────────

pub struct ListOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> ListOrdersUseCase<O> {
    pub async fn execute(&self, account_id: Uuid) -> Result<Vec<Order>, ShopServiceError> {
        self.orders.list_by_account(account_id).await
    }
}
