//! Orders service.

use async_trait::async_trait;
use eatsight::{
    orders::OrderStatus,
    pricing::{
        OrderTotals, PricedLine, PricedSelection, PricingError, check_quantity, subtotal,
    },
};
use mockall::automock;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use tracing::{Span, debug, info};

use crate::{
    database::Db,
    domain::{
        menu::repository::PgMenuRepository,
        orders::{
            data::{NewOrder, NewOrderItem},
            errors::{OrderValidationError, OrdersServiceError},
            records::{OrderRecord, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository, PricedOrderItem},
        },
        payments::repositories::PgPaymentMethodsRepository,
        users::records::UserUuid,
        vouchers::{
            application::VoucherApplier,
            repositories::{PgOrderVouchersRepository, PgUserVouchersRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    menu: PgMenuRepository,
    payment_methods: PgPaymentMethodsRepository,
    user_vouchers: PgUserVouchersRepository,
    order_vouchers: PgOrderVouchersRepository,
    applier: VoucherApplier,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            menu: PgMenuRepository::new(),
            payment_methods: PgPaymentMethodsRepository::new(),
            user_vouchers: PgUserVouchersRepository::new(),
            order_vouchers: PgOrderVouchersRepository::new(),
            applier: VoucherApplier::new(),
        }
    }

    /// Price every requested line from the restaurant's current menu.
    ///
    /// Lines are returned in request order, with selections in request order.
    async fn price_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<Vec<PricedLine>, OrdersServiceError> {
        let mut lines = Vec::with_capacity(order.items.len());

        for item in &order.items {
            let price = self
                .menu
                .find_orderable_item_price(tx, order.restaurant, item.menu_item)
                .await?
                .ok_or(OrderValidationError::UnknownMenuItem(item.menu_item))?;

            let mut options = Vec::with_capacity(item.options.len());

            for selected in &item.options {
                let price = self
                    .menu
                    .find_orderable_option_price(tx, item.menu_item, selected.option)
                    .await?
                    .ok_or(OrderValidationError::UnknownOption(selected.option))?;

                options.push(PricedSelection {
                    price,
                    quantity: selected.quantity,
                });
            }

            let mut toppings = Vec::with_capacity(item.toppings.len());

            for selected in &item.toppings {
                let price = self
                    .menu
                    .find_orderable_topping_price(tx, item.menu_item, selected.topping)
                    .await?
                    .ok_or(OrderValidationError::UnknownTopping(selected.topping))?;

                toppings.push(PricedSelection {
                    price,
                    quantity: selected.quantity,
                });
            }

            lines.push(PricedLine {
                price,
                quantity: item.quantity,
                options,
                toppings,
            });
        }

        Ok(lines)
    }

    async fn store_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: &NewOrderItem,
        line: &PricedLine,
    ) -> Result<(), sqlx::Error> {
        self.items
            .create_item(
                tx,
                order,
                PricedOrderItem {
                    uuid: item.uuid,
                    menu_item: item.menu_item,
                    quantity: item.quantity,
                    price: line.price,
                    special_instructions: item.special_instructions.as_deref(),
                },
            )
            .await?;

        for (selected, priced) in item.options.iter().zip(&line.options) {
            self.items
                .create_item_option(tx, item.uuid, selected.option, priced.quantity, priced.price)
                .await?;
        }

        for (selected, priced) in item.toppings.iter().zip(&line.toppings) {
            self.items
                .create_item_topping(tx, item.uuid, selected.topping, priced.quantity, priced.price)
                .await?;
        }

        Ok(())
    }

    async fn transition(
        &self,
        order: OrderUuid,
        user: Option<UserUuid>,
        to: OrderStatus,
    ) -> Result<bool, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let transitioned = self
            .orders
            .transition_status(&mut tx, order, user, OrderStatus::InProgress, to)
            .await?;

        if transitioned.is_none() {
            let current = self.orders.find_order_status(&mut tx, order, user).await?;

            tx.commit().await?;

            debug!(current_status = ?current, target_status = %to, "order transition rejected");

            return Ok(false);
        }

        tx.commit().await?;

        info!(status = %to, "order status changed");

        Ok(true)
    }
}

/// Cheap checks that need no catalog lookups.
fn validate_request(order: &NewOrder) -> Result<(), PricingError> {
    if order.items.is_empty() {
        return Err(PricingError::NoItems);
    }

    order
        .items
        .iter()
        .flat_map(|item| {
            std::iter::once(item.quantity)
                .chain(item.options.iter().map(|option| option.quantity))
                .chain(item.toppings.iter().map(|topping| topping.quantity))
        })
        .try_for_each(|quantity| check_quantity(quantity).map(|_| ()))?;

    OrderTotals::new(Decimal::ZERO, order.order_fee)?;

    Ok(())
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, order),
        fields(
            user_uuid = %user,
            order_uuid = %order.uuid,
            restaurant_uuid = %order.restaurant,
            item_count = order.items.len(),
            voucher_count = order.vouchers.len(),
            total_amount = tracing::field::Empty
        ),
        err
    )]
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        validate_request(&order)?;

        let mut tx = self.db.begin().await?;

        if let Some(table) = order.table
            && !self
                .menu
                .table_belongs_to_restaurant(&mut tx, table, order.restaurant)
                .await?
        {
            return Err(OrderValidationError::UnknownTable(table).into());
        }

        if let Some(method) = order.payment_method
            && self
                .payment_methods
                .find_payment_method(&mut tx, method, user)
                .await?
                .is_none()
        {
            return Err(OrderValidationError::UnknownPaymentMethod(method).into());
        }

        let lines = self.price_items(&mut tx, &order).await?;
        let totals = OrderTotals::new(subtotal(&lines)?, order.order_fee)?;

        let mut created = self
            .orders
            .create_order(&mut tx, user, &order, &totals)
            .await?;

        for (item, line) in order.items.iter().zip(&lines) {
            self.store_item(&mut tx, created.uuid, item, line).await?;
        }

        for voucher in &order.vouchers {
            let user_voucher = self
                .user_vouchers
                .find_unused_user_voucher(&mut tx, user, *voucher)
                .await?
                .ok_or(OrderValidationError::VoucherNotOwned(*voucher))?;

            self.applier
                .apply(&mut tx, &mut created, user_voucher)
                .await
                .map_err(OrdersServiceError::Voucher)?;
        }

        created.items = self.items.list_items(&mut tx, created.uuid).await?;

        tx.commit().await?;

        Span::current().record("total_amount", tracing::field::display(created.total_amount));

        info!(
            subtotal = %created.subtotal,
            discount_amount = %created.discount_amount,
            "order created"
        );

        Ok(created)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut found = self.orders.get_order(&mut tx, order, user).await?;

        found.items = self.items.list_items(&mut tx, found.uuid).await?;
        found.vouchers = self
            .order_vouchers
            .list_order_vouchers(&mut tx, found.uuid)
            .await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn list_orders(
        &self,
        user: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_orders(&mut tx, user, status).await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.cancel_order",
        skip(self),
        fields(user_uuid = %user, order_uuid = %order),
        err
    )]
    async fn cancel_order(&self, user: UserUuid, order: OrderUuid) -> Result<bool, OrdersServiceError> {
        self.transition(order, Some(user), OrderStatus::Cancelled)
            .await
    }

    #[tracing::instrument(
        name = "orders.service.complete_order",
        skip(self),
        fields(order_uuid = %order),
        err
    )]
    async fn complete_order(&self, order: OrderUuid) -> Result<bool, OrdersServiceError> {
        self.transition(order, None, OrderStatus::Completed).await
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order priced from the restaurant's menu.
    ///
    /// The order, its lines and any vouchers are written in one transaction; each
    /// voucher id consumes the user's oldest unused copy of that voucher.
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// One of the user's orders with its lines and applied vouchers.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The user's orders, newest first, without lines or vouchers.
    async fn list_orders(
        &self,
        user: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Cancel one of the user's in-progress orders.
    ///
    /// Returns `false`, changing nothing, when the order is not the user's or is no
    /// longer in progress.
    async fn cancel_order(&self, user: UserUuid, order: OrderUuid) -> Result<bool, OrdersServiceError>;

    /// Mark an in-progress order as completed. Returns `false` for any other status.
    async fn complete_order(&self, order: OrderUuid) -> Result<bool, OrdersServiceError>;
}
