//! Test Helpers

use eatsight::{orders::OrderMode, payments::PaymentType};
use rust_decimal::Decimal;
use testresult::TestResult;

use crate::{
    domain::{
        menu::{
            MenuService, MenuServiceError,
            data::{NewMenuItem, NewRestaurant, NewTable},
            records::{MenuItemRecord, MenuItemUuid, RestaurantRecord, RestaurantUuid, TableRecord, TableUuid},
        },
        orders::{
            OrdersService,
            data::{NewOrder, NewOrderItem},
            records::{OrderItemUuid, OrderRecord, OrderUuid},
        },
        payments::{data::NewPayment, records::PaymentUuid},
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
        vouchers::{
            VouchersService, VouchersServiceError,
            data::NewVoucher,
            records::{VoucherRecord, VoucherUuid},
        },
    },
    test::TestContext,
};

/// A user with a unique name and phone number and `points` to spend.
pub(crate) async fn create_user(
    ctx: &TestContext,
    points: u64,
) -> Result<UserRecord, UsersServiceError> {
    let uuid = UserUuid::new();

    ctx.users
        .create_user(NewUser {
            uuid,
            name: format!("Diner {uuid}"),
            phone_number: Some(format!("+62{}", uuid.into_uuid().simple())),
            total_points: points,
        })
        .await
}

pub(crate) async fn create_restaurant(
    ctx: &TestContext,
) -> Result<RestaurantRecord, MenuServiceError> {
    let uuid = RestaurantUuid::new();

    ctx.menu
        .create_restaurant(NewRestaurant {
            uuid,
            name: format!("Warung {uuid}"),
            location: Some("Jakarta".to_string()),
        })
        .await
}

pub(crate) async fn create_table(
    ctx: &TestContext,
    restaurant: RestaurantUuid,
    number: &str,
) -> Result<TableRecord, MenuServiceError> {
    ctx.menu
        .create_table(NewTable {
            uuid: TableUuid::new(),
            restaurant,
            table_number: number.to_string(),
            capacity: Some(4),
        })
        .await
}

/// An active item at `price` with no discounted price.
pub(crate) async fn create_menu_item(
    ctx: &TestContext,
    restaurant: RestaurantUuid,
    price: Decimal,
) -> Result<MenuItemRecord, MenuServiceError> {
    ctx.menu
        .create_menu_item(NewMenuItem {
            uuid: MenuItemUuid::new(),
            restaurant,
            name: "Nasi Goreng".to_string(),
            original_price: price,
            discounted_price: None,
            is_active: true,
        })
        .await
}

/// A takeaway order without fee, table, payment method or vouchers.
pub(crate) fn new_order(restaurant: RestaurantUuid, items: Vec<NewOrderItem>) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        restaurant,
        order_mode: OrderMode::Takeaway,
        table: None,
        payment_method: None,
        order_fee: Decimal::ZERO,
        items,
        vouchers: Vec::new(),
    }
}

pub(crate) fn new_order_item(menu_item: MenuItemUuid, quantity: u32) -> NewOrderItem {
    NewOrderItem {
        uuid: OrderItemUuid::new(),
        menu_item,
        quantity,
        special_instructions: None,
        options: Vec::new(),
        toppings: Vec::new(),
    }
}

/// An in-progress order for one item at `price` at a new restaurant.
pub(crate) async fn place_order(
    ctx: &TestContext,
    user: UserUuid,
    price: Decimal,
) -> TestResult<OrderRecord> {
    let restaurant = create_restaurant(ctx).await?;
    let item = create_menu_item(ctx, restaurant.uuid, price).await?;

    let order = ctx
        .orders
        .create_order(
            user,
            new_order(restaurant.uuid, vec![new_order_item(item.uuid, 1)]),
        )
        .await?;

    Ok(order)
}

/// An active, non-expiring voucher with a unique code.
pub(crate) async fn create_voucher(
    ctx: &TestContext,
    points_cost: u64,
    value: Decimal,
    discount_percentage: Option<Decimal>,
) -> Result<VoucherRecord, VouchersServiceError> {
    let uuid = VoucherUuid::new();

    ctx.vouchers
        .create_voucher(NewVoucher {
            uuid,
            code: format!("EAT{}", uuid.into_uuid().simple()),
            description: "Test voucher".to_string(),
            points_cost,
            value,
            discount_percentage,
            expiry_date: None,
            is_active: true,
        })
        .await
}

pub(crate) fn new_payment(order: OrderUuid, payment_type: PaymentType, amount: Decimal) -> NewPayment {
    NewPayment {
        uuid: PaymentUuid::new(),
        order,
        payment_type,
        amount,
        payment_method: None,
        table: None,
    }
}
