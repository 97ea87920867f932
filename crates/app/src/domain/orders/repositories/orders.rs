//! Orders Repository

use eatsight::{
    orders::{OrderMode, OrderStatus},
    pricing::OrderTotals,
};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    columns::try_get_parsed,
    menu::records::{RestaurantUuid, TableUuid},
    orders::{
        data::NewOrder,
        records::{OrderRecord, OrderUuid},
    },
    payments::records::PaymentMethodUuid,
    users::records::UserUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const FIND_ORDER_STATUS_SQL: &str = include_str!("../sql/find_order_status.sql");
const TRANSITION_ORDER_STATUS_SQL: &str = include_str!("../sql/transition_order_status.sql");
const UPDATE_ORDER_DISCOUNT_SQL: &str = include_str!("../sql/update_order_discount.sql");
const MARK_ORDER_REVIEWED_SQL: &str = include_str!("../sql/mark_order_reviewed.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: &NewOrder,
        totals: &OrderTotals,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(order.restaurant.into_uuid())
            .bind(order.order_mode.as_str())
            .bind(order.table.map(TableUuid::into_uuid))
            .bind(totals.subtotal())
            .bind(totals.order_fee())
            .bind(totals.discount_amount())
            .bind(totals.total_amount())
            .bind(order.payment_method.map(PaymentMethodUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch the user's order and hold its row lock until the transaction ends.
    ///
    /// Every read-modify-write of an order's money columns goes through this lock.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .bind(status.map(OrderStatus::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    /// Current status of an order, optionally restricted to one owner.
    pub(crate) async fn find_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: Option<UserUuid>,
    ) -> Result<Option<OrderStatus>, sqlx::Error> {
        let status = query_scalar::<Postgres, String>(FIND_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(user.map(UserUuid::into_uuid))
            .fetch_optional(&mut **tx)
            .await?;

        status
            .map(|status| {
                status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                    index: "status".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()
    }

    /// Move an order from `from` to `to` if it is still in `from`.
    ///
    /// Returns `None` when another writer got there first or the order does not exist.
    pub(crate) async fn transition_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: Option<UserUuid>,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(TRANSITION_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(user.map(UserUuid::into_uuid))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_discount(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        totals: &OrderTotals,
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_ORDER_DISCOUNT_SQL)
            .bind(order.into_uuid())
            .bind(totals.discount_amount())
            .bind(totals.total_amount())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Flag an order as reviewed. Returns `false` when it already was.
    pub(crate) async fn mark_reviewed(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(MARK_ORDER_REVIEWED_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            status: try_get_parsed::<OrderStatus>(row, "status")?,
            order_mode: try_get_parsed::<OrderMode>(row, "order_mode")?,
            table_uuid: row
                .try_get::<Option<Uuid>, _>("table_uuid")?
                .map(TableUuid::from_uuid),
            subtotal: row.try_get("subtotal")?,
            order_fee: row.try_get("order_fee")?,
            discount_amount: row.try_get("discount_amount")?,
            total_amount: row.try_get("total_amount")?,
            payment_method_uuid: row
                .try_get::<Option<Uuid>, _>("payment_method_uuid")?
                .map(PaymentMethodUuid::from_uuid),
            is_reviewed: row.try_get("is_reviewed")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            items: Vec::new(),
            vouchers: Vec::new(),
        })
    }
}
