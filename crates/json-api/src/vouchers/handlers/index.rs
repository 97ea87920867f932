//! Voucher Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::vouchers::records::VoucherRecord;

use crate::{extensions::*, state::State, vouchers::errors::into_status_error};

/// Voucher Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VoucherResponse {
    pub uuid: Uuid,
    pub code: String,
    pub description: String,
    pub points_cost: u64,

    /// Flat discount, decimal string
    pub value: String,

    /// Percentage discount, decimal string; takes precedence over `value`
    pub discount_percentage: Option<String>,

    /// First day the voucher can no longer be redeemed
    pub expiry_date: Option<String>,

    pub is_active: bool,
}

impl From<VoucherRecord> for VoucherResponse {
    fn from(voucher: VoucherRecord) -> Self {
        Self {
            uuid: voucher.uuid.into_uuid(),
            code: voucher.code,
            description: voucher.description,
            points_cost: voucher.points_cost,
            value: voucher.value.to_string(),
            discount_percentage: voucher.discount_percentage.map(|pct| pct.to_string()),
            expiry_date: voucher.expiry_date.map(|date| date.to_string()),
            is_active: voucher.is_active,
        }
    }
}

/// Voucher Index Handler
///
/// Vouchers that can be bought with points today.
#[endpoint(
    tags("vouchers"),
    summary = "List Vouchers",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Vouchers on offer"),
    ),
)]
pub(crate) async fn handler(
    include_inactive: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<VoucherResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let vouchers = state
        .app
        .vouchers
        .list_vouchers(include_inactive.into_inner().unwrap_or(false))
        .await
        .map_err(into_status_error)?;

    Ok(Json(vouchers.into_iter().map(Into::into).collect()))
}
