//! Column conversions shared by the repositories.

use std::{error::Error as StdError, num::TryFromIntError, str::FromStr};

use sqlx::{Row, postgres::PgRow};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("value for {column} is out of range")]
pub(crate) struct OutOfRange {
    column: &'static str,
    #[source]
    source: TryFromIntError,
}

/// Convert a point amount for a `BIGINT` column.
pub(crate) fn points_to_i64(column: &'static str, points: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(points)
        .map_err(|source| sqlx::Error::Encode(Box::new(OutOfRange { column, source })))
}

/// Read a non-negative point amount from a `BIGINT` column.
pub(crate) fn try_get_points(row: &PgRow, column: &str) -> Result<u64, sqlx::Error> {
    let points: i64 = row.try_get(column)?;

    u64::try_from(points).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Convert a quantity for an `INTEGER` column.
pub(crate) fn quantity_to_i32(column: &'static str, quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(quantity)
        .map_err(|source| sqlx::Error::Encode(Box::new(OutOfRange { column, source })))
}

/// Read a quantity from an `INTEGER` column.
pub(crate) fn try_get_quantity(row: &PgRow, column: &str) -> Result<u32, sqlx::Error> {
    let quantity: i32 = row.try_get(column)?;

    u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Read a `TEXT` column holding one of a closed set of values.
pub(crate) fn try_get_parsed<T>(row: &PgRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;

    raw.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Nullable variant of [`try_get_parsed`].
pub(crate) fn try_get_parsed_opt<T>(row: &PgRow, column: &str) -> Result<Option<T>, sqlx::Error>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    row.try_get::<Option<String>, _>(column)?
        .map(|raw| {
            raw.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: column.to_string(),
                source: Box::new(e),
            })
        })
        .transpose()
}
