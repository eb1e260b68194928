use heapless::String as HeaplessString;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use std::str::FromStr;

type RowError = Box<dyn Error + Send + Sync>;

/// Builds a model from a fetched row.
pub trait TryFromRow<R>: Sized {
    fn try_from_row(row: &R) -> Result<Self, RowError>;
}

fn bounded<const N: usize>(column: &str, value: &str) -> Result<HeaplessString<N>, RowError> {
    HeaplessString::from_str(value)
        .map_err(|_| format!("column '{column}' holds {} chars, model allows {N}", value.len()).into())
}

/// Reads a NOT NULL text column into a fixed-capacity string.
pub fn get_heapless_string<const N: usize>(
    row: &PgRow,
    column: &str,
) -> Result<HeaplessString<N>, RowError> {
    let value: String = row.try_get(column)?;
    bounded(column, &value)
}

/// Reads a nullable text column into a fixed-capacity string.
pub fn get_optional_heapless_string<const N: usize>(
    row: &PgRow,
    column: &str,
) -> Result<Option<HeaplessString<N>>, RowError> {
    let value: Option<String> = row.try_get(column)?;
    value.map(|v| bounded(column, &v)).transpose()
}

/// Reads a nullable text column holding a `FromStr` value such as a deny reason code.
pub fn get_optional_parsed<T: FromStr>(row: &PgRow, column: &str) -> Result<Option<T>, RowError> {
    let value: Option<String> = row.try_get(column)?;
    value
        .map(|v| T::from_str(&v).map_err(|_| format!("column '{column}' has unknown value '{v}'").into()))
        .transpose()
}
