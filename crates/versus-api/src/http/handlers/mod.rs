//! REST handlers, grouped by resource.

use std::str::FromStr;

use versus_types::error::IdError;

use crate::http::error::AppError;

pub mod battle;
pub mod item;
pub mod taste;
pub mod user;

/// Parse a path segment into a typed id.
pub(crate) fn parse_id<T>(raw: &str) -> Result<T, AppError>
where
    T: FromStr<Err = IdError>,
{
    Ok(raw.parse::<T>()?)
}
