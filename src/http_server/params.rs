//! # Query Parameter Parser
//!
//! Turns the raw query string of a gazette request into a [`QueryFilter`].
//! Malformed input is rejected here so it never reaches the access layer.

use chrono::NaiveDate;

use super::errors::{ApiError, ApiResult};
use crate::gazettes::{QueryFilter, PAGE_NUMBER_OFFSET};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Smallest page size a caller may ask for
pub const MIN_PAGE_SIZE: usize = 1;

/// Parse the query pairs of a gazette request.
///
/// Recognized keys: `since`, `until`, `keywords` (repeatable), `page`
/// (1-based) and `page_size`. Other keys are ignored. When a scalar key is
/// repeated the last value wins.
pub fn parse_gazette_query(
    territory_id: Option<String>,
    pairs: &[(String, String)],
) -> ApiResult<QueryFilter> {
    let mut filter = QueryFilter::new();
    if let Some(territory_id) = territory_id {
        filter = filter.with_territory_id(territory_id);
    }

    let mut keywords = Vec::new();

    for (key, value) in pairs {
        match key.as_str() {
            "since" => filter = filter.with_since(parse_date(key, value)?),
            "until" => filter = filter.with_until(parse_date(key, value)?),
            "keywords" => keywords.push(value.as_str()),
            "page" => {
                let page = parse_at_least(key, value, PAGE_NUMBER_OFFSET)?;
                filter = filter.with_caller_page(page);
            }
            "page_size" => {
                filter = filter.with_page_size(parse_at_least(key, value, MIN_PAGE_SIZE)?);
            }
            _ => {}
        }
    }

    Ok(filter.with_keywords(keywords))
}

/// Parse an ISO `YYYY-MM-DD` date
fn parse_date(name: &str, value: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ApiError::invalid(name, value))
}

/// Parse a non-negative integer no smaller than `minimum`
fn parse_at_least(name: &str, value: &str, minimum: usize) -> ApiResult<usize> {
    let number: usize = value
        .trim()
        .parse()
        .map_err(|_| ApiError::invalid(name, value))?;

    if number < minimum {
        return Err(ApiError::OutOfRange {
            name: name.to_string(),
            minimum,
        });
    }
    Ok(number)
}
