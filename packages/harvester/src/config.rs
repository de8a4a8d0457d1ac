//! Configuration constants and validation functions for the harvester.

use chrono::Datelike;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvesterError, Result};

/// Event marker for a capital increase.
pub const INCREASE_MARKER: &str = "Kapitalforhøjelse";

/// Event marker for a capital decrease.
pub const DECREASE_MARKER: &str = "Kapitalnedsættelse";

/// Event marker for the manner of payment, present when a company is created.
pub const CREATION_MARKER: &str = "Indbetalingsmåde";

/// Label of the "statutes amended" field carrying the increase date.
pub const STATUTES_AMENDED_MARKER: &str = "Vedtægter ændret:";

/// Label of the founding date field.
pub const FOUNDING_DATE_MARKER: &str = "Stiftelsesdato";

/// Marker preceding the subscription price.
pub const PRICE_MARKER: &str = "kurs";

/// Currency token for euro amounts.
pub const EURO_TOKEN: &str = "euro";

/// Currency token for Danish kroner amounts.
pub const KRONER_TOKEN: &str = "kr.";

/// Lowercase heading keywords that make a posting relevant.
pub const TOPIC_KEYWORDS: [&str; 2] = ["kapital", "nye selskaber"];

/// Postings dated in or before this year are ignored.
pub const DEFAULT_CUTOFF_YEAR: i32 = 2015;

/// Length of the date prefix of a posting heading (`DD.MM.YYYY`).
pub const POSTING_DATE_LEN: usize = 10;

/// Number of characters read after the "statutes amended" label.
pub const STATUTES_DATE_WINDOW: usize = 11;

/// Format of posting dates.
pub const POSTING_DATE_FORMAT: &str = "%d.%m.%Y";

/// CVR number pattern: exactly 8 digits.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COMPANY_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{8}$").expect("valid regex"));

/// Posting date pattern: DD.MM.YYYY.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static POSTING_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").expect("valid regex"));

/// Validate a company identifier (CVR number).
///
/// # Examples
/// ```
/// use cvr_harvester::config::validate_company_id;
///
/// assert!(validate_company_id("12345678").is_ok());
/// assert!(validate_company_id("1234").is_err());
/// ```
pub fn validate_company_id(company_id: &str) -> Result<()> {
    if COMPANY_ID_PATTERN.is_match(company_id) {
        Ok(())
    } else {
        Err(HarvesterError::InvalidCompanyId(company_id.to_string()))
    }
}

/// Validate a posting date and return its year.
///
/// # Arguments
/// * `date_str` - Date string in `DD.MM.YYYY` format
///
/// # Returns
/// * `Ok(year)` if the string is a real calendar date
/// * `Err(HarvesterError::InvalidDate)` otherwise
///
/// # Examples
/// ```
/// use cvr_harvester::config::validate_posting_date;
///
/// assert_eq!(validate_posting_date("01.02.2016").unwrap(), 2016);
/// assert!(validate_posting_date("2016-02-01").is_err());
/// assert!(validate_posting_date("31.02.2016").is_err());
/// ```
pub fn validate_posting_date(date_str: &str) -> Result<i32> {
    if !POSTING_DATE_PATTERN.is_match(date_str) {
        return Err(HarvesterError::InvalidDate(date_str.to_string()));
    }

    let parsed = chrono::NaiveDate::parse_from_str(date_str, POSTING_DATE_FORMAT)
        .map_err(|_| HarvesterError::InvalidDate(date_str.to_string()))?;

    Ok(parsed.year())
}
