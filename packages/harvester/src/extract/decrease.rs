//! Capital decrease extraction.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvesterError, Result};
use crate::text::{drop_last_char, first_line, numeric_groups};
use crate::types::Currency;

use super::AmountFields;

const STAGE: &str = "capital decrease";

/// Date-shaped substring (`DD.MM.YYYY`, any separator).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}.\d{2}.\d{4}").expect("valid regex"));

/// Fields of one capital decrease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecreaseFields {
    /// Earliest date found before the currency token.
    pub change_date: String,

    /// Monetary fields.
    pub fields: AmountFields,
}

/// Extract a capital decrease from the text following a decrease marker.
///
/// Only the first line is used. It is split on the currency token: the part
/// before holds the decision date(s) and the description, the part after
/// holds the amount and the price.
///
/// # Returns
/// * `Ok(Some(_))` when a dated decrease was found
/// * `Ok(None)` when the line has no currency token or no date before it
///
/// # Errors
/// `MalformedFragment` when the amount part has no separate price group.
pub fn parse_decrease(fragment: &str, currency: Currency) -> Result<Option<DecreaseFields>> {
    let Some(token) = currency.token() else {
        return Ok(None);
    };

    let line = first_line(fragment);
    let mut parts = line.split(token);
    let before_currency = parts.next().unwrap_or_default();
    let Some(after_currency) = parts.next() else {
        return Ok(None);
    };

    let dates: Vec<&str> = DATE_SHAPE
        .find_iter(before_currency)
        .map(|m| m.as_str())
        .collect();
    let (Some(first_date), Some(last_date)) = (dates.first(), dates.last()) else {
        tracing::debug!(fragment = line, "Decrease without date, skipping");
        return Ok(None);
    };

    let investment_type = before_currency
        .rsplit(last_date)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let groups = numeric_groups(drop_last_char(after_currency).trim());
    let [amount, .., price] = groups.as_slice() else {
        return Err(HarvesterError::malformed(
            STAGE,
            format!("no price after amount in '{}'", after_currency.trim()),
        ));
    };

    Ok(Some(DecreaseFields {
        change_date: (*first_date).to_string(),
        fields: AmountFields {
            amount: amount.clone(),
            investment_type,
            price: price.clone(),
        },
    }))
}
