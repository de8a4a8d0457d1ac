//! Company creation extraction.

use crate::error::{HarvesterError, Result};
use crate::text::{drop_first_chars, drop_last_char, first_line, numeric_groups};
use crate::types::Currency;

use super::AmountFields;

const STAGE: &str = "creation";

/// Number of leading characters (`": "`) before the payment description.
const LABEL_SUFFIX_LEN: usize = 2;

/// Extract the founding capital from the text following the payment marker.
///
/// For `": kontant kr. 50.000 kurs 100,-."` the description is `kontant`,
/// the amount `50.000` and the price `100`.
///
/// # Errors
/// `MalformedFragment` when the first line has no currency token, or fewer
/// than two numeric groups follow it.
pub fn parse_creation(fragment: &str, currency: Currency) -> Result<AmountFields> {
    let token = currency
        .token()
        .ok_or_else(|| HarvesterError::malformed(STAGE, "no currency token"))?;

    let line = first_line(fragment);
    let mut parts = line.split(token);
    let before_currency = parts.next().unwrap_or_default();
    let after_currency = parts.next().ok_or_else(|| {
        HarvesterError::malformed(STAGE, format!("no '{token}' on line '{}'", line.trim()))
    })?;

    let investment_type = drop_first_chars(before_currency, LABEL_SUFFIX_LEN)
        .trim()
        .to_string();

    let groups: Vec<String> = numeric_groups(drop_last_char(after_currency).trim())
        .into_iter()
        .filter(|group| !group.is_empty())
        .collect();

    match groups.as_slice() {
        [amount, .., price] => Ok(AmountFields {
            amount: amount.clone(),
            investment_type,
            price: drop_last_char(price).to_string(),
        }),
        _ => Err(HarvesterError::malformed(
            STAGE,
            format!("expected amount and price in '{}'", after_currency.trim()),
        )),
    }
}
