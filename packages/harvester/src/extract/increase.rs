//! Capital increase extraction.

use crate::config::PRICE_MARKER;
use crate::error::{HarvesterError, Result};
use crate::text::{drop_last_char, keep_numeric, strip_numeric};

use super::AmountFields;

const STAGE: &str = "capital increase";

/// Extract amount, investment type and price from one increase fragment.
///
/// The fragment is the text between two currency tokens, e.g.
/// `" 5000, indbetalt kontant, kurs 100.Kapitalen udgør herefter "`:
///
/// - amount: first space-separated token minus its trailing character
/// - investment type: text before `kurs` with all numbers removed
/// - price: numbers after `kurs` minus the trailing separator
///
/// # Errors
/// `MalformedFragment` when the fragment has no `kurs` marker.
pub fn parse_increase(fragment: &str) -> Result<AmountFields> {
    let first_token = fragment.trim().split(' ').next().unwrap_or_default();
    let amount = keep_numeric(drop_last_char(first_token));

    let mut parts = fragment.split(PRICE_MARKER);
    let before_price = parts.next().unwrap_or_default();
    let after_price = parts.next().ok_or_else(|| {
        HarvesterError::malformed(
            STAGE,
            format!("no '{PRICE_MARKER}' marker in '{}'", fragment.trim()),
        )
    })?;

    let investment_type = strip_numeric(before_price).trim().to_string();
    let price = drop_last_char(&keep_numeric(after_price)).to_string();

    Ok(AmountFields {
        amount,
        investment_type,
        price,
    })
}
