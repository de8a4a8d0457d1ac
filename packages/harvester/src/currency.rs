//! Currency detection for posting fragments.

use crate::config::{EURO_TOKEN, KRONER_TOKEN};
use crate::types::Currency;

/// Detect the currency used in a fragment.
///
/// Euro is checked before kroner, so a fragment containing both tokens is
/// reported as euro.
///
/// # Examples
/// ```
/// use cvr_harvester::currency::detect_currency;
/// use cvr_harvester::types::Currency;
///
/// assert_eq!(detect_currency("kr. 50.000,00"), Currency::Kroner);
/// assert_eq!(detect_currency("ingen beløb"), Currency::Unknown);
/// ```
#[must_use]
pub fn detect_currency(fragment: &str) -> Currency {
    if fragment.contains(EURO_TOKEN) {
        Currency::Euro
    } else if fragment.contains(KRONER_TOKEN) {
        Currency::Kroner
    } else {
        Currency::Unknown
    }
}
