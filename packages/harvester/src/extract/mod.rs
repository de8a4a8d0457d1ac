//! Field extractors, one per event kind.
//!
//! Each extractor receives a fragment that the segmenter has already cut out
//! of a posting and pulls the amount, investment description and price out
//! of it with positional splits and numeric cleanup.

mod creation;
mod decrease;
mod increase;

pub use creation::parse_creation;
pub use decrease::{parse_decrease, DecreaseFields};
pub use increase::parse_increase;

use crate::types::AmountData;

/// Monetary fields shared by every event kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountFields {
    /// Amount, digits and separators only.
    pub amount: String,

    /// Free-text description of the investment.
    pub investment_type: String,

    /// Subscription price, digits and separators only.
    pub price: String,
}

impl AmountFields {
    /// Combine with the status change date into [`AmountData`].
    #[must_use]
    pub fn into_amount_data(self, change_date: impl Into<String>) -> AmountData {
        AmountData {
            amount: self.amount,
            date: change_date.into(),
            investment_type: self.investment_type,
            price: self.price,
        }
    }
}
