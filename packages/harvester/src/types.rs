//! Core data types for the harvester.
//!
//! These types describe a company's registration postings as handed over by
//! the page extraction step, and the capital change records built from them.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use unicode_normalization::UnicodeNormalization;

use crate::config::{
    validate_posting_date, CREATION_MARKER, DECREASE_MARKER, EURO_TOKEN, INCREASE_MARKER,
    KRONER_TOKEN, POSTING_DATE_LEN, TOPIC_KEYWORDS,
};
use crate::error::Result;
use crate::text::take_chars;

/// One registration entry from a company's public record.
///
/// Text is normalized to NFC on construction so markers containing `å`
/// match whether the source wrote it precomposed or as `a` plus a combining
/// ring. `ø` and `æ` have no canonical decomposition and are left as is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawPosting")]
pub struct Posting {
    /// Posting date, the first 10 characters of the heading (`DD.MM.YYYY`).
    pub heading_date: String,

    /// Bold heading of the posting, used as a topic hint.
    pub heading_label: String,

    /// Entire posting text, heading included.
    pub full_text: String,
}

/// Posting as serialized by the page extraction step.
#[derive(Debug, Deserialize)]
struct RawPosting {
    heading: String,
    text: String,
}

impl From<RawPosting> for Posting {
    fn from(raw: RawPosting) -> Self {
        Self::new(raw.heading, raw.text)
    }
}

impl Posting {
    /// Create a posting from its bold heading and full text.
    #[must_use]
    pub fn new(heading: impl AsRef<str>, full_text: impl AsRef<str>) -> Self {
        let heading_label: String = heading.as_ref().trim().nfc().collect();
        let heading_date = take_chars(&heading_label, POSTING_DATE_LEN).to_string();
        Self {
            heading_date,
            heading_label,
            full_text: full_text.as_ref().nfc().collect(),
        }
    }

    /// Whether the heading mentions a capital or new-company topic.
    #[must_use]
    pub fn has_relevant_topic(&self) -> bool {
        let label = self.heading_label.to_lowercase();
        TOPIC_KEYWORDS.iter().any(|keyword| label.contains(keyword))
    }

    /// Year of the posting date.
    pub fn heading_year(&self) -> Result<i32> {
        validate_posting_date(&self.heading_date)
    }
}

/// Kind of capital change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Registered increase of the share capital.
    #[serde(rename = "Kapitalforhøjelse")]
    CapitalIncrease,

    /// Registered decrease of the share capital.
    #[serde(rename = "Kapitalnedsættelse")]
    CapitalDecrease,

    /// Founding of the company.
    #[serde(rename = "Indbetalingsmåde")]
    Creation,
}

impl EventKind {
    /// Marker text that signals this event in a posting.
    #[must_use]
    pub fn marker(&self) -> &'static str {
        match self {
            Self::CapitalIncrease => INCREASE_MARKER,
            Self::CapitalDecrease => DECREASE_MARKER,
            Self::Creation => CREATION_MARKER,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Currency denomination of an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    /// Amount in euro (`euro`).
    Euro,
    /// Amount in Danish kroner (`kr.`).
    Kroner,
    /// No currency token found.
    #[default]
    Unknown,
}

impl Currency {
    /// Literal token identifying the currency in posting text.
    #[must_use]
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Self::Euro => Some(EURO_TOKEN),
            Self::Kroner => Some(KRONER_TOKEN),
            Self::Unknown => None,
        }
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.token() {
            Some(token) => serializer.serialize_str(token),
            None => serializer.serialize_none(),
        }
    }
}

/// Monetary details of one event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AmountData {
    /// Amount as printed, digits and separators only.
    pub amount: String,

    /// Status change date, empty when unavailable.
    pub date: String,

    /// Free-text description of the investment.
    pub investment_type: String,

    /// Subscription price, digits and separators only.
    pub price: String,
}

/// One extracted capital change event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapitalChangeRecord {
    /// Date of the posting.
    pub date: String,

    /// Kind of event.
    pub change_type: EventKind,

    /// Date the change took effect.
    pub status_changed_date: String,

    /// Monetary details.
    pub amount_data: AmountData,

    /// CVR number of the company.
    #[serde(rename = "cvr")]
    pub company_id: String,

    /// Currency of the amounts.
    pub currency: Currency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_heading_date() {
        let posting = Posting::new("  08.03.2017 Ændring af kapital", "text");
        assert_eq!(posting.heading_date, "08.03.2017");
        assert_eq!(posting.heading_label, "08.03.2017 Ændring af kapital");
    }

    #[test]
    fn test_posting_short_heading() {
        let posting = Posting::new("2016", "text");
        assert_eq!(posting.heading_date, "2016");
        assert!(posting.heading_year().is_err());
    }

    #[test]
    fn test_posting_normalizes_to_nfc() {
        // "å" written as "a" + combining ring
        let posting = Posting::new(
            "01.01.2016 Nye selskaber",
            "Indbetalingsma\u{30A}de: kontant",
        );
        assert!(posting.full_text.contains(CREATION_MARKER));
    }

    #[test]
    fn test_posting_keeps_stroked_o_decomposed() {
        // "ø" has no canonical decomposition, so "o" + combining stroke stays apart
        let posting = Posting::new("01.01.2016 Kapital", "Kapitalforho\u{338}jelse");
        assert!(!posting.full_text.contains(INCREASE_MARKER));
    }

    #[test]
    fn test_posting_relevant_topic() {
        assert!(Posting::new("01.01.2016 Kapitalændring", "").has_relevant_topic());
        assert!(Posting::new("01.01.2016 NYE SELSKABER", "").has_relevant_topic());
        assert!(!Posting::new("01.01.2016 Adresseændring", "").has_relevant_topic());
    }

    #[test]
    fn test_posting_heading_year() {
        let posting = Posting::new("24.12.2018 Kapital", "");
        assert_eq!(posting.heading_year().unwrap(), 2018);
    }

    #[test]
    fn test_posting_deserialize() {
        let json = r#"{"heading": "01.02.2016 Nye selskaber", "text": "Stiftelsesdato: 01.02.2016"}"#;
        let posting: Posting = serde_json::from_str(json).unwrap();
        assert_eq!(posting.heading_date, "01.02.2016");
        assert_eq!(posting.full_text, "Stiftelsesdato: 01.02.2016");
    }

    #[test]
    fn test_event_kind_marker() {
        assert_eq!(EventKind::CapitalIncrease.marker(), "Kapitalforhøjelse");
        assert_eq!(EventKind::CapitalDecrease.to_string(), "Kapitalnedsættelse");
        assert_eq!(EventKind::Creation.marker(), "Indbetalingsmåde");
    }

    #[test]
    fn test_event_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&EventKind::CapitalIncrease).unwrap(),
            "\"Kapitalforhøjelse\""
        );
        assert_eq!(
            serde_json::to_string(&EventKind::Creation).unwrap(),
            "\"Indbetalingsmåde\""
        );
    }

    #[test]
    fn test_currency_serialization() {
        assert_eq!(serde_json::to_string(&Currency::Euro).unwrap(), "\"euro\"");
        assert_eq!(serde_json::to_string(&Currency::Kroner).unwrap(), "\"kr.\"");
        assert_eq!(serde_json::to_string(&Currency::Unknown).unwrap(), "null");
    }

    #[test]
    fn test_record_serialization_field_names() {
        let record = CapitalChangeRecord {
            date: "01.01.2016".to_string(),
            change_type: EventKind::CapitalIncrease,
            status_changed_date: "02.01.2016".to_string(),
            amount_data: AmountData {
                amount: "5000".to_string(),
                date: "02.01.2016".to_string(),
                investment_type: "kontant".to_string(),
                price: "100".to_string(),
            },
            company_id: "12345678".to_string(),
            currency: Currency::Kroner,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["cvr"], "12345678");
        assert_eq!(value["change_type"], "Kapitalforhøjelse");
        assert_eq!(value["amount_data"]["amount"], "5000");
        assert_eq!(value["currency"], "kr.");
    }
}
