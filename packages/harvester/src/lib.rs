//! CVR Harvester - Extract capital changes from Danish company registration postings.
//!
//! Postings from a company's page in the Danish business register (CVR) are
//! free text. This crate classifies each posting by the capital events it
//! mentions (increase, decrease, creation), cuts it into one fragment per
//! event occurrence and extracts date, currency, amount, investment
//! description and price from each fragment.
//!
//! # Example
//!
//! ```
//! use cvr_harvester::{build_history, EventKind, Posting};
//!
//! let posting = Posting::new(
//!     "08.03.2017 Ændring af kapital",
//!     "Vedtægter ændret: 02.03.2017\n\
//!      Kapitalforhøjelse: kr. 5000, indbetalt kontant, kurs 100.\n\
//!      Kapitalen udgør herefter kr. 10000.",
//! );
//!
//! let records = build_history(&[posting], "12345678");
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].change_type, EventKind::CapitalIncrease);
//! assert_eq!(records[0].amount_data.amount, "5000");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Markers, currency tokens and validation
//! - [`types`]: Postings and capital change records
//! - [`error`]: Error types and Result alias
//! - [`text`]: Character-level slicing and numeric cleanup
//! - [`currency`]: Currency detection
//! - [`extract`]: Field extractors per event kind
//! - [`segment`]: Event classification and segmentation of a posting
//! - [`harvester`]: History builder over a company's postings
//! - [`input`]: Company id lists and postings files
//! - [`output`]: JSON/YAML rendering of records
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod currency;
pub mod error;
pub mod extract;
pub mod harvester;
pub mod input;
pub mod output;
pub mod segment;
pub mod text;
pub mod types;

// Re-export main functions
pub use harvester::{build_history, CompanyHistory, HistoryBuilder, PostingFailure};
pub use segment::extract_records;

// Re-export commonly used items
pub use config::{validate_company_id, validate_posting_date};
pub use currency::detect_currency;
pub use error::{HarvesterError, Result};
pub use types::{AmountData, CapitalChangeRecord, Currency, EventKind, Posting};
