//! History builder that ties the extraction components together.
//!
//! Filters a company's postings down to the capital related ones, runs the
//! segmenter on each and accumulates the records. A posting that fails to
//! parse is recorded as a [`PostingFailure`] and logged; it never stops the
//! remaining postings from being processed.

use serde::Serialize;

use crate::config::DEFAULT_CUTOFF_YEAR;
use crate::error::Result;
use crate::segment::extract_records;
use crate::types::{CapitalChangeRecord, Posting};

/// A posting that was skipped because it could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostingFailure {
    /// Posting date from the heading.
    pub posting_date: String,

    /// Heading of the posting.
    pub heading: String,

    /// Reason the posting was skipped.
    pub error: String,
}

/// Result of processing one company's postings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompanyHistory {
    /// CVR number of the company.
    pub company_id: String,

    /// Extracted records in posting order.
    pub records: Vec<CapitalChangeRecord>,

    /// Postings that were skipped.
    pub failures: Vec<PostingFailure>,
}

/// Builds the capital change history of one company.
#[derive(Debug, Clone)]
pub struct HistoryBuilder {
    company_id: String,
    cutoff_year: i32,
}

impl HistoryBuilder {
    /// Create a builder with the default cutoff year.
    #[must_use]
    pub fn new(company_id: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            cutoff_year: DEFAULT_CUTOFF_YEAR,
        }
    }

    /// Only keep postings dated after `year`.
    #[must_use]
    pub fn with_cutoff_year(mut self, year: i32) -> Self {
        self.cutoff_year = year;
        self
    }

    /// Cutoff year in effect.
    #[must_use]
    pub fn cutoff_year(&self) -> i32 {
        self.cutoff_year
    }

    /// Whether a posting should be handed to the segmenter.
    ///
    /// # Errors
    /// `InvalidDate` when a posting with a relevant topic has an unreadable
    /// heading date.
    pub fn is_relevant(&self, posting: &Posting) -> Result<bool> {
        if !posting.has_relevant_topic() {
            return Ok(false);
        }
        Ok(posting.heading_year()? > self.cutoff_year)
    }

    /// Process all postings and collect records and failures.
    #[must_use]
    pub fn build(&self, postings: &[Posting]) -> CompanyHistory {
        let mut history = CompanyHistory {
            company_id: self.company_id.clone(),
            ..CompanyHistory::default()
        };

        for posting in postings {
            let outcome = self.is_relevant(posting).and_then(|relevant| {
                if relevant {
                    extract_records(posting, &self.company_id)
                } else {
                    Ok(Vec::new())
                }
            });

            match outcome {
                Ok(records) => history.records.extend(records),
                Err(e) => {
                    tracing::warn!(
                        company_id = %self.company_id,
                        posting_date = %posting.heading_date,
                        error = %e,
                        "Skipping posting"
                    );
                    history.failures.push(PostingFailure {
                        posting_date: posting.heading_date.clone(),
                        heading: posting.heading_label.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            company_id = %self.company_id,
            records = history.records.len(),
            failures = history.failures.len(),
            "Built capital change history"
        );

        history
    }
}

/// Build the capital change records of one company with default settings.
///
/// Skipped postings are logged and otherwise dropped; use
/// [`HistoryBuilder::build`] to inspect them.
#[must_use]
pub fn build_history(postings: &[Posting], company_id: &str) -> Vec<CapitalChangeRecord> {
    HistoryBuilder::new(company_id).build(postings).records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventKind;

    const COMPANY: &str = "12345678";

    fn increase_posting(date: &str) -> Posting {
        Posting::new(
            format!("{date} Ændring af kapital"),
            format!(
                "{date} Ændring af kapital\n\
                 Vedtægter ændret: {date}\n\
                 Kapitalforhøjelse: kr. 5000, indbetalt kontant, kurs 100.\n\
                 Kapitalen udgør herefter kr. 10000."
            ),
        )
    }

    #[test]
    fn test_pre_cutoff_posting_is_excluded() {
        let postings = vec![increase_posting("01.06.2014"), increase_posting("01.06.2015")];
        assert!(build_history(&postings, COMPANY).is_empty());
    }

    #[test]
    fn test_post_cutoff_posting_is_included() {
        let records = build_history(&[increase_posting("01.06.2016")], COMPANY);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "01.06.2016");
    }

    #[test]
    fn test_custom_cutoff_year() {
        let builder = HistoryBuilder::new(COMPANY).with_cutoff_year(2013);
        assert_eq!(builder.cutoff_year(), 2013);
        let history = builder.build(&[increase_posting("01.06.2014")]);
        assert_eq!(history.records.len(), 1);
    }

    #[test]
    fn test_irrelevant_topic_is_excluded() {
        let posting = Posting::new(
            "01.06.2017 Ændring af adresse",
            "Vedtægter ændret: 01.06.2017\nKapitalforhøjelse: kr. 5000, kontant, kurs 100.\nkr. 1",
        );
        let history = HistoryBuilder::new(COMPANY).build(&[posting]);
        assert!(history.records.is_empty());
        assert!(history.failures.is_empty());
    }

    #[test]
    fn test_invalid_heading_date_is_a_failure() {
        let posting = Posting::new("Kapitalændring", "Kapitalforhøjelse");
        let history = HistoryBuilder::new(COMPANY).build(&[posting]);
        assert!(history.records.is_empty());
        assert_eq!(history.failures.len(), 1);
        assert!(history.failures[0].error.contains("Invalid posting date"));
    }

    #[test]
    fn test_failure_does_not_stop_processing() {
        let broken = Posting::new(
            "01.02.2017 Kapitalændring",
            "Kapitalforhøjelse: kr. 5000, kontant, kurs 100.\nKapitalen udgør kr. 10000.",
        );
        let postings = vec![increase_posting("01.01.2017"), broken, increase_posting("01.03.2017")];

        let history = HistoryBuilder::new(COMPANY).build(&postings);
        assert_eq!(history.records.len(), 2);
        assert_eq!(history.records[0].date, "01.01.2017");
        assert_eq!(history.records[1].date, "01.03.2017");
        assert_eq!(history.failures.len(), 1);
        assert_eq!(history.failures[0].posting_date, "01.02.2017");
    }

    #[test]
    fn test_emission_order_within_posting() {
        let posting = Posting::new(
            "01.02.2017 Kapitalændring",
            "Vedtægter ændret: 01.02.2017\n\
             Kapitalforhøjelse: kr. 5000, kontant, kurs 100.\n\
             Kapitalnedsættelse den 10.01.2017 ved udbetaling kr. 2000 kurs 100,00.\n\
             Stiftelsesdato: 01.01.2017\n\
             Indbetalingsmåde: kontant kr. 50.000 kurs 100,-.",
        );
        let records = build_history(&[posting], COMPANY);
        let kinds: Vec<EventKind> = records.iter().map(|r| r.change_type).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::CapitalIncrease,
                EventKind::CapitalDecrease,
                EventKind::Creation
            ]
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let postings = vec![increase_posting("01.01.2017"), increase_posting("01.03.2017")];
        let builder = HistoryBuilder::new(COMPANY);
        assert_eq!(builder.build(&postings).records, builder.build(&postings).records);
    }
}
