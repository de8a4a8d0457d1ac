//! Event classification and segmentation of a single posting.
//!
//! A posting is checked for each event marker independently. Every event kind
//! present gets its own segmentation stage (locate marker, slice, clean,
//! split) and each resulting fragment is handed to the matching extractor.
//! Records are emitted in the order increase, decrease, creation.

use crate::config::{
    DECREASE_MARKER, FOUNDING_DATE_MARKER, INCREASE_MARKER, STATUTES_AMENDED_MARKER,
    STATUTES_DATE_WINDOW,
};
use crate::currency::detect_currency;
use crate::error::{HarvesterError, Result};
use crate::extract::{parse_creation, parse_decrease, parse_increase, AmountFields};
use crate::text::{drop_first_chars, first_line, following, take_chars};
use crate::types::{CapitalChangeRecord, Currency, EventKind, Posting};

/// Number of leading characters (`": "`) before the founding date.
const FOUNDING_LABEL_SUFFIX_LEN: usize = 2;

/// Assembles records for one posting.
struct RecordBuilder<'a> {
    posting_date: &'a str,
    company_id: &'a str,
}

impl RecordBuilder<'_> {
    fn build(
        &self,
        kind: EventKind,
        currency: Currency,
        change_date: &str,
        fields: AmountFields,
    ) -> CapitalChangeRecord {
        tracing::debug!(
            company_id = self.company_id,
            posting_date = self.posting_date,
            %kind,
            amount = %fields.amount,
            "Extracted capital change"
        );
        CapitalChangeRecord {
            date: self.posting_date.to_string(),
            change_type: kind,
            status_changed_date: change_date.to_string(),
            amount_data: fields.into_amount_data(change_date),
            company_id: self.company_id.to_string(),
            currency,
        }
    }
}

/// Event kinds whose markers appear in `text`, in emission order.
///
/// # Examples
/// ```
/// use cvr_harvester::segment::detect_events;
/// use cvr_harvester::types::EventKind;
///
/// let kinds = detect_events("Kapitalforhøjelse ... Kapitalnedsættelse ...");
/// assert_eq!(kinds, vec![EventKind::CapitalIncrease, EventKind::CapitalDecrease]);
/// ```
#[must_use]
pub fn detect_events(text: &str) -> Vec<EventKind> {
    [
        EventKind::CapitalIncrease,
        EventKind::CapitalDecrease,
        EventKind::Creation,
    ]
    .into_iter()
    .filter(|kind| text.contains(kind.marker()))
    .collect()
}

/// Extract every capital change record from one posting.
///
/// # Errors
/// `MalformedFragment` or `MissingSection` when any event in the posting
/// cannot be parsed. The caller skips the whole posting in that case.
pub fn extract_records(posting: &Posting, company_id: &str) -> Result<Vec<CapitalChangeRecord>> {
    let builder = RecordBuilder {
        posting_date: &posting.heading_date,
        company_id,
    };
    let text = posting.full_text.as_str();
    let kinds = detect_events(text);
    let has_decrease = kinds.contains(&EventKind::CapitalDecrease);

    let mut records = Vec::new();

    if kinds.contains(&EventKind::CapitalIncrease) {
        if has_decrease {
            records.extend(combined_increase(text, &builder)?);
        } else {
            records.extend(increases(text, &builder)?);
        }
    }

    if has_decrease {
        records.extend(decreases(text, &builder)?);
    }

    if kinds.contains(&EventKind::Creation) {
        records.extend(creation(text, &builder)?);
    }

    Ok(records)
}

/// Increase section of a posting, split on its currency token.
struct IncreaseSection {
    currency: Currency,
    change_date: String,
    pieces: Vec<String>,
}

/// Locate the increase section, its currency and its amendment date.
fn increase_section(text: &str) -> Result<IncreaseSection> {
    let section = following(text, INCREASE_MARKER)
        .ok_or_else(|| HarvesterError::missing(INCREASE_MARKER))?;

    let currency = detect_currency(section);
    let token = currency.token().ok_or_else(|| {
        HarvesterError::malformed("capital increase", "no currency token after marker")
    })?;

    let change_date = statutes_amended_date(text)?;

    let cleaned = section.replace('\n', "").replace(':', "");
    let pieces = cleaned.split(token).map(String::from).collect();

    Ok(IncreaseSection {
        currency,
        change_date,
        pieces,
    })
}

/// Date from the "statutes amended" field.
fn statutes_amended_date(text: &str) -> Result<String> {
    let field = following(text, STATUTES_AMENDED_MARKER)
        .ok_or_else(|| HarvesterError::missing(STATUTES_AMENDED_MARKER))?;
    Ok(take_chars(field, STATUTES_DATE_WINDOW).trim().to_string())
}

/// Posting with increases only: every interior fragment is one increase.
///
/// The first piece precedes the first amount and the last piece trails the
/// final currency token, so neither is parsed.
fn increases(text: &str, builder: &RecordBuilder<'_>) -> Result<Vec<CapitalChangeRecord>> {
    let section = increase_section(text)?;
    let interior = match section.pieces.len() {
        0..=2 => &[][..],
        n => &section.pieces[1..n - 1],
    };

    let mut records = Vec::with_capacity(interior.len());
    for fragment in interior {
        if fragment.trim().is_empty() {
            continue;
        }
        let fields = parse_increase(fragment)?;
        records.push(builder.build(
            EventKind::CapitalIncrease,
            section.currency,
            &section.change_date,
            fields,
        ));
    }
    Ok(records)
}

/// Posting with both increase and decrease: only the first increase, cut at
/// the decrease marker, is parsed here.
fn combined_increase(
    text: &str,
    builder: &RecordBuilder<'_>,
) -> Result<Option<CapitalChangeRecord>> {
    let section = increase_section(text)?;
    let piece = section.pieces.get(1).ok_or_else(|| {
        HarvesterError::malformed("capital increase", "no amount after currency token")
    })?;
    let fragment = piece.split(DECREASE_MARKER).next().unwrap_or_default();
    if fragment.trim().is_empty() {
        return Ok(None);
    }

    let fields = parse_increase(fragment)?;
    Ok(Some(builder.build(
        EventKind::CapitalIncrease,
        section.currency,
        &section.change_date,
        fields,
    )))
}

/// One decrease per occurrence of the decrease marker.
fn decreases(text: &str, builder: &RecordBuilder<'_>) -> Result<Vec<CapitalChangeRecord>> {
    let mut records = Vec::new();
    for fragment in text.split(DECREASE_MARKER).skip(1) {
        if fragment.trim().is_empty() {
            continue;
        }
        let currency = detect_currency(fragment);
        if let Some(decrease) = parse_decrease(fragment, currency)? {
            records.push(builder.build(
                EventKind::CapitalDecrease,
                currency,
                &decrease.change_date,
                decrease.fields,
            ));
        }
    }
    Ok(records)
}

/// Company creation, signalled by the manner-of-payment marker.
fn creation(text: &str, builder: &RecordBuilder<'_>) -> Result<Option<CapitalChangeRecord>> {
    let fragment = following(text, EventKind::Creation.marker())
        .ok_or_else(|| HarvesterError::missing(EventKind::Creation.marker()))?;
    let change_date = founding_date(text)?;

    if fragment.trim().is_empty() {
        return Ok(None);
    }

    let currency = detect_currency(fragment);
    let fields = parse_creation(fragment, currency)?;
    Ok(Some(builder.build(
        EventKind::Creation,
        currency,
        &change_date,
        fields,
    )))
}

/// Date from the founding date field, e.g. `"Stiftelsesdato: 03.02.2016."`.
fn founding_date(text: &str) -> Result<String> {
    let field = following(text, FOUNDING_DATE_MARKER)
        .ok_or_else(|| HarvesterError::missing(FOUNDING_DATE_MARKER))?;
    let value = drop_first_chars(first_line(field), FOUNDING_LABEL_SUFFIX_LEN);
    Ok(value.trim().trim_end_matches('.').to_string())
}
