//! Record store for the two spreadsheets (people and coupons)
//!
//! Both files are CSV with a header row and fixed column layouts:
//! people use columns 1-7 (name, display name, Slack ID, birthday,
//! join date, sent, locale), coupons use columns 1-3 (link, code, sent).
//! Records are read positionally so the exact header wording does not
//! matter, and files are rewritten in place after every mutation.

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Canonical header written back to the people file
pub const PEOPLE_HEADER: [&str; 7] = [
    "Name",
    "Slack Display Name",
    "Slack ID",
    "Birthday",
    "Join Date",
    "Sent",
    "Locale",
];

/// Canonical header written back to the coupon file
pub const COUPON_HEADER: [&str; 3] = ["Link", "Code", "Sent"];

/// One row of the people spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub display_name: String,
    pub slack_id: String,
    /// MM/DD/YYYY
    pub birthday: String,
    /// MM/DD/YYYY
    pub join_date: String,
    /// Boolean-as-string: "TRUE" means sent, anything else means not
    pub sent: String,
    pub locale: String,
}

impl Person {
    /// Whether a birthday message was already sent to this person
    pub fn is_sent(&self) -> bool {
        self.sent.trim().eq_ignore_ascii_case("TRUE")
    }
}

/// One row of the coupon spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    pub link: String,
    pub code: String,
    pub sent: String,
}

impl Coupon {
    pub fn is_sent(&self) -> bool {
        self.sent.trim().eq_ignore_ascii_case("TRUE")
    }
}

fn field(record: &csv::StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or("").trim().to_string()
}

/// Load all people from the spreadsheet, skipping the header row.
/// An empty locale cell defaults to "en".
pub fn load_people<P: AsRef<Path>>(path: P) -> Result<Vec<Person>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path.as_ref())
        .map_err(|e| {
            Error::SpreadsheetError(format!(
                "Failed to open {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

    let mut people = Vec::new();
    for record in reader.records() {
        let record = record?;
        let locale = field(&record, 6);
        people.push(Person {
            name: field(&record, 0),
            display_name: field(&record, 1),
            slack_id: field(&record, 2),
            birthday: field(&record, 3),
            join_date: field(&record, 4),
            sent: field(&record, 5),
            locale: if locale.is_empty() {
                crate::config::BASE_LOCALE.to_string()
            } else {
                locale
            },
        });
    }

    debug!(count = people.len(), "Loaded people spreadsheet");
    Ok(people)
}

/// Rewrite the people spreadsheet with the canonical header.
pub fn save_people<P: AsRef<Path>>(path: P, people: &[Person]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(PEOPLE_HEADER)?;
    for p in people {
        writer.write_record([
            &p.name,
            &p.display_name,
            &p.slack_id,
            &p.birthday,
            &p.join_date,
            &p.sent,
            &p.locale,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Flip the sent flag for the person with the given Slack ID and persist
/// immediately. An ID not present in the file is a no-op.
pub fn mark_person_sent<P: AsRef<Path>>(path: P, slack_id: &str) -> Result<()> {
    let mut people = load_people(path.as_ref())?;
    for person in &mut people {
        if person.slack_id == slack_id {
            person.sent = "TRUE".to_string();
            save_people(path.as_ref(), &people)?;
            return Ok(());
        }
    }
    Ok(())
}

/// Load all coupons, skipping the header row.
pub fn load_coupons<P: AsRef<Path>>(path: P) -> Result<Vec<Coupon>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path.as_ref())
        .map_err(|e| {
            Error::SpreadsheetError(format!(
                "Failed to open {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

    let mut coupons = Vec::new();
    for record in reader.records() {
        let record = record?;
        coupons.push(Coupon {
            link: field(&record, 0),
            code: field(&record, 1),
            sent: field(&record, 2),
        });
    }

    debug!(count = coupons.len(), "Loaded coupon spreadsheet");
    Ok(coupons)
}

/// Rewrite the coupon spreadsheet with the canonical header.
pub fn save_coupons<P: AsRef<Path>>(path: P, coupons: &[Coupon]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(COUPON_HEADER)?;
    for c in coupons {
        writer.write_record([&c.link, &c.code, &c.sent])?;
    }
    writer.flush()?;
    Ok(())
}

/// Claim the first unused coupon: flag it TRUE, persist, and return its
/// link and code. Returns None when the supply is exhausted. A claimed
/// coupon stays consumed even if the send that follows fails.
pub fn claim_coupon<P: AsRef<Path>>(path: P) -> Result<Option<(String, String)>> {
    let mut coupons = load_coupons(path.as_ref())?;
    for coupon in &mut coupons {
        if !coupon.is_sent() {
            coupon.sent = "TRUE".to_string();
            let claimed = (coupon.link.clone(), coupon.code.clone());
            save_coupons(path.as_ref(), &coupons)?;
            return Ok(Some(claimed));
        }
    }
    Ok(None)
}
