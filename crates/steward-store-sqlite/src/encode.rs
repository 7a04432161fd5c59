//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Calendar dates are stored as `YYYY-MM-DD` strings; statuses as their
//! capitalised names. Ids are plain SQLite rowids.

use chrono::NaiveDate;
use steward_core::agreement::{Agreement, AgreementStatus};

use crate::{Error, Result};

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── AgreementStatus ─────────────────────────────────────────────────────────

pub fn encode_status(status: AgreementStatus) -> &'static str {
  status.as_str()
}

pub fn decode_status(s: &str) -> Result<AgreementStatus> {
  Ok(AgreementStatus::parse(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `agreements` row.
pub struct RawAgreement {
  pub id:               i64,
  pub property:         String,
  pub service_type:     String,
  pub vendor:           String,
  pub start_date:       String,
  pub end_date:         String,
  pub price:            f64,
  pub increase_percent: f64,
  pub status:           String,
}

impl RawAgreement {
  pub fn into_agreement(self) -> Result<Agreement> {
    Ok(Agreement {
      id:               self.id,
      property:         self.property,
      service_type:     self.service_type,
      vendor:           self.vendor,
      start_date:       decode_date(&self.start_date)?,
      end_date:         decode_date(&self.end_date)?,
      price:            self.price,
      increase_percent: self.increase_percent,
      status:           decode_status(&self.status)?,
    })
  }
}
