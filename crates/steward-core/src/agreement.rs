//! Agreement types — the central record of the store.
//!
//! An agreement is a vendor service contract tied to one property, with a
//! validity window and price terms. Agreements are never hard-deleted;
//! retiring one is a status transition to [`AgreementStatus::Archived`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where an agreement sits in its lifecycle.
///
/// Serialised as the capitalised variant name (`"Active"`, ...), which is
/// also the literal stored in the database.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum AgreementStatus {
  Active,
  Completed,
  /// Terminal: excluded from dashboards and renewal checks.
  Archived,
}

impl AgreementStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Active => "Active",
      Self::Completed => "Completed",
      Self::Archived => "Archived",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "Active" => Ok(Self::Active),
      "Completed" => Ok(Self::Completed),
      "Archived" => Ok(Self::Archived),
      other => Err(Error::UnknownStatus(other.to_owned())),
    }
  }
}

// ─── Agreement ───────────────────────────────────────────────────────────────

/// A persisted service agreement.
///
/// `property` is a denormalized text reference to
/// [`Property::name`](crate::property::Property); the store checks it
/// resolves at write time but no database-level foreign key is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
  pub id:               i64,
  pub property:         String,
  pub service_type:     String,
  pub vendor:           String,
  pub start_date:       NaiveDate,
  pub end_date:         NaiveDate,
  pub price:            f64,
  pub increase_percent: f64,
  pub status:           AgreementStatus,
}

/// Input for creating an agreement; the store assigns the id.
///
/// `end_date` is deliberately not checked against `start_date` — the data
/// this system inherits contains agreements with inverted windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAgreement {
  pub property:         String,
  pub service_type:     String,
  pub vendor:           String,
  pub start_date:       NaiveDate,
  pub end_date:         NaiveDate,
  pub price:            f64,
  pub increase_percent: f64,
  pub status:           AgreementStatus,
}

impl NewAgreement {
  /// Check the money-field invariants.
  pub fn validate(&self) -> Result<()> {
    if self.price < 0.0 {
      return Err(Error::NegativePrice(self.price));
    }
    if self.increase_percent < 0.0 {
      return Err(Error::NegativeIncrease(self.increase_percent));
    }
    Ok(())
  }
}

// ─── Partial update ──────────────────────────────────────────────────────────

/// A typed partial update. Exactly the mutable fields of an agreement are
/// representable here; unset fields are left untouched by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgreementPatch {
  pub property:         Option<String>,
  pub service_type:     Option<String>,
  pub vendor:           Option<String>,
  pub start_date:       Option<NaiveDate>,
  pub end_date:         Option<NaiveDate>,
  pub price:            Option<f64>,
  pub increase_percent: Option<f64>,
  pub status:           Option<AgreementStatus>,
}

impl AgreementPatch {
  /// A patch that only transitions the status — used by archiving.
  pub fn status_only(status: AgreementStatus) -> Self {
    Self { status: Some(status), ..Self::default() }
  }

  /// Check the money-field invariants on whichever fields are present.
  pub fn validate(&self) -> Result<()> {
    if let Some(price) = self.price
      && price < 0.0
    {
      return Err(Error::NegativePrice(price));
    }
    if let Some(increase) = self.increase_percent
      && increase < 0.0
    {
      return Err(Error::NegativeIncrease(increase));
    }
    Ok(())
  }

  /// Produce the agreement that results from applying this patch.
  pub fn apply_to(&self, mut agreement: Agreement) -> Agreement {
    if let Some(property) = &self.property {
      agreement.property = property.clone();
    }
    if let Some(service_type) = &self.service_type {
      agreement.service_type = service_type.clone();
    }
    if let Some(vendor) = &self.vendor {
      agreement.vendor = vendor.clone();
    }
    if let Some(start_date) = self.start_date {
      agreement.start_date = start_date;
    }
    if let Some(end_date) = self.end_date {
      agreement.end_date = end_date;
    }
    if let Some(price) = self.price {
      agreement.price = price;
    }
    if let Some(increase_percent) = self.increase_percent {
      agreement.increase_percent = increase_percent;
    }
    if let Some(status) = self.status {
      agreement.status = status;
    }
    agreement
  }
}
