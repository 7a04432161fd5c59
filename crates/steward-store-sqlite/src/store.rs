//! [`SqliteStore`] — the SQLite implementation of [`AgreementStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use steward_core::{
  Error as CoreError,
  agreement::{Agreement, AgreementPatch, AgreementStatus, NewAgreement},
  email::Email,
  property::Property,
  store::AgreementStore,
};

use crate::{
  Error, Result,
  encode::{RawAgreement, encode_date, encode_status},
  schema::SCHEMA,
};

const AGREEMENT_COLUMNS: &str = "id, property, service_type, vendor, \
   start_date, end_date, price, increase_percent, status";

fn read_agreement_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawAgreement> {
  Ok(RawAgreement {
    id:               row.get(0)?,
    property:         row.get(1)?,
    service_type:     row.get(2)?,
    vendor:           row.get(3)?,
    start_date:       row.get(4)?,
    end_date:         row.get(5)?,
    price:            row.get(6)?,
    increase_percent: row.get(7)?,
    status:           row.get(8)?,
  })
}

/// A UNIQUE-constraint failure surfaced by SQLite. The only constraints on
/// the add paths that call this are the unique name/address columns.
fn is_unique_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
      if f.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An agreement store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and every
/// logical operation is a scoped call onto its worker thread. One operator
/// at a time is assumed: two concurrent `update_agreement` calls on the
/// same row race last-write-wins.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// The write-time referential check behind the denormalized
  /// `agreements.property` column.
  async fn property_exists(&self, name: &str) -> Result<bool> {
    let name = name.to_owned();
    let exists = self
      .conn
      .call(move |conn| {
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM properties WHERE name = ?1",
            rusqlite::params![name],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        Ok(exists)
      })
      .await?;
    Ok(exists)
  }
}

// ─── AgreementStore impl ─────────────────────────────────────────────────────

impl AgreementStore for SqliteStore {
  type Error = Error;

  // ── Agreements ────────────────────────────────────────────────────────────

  async fn list_agreements(
    &self,
    status: Option<AgreementStatus>,
  ) -> Result<Vec<Agreement>> {
    let status_str = status.map(encode_status).map(str::to_owned);

    let raws: Vec<RawAgreement> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(s) = status_str {
          let mut stmt = conn.prepare(&format!(
            "SELECT {AGREEMENT_COLUMNS} FROM agreements WHERE status = ?1"
          ))?;
          stmt
            .query_map(rusqlite::params![s], read_agreement_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn
            .prepare(&format!("SELECT {AGREEMENT_COLUMNS} FROM agreements"))?;
          stmt
            .query_map([], read_agreement_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAgreement::into_agreement).collect()
  }

  async fn get_agreement(&self, id: i64) -> Result<Option<Agreement>> {
    let raw: Option<RawAgreement> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {AGREEMENT_COLUMNS} FROM agreements WHERE id = ?1"
              ),
              rusqlite::params![id],
              read_agreement_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAgreement::into_agreement).transpose()
  }

  async fn add_agreement(&self, input: NewAgreement) -> Result<Agreement> {
    input.validate()?;
    if !self.property_exists(&input.property).await? {
      return Err(CoreError::UnknownProperty(input.property).into());
    }

    let property         = input.property.clone();
    let service_type     = input.service_type.clone();
    let vendor           = input.vendor.clone();
    let start_date_str   = encode_date(input.start_date);
    let end_date_str     = encode_date(input.end_date);
    let price            = input.price;
    let increase_percent = input.increase_percent;
    let status_str       = encode_status(input.status).to_owned();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO agreements (
             property, service_type, vendor, start_date, end_date,
             price, increase_percent, status
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            property,
            service_type,
            vendor,
            start_date_str,
            end_date_str,
            price,
            increase_percent,
            status_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Agreement {
      id,
      property:         input.property,
      service_type:     input.service_type,
      vendor:           input.vendor,
      start_date:       input.start_date,
      end_date:         input.end_date,
      price:            input.price,
      increase_percent: input.increase_percent,
      status:           input.status,
    })
  }

  async fn update_agreement(
    &self,
    id: i64,
    patch: AgreementPatch,
  ) -> Result<Agreement> {
    patch.validate()?;
    if let Some(name) = &patch.property
      && !self.property_exists(name).await?
    {
      return Err(CoreError::UnknownProperty(name.clone()).into());
    }

    // Read-merge-write: fetch the row, apply the typed patch in Rust, then
    // write all columns back. Single-operator usage makes the read/write
    // gap acceptable.
    let current = self
      .get_agreement(id)
      .await?
      .ok_or(CoreError::AgreementNotFound(id))?;
    let updated = patch.apply_to(current);

    let property         = updated.property.clone();
    let service_type     = updated.service_type.clone();
    let vendor           = updated.vendor.clone();
    let start_date_str   = encode_date(updated.start_date);
    let end_date_str     = encode_date(updated.end_date);
    let price            = updated.price;
    let increase_percent = updated.increase_percent;
    let status_str       = encode_status(updated.status).to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE agreements SET
             property = ?1, service_type = ?2, vendor = ?3,
             start_date = ?4, end_date = ?5, price = ?6,
             increase_percent = ?7, status = ?8
           WHERE id = ?9",
          rusqlite::params![
            property,
            service_type,
            vendor,
            start_date_str,
            end_date_str,
            price,
            increase_percent,
            status_str,
            id,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(updated)
  }

  // ── Properties ────────────────────────────────────────────────────────────

  async fn list_properties(&self) -> Result<Vec<Property>> {
    let properties = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, name FROM properties ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Property { id: row.get(0)?, name: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(properties)
  }

  async fn add_property(&self, name: String) -> Result<Property> {
    let insert_name = name.clone();
    let result = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO properties (name) VALUES (?1)",
          rusqlite::params![insert_name],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await;

    match result {
      Ok(id) => Ok(Property { id, name }),
      Err(e) if is_unique_violation(&e) => {
        Err(CoreError::DuplicateProperty(name).into())
      }
      Err(e) => Err(e.into()),
    }
  }

  // ── Emails ────────────────────────────────────────────────────────────────

  async fn list_emails(&self) -> Result<Vec<Email>> {
    let emails = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, address FROM emails ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Email { id: row.get(0)?, address: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(emails)
  }

  async fn add_email(&self, address: String) -> Result<Email> {
    let insert_address = address.clone();
    let result = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO emails (address) VALUES (?1)",
          rusqlite::params![insert_address],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await;

    match result {
      Ok(id) => Ok(Email { id, address }),
      Err(e) if is_unique_violation(&e) => {
        Err(CoreError::DuplicateEmail(address).into())
      }
      Err(e) => Err(e.into()),
    }
  }
}
