//! Email — one entry in the catch-all reminder list.
//!
//! Every address on the list is notified for every due agreement,
//! regardless of which property or vendor is involved. Add-only.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
  pub id:      i64,
  pub address: String,
}
