//! Property — a site an agreement is attached to.
//!
//! Properties are add-only: never renamed, never deleted. Agreements refer
//! to them by name.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
  pub id:   i64,
  pub name: String,
}
