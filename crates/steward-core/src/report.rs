//! Dashboard aggregations — read-only computations over store output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
  agreement::{Agreement, AgreementStatus},
  lifecycle,
};

/// Headline dashboard metrics, computed over the non-archived subset of
/// whatever slice the caller passes in (typically everything, or one
/// property's agreements).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
  pub total_agreements:  usize,
  pub active_agreements: usize,
  /// `None` when there is nothing to average — rendered as "N/A".
  pub average_increase:  Option<f64>,
}

pub fn summarize(agreements: &[Agreement]) -> DashboardSummary {
  let shown = lifecycle::active_agreements(agreements);
  let active = shown
    .iter()
    .filter(|a| a.status == AgreementStatus::Active)
    .count();

  DashboardSummary {
    total_agreements:  shown.len(),
    active_agreements: active,
    average_increase:  lifecycle::average_increase(&shown),
  }
}

/// One bar of the price-distribution chart: total price per
/// (service type, status) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
  pub service_type: String,
  pub status:       AgreementStatus,
  pub total_price:  f64,
}

/// Group price by service type and status, over the non-archived subset.
/// Output order is deterministic: service type, then status.
pub fn price_by_service(agreements: &[Agreement]) -> Vec<PriceBreakdown> {
  let mut totals: BTreeMap<(String, AgreementStatus), f64> = BTreeMap::new();
  for agreement in lifecycle::active_agreements(agreements) {
    *totals
      .entry((agreement.service_type.clone(), agreement.status))
      .or_insert(0.0) += agreement.price;
  }

  totals
    .into_iter()
    .map(|((service_type, status), total_price)| PriceBreakdown {
      service_type,
      status,
      total_price,
    })
    .collect()
}
