use serde::{Deserialize, Serialize};

use crate::common::money::Money;

/// Billing contract for the open period. Historical records freeze their own
/// copy, so edits here never rewrite closed months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Contracted page quota included in the flat fee.
    pub franquia: u64,
    /// Price per page, applied both to the quota and to overage.
    pub valor_copia: Money,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            franquia: 52_200,
            valor_copia: Money::new(5),
        }
    }
}
