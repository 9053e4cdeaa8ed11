use crate::domain::{config::BillingConfig, fleet::Fleet, history::History};

/// Everything the application owns: the open-period fleet, the closed-period
/// ledger and the billing contract. The store holds no independent copy, only
/// a serialized mirror of this.
#[derive(Debug, Default)]
pub struct Workspace {
    pub fleet: Fleet,
    pub history: History,
    pub config: BillingConfig,
}
