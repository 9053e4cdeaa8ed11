use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Informational only; nothing in the billing pipeline probes the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: Uuid,
    pub name: String,
    /// Natural key for CSV import matching. Treated as an opaque string.
    pub ip: String,
    pub model: String,
    /// Meter reading at the start of the open period (the prior period's
    /// ending reading).
    pub last_month_counter: u64,
    /// Reading entered for the period in progress; 0 means "not yet read".
    pub current_counter: u64,
    pub status: DeviceStatus,
}

impl Device {
    pub fn new(name: impl Into<String>, ip: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            ip: ip.into(),
            model: model.into(),
            last_month_counter: 0,
            current_counter: 0,
            status: DeviceStatus::Unknown,
        }
    }

    /// Pages produced in the open period. Never negative, even when a counter
    /// was mistakenly rolled back below the baseline.
    pub fn production(&self) -> u64 {
        self.current_counter.saturating_sub(self.last_month_counter)
    }
}
