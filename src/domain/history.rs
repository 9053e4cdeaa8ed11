use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{config::BillingConfig, device::Device, totals::Totals};

/// Immutable snapshot of a closed billing period. Created only by the close
/// handler; after creation it is never touched except for wholesale
/// replacement when the operator confirms an overwrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    /// Month/year label, "MM/YYYY". Not unique at the storage level, which is
    /// why closing checks for collisions.
    pub period: String,
    pub timestamp: DateTime<Utc>,
    pub devices: Vec<Device>,
    pub config: BillingConfig,
    pub totals: Totals,
}

impl HistoryRecord {
    /// Freezes the given state into a new record, deep-copying devices and
    /// config and deriving the totals at this instant.
    pub fn snapshot(
        devices: &[Device],
        config: &BillingConfig,
        period: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            period,
            timestamp,
            devices: devices.to_vec(),
            config: config.clone(),
            totals: Totals::compute(devices, config),
        }
    }
}

/// The ledger of closed periods, most-recent-first.
#[derive(Debug, Default)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn from_records(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_period(&self, period: &str) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.period == period)
    }

    pub fn prepend(&mut self, record: HistoryRecord) {
        self.records.insert(0, record);
    }

    /// Drops every record for the incoming record's period, then prepends it.
    /// Afterwards the ledger holds exactly one entry for that period.
    pub fn replace_period(&mut self, record: HistoryRecord) {
        self.records.retain(|r| r.period != record.period);
        self.records.insert(0, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::Device;

    fn record(period: &str) -> HistoryRecord {
        HistoryRecord::snapshot(
            &[Device::new("HP1", "10.0.0.1", "LaserJet")],
            &BillingConfig::default(),
            period.to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn snapshot_freezes_totals_with_the_devices() {
        let mut d = Device::new("HP1", "10.0.0.1", "LaserJet");
        d.last_month_counter = 1000;
        d.current_counter = 1200;

        let rec = HistoryRecord::snapshot(
            &[d],
            &BillingConfig::default(),
            "06/2024".to_string(),
            Utc::now(),
        );

        assert_eq!(rec.totals.total_copias, 200);
        assert_eq!(rec.devices.len(), 1);
        assert_eq!(rec.period, "06/2024");
    }

    #[test]
    fn prepend_keeps_most_recent_first() {
        let mut history = History::new();
        history.prepend(record("05/2024"));
        history.prepend(record("06/2024"));

        assert_eq!(history.records()[0].period, "06/2024");
        assert_eq!(history.records()[1].period, "05/2024");
    }

    #[test]
    fn replace_period_leaves_exactly_one_entry() {
        let mut history = History::new();
        history.prepend(record("06/2024"));
        history.prepend(record("06/2024"));
        history.prepend(record("05/2024"));

        let replacement = record("06/2024");
        let replacement_id = replacement.id;
        history.replace_period(replacement);

        let june: Vec<_> = history
            .records()
            .iter()
            .filter(|r| r.period == "06/2024")
            .collect();
        assert_eq!(june.len(), 1);
        assert_eq!(june[0].id, replacement_id);
        assert!(history.find_period("05/2024").is_some());
    }
}
