use crate::{
    common::error::AppError,
    domain::{device::Device, fleet::Fleet},
    io::csv_import,
};

/// Placeholder for rows whose export carries no model column.
const UNKNOWN_MODEL: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Existing devices whose baseline was overwritten.
    pub updated: usize,
    /// Devices appended because no ip matched.
    pub added: usize,
    /// Rows dropped for a blank name or ip.
    pub skipped: usize,
}

/// Parses an export and merges it into the fleet, keyed by exact `ip`.
///
/// A matching device gets the parsed value as its new baseline and a zeroed
/// current counter (the import is the start-of-period state); its id, name
/// and model stay untouched. An unmatched row appends a brand-new device.
/// A structural failure (no header, too few lines) aborts before any device
/// is changed.
pub fn handle(fleet: &mut Fleet, text: &str) -> Result<ImportSummary, AppError> {
    let parsed = csv_import::parse(text)?;

    let mut updated = 0usize;
    let mut added = 0usize;
    for row in parsed.rows {
        match fleet.find_by_ip_mut(&row.ip) {
            Some(device) => {
                device.last_month_counter = row.counter;
                device.current_counter = 0;
                updated += 1;
            }
            None => {
                let model = if row.model.is_empty() {
                    UNKNOWN_MODEL.to_string()
                } else {
                    row.model
                };
                let mut device = Device::new(row.name, row.ip, model);
                device.last_month_counter = row.counter;
                fleet.add(device);
                added += 1;
            }
        }
    }

    Ok(ImportSummary {
        updated,
        added,
        skipped: parsed.skipped,
    })
}
