use chrono::{DateTime, Local, Utc};

use crate::{
    common::error::AppError,
    domain::{history::HistoryRecord, workspace::Workspace},
};

/// Result of a close request. A collision is a deliberate branch awaiting the
/// operator's decision, not an error.
#[derive(Debug, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed { period: String, overwritten: bool },
    Collision { period: String },
}

/// Closes the open period: freezes a snapshot into the ledger and rolls the
/// device counters forward.
///
/// The period label is the current month/year ("MM/YYYY"). If the ledger
/// already holds that period and `overwrite` is false, nothing is mutated and
/// the collision is surfaced for confirmation. With `overwrite` set, every
/// colliding entry is replaced by the fresh candidate. Ledger mutation and
/// counter rollover happen together; there is no partial-apply state.
pub fn handle(
    workspace: &mut Workspace,
    now: DateTime<Local>,
    overwrite: bool,
) -> Result<CloseOutcome, AppError> {
    let period = now.format("%m/%Y").to_string();
    let collision = workspace.history.find_period(&period).is_some();

    if collision && !overwrite {
        return Ok(CloseOutcome::Collision { period });
    }

    let candidate = HistoryRecord::snapshot(
        workspace.fleet.devices(),
        &workspace.config,
        period.clone(),
        now.with_timezone(&Utc),
    );

    if collision {
        workspace.history.replace_period(candidate);
    } else {
        workspace.history.prepend(candidate);
    }
    workspace.fleet.rollover();

    Ok(CloseOutcome::Closed {
        period,
        overwritten: collision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::Device;
    use chrono::TimeZone;

    fn workspace_with_reading() -> Workspace {
        let mut ws = Workspace::default();
        let mut device = Device::new("HP1", "10.0.0.1", "LaserJet");
        device.last_month_counter = 1000;
        device.current_counter = 1200;
        ws.fleet.add(device);
        ws
    }

    fn june() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn first_close_appends_and_rolls_counters() {
        let mut ws = workspace_with_reading();

        let outcome = handle(&mut ws, june(), false).unwrap();

        assert_eq!(
            outcome,
            CloseOutcome::Closed {
                period: "06/2024".to_string(),
                overwritten: false
            }
        );
        assert_eq!(ws.history.len(), 1);

        let record = &ws.history.records()[0];
        assert_eq!(record.period, "06/2024");
        assert_eq!(record.totals.total_copias, 200);
        // The snapshot keeps the pre-rollover readings.
        assert_eq!(record.devices[0].current_counter, 1200);

        let device = &ws.fleet.devices()[0];
        assert_eq!(device.last_month_counter, 1200);
        assert_eq!(device.current_counter, 0);
    }

    #[test]
    fn unread_device_keeps_its_baseline_after_close() {
        let mut ws = Workspace::default();
        let mut device = Device::new("HP1", "10.0.0.1", "LaserJet");
        device.last_month_counter = 1000;
        ws.fleet.add(device);

        handle(&mut ws, june(), false).unwrap();

        assert_eq!(ws.fleet.devices()[0].last_month_counter, 1000);
        assert_eq!(ws.fleet.devices()[0].current_counter, 0);
    }

    #[test]
    fn second_close_of_same_period_surfaces_the_collision() {
        let mut ws = workspace_with_reading();
        handle(&mut ws, june(), false).unwrap();
        let id = ws.fleet.devices()[0].id;
        ws.fleet.get_mut(id).unwrap().current_counter = 1500;

        let outcome = handle(&mut ws, june(), false).unwrap();

        assert_eq!(
            outcome,
            CloseOutcome::Collision {
                period: "06/2024".to_string()
            }
        );
        // Nothing mutated: still one entry, counters untouched.
        assert_eq!(ws.history.len(), 1);
        assert_eq!(ws.fleet.devices()[0].current_counter, 1500);
    }

    #[test]
    fn confirmed_overwrite_leaves_exactly_one_entry_for_the_period() {
        let mut ws = workspace_with_reading();
        handle(&mut ws, june(), false).unwrap();
        let first_id = ws.history.records()[0].id;

        let id = ws.fleet.devices()[0].id;
        ws.fleet.get_mut(id).unwrap().current_counter = 1500;
        let outcome = handle(&mut ws, june(), true).unwrap();

        assert_eq!(
            outcome,
            CloseOutcome::Closed {
                period: "06/2024".to_string(),
                overwritten: true
            }
        );
        assert_eq!(ws.history.len(), 1);
        let record = &ws.history.records()[0];
        assert_ne!(record.id, first_id);
        assert_eq!(record.totals.total_copias, 300);
    }

    #[test]
    fn overwrite_flag_on_a_fresh_period_closes_normally() {
        let mut ws = workspace_with_reading();

        let outcome = handle(&mut ws, june(), true).unwrap();

        assert_eq!(
            outcome,
            CloseOutcome::Closed {
                period: "06/2024".to_string(),
                overwritten: false
            }
        );
    }
}
