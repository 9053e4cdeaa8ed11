use uuid::Uuid;

use crate::{
    common::{error::AppError, numeric},
    domain::fleet::Fleet,
};

/// Which counter a manual entry targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterField {
    /// The reading for the period in progress.
    Current,
    /// The baseline carried over from the previous period.
    Baseline,
}

pub fn handle(
    fleet: &mut Fleet,
    id: Uuid,
    raw_value: &str,
    field: CounterField,
) -> Result<u64, AppError> {
    let value = numeric::parse_counter(raw_value);
    let device = fleet.get_mut(id).ok_or(AppError::DeviceNotFound(id))?;
    match field {
        CounterField::Current => device.current_counter = value,
        CounterField::Baseline => device.last_month_counter = value,
    }
    Ok(value)
}
