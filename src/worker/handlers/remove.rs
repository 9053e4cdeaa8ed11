use uuid::Uuid;

use crate::{common::error::AppError, domain::fleet::Fleet};

pub fn handle(fleet: &mut Fleet, id: Uuid) -> Result<(), AppError> {
    if fleet.remove(id) {
        Ok(())
    } else {
        Err(AppError::DeviceNotFound(id))
    }
}
