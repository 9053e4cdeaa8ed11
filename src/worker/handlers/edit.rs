use uuid::Uuid;

use crate::{common::error::AppError, domain::fleet::Fleet};

pub fn handle(
    fleet: &mut Fleet,
    id: Uuid,
    name: Option<String>,
    ip: Option<String>,
    model: Option<String>,
) -> Result<(), AppError> {
    // Presence checks first so a bad edit leaves the device untouched.
    if matches!(&name, Some(n) if n.trim().is_empty()) {
        return Err(AppError::EmptyField("name"));
    }
    if matches!(&ip, Some(i) if i.trim().is_empty()) {
        return Err(AppError::EmptyField("ip"));
    }

    let device = fleet.get_mut(id).ok_or(AppError::DeviceNotFound(id))?;
    if let Some(name) = name {
        device.name = name;
    }
    if let Some(ip) = ip {
        device.ip = ip;
    }
    if let Some(model) = model {
        device.model = model;
    }
    Ok(())
}
