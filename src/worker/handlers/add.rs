use uuid::Uuid;

use crate::{
    common::error::AppError,
    domain::{device::Device, fleet::Fleet},
};

/// Default descriptor for manually registered machines, as in the original
/// registration form.
const DEFAULT_MODEL: &str = "Scanner/Printer";

pub fn handle(
    fleet: &mut Fleet,
    name: String,
    ip: String,
    model: Option<String>,
) -> Result<Uuid, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::EmptyField("name"));
    }
    if ip.trim().is_empty() {
        return Err(AppError::EmptyField("ip"));
    }

    let model = match model {
        Some(m) if !m.trim().is_empty() => m,
        _ => DEFAULT_MODEL.to_string(),
    };

    let device = Device::new(name, ip, model);
    let id = device.id;
    fleet.add(device);
    Ok(id)
}
