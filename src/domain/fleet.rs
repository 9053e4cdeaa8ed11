use uuid::Uuid;

use crate::domain::device::Device;

/// The device collection owned by the application's top-level state. Order is
/// insertion order, which is also the order reports are printed in.
#[derive(Debug, Default)]
pub struct Fleet {
    devices: Vec<Device>,
}

impl Fleet {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
        }
    }

    pub fn from_devices(devices: Vec<Device>) -> Self {
        Self { devices }
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn add(&mut self, device: Device) {
        self.devices.push(device);
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.id == id)
    }

    /// Exact, case-sensitive match on the import natural key.
    pub fn find_by_ip_mut(&mut self, ip: &str) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.ip == ip)
    }

    /// Returns true when a device with that id existed and was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.devices.len();
        self.devices.retain(|d| d.id != id);
        self.devices.len() != before
    }

    /// Rolls every counter forward for the next period: the current reading
    /// becomes the new baseline, except that a device never read this period
    /// (current == 0) keeps its prior baseline rather than regressing to zero.
    pub fn rollover(&mut self) {
        for device in &mut self.devices {
            if device.current_counter != 0 {
                device.last_month_counter = device.current_counter;
            }
            device.current_counter = 0;
        }
    }
}
