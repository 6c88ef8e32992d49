#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceState {
    Initial,
    Scanning,
    Connecting,
    Connected,
}

#[derive(Debug, Clone)]
pub enum DeviceEvent {
    StateChange(DeviceState),
    BatteryDrained,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub name: String,
    pub connected: bool,
    pub battery: u8, // [0, 100]
    pub firmware: String,
    pub serial: String,
}

impl Device {
    /// The mock oximeter shown on the dashboard. It starts out disconnected, the device link
    /// subscription reports when it is connected.
    pub fn mock() -> Self {
        Device {
            name: "OxiPulse Mini".to_string(),
            connected: false,
            battery: 86,
            firmware: "1.4.2".to_string(),
            serial: "OX-2024-0917".to_string(),
        }
    }

    pub fn drain_battery(&mut self) {
        self.battery = self.battery.saturating_sub(1);
    }

    pub fn battery_low(&self) -> bool {
        self.battery <= 20
    }
}
