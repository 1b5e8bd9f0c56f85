//! Bounded device registry
//!
//! Tracks the situation of every device in the cell and routes
//! instruction words to them by name prefix: the word `slider_shelf_1`
//! addresses the device named `slider`. A routed device is marked
//! running; it returns to standby only through an external
//! [`DeviceBank::report`] once its own protocol confirms completion.

use heapless::{String, Vec};

use tactus_core::sequence::{Instruction, FINISHED};
use tactus_core::traits::{DeviceBus, Situation};

/// Maximum devices in one cell
pub const MAX_DEVICES: usize = 8;

/// Maximum device name length
pub const MAX_DEVICE_NAME_LEN: usize = 16;

/// The standard four-device weighing cell
const STATION_DEVICES: [&str; 4] = ["weighing", "slider", "cobotta", "plc"];

/// One registered device
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    /// Device name, also the instruction-word prefix that addresses it
    pub name: String<MAX_DEVICE_NAME_LEN>,
    /// Last known situation
    pub situation: Situation,
    /// Last command word routed to this device
    pub last_command: Option<Instruction>,
}

/// Device registry for one process cell
#[derive(Debug, Clone)]
pub struct DeviceBank {
    devices: Vec<DeviceRecord, MAX_DEVICES>,
}

impl Default for DeviceBank {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceBank {
    /// Create an empty bank
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
        }
    }

    /// Create the standard station: weighing, slider, cobotta, plc
    pub fn default_station() -> Self {
        let mut bank = Self::new();
        for name in STATION_DEVICES {
            let _ = bank.register(name);
        }
        bank
    }

    /// Register a device, starting in [`Situation::Initializing`]
    ///
    /// Returns false when the bank is full or the name does not fit.
    pub fn register(&mut self, name: &str) -> bool {
        let mut n = String::new();
        if n.push_str(name).is_err() {
            return false;
        }
        self.devices
            .push(DeviceRecord {
                name: n,
                situation: Situation::Initializing,
                last_command: None,
            })
            .is_ok()
    }

    /// Record a situation reported by a device's own protocol
    ///
    /// Returns false for an unknown device.
    pub fn report(&mut self, name: &str, situation: Situation) -> bool {
        match self.devices.iter_mut().find(|d| d.name.as_str() == name) {
            Some(device) => {
                device.situation = situation;
                true
            }
            None => false,
        }
    }

    /// Look up one device
    pub fn device(&self, name: &str) -> Option<&DeviceRecord> {
        self.devices.iter().find(|d| d.name.as_str() == name)
    }

    /// Number of registered devices
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// True when no device is registered
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Route one instruction word to the device its prefix names
    fn route_word(&mut self, word: &str) -> bool {
        let target = match word.split_once('_') {
            Some((device, _)) => device,
            None => word,
        };
        match self.devices.iter_mut().find(|d| d.name.as_str() == target) {
            Some(device) => {
                let mut command = Instruction::new();
                let _ = command.push_str(word);
                device.last_command = Some(command);
                device.situation = Situation::Running;
                true
            }
            None => false,
        }
    }
}

impl DeviceBus for DeviceBank {
    /// An empty cell is never ready.
    fn check_devices(&self, situation: Situation) -> bool {
        !self.devices.is_empty() && self.devices.iter().all(|d| d.situation == situation)
    }

    /// Routes every whitespace-separated word of the instruction.
    ///
    /// The terminal marker addresses no device and is accepted as a
    /// no-op. An unknown device prefix makes the result false, but the
    /// remaining words are still routed.
    fn update_status(&mut self, instruction: &str) -> bool {
        if instruction.trim() == FINISHED {
            return true;
        }
        let mut accepted = true;
        for word in instruction.split_ascii_whitespace() {
            accepted &= self.route_word(word);
        }
        accepted
    }
}
