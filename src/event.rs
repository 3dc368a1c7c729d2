//! Events delivered to the watchface

use chrono::NaiveDateTime;

/// Something happened on the device that may change what is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A new minute started, carries the current local time
    MinuteTick(NaiveDateTime),
    /// Battery reading changed
    Battery { percent: u8, charging: bool },
    /// Bluetooth connection state changed
    Bluetooth(bool),
    /// The watchface became visible (`true`) or hidden (`false`)
    AppFocus(bool),
    /// Tap gesture
    Tap,
}
