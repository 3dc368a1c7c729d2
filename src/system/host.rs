//! Device services for the watchface

use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use pinetime_watchface::{Host, VibePattern};

use super::bluetooth;

/// Vibration requests for the motor task
pub static VIBRATE: Signal<ThreadModeRawMutex, VibePattern> = Signal::new();

pub struct DeviceHost {
    /// Show the time in 24-hour format
    clock_24h: bool,
}

impl DeviceHost {
    pub fn new(clock_24h: bool) -> Self {
        Self { clock_24h }
    }
}

impl Host for DeviceHost {
    fn clock_is_24h(&self) -> bool {
        self.clock_24h
    }

    fn bluetooth_connected(&self) -> bool {
        bluetooth::is_connected()
    }

    fn vibrate(&mut self, pattern: VibePattern) {
        VIBRATE.signal(pattern);
    }
}
