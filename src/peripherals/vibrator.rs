//! Control the vibration motor
//!
//! Implementation based upon https://github.com/tstellanova/cst816s/blob/master/examples/touchpad.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Output, peripherals::P0_16};
use embassy_time::Timer;
use pinetime_watchface::VibePattern;

#[derive(Clone, Copy)]
/// Pulse length in milliseconds
pub enum PulseLength {
    /// 200ms pulse
    SHORT = 200,
    /// 400 ms pulse
    LONG = 400,
}

impl From<VibePattern> for PulseLength {
    fn from(pattern: VibePattern) -> Self {
        match pattern {
            VibePattern::Short => PulseLength::SHORT,
            VibePattern::Long => PulseLength::LONG,
        }
    }
}

struct VibratorConfig<'a> {
    /// Motor enable pin (inverted)
    pin_enable: Output<'a, P0_16>,
}

pub struct Vibrator {
    /// Vibrator configuration
    config: VibratorConfig<'static>,
}

impl Vibrator {
    /// Configure vibrator on boot
    pub fn init(enable_pin: Output<'static, P0_16>) -> Self {
        Self {
            config: VibratorConfig {
                pin_enable: enable_pin,
            },
        }
    }

    /// Pulse the vibrator once for the specified pulse length.
    pub async fn pulse(&mut self, length: PulseLength) {
        self.config.pin_enable.set_low();
        Timer::after_millis(length as u64).await;
        self.config.pin_enable.set_high();
    }
}
