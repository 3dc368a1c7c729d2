//! Side button

use debouncr::{debounce_2, Debouncer, Edge, Repeat2};
use embassy_nrf::{
    gpio::{Input, Output},
    peripherals::{P0_13, P0_15},
};
use embassy_time::{Duration, Timer};

/// Time between two button samples
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Debounced side button.
///
/// The button needs its enable pin driven high to be read. It draws around
/// 34µA while enabled, so the pin is only raised for each sample.
pub struct Button {
    /// Button detection pin (high/low)
    pin_button: Input<'static, P0_13>,
    /// Button enable pin
    pin_enable: Output<'static, P0_15>,
    /// Two stable samples are needed to register an edge
    debouncer: Debouncer<u8, Repeat2>,
}

impl Button {
    /// Configure button on boot
    pub fn init(button_pin: Input<'static, P0_13>, enable_pin: Output<'static, P0_15>) -> Self {
        Self {
            pin_button: button_pin,
            pin_enable: enable_pin,
            debouncer: debounce_2(false),
        }
    }

    /// Wait until the button is pressed down
    pub async fn wait_for_press(&mut self) {
        while !self.sample().await {
            Timer::after(POLL_INTERVAL).await;
        }
    }

    /// Sample the button once, `true` on a press edge
    async fn sample(&mut self) -> bool {
        self.pin_enable.set_high();
        // Output needs a moment to settle
        Timer::after(Duration::from_nanos(1)).await;
        let level = self.pin_button.is_high();
        self.pin_enable.set_low();

        self.debouncer.update(level) == Some(Edge::Rising)
    }
}
