//! Touch controller module for PineTime

pub use cst816s::TouchGesture;

use cst816s::CST816S;
use embassy_nrf::{
    gpio::{Input, Output},
    peripherals::{P0_10, P0_28},
    twim::{self, Twim},
};
use embassy_time::Delay;

struct TouchControllerConfig<'a, TWI>
where
    TWI: twim::Instance,
{
    /// Touchpad instance
    touchpad: CST816S<Twim<'a, TWI>, Input<'a, P0_28>, Output<'a, P0_10>>,
}

pub struct TouchController<TWI>
where
    TWI: twim::Instance,
{
    /// Touch controller configuration
    config: TouchControllerConfig<'static, TWI>,
}

impl<TWI> TouchController<TWI>
where
    TWI: twim::Instance,
{
    /// Configure touch controller on boot
    pub fn init(
        twi: Twim<'static, TWI>,
        interrupt_pin: Input<'static, P0_28>,
        reset_pin: Output<'static, P0_10>,
    ) -> Result<Self, Error> {
        let mut touchpad = CST816S::new(twi, interrupt_pin, reset_pin);
        touchpad.setup(&mut Delay).map_err(|_| Error::Setup)?;

        Ok(Self {
            config: TouchControllerConfig { touchpad },
        })
    }

    /// Check for new touch event
    pub fn try_event_detected(&mut self) -> Option<TouchGesture> {
        self.config
            .touchpad
            .read_one_touch_event(true)
            .map(|event| event.gesture)
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    Setup,
}
