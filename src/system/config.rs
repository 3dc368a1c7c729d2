//! General system configuration

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::{self, InterruptExt, Priority},
};

/// Priority for every interrupt the firmware uses. 0, 1 and 4 are reserved
/// for the SoftDevice.
const APP_PRIORITY: Priority = Priority::P2;
const PERIPHERAL_PRIORITY: Priority = Priority::P3;

/// Chip configuration for `embassy_nrf::init`
pub fn chip_config() -> Config {
    // `Config` is `non_exhaustive`, start from the defaults
    let mut config = Config::default();

    // External crystals for both clocks
    config.hfclk_source = HfclkSource::ExternalXtal;
    config.lfclk_source = LfclkSource::ExternalXtal;

    // DC/DC regulator massively reduces runtime current consumption
    config.dcdc.reg1 = true;

    config.gpiote_interrupt_priority = APP_PRIORITY;
    config.time_interrupt_priority = APP_PRIORITY;

    config.debug = Debug::Allowed;

    config
}

/// Move the interrupts of the SAADC, touch I2C and display SPI off the
/// priorities reserved for the SoftDevice. Must run before they are enabled.
pub fn configure_interrupts() {
    interrupt::SAADC.set_priority(PERIPHERAL_PRIORITY);
    interrupt::SPIM1_SPIS1_TWIM1_TWIS1_SPI1_TWI1.set_priority(PERIPHERAL_PRIORITY);
    interrupt::SPIM2_SPIS2_SPI2.set_priority(PERIPHERAL_PRIORITY);
}
