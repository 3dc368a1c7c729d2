//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};

/// Snapshot of the battery state
#[derive(Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct BatteryInfo {
    /// Charging state
    pub charging: bool,
    /// Battery percentage
    pub percent: u8,
}

/// Battery configuration
struct BatteryConfig<'a> {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'a, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'a, P0_12>,
}

/// Battery API
pub struct Battery {
    /// Battery configuration
    config: BatteryConfig<'static>,
    /// Last reading
    info: BatteryInfo,
}

impl Battery {
    /// Configure battery settings on boot and take a first reading
    pub async fn init(adc: Saadc<'static, 1>, charge_pin: Input<'static, P0_12>) -> Result<Self, Error> {
        let mut battery = Self {
            config: BatteryConfig {
                adc,
                pin_charge_indication: charge_pin,
            },
            info: BatteryInfo {
                charging: false,
                percent: 0,
            },
        };
        battery.update().await?;
        Ok(battery)
    }

    /// Last battery reading.
    ///
    /// This returns the stored value. To fetch current data, call `update()` first.
    pub fn info(&self) -> BatteryInfo {
        self.info
    }

    /// Update the battery status by reading information from the
    /// hardware. Return whether or not the values changed.
    pub async fn update(&mut self) -> Result<bool, Error> {
        let charging = self.config.pin_charge_indication.is_low();
        let percent = percent_from_millivolts(self.get_voltage().await?);

        let info = BatteryInfo { charging, percent };
        let changed = info != self.info;
        self.info = info;

        Ok(changed)
    }

    /// Battery voltage in millivolts
    async fn get_voltage(&mut self) -> Result<u16, Error> {
        let mut buf = [0; 1];
        self.config.adc.sample(&mut buf).await;
        match buf[0] {
            // For detailed explanation of formula check https://wiki.pine64.org/wiki/PineTime
            // Use u32 during calculation to prevent overflow
            raw @ 0..=4095 => Ok((raw as u32 * 2000 / 1241) as u16),
            _ => Err(Error::InvalidMeasurement),
        }
    }
}

/// Estimate the battery capacity from its voltage.
///
/// Uses fixed data points and linear interpolation in between.
fn percent_from_millivolts(voltage: u16) -> u8 {
    (match voltage {
        0..=3449 => 0,
        3450..=3699 => (voltage - 3450) / 5,
        3700..=4199 => 50 + (voltage - 3700) / 10,
        _ => 100,
    }) as u8
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    InvalidMeasurement,
}
