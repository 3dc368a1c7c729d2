//! Snapshot of what is currently on screen

/// Number of bar segments in a full battery glyph
pub const BATTERY_BARS: u8 = 5;

/// Discretized battery level shown by the battery glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryLevel {
    /// Charger connected, drawn as a lightning bolt
    Charging,
    /// Number of filled bars, `0..=5`
    Bars(u8),
}

impl Default for BatteryLevel {
    fn default() -> Self {
        BatteryLevel::Bars(0)
    }
}

impl BatteryLevel {
    /// Map a charge reading to a battery level.
    ///
    /// The percentage is reduced to deciles which are then halved, rounding
    /// up: the first bar lights at 10 % and each further one 20 % later.
    pub fn from_charge(percent: u8, charging: bool) -> Self {
        if charging {
            return BatteryLevel::Charging;
        }
        let percent = percent.min(100);
        BatteryLevel::Bars((percent / 10 + 1) / 2)
    }

    /// Number of bars to draw, `None` while charging.
    pub fn bars(&self) -> Option<u8> {
        match self {
            BatteryLevel::Charging => None,
            BatteryLevel::Bars(n) => Some((*n).min(BATTERY_BARS)),
        }
    }
}

/// Convert a Sunday-origin weekday (0 = Sunday) into a Monday-origin one
/// (0 = Monday, 6 = Sunday).
pub fn monday_origin(sunday_origin: u32) -> u8 {
    match sunday_origin % 7 {
        0 => 6,
        d => d as u8 - 1,
    }
}

/// State of the watchface between two events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    /// Battery glyph content
    pub battery: BatteryLevel,
    /// Monday-origin day of week, `0..=6`
    pub weekday: u8,
    /// Zero-based month of the rendered date
    pub month: u32,
    /// Day of month of the rendered date
    pub day: u32,
    /// Set after the first full render. Until then every element is drawn
    /// regardless of whether its value changed.
    pub initialized: bool,
    /// Light (inverted) or dark style
    pub style_inverted: bool,
    /// Last known Bluetooth connection state
    pub bluetooth_connected: bool,
}

impl DisplayState {
    /// Whether the date label shows a different date than `month`/`day`.
    pub fn date_changed(&self, month: u32, day: u32) -> bool {
        !self.initialized || self.month != month || self.day != day
    }

    /// Whether the day label shows a different day than `weekday`.
    pub fn weekday_changed(&self, weekday: u8) -> bool {
        !self.initialized || self.weekday != weekday
    }

    /// Update the rendered date. Month and day always move together.
    pub fn set_date(&mut self, month: u32, day: u32) {
        self.month = month;
        self.day = day;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunday_origin_weekdays_map_to_monday_origin() {
        let mapped: Vec<u8> = (0..7).map(monday_origin).collect();
        assert_eq!(mapped, [6, 0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn charge_percent_maps_to_bars() {
        let percents = [0, 5, 10, 15, 20, 50, 99, 100];
        let bars: Vec<BatteryLevel> = percents
            .iter()
            .map(|p| BatteryLevel::from_charge(*p, false))
            .collect();

        assert_eq!(
            bars,
            [0, 0, 1, 1, 1, 3, 5, 5].map(BatteryLevel::Bars).to_vec()
        );
    }

    #[test]
    fn charging_overrides_percent() {
        for percent in [0, 42, 100] {
            assert_eq!(
                BatteryLevel::from_charge(percent, true),
                BatteryLevel::Charging
            );
        }
    }

    #[test]
    fn out_of_range_percent_is_clamped() {
        assert_eq!(
            BatteryLevel::from_charge(u8::MAX, false),
            BatteryLevel::Bars(BATTERY_BARS)
        );
    }

    #[test]
    fn date_and_weekday_always_change_before_initialization() {
        let state = DisplayState::default();
        assert!(state.date_changed(0, 0));
        assert!(state.weekday_changed(0));
    }

    #[test]
    fn date_change_detection_after_initialization() {
        let mut state = DisplayState {
            initialized: true,
            ..Default::default()
        };
        state.set_date(11, 8);

        assert!(!state.date_changed(11, 8));
        assert!(state.date_changed(11, 9));
        assert!(state.date_changed(0, 8));
    }
}
