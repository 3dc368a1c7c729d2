//! Watchface configuration

use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};

/// Persistent storage key of the style flag
pub const STYLE_KEY: u32 = 1;

/// Display width in pixels
pub const LCD_W: u32 = 240;
/// Display height in pixels
pub const LCD_H: u32 = 240;

/// Behaviour switches for the watchface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchfaceConfig {
    /// Show the time in 24-hour format
    pub clock_24h: bool,
    /// Vibrate when the Bluetooth connection is lost
    pub bluetooth_alert: bool,
    /// Let the tap gesture toggle the light/dark style
    pub tap_toggles_style: bool,
    /// Storage key the style flag is persisted under
    pub style_key: u32,
    /// Offset of local time from UTC in seconds
    pub utc_offset_secs: i32,
}

impl Default for WatchfaceConfig {
    fn default() -> Self {
        Self {
            clock_24h: true,
            bluetooth_alert: true,
            tap_toggles_style: false,
            style_key: STYLE_KEY,
            utc_offset_secs: 1 * 3_600,
        }
    }
}

/// Screen areas of the individual watchface elements.
///
/// Every element is cleared to the background colour over its whole area
/// before it is redrawn, so the areas must not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Large "17:35" time label
    pub time: Rectangle,
    /// "8 December" date label
    pub date: Rectangle,
    /// Two-letter day of week label
    pub day: Rectangle,
    /// Battery glyph, drawn in its own 40×15 coordinate space
    pub battery: Rectangle,
    /// Bluetooth glyph
    pub bluetooth: Rectangle,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            time: Rectangle::new(Point::new(12, 90), Size::new(216, 32)),
            date: Rectangle::new(Point::new(12, 200), Size::new(170, 20)),
            day: Rectangle::new(Point::new(196, 200), Size::new(30, 20)),
            battery: Rectangle::new(Point::new(194, 6), Size::new(40, 15)),
            bluetooth: Rectangle::new(Point::new(6, 4), Size::new(18, 18)),
        }
    }
}
