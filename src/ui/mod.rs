//! UI definitions module

pub mod battery;
pub mod bluetooth;
mod default_watchface;
pub mod format;
pub mod palette;

pub use default_watchface::{DefaultWatchface, Label};

/// Individually redrawn part of the watchface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    Time,
    Date,
    Day,
    Battery,
    Bluetooth,
}

impl Element {
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of elements waiting to be redrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dirty(u8);

impl Dirty {
    /// Every element
    pub const ALL: Dirty = Dirty(
        Element::Time.bit()
            | Element::Date.bit()
            | Element::Day.bit()
            | Element::Battery.bit()
            | Element::Bluetooth.bit(),
    );

    /// No element
    pub const fn empty() -> Self {
        Dirty(0)
    }

    pub fn insert(&mut self, element: Element) {
        self.0 |= element.bit();
    }

    pub fn contains(&self, element: Element) -> bool {
        self.0 & element.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}
