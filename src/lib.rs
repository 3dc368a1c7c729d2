//! PineTime watchface
//!
//! Renders the time, date, day of week, a battery glyph and a Bluetooth glyph
//! on the PineTime's 240×240 panel, with a light/dark style that can be
//! toggled and persists across restarts.
//!
//! The crate is split in two:
//!
//! - this library, which holds the display state controller and all drawing
//!   and formatting logic. It is `no_std` and only talks to the outside world
//!   through [`Host`], [`Storage`] and `embedded-graphics` draw targets, so it
//!   builds and tests on any machine.
//! - the firmware binary (`firmware` feature), which owns the nRF52832
//!   peripherals and turns them into [`Event`]s for the controller.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to the other modules.
#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod host;
pub mod state;
pub mod storage;
pub mod ui;

pub use config::{Layout, WatchfaceConfig, STYLE_KEY};
pub use controller::WatchfaceController;
pub use error::Error;
pub use event::Event;
pub use host::{Host, VibePattern};
pub use state::{BatteryLevel, DisplayState};
pub use storage::{MemoryStorage, Storage};
pub use ui::palette::{CompositingMode, Palette};
