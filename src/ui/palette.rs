//! Light and dark colour schemes

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// How the 1-bit glyph bitmaps are combined with the background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompositingMode {
    /// Ink black on white paper, as stored
    Normal,
    /// Ink white on black paper
    Inverted,
}

impl CompositingMode {
    /// Colours of (ink, paper) pixels in this mode
    pub fn colors(&self) -> (Rgb565, Rgb565) {
        match self {
            CompositingMode::Normal => (Rgb565::BLACK, Rgb565::WHITE),
            CompositingMode::Inverted => (Rgb565::WHITE, Rgb565::BLACK),
        }
    }
}

/// Colours applied to every watchface element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb565,
    pub foreground: Rgb565,
    pub compositing: CompositingMode,
}

impl Palette {
    /// Palette for the light (`inverted`) or dark style.
    pub fn for_style(inverted: bool) -> Self {
        if inverted {
            Self {
                background: Rgb565::WHITE,
                foreground: Rgb565::BLACK,
                compositing: CompositingMode::Normal,
            }
        } else {
            Self {
                background: Rgb565::BLACK,
                foreground: Rgb565::WHITE,
                compositing: CompositingMode::Inverted,
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_style(false)
    }
}
