//! Battery glyph
//!
//! The glyph is drawn in its own 40×15 coordinate space. Callers translate
//! the draw target to place it on screen.

use embedded_graphics::{
    geometry::{Point, Size},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
};

use crate::state::BatteryLevel;

/// Size of the area touched by [`draw_battery_glyph`]
pub const GLYPH_SIZE: Size = Size::new(40, 15);

/// Draw the battery frame and its content.
///
/// The frame is a double outline with a terminal nub on the right. Inside it
/// go either up to five bars or, while charging, a lightning bolt.
pub fn draw_battery_glyph<D>(target: &mut D, level: BatteryLevel, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let stroke = PrimitiveStyle::with_stroke(color, 1);
    let fill = PrimitiveStyle::with_fill(color);

    // Frame
    Rectangle::new(Point::new(8, 1), Size::new(28, 13))
        .into_styled(stroke)
        .draw(target)?;
    Rectangle::new(Point::new(7, 0), Size::new(30, 15))
        .into_styled(stroke)
        .draw(target)?;
    Rectangle::new(Point::new(37, 3), Size::new(3, 9))
        .into_styled(fill)
        .draw(target)?;

    let bars = match level.bars() {
        Some(bars) => bars,
        None => {
            for (start, end) in [((15, 8), (22, 6)), ((22, 6), (22, 8)), ((22, 8), (29, 6))] {
                Line::new(Point::new(start.0, start.1), Point::new(end.0, end.1))
                    .into_styled(stroke)
                    .draw(target)?;
            }
            return Ok(());
        }
    };

    for i in 0..bars as i32 {
        Rectangle::new(Point::new(10 + 5 * i, 3), Size::new(4, 9))
            .into_styled(fill)
            .draw(target)?;
    }

    Ok(())
}
