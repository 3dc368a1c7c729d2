//! Bluetooth glyph

use embedded_graphics::{
    geometry::{Point, Size},
    pixelcolor::Rgb565,
    prelude::*,
    Pixel,
};

use super::palette::CompositingMode;

/// Size of the Bluetooth icon
pub const GLYPH_SIZE: Size = Size::new(18, 18);

/// 1-bit Bluetooth rune, `#` is ink
const ICON: [&[u8; 18]; 18] = [
    b"..................",
    b"..................",
    b"........##........",
    b"........###.......",
    b"........#.##......",
    b"....#...#..##.....",
    b".....##.#.##......",
    b".......###........",
    b"........#.........",
    b".......###........",
    b".....##.#.##......",
    b"....#...#..##.....",
    b"........#.##......",
    b"........###.......",
    b"........##........",
    b"..................",
    b"..................",
    b"..................",
];

/// Draw the Bluetooth icon at the origin of `target`.
///
/// All 18×18 pixels are written, paper included, like an opaque bitmap.
pub fn draw_bluetooth_glyph<D>(target: &mut D, mode: CompositingMode) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let (ink, paper) = mode.colors();

    let pixels = ICON.iter().enumerate().flat_map(|(y, row)| {
        row.iter().enumerate().map(move |(x, bit)| {
            let color = if *bit == b'#' { ink } else { paper };
            Pixel(Point::new(x as i32, y as i32), color)
        })
    });

    target.draw_iter(pixels)
}
