//! Default watchface
//!
//! Keeps what each element currently shows and which elements need to be
//! redrawn. Only dirty elements are touched by [`DefaultWatchface::render`],
//! each one cleared to the background over its layout area first.

use embedded_graphics::{
    mono_font::{iso_8859_1::FONT_10X20, MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use profont::PROFONT_24_POINT;

use super::{
    battery::draw_battery_glyph, bluetooth::draw_bluetooth_glyph, palette::Palette, Dirty,
    Element,
};
use crate::{config::Layout, state::BatteryLevel};

const BUF_LEN: usize = 16;

/// Fixed-capacity text label
#[derive(Debug, Clone)]
pub struct Label {
    str_buf: [u8; BUF_LEN],
    len: usize,
}

impl Label {
    /// Create new empty label
    pub const fn new() -> Self {
        Self {
            str_buf: [0; BUF_LEN],
            len: 0,
        }
    }

    /// Replace the label text. Text longer than the label holds is cut off.
    pub fn set(&mut self, text: &str) {
        let mut len = text.len().min(BUF_LEN);
        while !text.is_char_boundary(len) {
            len -= 1;
        }
        self.str_buf[..len].copy_from_slice(&text.as_bytes()[..len]);
        self.len = len;
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.str_buf[..self.len]).unwrap_or("")
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new()
    }
}

/// Basic default watchface
pub struct DefaultWatchface {
    layout: Layout,
    palette: Palette,
    /// Time label
    time_label: Label,
    /// Date label
    date_label: Label,
    /// Day of week label
    day_label: Label,
    battery: BatteryLevel,
    bluetooth_visible: bool,
    dirty: Dirty,
    /// Whole screen must be repainted with the background colour
    clear_screen: bool,
}

impl DefaultWatchface {
    /// Create new watchface, everything pending a first draw
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            palette: Palette::default(),
            time_label: Label::new(),
            date_label: Label::new(),
            day_label: Label::new(),
            battery: BatteryLevel::default(),
            bluetooth_visible: false,
            dirty: Dirty::ALL,
            clear_screen: true,
        }
    }

    pub fn set_time(&mut self, text: &str) {
        self.time_label.set(text);
        self.dirty.insert(Element::Time);
    }

    pub fn set_date(&mut self, text: &str) {
        self.date_label.set(text);
        self.dirty.insert(Element::Date);
    }

    pub fn set_day(&mut self, text: &str) {
        self.day_label.set(text);
        self.dirty.insert(Element::Day);
    }

    pub fn set_battery(&mut self, level: BatteryLevel) {
        self.battery = level;
        self.dirty.insert(Element::Battery);
    }

    pub fn set_bluetooth_visible(&mut self, visible: bool) {
        self.bluetooth_visible = visible;
        self.dirty.insert(Element::Bluetooth);
    }

    /// Apply a palette to every element
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
        self.clear_screen = true;
        self.dirty = Dirty::ALL;
    }

    pub fn time(&self) -> &str {
        self.time_label.as_str()
    }

    pub fn date(&self) -> &str {
        self.date_label.as_str()
    }

    pub fn day(&self) -> &str {
        self.day_label.as_str()
    }

    pub fn battery(&self) -> BatteryLevel {
        self.battery
    }

    pub fn bluetooth_visible(&self) -> bool {
        self.bluetooth_visible
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Elements changed since the last render
    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    /// Draw all dirty elements to `target`
    pub fn render<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.clear_screen {
            target.clear(self.palette.background)?;
            self.clear_screen = false;
        }

        let layout = self.layout;
        let palette = self.palette;

        if self.dirty.contains(Element::Time) {
            draw_label(target, layout.time, &self.time_label, &PROFONT_24_POINT, palette)?;
        }
        if self.dirty.contains(Element::Date) {
            draw_label(target, layout.date, &self.date_label, &FONT_10X20, palette)?;
        }
        if self.dirty.contains(Element::Day) {
            draw_label(target, layout.day, &self.day_label, &FONT_10X20, palette)?;
        }
        if self.dirty.contains(Element::Battery) {
            clear_area(target, layout.battery, palette)?;
            draw_battery_glyph(
                &mut target.translated(layout.battery.top_left),
                self.battery,
                palette.foreground,
            )?;
        }
        if self.dirty.contains(Element::Bluetooth) {
            clear_area(target, layout.bluetooth, palette)?;
            if self.bluetooth_visible {
                draw_bluetooth_glyph(
                    &mut target.translated(layout.bluetooth.top_left),
                    palette.compositing,
                )?;
            }
        }

        self.dirty = Dirty::empty();
        Ok(())
    }
}

fn clear_area<D>(target: &mut D, area: Rectangle, palette: Palette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    area.into_styled(PrimitiveStyle::with_fill(palette.background))
        .draw(target)
}

fn draw_label<D>(
    target: &mut D,
    area: Rectangle,
    label: &Label,
    font: &MonoFont<'_>,
    palette: Palette,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    clear_area(target, area, palette)?;

    let style = MonoTextStyle::new(font, palette.foreground);
    Text::with_baseline(label.as_str(), area.top_left, style, Baseline::Top)
        .draw(&mut target.clipped(&area))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::palette::CompositingMode;
    use embedded_graphics::{geometry::Size, mock_display::MockDisplay};

    /// Layout that fits on a 64×64 mock display
    fn small_layout() -> Layout {
        Layout {
            bluetooth: Rectangle::new(Point::new(0, 0), Size::new(18, 18)),
            battery: Rectangle::new(Point::new(20, 0), Size::new(40, 15)),
            time: Rectangle::new(Point::new(0, 20), Size::new(64, 20)),
            date: Rectangle::new(Point::new(0, 44), Size::new(40, 20)),
            day: Rectangle::new(Point::new(44, 44), Size::new(20, 20)),
        }
    }

    fn display() -> MockDisplay<Rgb565> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display
    }

    #[test]
    fn label_truncates_long_text() {
        let mut label = Label::new();
        label.set("a very long label text");
        assert_eq!(label.as_str(), "a very long labe");

        label.set("12:34");
        assert_eq!(label.as_str(), "12:34");
    }

    #[test]
    fn new_watchface_is_fully_dirty() {
        let face = DefaultWatchface::new(small_layout());
        assert_eq!(face.dirty(), Dirty::ALL);
    }

    #[test]
    fn render_clears_dirty_elements() {
        let mut face = DefaultWatchface::new(small_layout());
        face.set_time("12:34");

        face.render(&mut display()).unwrap();
        assert!(face.dirty().is_empty());

        face.set_day("MO");
        assert!(face.dirty().contains(Element::Day));
        assert!(!face.dirty().contains(Element::Time));
    }

    #[test]
    fn first_render_paints_background() {
        let mut face = DefaultWatchface::new(small_layout());
        let mut display = display();
        face.render(&mut display).unwrap();

        let background = Palette::default().background;
        assert_eq!(display.get_pixel(Point::new(63, 63)), Some(background));
    }

    #[test]
    fn hidden_bluetooth_glyph_leaves_background() {
        let mut face = DefaultWatchface::new(small_layout());
        let mut display = display();

        face.set_bluetooth_visible(true);
        face.render(&mut display).unwrap();
        let (ink, _) = CompositingMode::Inverted.colors();
        assert_eq!(display.get_pixel(Point::new(8, 8)), Some(ink));

        face.set_bluetooth_visible(false);
        face.render(&mut display).unwrap();
        assert_eq!(
            display.get_pixel(Point::new(8, 8)),
            Some(Palette::default().background)
        );
    }

    #[test]
    fn battery_glyph_is_placed_at_layout_origin() {
        let mut face = DefaultWatchface::new(small_layout());
        let mut display = display();
        face.set_battery(BatteryLevel::Bars(1));
        face.render(&mut display).unwrap();

        let foreground = Palette::default().foreground;
        // Outer frame corner and first bar, offset by the battery origin
        assert_eq!(display.get_pixel(Point::new(27, 0)), Some(foreground));
        assert_eq!(display.get_pixel(Point::new(30, 3)), Some(foreground));
        // Second bar stays empty
        assert_eq!(
            display.get_pixel(Point::new(35, 3)),
            Some(Palette::default().background)
        );
    }

    #[test]
    fn palette_change_repaints_everything() {
        let mut face = DefaultWatchface::new(small_layout());
        let mut display = display();
        face.render(&mut display).unwrap();

        let light = Palette::for_style(true);
        face.set_palette(light);
        assert_eq!(face.dirty(), Dirty::ALL);

        face.render(&mut display).unwrap();
        assert_eq!(display.get_pixel(Point::new(63, 63)), Some(light.background));
        assert_eq!(display.get_pixel(Point::new(27, 0)), Some(light.foreground));
    }

    #[test]
    fn labels_stay_inside_their_area() {
        let mut face = DefaultWatchface::new(small_layout());
        let mut display = display();
        face.render(&mut display).unwrap();

        face.set_time("23:59");
        face.render(&mut display).unwrap();

        // Row just below the time area is untouched background
        let background = Palette::default().background;
        for x in 0..64 {
            assert_eq!(display.get_pixel(Point::new(x, 40)), Some(background));
        }
    }
}
