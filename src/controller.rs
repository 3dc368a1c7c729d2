//! Display state controller
//!
//! Turns device events into the smallest set of watchface updates and keeps
//! [`DisplayState`] in step with what is on screen.

use chrono::{Datelike, NaiveDateTime, Timelike};
use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget};

use crate::{
    config::{Layout, WatchfaceConfig},
    error::Error,
    event::Event,
    host::{Host, VibePattern},
    state::{monday_origin, BatteryLevel, DisplayState},
    storage::Storage,
    ui::{
        format::{day_abbreviation, format_date, format_time},
        palette::Palette,
        DefaultWatchface,
    },
};

/// Owns the watchface and its state, one handler per event kind
pub struct WatchfaceController<H, S>
where
    H: Host,
    S: Storage,
{
    config: WatchfaceConfig,
    state: DisplayState,
    face: DefaultWatchface,
    host: H,
    storage: S,
    /// The tap toggles the style once, then is ignored
    tap_armed: bool,
}

impl<H, S> WatchfaceController<H, S>
where
    H: Host,
    S: Storage,
{
    /// Create new controller. Nothing is shown until [`start`](Self::start).
    pub fn new(config: WatchfaceConfig, layout: Layout, host: H, storage: S) -> Self {
        Self {
            config,
            state: DisplayState::default(),
            face: DefaultWatchface::new(layout),
            host,
            storage,
            tap_armed: config.tap_toggles_style,
        }
    }

    /// Fill every element from the current device state.
    ///
    /// Until this returns the controller is uninitialized and every element is
    /// drawn regardless of change detection.
    pub fn start(&mut self, now: &NaiveDateTime, percent: u8, charging: bool) -> Result<(), Error> {
        self.apply_style()?;
        let connected = self.host.bluetooth_connected();
        self.on_bluetooth_change(connected);
        self.on_battery_update(percent, charging);
        self.on_minute_tick(now);
        self.state.initialized = true;

        info!("Watchface started");
        Ok(())
    }

    /// Route an event to its handler
    pub fn dispatch(&mut self, event: Event) -> Result<(), Error> {
        match event {
            Event::MinuteTick(time) => self.on_minute_tick(&time),
            Event::Battery { percent, charging } => self.on_battery_update(percent, charging),
            Event::Bluetooth(connected) => self.on_bluetooth_change(connected),
            Event::AppFocus(in_focus) => self.on_app_focus(in_focus),
            Event::Tap => {
                if self.tap_armed {
                    self.tap_armed = false;
                    return self.toggle_style();
                }
                debug!("Tap ignored, style toggle not armed");
            }
        }
        Ok(())
    }

    /// Update the time, and the date and day of week when they changed.
    pub fn on_minute_tick(&mut self, time: &NaiveDateTime) {
        let weekday = monday_origin(time.weekday().num_days_from_sunday());
        let (month, day) = (time.month0(), time.day());

        if self.state.date_changed(month, day) {
            let mut buf = [0u8; 16];
            match format_date(&mut buf, month, day) {
                Ok(text) => self.face.set_date(text),
                Err(_) => warn!("Date does not fit its label"),
            }
            self.state.set_date(month, day);
        }

        if self.state.weekday_changed(weekday) {
            self.face.set_day(day_abbreviation(weekday));
            self.state.weekday = weekday;
        }

        let mut buf = [0u8; 8];
        match format_time(&mut buf, time.hour(), time.minute(), self.host.clock_is_24h()) {
            Ok(text) => self.face.set_time(text),
            Err(_) => warn!("Time does not fit its label"),
        }
    }

    /// Show a new battery reading
    pub fn on_battery_update(&mut self, percent: u8, charging: bool) {
        let level = BatteryLevel::from_charge(percent, charging);
        debug!("Battery level: {}", level);

        self.state.battery = level;
        self.face.set_battery(level);
    }

    /// Show the Bluetooth glyph while connected, and alert when the
    /// connection is lost.
    pub fn on_bluetooth_change(&mut self, connected: bool) {
        if connected != self.state.bluetooth_connected {
            info!("Bluetooth connected: {}", connected);
            if !connected && self.config.bluetooth_alert {
                self.host.vibrate(VibePattern::Long);
            }
        }

        self.state.bluetooth_connected = connected;
        self.face.set_bluetooth_visible(connected);
    }

    /// Refresh the Bluetooth state when the watchface comes back into view,
    /// changes may have been missed while it was hidden.
    pub fn on_app_focus(&mut self, in_focus: bool) {
        if in_focus {
            let connected = self.host.bluetooth_connected();
            self.on_bluetooth_change(connected);
        }
    }

    /// Apply the palette selected by the persisted style flag
    pub fn apply_style(&mut self) -> Result<(), Error> {
        let inverted = self.storage.read_bool(self.config.style_key)?;
        self.state.style_inverted = inverted;
        self.face.set_palette(Palette::for_style(inverted));
        Ok(())
    }

    /// Flip between the light and dark style and persist the choice
    pub fn toggle_style(&mut self) -> Result<(), Error> {
        let key = self.config.style_key;
        let inverted = !self.storage.read_bool(key)?;
        self.storage.write_bool(key, inverted)?;
        self.apply_style()?;
        self.host.vibrate(VibePattern::Long);

        info!("Style toggled, inverted: {}", inverted);
        Ok(())
    }

    /// Draw everything that changed since the last render
    pub fn render<D>(&mut self, target: &mut D) -> Result<(), Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.face.render(target).map_err(|_| Error::Draw)
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn palette(&self) -> Palette {
        self.face.palette()
    }

    pub fn watchface(&self) -> &DefaultWatchface {
        &self.face
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        storage::MemoryStorage,
        ui::{palette::CompositingMode, Element},
        STYLE_KEY,
    };
    use chrono::NaiveDate;
    use embedded_graphics::{geometry::Point, mock_display::MockDisplay};

    #[derive(Default)]
    struct TestHost {
        clock_24h: bool,
        connected: bool,
        pulses: Vec<VibePattern>,
    }

    impl Host for TestHost {
        fn clock_is_24h(&self) -> bool {
            self.clock_24h
        }

        fn bluetooth_connected(&self) -> bool {
            self.connected
        }

        fn vibrate(&mut self, pattern: VibePattern) {
            self.pulses.push(pattern);
        }
    }

    type Controller = WatchfaceController<TestHost, MemoryStorage>;

    fn controller() -> Controller {
        let host = TestHost {
            clock_24h: true,
            ..Default::default()
        };
        WatchfaceController::new(
            WatchfaceConfig::default(),
            Layout::default(),
            host,
            MemoryStorage::new(),
        )
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    /// Render to a throwaway target so the dirty set starts empty
    fn flush(controller: &mut Controller) {
        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        controller.render(&mut display).unwrap();
    }

    #[test]
    fn start_fills_every_element() {
        let mut c = controller();
        c.host_mut().connected = true;
        // Sunday 8 December 2024
        c.start(&at(2024, 12, 8, 17, 35), 64, false).unwrap();

        let face = c.watchface();
        assert_eq!(face.time(), "17:35");
        assert_eq!(face.date(), " 8 December");
        assert_eq!(face.day(), "SU");
        assert_eq!(face.battery(), BatteryLevel::Bars(3));
        assert!(face.bluetooth_visible());
        assert!(c.state().initialized);
        assert!(c.host().pulses.is_empty());
    }

    #[test]
    fn weekday_uses_monday_origin() {
        let mut c = controller();
        // 2 December 2024 was a Monday
        let expected = ["MO", "TU", "WE", "TH", "FR", "SA", "SU"];
        for (offset, day) in expected.iter().enumerate() {
            c.on_minute_tick(&at(2024, 12, 2 + offset as u32, 12, 0));
            assert_eq!(c.watchface().day(), *day);
            assert_eq!(c.state().weekday, offset as u8);
        }
    }

    #[test]
    fn repeated_tick_only_redraws_time() {
        let mut c = controller();
        let now = at(2024, 12, 8, 17, 35);
        c.start(&now, 50, false).unwrap();
        flush(&mut c);

        c.on_minute_tick(&now);
        let dirty = c.watchface().dirty();
        assert!(dirty.contains(Element::Time));
        assert!(!dirty.contains(Element::Date));
        assert!(!dirty.contains(Element::Day));
        assert_eq!(c.watchface().time(), "17:35");
    }

    #[test]
    fn date_rollover_updates_date_and_day() {
        let mut c = controller();
        c.start(&at(2024, 12, 31, 23, 59), 50, false).unwrap();
        flush(&mut c);

        c.on_minute_tick(&at(2025, 1, 1, 0, 0));
        let dirty = c.watchface().dirty();
        assert!(dirty.contains(Element::Date));
        assert!(dirty.contains(Element::Day));
        assert_eq!(c.watchface().date(), " 1 January");
        assert_eq!(c.watchface().day(), "WE");
        assert_eq!((c.state().month, c.state().day), (0, 1));
    }

    #[test]
    fn twelve_hour_clock() {
        let mut c = controller();
        c.host_mut().clock_24h = false;

        c.on_minute_tick(&at(2024, 12, 8, 14, 5));
        assert_eq!(c.watchface().time(), "2:05");

        c.on_minute_tick(&at(2024, 12, 8, 9, 30));
        assert_eq!(c.watchface().time(), "9:30");
    }

    #[test]
    fn battery_update_always_marks_glyph() {
        let mut c = controller();
        c.start(&at(2024, 12, 8, 17, 35), 50, false).unwrap();
        flush(&mut c);

        c.on_battery_update(50, false);
        assert!(c.watchface().dirty().contains(Element::Battery));
        assert_eq!(c.state().battery, BatteryLevel::Bars(3));

        c.on_battery_update(50, true);
        assert_eq!(c.state().battery, BatteryLevel::Charging);
    }

    #[test]
    fn bluetooth_alert_only_on_loss() {
        let mut c = controller();

        // Initial false observation is silent
        c.on_bluetooth_change(false);
        c.on_bluetooth_change(true);
        c.on_bluetooth_change(true);
        assert!(c.host().pulses.is_empty());

        c.on_bluetooth_change(false);
        assert_eq!(c.host().pulses, [VibePattern::Long]);

        c.on_bluetooth_change(false);
        assert_eq!(c.host().pulses.len(), 1);
        assert!(!c.watchface().bluetooth_visible());
    }

    #[test]
    fn every_queued_disconnect_alerts() {
        let mut c = controller();
        let backlog = [true, false, true, false, true, false];
        for connected in backlog {
            c.dispatch(Event::Bluetooth(connected)).unwrap();
        }

        assert_eq!(c.host().pulses, [VibePattern::Long; 3]);
        assert!(!c.state().bluetooth_connected);
        assert!(!c.watchface().bluetooth_visible());
    }

    #[test]
    fn bluetooth_alert_can_be_disabled() {
        let mut c = WatchfaceController::new(
            WatchfaceConfig {
                bluetooth_alert: false,
                ..Default::default()
            },
            Layout::default(),
            TestHost::default(),
            MemoryStorage::new(),
        );

        c.on_bluetooth_change(true);
        c.on_bluetooth_change(false);
        assert!(c.host().pulses.is_empty());
        assert!(!c.state().bluetooth_connected);
    }

    #[test]
    fn focus_gain_requeries_bluetooth() {
        let mut c = controller();
        c.on_bluetooth_change(true);

        // Connection dropped while hidden
        c.host_mut().connected = false;
        c.on_app_focus(false);
        assert!(c.state().bluetooth_connected);

        c.on_app_focus(true);
        assert!(!c.state().bluetooth_connected);
        assert_eq!(c.host().pulses, [VibePattern::Long]);
    }

    #[test]
    fn style_toggle_round_trips() {
        let mut c = controller();
        c.start(&at(2024, 12, 8, 17, 35), 50, false).unwrap();
        let original = c.palette();
        assert_eq!(original.compositing, CompositingMode::Inverted);

        c.toggle_style().unwrap();
        assert_ne!(c.palette(), original);
        assert!(c.state().style_inverted);
        assert_eq!(c.storage_mut().read_bool(STYLE_KEY), Ok(true));
        assert_eq!(c.watchface().dirty(), crate::ui::Dirty::ALL);

        c.toggle_style().unwrap();
        assert_eq!(c.palette(), original);
        assert_eq!(c.host().pulses, [VibePattern::Long, VibePattern::Long]);
    }

    #[test]
    fn persisted_style_is_applied_on_start() {
        let mut c = WatchfaceController::new(
            WatchfaceConfig::default(),
            Layout::default(),
            TestHost::default(),
            MemoryStorage::with_flag(STYLE_KEY, true),
        );
        c.start(&at(2024, 12, 8, 17, 35), 50, false).unwrap();

        assert_eq!(c.palette(), Palette::for_style(true));
    }

    #[test]
    fn tap_is_ignored_unless_enabled() {
        let mut c = controller();
        let original = c.palette();
        c.dispatch(Event::Tap).unwrap();
        assert_eq!(c.palette(), original);

        let mut c = WatchfaceController::new(
            WatchfaceConfig {
                tap_toggles_style: true,
                ..Default::default()
            },
            Layout::default(),
            TestHost::default(),
            MemoryStorage::new(),
        );
        c.dispatch(Event::Tap).unwrap();
        assert_eq!(c.palette(), Palette::for_style(true));
    }

    #[test]
    fn tap_toggles_style_only_once() {
        let mut c = WatchfaceController::new(
            WatchfaceConfig {
                tap_toggles_style: true,
                ..Default::default()
            },
            Layout::default(),
            TestHost::default(),
            MemoryStorage::new(),
        );
        c.dispatch(Event::Tap).unwrap();
        assert!(c.state().style_inverted);
        assert_eq!(c.host().pulses, [VibePattern::Long]);

        c.dispatch(Event::Tap).unwrap();
        assert!(c.state().style_inverted);
        assert_eq!(c.palette(), Palette::for_style(true));
        assert_eq!(c.host().pulses, [VibePattern::Long]);

        // Explicit toggles still work after the tap is spent
        c.toggle_style().unwrap();
        assert!(!c.state().style_inverted);
    }

    #[test]
    fn dispatch_routes_events() {
        let mut c = controller();
        c.dispatch(Event::MinuteTick(at(2024, 12, 8, 17, 35))).unwrap();
        c.dispatch(Event::Battery {
            percent: 100,
            charging: false,
        })
        .unwrap();
        c.dispatch(Event::Bluetooth(true)).unwrap();

        assert_eq!(c.watchface().time(), "17:35");
        assert_eq!(c.state().battery, BatteryLevel::Bars(5));
        assert!(c.state().bluetooth_connected);
    }

    #[test]
    fn render_reaches_the_display() {
        let mut c = controller();
        c.start(&at(2024, 12, 8, 17, 35), 50, false).unwrap();

        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        c.render(&mut display).unwrap();

        assert!(c.watchface().dirty().is_empty());
        assert_eq!(
            display.get_pixel(Point::new(0, 0)),
            Some(c.palette().background)
        );
    }
}
