#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    peripherals::{SPI2, TWISPI1},
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
    twim::{self, Twim},
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel};
use embassy_time::{Duration, Timer};
use nrf_softdevice::{Flash, Softdevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM1_SPIS1_TWIM1_TWIS1_SPI1_TWI1 => twim::InterruptHandler<TWISPI1>;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    backlight::{Backlight, MAX_BRIGHTNESS},
    battery::Battery,
    button::Button,
    display::Display,
    touch::{TouchController, TouchGesture},
    vibrator::Vibrator,
};
use pinetime_watchface::{Event, Layout, WatchfaceConfig, WatchfaceController};
use system::{
    bluetooth::{self, Server},
    config::{chip_config, configure_interrupts},
    flash::{PersistentStorage, SettingsFlash},
    host::{DeviceHost, VIBRATE},
    time::{TimeManager, TimeReference},
};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

type Controller = WatchfaceController<DeviceHost, PersistentStorage>;

// Communication channels
static EVENTS: Channel<ThreadModeRawMutex, Event, 8> = Channel::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Keep advertising and report every connection change.
#[embassy_executor::task]
async fn bluetooth_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    loop {
        let conn = bluetooth::advertise(sd).await;
        EVENTS.send(Event::Bluetooth(true)).await;

        bluetooth::serve(&conn, server).await;
        EVENTS.send(Event::Bluetooth(false)).await;
    }
}

/// Pulse the motor on request.
#[embassy_executor::task(pool_size = 1)]
async fn notify(mut vibrator: Vibrator) {
    loop {
        let pattern = VIBRATE.wait().await;
        vibrator.pulse(pattern.into()).await;
    }
}

/// Write style changes to flash.
#[embassy_executor::task(pool_size = 1)]
async fn store_settings(mut settings: SettingsFlash) {
    settings.run().await
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery, server: &'static Server) {
    loop {
        match battery.update().await {
            Ok(true) => {
                let info = battery.info();
                defmt::info!("Battery status updated: {}", info);
                server.set_battery_level(info.percent);
                EVENTS
                    .send(Event::Battery {
                        percent: info.percent,
                        charging: info.charging,
                    })
                    .await;
            }
            Ok(false) => {}
            Err(e) => defmt::warn!("Battery measurement failed: {}", e),
        }

        // Re-schedule the timer interrupt in 10s
        Timer::after(Duration::from_secs(10)).await;
    }
}

/// Send the current time at the start of every minute.
#[embassy_executor::task(pool_size = 1)]
async fn minute_tick(time: TimeManager) {
    loop {
        Timer::after(time.until_next_minute()).await;
        EVENTS.send(Event::MinuteTick(time.get_time())).await;
    }
}

/// Step the backlight brightness on every button press.
///
/// Switching the backlight on or off shows or hides the watchface.
#[embassy_executor::task(pool_size = 1)]
async fn update_brightness(mut button: Button, mut backlight: Backlight<'static>) {
    loop {
        button.wait_for_press().await;

        let was_on = backlight.is_on();
        if backlight.get_brightness() < MAX_BRIGHTNESS {
            unwrap!(backlight.brighter());
        } else {
            backlight.off();
        }

        if backlight.is_on() != was_on {
            EVENTS.send(Event::AppFocus(backlight.is_on())).await;
        }
    }
}

/// Polls the touch controller every 2ms
#[embassy_executor::task(pool_size = 1)]
async fn poll_touch(mut touch: TouchController<TWISPI1>) {
    loop {
        if let Some(TouchGesture::DoubleClick) = touch.try_event_detected() {
            EVENTS.send(Event::Tap).await;
        }

        // Re-schedule the timer interrupt in 2ms
        Timer::after(Duration::from_millis(2)).await;
    }
}

/// Apply every event to the watchface and redraw what changed.
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(mut controller: Controller, mut display: Display<SPI2>) {
    loop {
        let event = EVENTS.receive().await;
        if let Err(e) = controller.dispatch(event) {
            defmt::warn!("Event handling failed: {}", e);
        }
        if let Err(e) = controller.render(display.lcd()) {
            defmt::warn!("Rendering failed: {}", e);
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(chip_config());
    defmt::info!("Initializing");
    configure_interrupts();

    let config = WatchfaceConfig::default();

    // Initialize Bluetooth
    static SERVER: StaticCell<Server> = StaticCell::new();
    let sd = Softdevice::enable(&bluetooth::generate_config());
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    let mut settings = SettingsFlash::init(Flash::take(sd));
    let sd: &'static Softdevice = sd;
    unwrap!(spawner.spawn(softdevice_task(sd)));

    // Load persisted style
    let inverted = match settings.load(config.style_key).await {
        Ok(inverted) => inverted,
        Err(e) => {
            defmt::warn!("Failed to load style, using default: {}", e);
            false
        }
    };

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Battery
    let battery = unwrap!(Battery::init(saadc, Input::new(p.P0_12, Pull::None)).await);

    // Initialize Backlight
    let backlight = unwrap!(Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        2,
    ));

    // Initialize Button
    let button = Button::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    // Initialize vibration motor
    let vibrator = Vibrator::init(Output::new(p.P0_16, Level::High, OutputDrive::Standard));

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let mut display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
    ));

    // Start the clock from the build time
    let time = TimeManager::init(TimeReference::from_timestamp(UTC_TIME, config.utc_offset_secs));

    // First full render
    let mut controller = WatchfaceController::new(
        config,
        Layout::default(),
        DeviceHost::new(config.clock_24h),
        PersistentStorage::new(config.style_key, inverted),
    );
    let info = battery.info();
    server.set_battery_level(info.percent);
    unwrap!(controller.start(&time.get_time(), info.percent, info.charging));
    unwrap!(controller.render(display.lcd()));

    // Touch is only needed for the style toggle gesture
    if config.tap_toggles_style {
        // Initialize I2C
        let mut i2c_config = twim::Config::default();
        // Use I2C at 400KHz (the fastest clock available on the nRF52832),
        i2c_config.frequency = twim::Frequency::K400;
        let i2c = Twim::new(p.TWISPI1, Irqs, p.P0_06, p.P0_07, i2c_config);

        // Touchpad external interrupt pin: P0.28/AIN4 (TP_INT)
        // Touchpad reset pin: P0.10/NFC2 (TP_RESET)
        let touch = unwrap!(TouchController::init(
            i2c,
            Input::new(p.P0_28, Pull::Up),
            Output::new(p.P0_10, Level::High, OutputDrive::Standard),
        ));
        unwrap!(spawner.spawn(poll_touch(touch)));
    }

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(bluetooth_task(sd, server)));
    unwrap!(spawner.spawn(notify(vibrator)));
    unwrap!(spawner.spawn(store_settings(settings)));
    unwrap!(spawner.spawn(update_battery_status(battery, server)));
    unwrap!(spawner.spawn(minute_tick(time)));
    unwrap!(spawner.spawn(update_brightness(button, backlight)));
    unwrap!(spawner.spawn(update_lcd(controller, display)));
}
