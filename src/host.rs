//! Services the watchface needs from the device

/// Vibration pattern requested by the watchface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VibePattern {
    /// Short confirmation pulse
    Short,
    /// Long alert pulse
    Long,
}

/// Device services queried or driven by the controller.
///
/// Implementations must not block: every method is called from within an
/// event handler.
pub trait Host {
    /// Whether the user prefers a 24-hour clock
    fn clock_is_24h(&self) -> bool;

    /// Current Bluetooth connection state
    fn bluetooth_connected(&self) -> bool;

    /// Request a vibration pulse
    fn vibrate(&mut self, pattern: VibePattern);
}
