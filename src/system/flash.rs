//! Settings flash module
//!
//! The style flag is kept in RAM for the watchface and written through to the
//! last flash page by a background task, so event handlers never wait for
//! the SoftDevice flash API.

use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embedded_storage_async::nor_flash::{NorFlash, ReadNorFlash};
use nrf_softdevice::Flash;
use pinetime_watchface::{Error as StorageError, MemoryStorage, Storage};

/// Start of the settings page, the last 4 KiB page of the nRF52832 flash
const SETTINGS_OFFSET: u32 = 0x7_F000;
const PAGE_SIZE: u32 = 4096;

/// Marks a valid settings record
const MAGIC: u32 = 0x5754_4631;

/// Settings record, word aligned as the SoftDevice requires for writes
#[repr(align(4))]
struct Record([u8; 12]);

/// Pending write to flash
static PENDING: Signal<ThreadModeRawMutex, (u32, bool)> = Signal::new();

/// Single flag stored in the settings page
pub struct SettingsFlash {
    flash: Flash,
}

impl SettingsFlash {
    /// Configure settings flash on boot
    pub fn init(flash: Flash) -> Self {
        Self { flash }
    }

    /// Read the flag stored under `key`, `false` if there is none
    pub async fn load(&mut self, key: u32) -> Result<bool, Error> {
        let mut record = Record([0; 12]);
        self.flash
            .read(SETTINGS_OFFSET, &mut record.0)
            .await
            .map_err(|_| Error::Read)?;
        let record = record.0;

        let word =
            |i: usize| u32::from_le_bytes([record[i], record[i + 1], record[i + 2], record[i + 3]]);
        if word(0) != MAGIC || word(4) != key {
            return Ok(false);
        }
        Ok(word(8) != 0)
    }

    /// Replace the stored flag
    pub async fn store(&mut self, key: u32, value: bool) -> Result<(), Error> {
        let mut record = Record([0; 12]);
        record.0[..4].copy_from_slice(&MAGIC.to_le_bytes());
        record.0[4..8].copy_from_slice(&key.to_le_bytes());
        record.0[8..].copy_from_slice(&(value as u32).to_le_bytes());

        self.flash
            .erase(SETTINGS_OFFSET, SETTINGS_OFFSET + PAGE_SIZE)
            .await
            .map_err(|_| Error::Erase)?;
        self.flash
            .write(SETTINGS_OFFSET, &record.0)
            .await
            .map_err(|_| Error::Write)
    }

    /// Write every flag change to flash, forever
    pub async fn run(&mut self) -> ! {
        loop {
            let (key, value) = PENDING.wait().await;
            match self.store(key, value).await {
                Ok(()) => defmt::debug!("Stored flag {} = {}", key, value),
                Err(e) => defmt::warn!("Failed to store flag {}: {:?}", key, e),
            }
        }
    }
}

/// RAM copy of the settings that queues every change for [`SettingsFlash`]
pub struct PersistentStorage {
    cache: MemoryStorage,
}

impl PersistentStorage {
    /// Start from the flag loaded from flash
    pub fn new(key: u32, value: bool) -> Self {
        Self {
            cache: MemoryStorage::with_flag(key, value),
        }
    }
}

impl Storage for PersistentStorage {
    fn read_bool(&mut self, key: u32) -> Result<bool, StorageError> {
        self.cache.read_bool(key)
    }

    fn write_bool(&mut self, key: u32, value: bool) -> Result<(), StorageError> {
        self.cache.write_bool(key, value)?;
        PENDING.signal((key, value));
        Ok(())
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    Read,
    Erase,
    Write,
}
