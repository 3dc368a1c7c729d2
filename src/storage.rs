//! Persistent boolean flags

use crate::error::Error;

/// Number of flags a [`MemoryStorage`] can hold
const SLOTS: usize = 4;

/// Key-value store for boolean flags.
///
/// Keys that were never written read as `false`.
pub trait Storage {
    /// Read the flag stored under `key`
    fn read_bool(&mut self, key: u32) -> Result<bool, Error>;

    /// Store `value` under `key`
    fn write_bool(&mut self, key: u32, value: bool) -> Result<(), Error>;
}

/// Storage kept in RAM
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: [Option<(u32, bool)>; SLOTS],
}

impl MemoryStorage {
    /// Create empty storage
    pub const fn new() -> Self {
        Self {
            slots: [None; SLOTS],
        }
    }

    /// Create storage holding a single flag, e.g. one loaded from flash.
    pub fn with_flag(key: u32, value: bool) -> Self {
        let mut storage = Self::new();
        storage.slots[0] = Some((key, value));
        storage
    }
}

impl Storage for MemoryStorage {
    fn read_bool(&mut self, key: u32) -> Result<bool, Error> {
        Ok(self
            .slots
            .iter()
            .flatten()
            .find(|(k, _)| *k == key)
            .map_or(false, |(_, v)| *v))
    }

    fn write_bool(&mut self, key: u32, value: bool) -> Result<(), Error> {
        let slot = match self
            .slots
            .iter()
            .position(|slot| matches!(slot, Some((k, _)) if *k == key))
        {
            Some(i) => i,
            None => self
                .slots
                .iter()
                .position(Option::is_none)
                .ok_or(Error::Storage)?,
        };
        self.slots[slot] = Some((key, value));
        Ok(())
    }
}
