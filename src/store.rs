use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::util::StoreError;

/// Named slots of the persistent store
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum StoreKey {
    HomeSaved,
    HomePosAxis1,
    HomePosAxis2,
    ParkStatus,
}

/// Flat byte / 32-bit integer store. Slots never written read as zero.
pub trait PersistentStore: Send + Sync {
    fn read_byte(&self, key: StoreKey) -> Result<u8, StoreError>;
    fn write_byte(&self, key: StoreKey, value: u8) -> Result<(), StoreError>;
    fn read_long(&self, key: StoreKey) -> Result<i32, StoreError>;
    fn write_long(&self, key: StoreKey, value: i32) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    bytes: Mutex<HashMap<StoreKey, u8>>,
    longs: Mutex<HashMap<StoreKey, i32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentStore for MemoryStore {
    fn read_byte(&self, key: StoreKey) -> Result<u8, StoreError> {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(bytes.get(&key).copied().unwrap_or(0))
    }

    fn write_byte(&self, key: StoreKey, value: u8) -> Result<(), StoreError> {
        let mut bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        bytes.insert(key, value);
        Ok(())
    }

    fn read_long(&self, key: StoreKey) -> Result<i32, StoreError> {
        let longs = self.longs.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(longs.get(&key).copied().unwrap_or(0))
    }

    fn write_long(&self, key: StoreKey, value: i32) -> Result<(), StoreError> {
        let mut longs = self.longs.lock().unwrap_or_else(PoisonError::into_inner);
        longs.insert(key, value);
        Ok(())
    }
}

#[derive(Default, Debug, Copy, Clone, Serialize, Deserialize)]
struct StoredValues {
    home_saved: u8,
    home_pos_axis1: i32,
    home_pos_axis2: i32,
    park_status: u8,
}

impl StoredValues {
    fn byte_mut(&mut self, key: StoreKey) -> Result<&mut u8, StoreError> {
        match key {
            StoreKey::HomeSaved => Ok(&mut self.home_saved),
            StoreKey::ParkStatus => Ok(&mut self.park_status),
            _ => Err(StoreError::InvalidValue(format!("{:?} is not a byte slot", key))),
        }
    }

    fn long_mut(&mut self, key: StoreKey) -> Result<&mut i32, StoreError> {
        match key {
            StoreKey::HomePosAxis1 => Ok(&mut self.home_pos_axis1),
            StoreKey::HomePosAxis2 => Ok(&mut self.home_pos_axis2),
            _ => Err(StoreError::InvalidValue(format!("{:?} is not a long slot", key))),
        }
    }
}

/// Store kept in a TOML file, rewritten on every write
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<StoredValues>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values: StoredValues = confy::load_path(&path)?;
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn values(&self) -> MutexGuard<'_, StoredValues> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PersistentStore for FileStore {
    fn read_byte(&self, key: StoreKey) -> Result<u8, StoreError> {
        Ok(*self.values().byte_mut(key)?)
    }

    fn write_byte(&self, key: StoreKey, value: u8) -> Result<(), StoreError> {
        let mut values = self.values();
        *values.byte_mut(key)? = value;
        confy::store_path(&self.path, *values)?;
        Ok(())
    }

    fn read_long(&self, key: StoreKey) -> Result<i32, StoreError> {
        Ok(*self.values().long_mut(key)?)
    }

    fn write_long(&self, key: StoreKey, value: i32) -> Result<(), StoreError> {
        let mut values = self.values();
        *values.long_mut(key)? = value;
        confy::store_path(&self.path, *values)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_defaults_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.read_byte(StoreKey::HomeSaved).unwrap(), 0);
        assert_eq!(store.read_long(StoreKey::HomePosAxis1).unwrap(), 0);
        store.write_long(StoreKey::HomePosAxis1, -1234).unwrap();
        store.write_byte(StoreKey::HomeSaved, 1).unwrap();
        assert_eq!(store.read_long(StoreKey::HomePosAxis1).unwrap(), -1234);
        assert_eq!(store.read_byte(StoreKey::HomeSaved).unwrap(), 1);
    }

    #[test]
    fn test_file_store_persists() {
        let path = std::env::temp_dir().join(format!(
            "eq_mount_store_test_{}.toml",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let store = FileStore::open(&path).unwrap();
            store.write_byte(StoreKey::HomeSaved, 1).unwrap();
            store.write_long(StoreKey::HomePosAxis2, 4096).unwrap();
            assert!(store.write_long(StoreKey::ParkStatus, 1).is_err());
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.read_byte(StoreKey::HomeSaved).unwrap(), 1);
        assert_eq!(store.read_long(StoreKey::HomePosAxis2).unwrap(), 4096);
        assert_eq!(store.read_long(StoreKey::HomePosAxis1).unwrap(), 0);
        let _ = std::fs::remove_file(&path);
    }
}
