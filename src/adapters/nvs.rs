//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements both [`StoragePort`] (raw namespaced blobs) and
//! [`LevelPort`] (the 3-byte channel-level record) for the TriLight
//! board.
//!
//! - On ESP32, blobs live in the NVS flash partition; `nvs_commit()`
//!   makes each write atomic, so a power cut mid-save leaves the
//!   previous record intact.
//! - The simulation backend is an in-memory map (dev/test only).
//!
//! The level record is `postcard`-encoded: a `[u8; 3]` serializes to
//! exactly three bytes, one per channel, at a fixed key.

use crate::app::ports::{LevelError, LevelPort, StorageError, StoragePort};
use crate::control::channel::Levels;
use log::{info, warn};

#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

const LEVELS_NAMESPACE: &str = "trilight";
const LEVELS_KEY: &str = "levels";

/// Exact encoded size of the level record.
const LEVELS_BLOB_LEN: usize = 3;

pub struct NvsAdapter {
    #[cfg(not(target_os = "espidf"))]
    store: std::cell::RefCell<HashMap<String, Vec<u8>>>,
}

impl NvsAdapter {
    /// Create the adapter and bring up the NVS flash partition.
    ///
    /// A partition with no free pages or written by an older IDF version
    /// is erased and re-initialised; any other init failure surfaces as
    /// [`StorageError::IoError`].
    pub fn new() -> Result<Self, StorageError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: runs once on the main task, before anything else
            // touches NVS.
            let mut ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: partition unusable (rc={}), erasing", ret);
                if unsafe { nvs_flash_erase() } != ESP_OK {
                    return Err(StorageError::IoError);
                }
                ret = unsafe { nvs_flash_init() };
            }
            if ret != ESP_OK {
                return Err(StorageError::IoError);
            }
            info!("NvsAdapter: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsAdapter: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            store: std::cell::RefCell::new(HashMap::new()),
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }

    /// NVS names are NUL-terminated and at most 15 characters.
    #[cfg(target_os = "espidf")]
    fn cstr15(s: &str) -> [u8; 16] {
        let mut buf = [0u8; 16];
        let bytes = s.as_bytes();
        let len = bytes.len().min(15);
        buf[..len].copy_from_slice(&bytes[..len]);
        buf
    }

    /// Open `namespace`, hand the handle and the NUL-terminated key to
    /// the closure, close the handle, and translate the IDF error code.
    #[cfg(target_os = "espidf")]
    fn with_nvs<T>(
        namespace: &str,
        key: &str,
        write: bool,
        f: impl FnOnce(nvs_handle_t, *const u8) -> Result<T, i32>,
    ) -> Result<T, StorageError> {
        let ns = Self::cstr15(namespace);
        let key = Self::cstr15(key);
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let mut handle: nvs_handle_t = 0;
        // Opening a namespace read-only before its first write fails
        // with NOT_FOUND, which callers treat as virgin storage.
        let ret = unsafe { nvs_open(ns.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK {
            return Err(Self::map_err(ret));
        }
        let result = f(handle, key.as_ptr());
        unsafe {
            nvs_close(handle);
        }
        result.map_err(Self::map_err)
    }

    #[cfg(target_os = "espidf")]
    fn map_err(ret: i32) -> StorageError {
        if ret == ESP_ERR_NVS_NOT_FOUND {
            StorageError::NotFound
        } else if ret == ESP_ERR_NVS_NOT_ENOUGH_SPACE {
            StorageError::Full
        } else {
            StorageError::IoError
        }
    }
}

// ── Typed level record on top of the raw blob store ───────────

impl LevelPort for NvsAdapter {
    fn load(&self) -> Result<Levels, LevelError> {
        let mut buf = [0u8; 8];
        match StoragePort::read(self, LEVELS_NAMESPACE, LEVELS_KEY, &mut buf) {
            Ok(n) if n == LEVELS_BLOB_LEN => {
                let levels: Levels =
                    postcard::from_bytes(&buf[..n]).map_err(|_| LevelError::Corrupted)?;
                info!("NvsAdapter: loaded levels {:?}", levels);
                Ok(levels)
            }
            Ok(n) => {
                warn!("NvsAdapter: level record has {} bytes, expected 3", n);
                Err(LevelError::Corrupted)
            }
            Err(StorageError::NotFound) => {
                info!("NvsAdapter: no stored levels, using defaults");
                Ok([0; LEVELS_BLOB_LEN])
            }
            Err(e) => {
                warn!("NvsAdapter: NVS read error ({}), using defaults", e);
                Ok([0; LEVELS_BLOB_LEN])
            }
        }
    }

    fn save(&mut self, levels: &Levels) -> Result<(), LevelError> {
        let bytes = postcard::to_allocvec(levels).map_err(|_| LevelError::IoError)?;
        match StoragePort::write(self, LEVELS_NAMESPACE, LEVELS_KEY, &bytes) {
            Ok(()) => {
                info!("NvsAdapter: levels saved ({} bytes)", bytes.len());
                Ok(())
            }
            Err(e) => {
                warn!("NvsAdapter: NVS write error ({})", e);
                Err(LevelError::IoError)
            }
        }
    }
}

// ── Raw blob storage ──────────────────────────────────────────

impl StoragePort for NvsAdapter {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        #[cfg(not(target_os = "espidf"))]
        {
            let composite = Self::composite_key(namespace, key);
            match self.store.borrow().get(&composite) {
                Some(data) => {
                    let len = data.len().min(buf.len());
                    buf[..len].copy_from_slice(&data[..len]);
                    Ok(len)
                }
                None => Err(StorageError::NotFound),
            }
        }

        #[cfg(target_os = "espidf")]
        {
            Self::with_nvs(namespace, key, false, |handle, key| {
                let mut size = buf.len();
                let ret = unsafe {
                    nvs_get_blob(handle, key as *const _, buf.as_mut_ptr() as *mut _, &mut size)
                };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(size)
            })
        }
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        #[cfg(not(target_os = "espidf"))]
        {
            let composite = Self::composite_key(namespace, key);
            self.store.borrow_mut().insert(composite, data.to_vec());
            Ok(())
        }

        #[cfg(target_os = "espidf")]
        {
            Self::with_nvs(namespace, key, true, |handle, key| {
                let ret = unsafe {
                    nvs_set_blob(handle, key as *const _, data.as_ptr() as *const _, data.len())
                };
                if ret != ESP_OK {
                    return Err(ret);
                }
                let ret = unsafe { nvs_commit(handle) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(())
            })
        }
    }
}

impl Default for NvsAdapter {
    fn default() -> Self {
        // Falls back to an empty adapter when flash init fails; the
        // session then runs without persistence.
        Self::new().unwrap_or_else(|_| Self {
            #[cfg(not(target_os = "espidf"))]
            store: std::cell::RefCell::new(HashMap::new()),
        })
    }
}
