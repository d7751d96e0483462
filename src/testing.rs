//! Test doubles shared across modules.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::error::{CatalogError, Result};
use crate::library::TagInfo;

/// Tag reader driven by file contents instead of real audio.
///
/// A file containing `bitrate=<kbps>` yields that bitrate with the file stem
/// as title; anything else fails extraction.
#[derive(Debug, Default)]
pub struct FakeTagReader {
    calls: AtomicUsize,
}

impl FakeTagReader {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl crate::library::TagReader for FakeTagReader {
    fn read_tags(&self, path: &Path) -> Result<TagInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let extraction = |reason: &str| CatalogError::Extraction {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let body = fs::read_to_string(path).map_err(|e| extraction(&e.to_string()))?;
        let bitrate = body
            .trim()
            .strip_prefix("bitrate=")
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| extraction("no audio stream"))?;

        Ok(TagInfo {
            title: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            bitrate,
            channels: 2,
            ..TagInfo::default()
        })
    }
}

/// Write a fake audio file understood by [`FakeTagReader`].
pub fn write_track(path: &Path, bitrate: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, format!("bitrate={bitrate}")).unwrap();
}

/// Serializes tests that touch process environment variables.
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

pub struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    pub fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    pub fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}
