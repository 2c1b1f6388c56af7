//! State Repository
//!
//! Typed load/save of the persisted dashboard blobs over a [`Storage`].
//! Loads never fail: absent or unreadable values yield the named default.
//! Saves never fail either; errors are logged and the caller carries on.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::shortcut::ShortcutTree;
use super::traits::{Storage, StorageError, StorageResult};
use super::widget_layout::WidgetLayout;
use crate::domain::{
    BackgroundConfig, Category, ClockConfig, IdGenerator, Link, Shortcut, ViewState, WidgetConfig,
};

pub const SHORTCUTS_KEY: &str = "gtab_shortcuts";
pub const LAYOUT_KEY: &str = "gtab_layout";
pub const BACKGROUND_KEY: &str = "gtab_bg_config";
pub const VIEW_STATE_KEY: &str = "gtab_view_state";
pub const CLOCK_KEY: &str = "gtab_clock_config";

/// Starter tiles for a fresh install
pub fn default_shortcuts() -> Vec<Shortcut> {
    [
        ("1", "Google", "https://google.com", Category::Other),
        ("2", "YouTube", "https://youtube.com", Category::Entertainment),
        ("3", "GitHub", "https://github.com", Category::Dev),
        ("4", "Gmail", "https://mail.google.com", Category::Work),
        ("5", "Google Drive", "https://drive.google.com", Category::Work),
        ("6", "Twitter", "https://twitter.com", Category::Social),
    ]
    .into_iter()
    .map(|(id, title, url, category)| Shortcut::Link(Link::new(id.into(), title, url, category)))
    .collect()
}

#[derive(Clone)]
pub struct StateRepository {
    storage: Arc<dyn Storage>,
}

impl StateRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Read and decode `key`. `Ok(None)` means never written.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let Some(raw) = self.storage.read(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Malformed {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string_pretty(value).map_err(|e| StorageError::Encode {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.storage.write(key, &raw)
    }

    /// Decoded value of `key`, or `default()` when absent or unreadable.
    /// Unreadable values are set aside first.
    pub fn load_or<T: DeserializeOwned>(&self, key: &str, default: impl FnOnce() -> T) -> T {
        match self.read(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                log::debug!("No stored {}, using default", key);
                default()
            }
            Err(e @ StorageError::Malformed { .. }) => {
                log::warn!("Failed to load {}: {}, using default", key, e);
                if let Err(e) = self.storage.set_aside(key) {
                    log::error!("Failed to set aside {}: {}", key, e);
                }
                default()
            }
            Err(e) => {
                log::error!("Failed to load {}: {}, using default", key, e);
                default()
            }
        }
    }

    /// Encode and store; failures are logged, never returned
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.write(key, value) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save {}: {}", key, e);
                false
            }
        }
    }

    // ========================
    // Typed blobs
    // ========================

    pub fn load_shortcuts(&self, ids: &mut dyn IdGenerator) -> ShortcutTree {
        let items = self.load_or(SHORTCUTS_KEY, default_shortcuts);
        ShortcutTree::from_shortcuts(items, ids)
    }

    pub fn save_shortcuts(&self, tree: &ShortcutTree) -> bool {
        self.save(SHORTCUTS_KEY, tree)
    }

    pub fn load_layout(&self) -> WidgetLayout {
        match self.load_or::<Option<Vec<WidgetConfig>>>(LAYOUT_KEY, || None) {
            Some(entries) => WidgetLayout::from_entries(entries),
            None => WidgetLayout::canonical(),
        }
    }

    pub fn save_layout(&self, layout: &WidgetLayout) -> bool {
        self.save(LAYOUT_KEY, layout)
    }

    pub fn load_background(&self) -> BackgroundConfig {
        self.load_or(BACKGROUND_KEY, BackgroundConfig::default)
    }

    pub fn save_background(&self, config: &BackgroundConfig) -> bool {
        self.save(BACKGROUND_KEY, config)
    }

    pub fn load_clock(&self) -> ClockConfig {
        self.load_or(CLOCK_KEY, ClockConfig::default)
    }

    pub fn save_clock(&self, config: &ClockConfig) -> bool {
        self.save(CLOCK_KEY, config)
    }

    pub fn load_view_state(&self) -> ViewState {
        self.load_or(VIEW_STATE_KEY, ViewState::default)
    }

    pub fn save_view_state(&self, view: &ViewState) -> bool {
        self.save(VIEW_STATE_KEY, view)
    }
}
