//! Startpage core
//!
//! Model behind a browser start page: a shortcut grid with one level of
//! folders, per-shortcut profiles that redirect a click to another account
//! or address, and a reorderable widget layout.
//!
//! Layered like the rest of our apps:
//! - `domain`: entities and pure rules (URL normalization, profile resolution)
//! - `repository`: the in-memory stores and their persistence
//! - `commands`: entry points the view layer calls; each applies one
//!   mutation, swaps the snapshot, persists and logs
//! - `tree`: read-only derivations for rendering

pub mod commands;
pub mod config;
pub mod domain;
pub mod repository;
pub mod tree;

use std::sync::Arc;

use dragdrop::DragSession;

use config::AppConfig;
use domain::{
    BackgroundConfig, ClockConfig, DomainError, DomainResult, IdGenerator, ShortcutId,
    UuidGenerator, ViewState,
};
use repository::{JsonFileStorage, ShortcutTree, StateRepository, StorageError, WidgetLayout};

/// Everything the dashboard shows, plus where it is saved
///
/// The shortcut tree and widget layout are handed out as `Arc` snapshots.
/// A mutation builds the next snapshot and swaps it in, so a snapshot a
/// caller holds never changes underneath it.
pub struct AppState {
    pub(crate) shortcuts: Arc<ShortcutTree>,
    pub(crate) layout: Arc<WidgetLayout>,
    pub(crate) background: BackgroundConfig,
    pub(crate) clock: ClockConfig,
    pub(crate) view: ViewState,
    pub(crate) repo: StateRepository,
    pub(crate) ids: Box<dyn IdGenerator + Send>,
    pub(crate) shortcut_drag: Option<DragSession<ShortcutId>>,
    pub(crate) widget_drag: Option<DragSession<usize>>,
}

impl AppState {
    /// Load every blob from `repo`, falling back to defaults
    pub fn open(repo: StateRepository, mut ids: Box<dyn IdGenerator + Send>) -> Self {
        let shortcuts = repo.load_shortcuts(ids.as_mut());
        let layout = repo.load_layout();
        let background = repo.load_background();
        let clock = repo.load_clock();
        let view = repo.load_view_state();
        log::info!(
            "Loaded {} shortcuts ({} at root), {} widgets",
            shortcuts.len(),
            shortcuts.root().len(),
            layout.entries().len()
        );
        Self {
            shortcuts: Arc::new(shortcuts),
            layout: Arc::new(layout),
            background,
            clock,
            view,
            repo,
            ids,
            shortcut_drag: None,
            widget_drag: None,
        }
    }

    pub fn shortcuts(&self) -> Arc<ShortcutTree> {
        Arc::clone(&self.shortcuts)
    }

    pub fn layout(&self) -> Arc<WidgetLayout> {
        Arc::clone(&self.layout)
    }

    pub fn background(&self) -> &BackgroundConfig {
        &self.background
    }

    pub fn clock(&self) -> &ClockConfig {
        &self.clock
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn repository(&self) -> &StateRepository {
        &self.repo
    }

    /// Run `op` on a copy of the tree. On success the copy becomes the
    /// current snapshot and is saved; on error nothing changes.
    pub(crate) fn mutate_shortcuts<R>(
        &mut self,
        action: &str,
        op: impl FnOnce(&mut ShortcutTree, &mut dyn IdGenerator) -> DomainResult<R>,
    ) -> Option<R> {
        let mut next = (*self.shortcuts).clone();
        match op(&mut next, self.ids.as_mut()) {
            Ok(result) => {
                self.repo.save_shortcuts(&next);
                self.shortcuts = Arc::new(next);
                log::info!("{}: applied", action);
                Some(result)
            }
            Err(e) => {
                ignored(action, &e);
                None
            }
        }
    }

    /// Same contract as [`Self::mutate_shortcuts`] for the widget layout
    pub(crate) fn mutate_layout<R>(
        &mut self,
        action: &str,
        op: impl FnOnce(&mut WidgetLayout) -> DomainResult<R>,
    ) -> Option<R> {
        let mut next = (*self.layout).clone();
        match op(&mut next) {
            Ok(result) => {
                self.repo.save_layout(&next);
                self.layout = Arc::new(next);
                log::info!("{}: applied", action);
                Some(result)
            }
            Err(e) => {
                ignored(action, &e);
                None
            }
        }
    }
}

/// Rejected mutations are expected (UI races, invalid drops) and only logged
fn ignored(action: &str, e: &DomainError) {
    match e {
        DomainError::Internal(_) => log::error!("{}: {}", action, e),
        _ => log::debug!("{}: ignored, {}", action, e),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Logger(#[from] rolling_logger::LoggerError),
}

/// Start logging and open state stored under `config.data_dir`
pub fn bootstrap(config: &AppConfig) -> Result<AppState, BootstrapError> {
    match rolling_logger::init_logger(&config.log_dir, &config.app_name) {
        Ok(path) => log::info!("Logging to {}", path.display()),
        Err(rolling_logger::LoggerError::AlreadyInitialized) => {}
        Err(e) => return Err(e.into()),
    }

    let storage = JsonFileStorage::open(&config.data_dir)?;
    let repo = StateRepository::new(Arc::new(storage));
    let state = AppState::open(repo, Box::new(UuidGenerator));
    let _ = rolling_logger::info(&format!("{} started", config.app_name));
    Ok(state)
}
