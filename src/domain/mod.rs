//! Domain Layer
//!
//! Core entities and pure business rules (URL normalization, profile
//! resolution). No storage or I/O here.

mod destination;
mod entity;
mod ids;
mod profile;
mod resolver;
mod settings;
mod shortcut;
mod widget;

pub use entity::{find_by_id, position_by_id, DomainError, DomainResult, Entity};
pub use ids::{IdGenerator, ProfileId, SequentialIds, ShortcutId, UuidGenerator};
pub use profile::Profile;
pub use resolver::{resolve_link_target, resolve_profile_target, resolve_target, selected_profile};
pub use settings::{
    BackgroundConfig, BackgroundType, CategoryFilter, ClockConfig, ProfileFilter, TimeFormat,
    ViewState, PRESET_BACKGROUNDS,
};
pub use shortcut::{Category, Folder, Icon, IconKind, Link, Shortcut, ShortcutPayload, ShortcutRecord};
pub use destination::{has_scheme, is_email, normalize};
pub use widget::{WidgetConfig, WidgetId};
