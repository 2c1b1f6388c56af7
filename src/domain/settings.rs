//! Dashboard Settings
//!
//! View filters, background and clock configuration. Small value types that
//! are persisted as-is.

use serde::de::IntoDeserializer;
use serde::{Deserialize, Serialize};

use super::shortcut::Category;

/// Sentinel stored for "no filter"
pub const ALL: &str = "All";

/// Category filter of the shortcut grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s == ALL {
            return Ok(CategoryFilter::All);
        }
        let de: serde::de::value::StrDeserializer<'_, serde::de::value::Error> =
            s.as_str().into_deserializer();
        Category::deserialize(de)
            .map(CategoryFilter::Only)
            .map_err(|e| e.to_string())
    }
}

impl From<CategoryFilter> for String {
    fn from(f: CategoryFilter) -> Self {
        match f {
            CategoryFilter::All => ALL.to_string(),
            CategoryFilter::Only(c) => c.as_str().to_string(),
        }
    }
}

/// Active profile filter: which profile name overrides default resolution
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProfileFilter {
    #[default]
    All,
    Named(String),
}

impl ProfileFilter {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == ALL {
            ProfileFilter::All
        } else {
            ProfileFilter::Named(name)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ProfileFilter::All)
    }
}

impl From<String> for ProfileFilter {
    fn from(s: String) -> Self {
        ProfileFilter::named(s)
    }
}

impl From<ProfileFilter> for String {
    fn from(f: ProfileFilter) -> Self {
        match f {
            ProfileFilter::All => ALL.to_string(),
            ProfileFilter::Named(n) => n,
        }
    }
}

/// The {category, profile} view-filter pair
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub profile: ProfileFilter,
}

impl ViewState {
    pub fn is_filtered(&self) -> bool {
        self.category != CategoryFilter::All || !self.profile.is_all()
    }
}

pub const PRESET_BACKGROUNDS: [&str; 7] = [
    "https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?q=70&w=1600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1614850523459-c2f4c699c52e?q=70&w=1600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1506259091721-347f7c3bbcbf?q=70&w=1600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1485470733090-0aae1788d5af?q=70&w=1600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1550684848-fac1c5b4e853?q=70&w=1600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1604871000636-074fa5117945?q=70&w=1600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1451187580459-43490279c0fa?q=70&w=1600&auto=format&fit=crop",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    Image,
    Color,
    #[default]
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BackgroundConfig {
    #[serde(rename = "type")]
    pub kind: BackgroundType,
    /// Image URL, or a CSS color for `Color`
    #[serde(default)]
    pub value: String,
}

impl BackgroundConfig {
    /// Image to show for this config.
    ///
    /// `current` is the image on screen; a random config keeps it while it is
    /// one of the presets, otherwise `seed` picks a preset.
    pub fn image_url(&self, current: Option<&str>, seed: u64) -> Option<String> {
        match self.kind {
            BackgroundType::Color => None,
            BackgroundType::Image => Some(self.value.clone()).filter(|v| !v.is_empty()),
            BackgroundType::Random => {
                if !self.value.is_empty() {
                    return Some(self.value.clone());
                }
                if let Some(cur) = current.filter(|c| PRESET_BACKGROUNDS.contains(c)) {
                    return Some(cur.to_string());
                }
                let idx = (seed % PRESET_BACKGROUNDS.len() as u64) as usize;
                Some(PRESET_BACKGROUNDS[idx].to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    H12,
    #[default]
    #[serde(rename = "24h")]
    H24,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockConfig {
    #[serde(default)]
    pub format: TimeFormat,
    #[serde(default)]
    pub show_seconds: bool,
    #[serde(default = "default_true")]
    pub show_date: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            format: TimeFormat::H24,
            show_seconds: false,
            show_date: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_state_wire_format() {
        let vs = ViewState {
            category: CategoryFilter::Only(Category::Dev),
            profile: ProfileFilter::named("Work"),
        };
        let json = serde_json::to_value(&vs).unwrap();
        assert_eq!(json, serde_json::json!({ "category": "dev", "profile": "Work" }));
        let default: ViewState = serde_json::from_str(r#"{"category":"All","profile":"All"}"#).unwrap();
        assert_eq!(default, ViewState::default());
        assert!(!default.is_filtered());
    }

    #[test]
    fn test_category_filter_accepts_legacy_label() {
        let f: CategoryFilter = serde_json::from_str("\"Geliştirme\"").unwrap();
        assert_eq!(f, CategoryFilter::Only(Category::Dev));
        assert!(serde_json::from_str::<CategoryFilter>("\"bogus\"").is_err());
    }

    #[test]
    fn test_background_image_url() {
        let color = BackgroundConfig { kind: BackgroundType::Color, value: "#000".into() };
        assert_eq!(color.image_url(None, 3), None);

        let random = BackgroundConfig::default();
        assert_eq!(random.image_url(None, 8).as_deref(), Some(PRESET_BACKGROUNDS[1]));
        assert_eq!(
            random.image_url(Some(PRESET_BACKGROUNDS[4]), 0).as_deref(),
            Some(PRESET_BACKGROUNDS[4])
        );
        assert_eq!(random.image_url(Some("https://mine.png"), 0).as_deref(), Some(PRESET_BACKGROUNDS[0]));

        let image = BackgroundConfig { kind: BackgroundType::Image, value: "https://a/b.jpg".into() };
        assert_eq!(image.image_url(None, 0).as_deref(), Some("https://a/b.jpg"));
    }

    #[test]
    fn test_clock_config_wire_format() {
        let json = serde_json::to_value(ClockConfig::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "format": "24h", "showSeconds": false, "showDate": true }));
    }

    #[test]
    fn test_partial_clock_config_fills_defaults() {
        let clock: ClockConfig = serde_json::from_str(r#"{"showSeconds":true}"#).unwrap();
        assert_eq!(
            clock,
            ClockConfig {
                format: TimeFormat::H24,
                show_seconds: true,
                show_date: true,
            }
        );
    }
}
