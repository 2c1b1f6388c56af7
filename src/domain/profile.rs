//! Profile Entity
//!
//! An alternate destination bound to a shortcut (e.g. a second account login).

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::ids::ProfileId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    /// Display label, matched against the active profile filter
    pub name: String,
    /// Override target: absolute URL, email address, or `None` for the main URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_color: Option<String>,
}

impl Profile {
    pub fn new(id: ProfileId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: None,
            avatar_color: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.url = if url.trim().is_empty() { None } else { Some(url) };
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.avatar_color = Some(color.into());
        self
    }

    /// Trimmed override, `None` when blank
    pub fn override_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    /// Two-letter badge text
    pub fn initials(&self) -> String {
        self.name.chars().take(2).collect::<String>().to_uppercase()
    }
}

impl Entity for Profile {
    type Id = ProfileId;

    fn id(&self) -> &ProfileId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_override_is_none() {
        let p = Profile::new("p1".into(), "Work").with_url("   ");
        assert_eq!(p.url, None);
        assert_eq!(p.override_url(), None);
    }

    #[test]
    fn test_override_trimmed() {
        let mut p = Profile::new("p1".into(), "Work");
        p.url = Some("  w@x.com ".to_string());
        assert_eq!(p.override_url(), Some("w@x.com"));
    }

    #[test]
    fn test_initials() {
        assert_eq!(Profile::new("p".into(), "work").initials(), "WO");
        assert_eq!(Profile::new("p".into(), "ş").initials(), "Ş");
    }
}
