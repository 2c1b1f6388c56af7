//! Destination Normalization
//!
//! Turns user-entered destinations into navigable links. Purely syntactic.

use once_cell::sync::Lazy;
use regex::Regex;

static SCHEME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+\-.]*:").expect("scheme pattern is valid")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Normalize a raw destination.
///
/// Blank input yields an empty string. Anything that already carries a scheme
/// (`https:`, `mailto:`, `spotify:` ...) is kept as-is; everything else gets
/// `https://` in front. Idempotent.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if has_scheme(trimmed) {
        return trimmed.to_string();
    }
    format!("https://{}", trimmed)
}

pub fn has_scheme(s: &str) -> bool {
    SCHEME_RE.is_match(s)
}

pub fn is_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t"), "");
    }

    #[test]
    fn test_bare_host_gets_https() {
        assert_eq!(normalize("github.com"), "https://github.com");
        assert_eq!(normalize("  mail.google.com/u/1 "), "https://mail.google.com/u/1");
    }

    #[test]
    fn test_explicit_scheme_untouched() {
        assert_eq!(normalize("https://x.org"), "https://x.org");
        assert_eq!(normalize("spotify:track:123"), "spotify:track:123");
        assert_eq!(normalize("mailto:a@b.co"), "mailto:a@b.co");
        assert_eq!(normalize("web+app.x-y:open"), "web+app.x-y:open");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["", "  ", "github.com", "spotify:x", "http://a", " w@x.com "] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "input {:?}", raw);
        }
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_email("w@x.com"));
        assert!(!is_email("w@x"));
        assert!(!is_email("w x@y.com"));
        assert!(!is_email("https://x.com"));
    }
}
