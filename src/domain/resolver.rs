//! Profile Resolution
//!
//! Picks the URL a click on a shortcut navigates to, given the active profile
//! filter and the shortcut's own profiles.

use url::Url;

use super::profile::Profile;
use super::settings::ProfileFilter;
use super::shortcut::{Link, Shortcut};
use super::destination::{is_email, normalize};

/// Hosts that accept an `authuser` parameter to pick the signed-in account
const ACCOUNT_SWITCH_DOMAINS: [&str; 2] = ["google.com", "youtube.com"];

const ACCOUNT_PARAM: &str = "authuser";

/// The profile driving a main click: the one named by the filter, else the
/// shortcut's default profile.
pub fn selected_profile<'a>(link: &'a Link, filter: &ProfileFilter) -> Option<&'a Profile> {
    let active = match filter {
        ProfileFilter::Named(name) => link.profile_named(name),
        ProfileFilter::All => None,
    };
    active.or_else(|| link.default_profile())
}

/// Destination of a main click. Folders open in place and have none.
pub fn resolve_target(shortcut: &Shortcut, filter: &ProfileFilter) -> Option<String> {
    let link = shortcut.as_link()?;
    Some(resolve_link_target(link, filter))
}

pub fn resolve_link_target(link: &Link, filter: &ProfileFilter) -> String {
    match selected_profile(link, filter) {
        Some(profile) => resolve_profile_target(link, profile),
        None => normalize(&link.url),
    }
}

/// Destination when a specific profile is chosen for `link`
pub fn resolve_profile_target(link: &Link, profile: &Profile) -> String {
    let main_url = normalize(&link.url);
    let Some(target) = profile.override_url() else {
        return main_url;
    };

    if is_email(target) {
        if supports_account_switch(&main_url) {
            return with_account(&main_url, target);
        }
        return format!("mailto:{}", target);
    }
    normalize(target)
}

fn supports_account_switch(main_url: &str) -> bool {
    let host = match Url::parse(main_url) {
        Ok(parsed) => parsed.host_str().map(str::to_string),
        Err(_) => None,
    };
    // Unparsable URLs fall back to a plain text check
    let haystack = host.as_deref().unwrap_or(main_url);
    ACCOUNT_SWITCH_DOMAINS.iter().any(|d| haystack.contains(d))
}

/// Set `authuser=<email>` on `main_url`, replacing an existing value
fn with_account(main_url: &str, email: &str) -> String {
    match Url::parse(main_url) {
        Ok(mut parsed) => {
            // The first `authuser` keeps its slot; later duplicates go away
            let mut replaced = false;
            let mut pairs: Vec<(String, String)> = Vec::new();
            for (k, v) in parsed.query_pairs() {
                if k == ACCOUNT_PARAM {
                    if !replaced {
                        pairs.push((k.into_owned(), email.to_string()));
                        replaced = true;
                    }
                } else {
                    pairs.push((k.into_owned(), v.into_owned()));
                }
            }
            if !replaced {
                pairs.push((ACCOUNT_PARAM.to_string(), email.to_string()));
            }
            parsed.query_pairs_mut().clear().extend_pairs(pairs);
            parsed.to_string()
        }
        Err(_) => {
            let separator = if main_url.contains('?') { '&' } else { '?' };
            format!("{}{}{}={}", main_url, separator, ACCOUNT_PARAM, email)
        }
    }
}
