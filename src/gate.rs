//! Navigation gate: decides whether a URL the webview is about to load stays
//! in the app window or is handed to the system browser.
//!
//! The gate is a pure function of `(url, allowlist)`. It never performs the
//! handoff itself; see [`crate::external::route`] for that.

use std::fmt;
use std::sync::Arc;

use url::Url;

/// Scheme that grants in-app allowance. Plain `http` never does.
const SECURE_SCHEME: &str = "https";

/// Domains permitted to render inside the app window.
pub const DEFAULT_ALLOWED_HOSTS: &[&str] = &[
    "chatgpt.com",
    "openai.com",
    "sora.openai.com",
    "auth.openai.com",
    "platform.openai.com",
    "help.openai.com",
    "accounts.google.com",
    "appleid.apple.com",
    "login.microsoftonline.com",
    "github.com",
];

/// Ordered set of trusted domain names (no scheme, no port).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allowlist {
    entries: Vec<String>,
}

impl Allowlist {
    /// Builds an allowlist, lowercasing and trimming entries. Order is kept;
    /// blanks and duplicates are dropped.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for entry in entries {
            let normalized = entry.as_ref().trim().to_ascii_lowercase();
            if normalized.is_empty() || out.contains(&normalized) {
                continue;
            }
            out.push(normalized);
        }
        Self { entries: out }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if `host` equals an entry or is a subdomain of one.
    ///
    /// The subdomain test requires a `.` boundary: `accounts.chatgpt.com`
    /// matches `chatgpt.com`, `evilchatgpt.com` does not.
    pub fn contains_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.entries.iter().any(|allowed| {
            host == *allowed
                || (host.len() > allowed.len()
                    && host.ends_with(allowed.as_str())
                    && host.as_bytes()[host.len() - allowed.len() - 1] == b'.')
        })
    }
}

impl Default for Allowlist {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_HOSTS.iter().copied())
    }
}

/// True iff the scheme is `http` or `https`.
pub fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// True iff `url` parses, uses `https`, and its host is on the allowlist.
/// Unparsable input is not allowed.
pub fn is_allowed_host(url: &str, allowlist: &Allowlist) -> bool {
    match Url::parse(url) {
        Ok(parsed) => is_allowed_parsed(&parsed, allowlist),
        Err(_) => false,
    }
}

fn is_allowed_parsed(url: &Url, allowlist: &Allowlist) -> bool {
    if url.scheme() != SECURE_SCHEME {
        return false;
    }
    match url.host_str() {
        Some(host) => allowlist.contains_host(host),
        None => false,
    }
}

/// True iff `url` is a web URL whose host is not allowed in-app.
///
/// Unparsable input and non-web schemes (`blob:`, `data:`, `file:`,
/// `mailto:` ...) return false and are left to the webview's default
/// handling.
pub fn should_open_externally(url: &str, allowlist: &Allowlist) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if !is_web_url(&parsed) {
        return false;
    }
    !is_allowed_parsed(&parsed, allowlist)
}

/// Host event that triggered a gate query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    NewWindow,
    Navigate,
    Redirect,
}

impl fmt::Display for NavigationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NavigationEvent::NewWindow => "new-window",
            NavigationEvent::Navigate => "navigate",
            NavigationEvent::Redirect => "redirect",
        };
        f.write_str(name)
    }
}

/// Outcome of a navigation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Let the webview proceed.
    AllowInPlace,
    /// Cancel in-app and hand the URL to the system browser.
    DenyAndRedirectExternal,
    /// Cancel in-app without a handoff (the handoff was attempted and failed).
    DenySilent,
}

impl Decision {
    /// Maps to the proceed/cancel boolean webview hooks expect.
    pub fn allows_in_place(self) -> bool {
        matches!(self, Decision::AllowInPlace)
    }
}

/// Shareable handle over an immutable allowlist.
#[derive(Debug, Clone, Default)]
pub struct NavigationGate {
    allowlist: Arc<Allowlist>,
}

impl NavigationGate {
    pub fn new(allowlist: Allowlist) -> Self {
        Self {
            allowlist: Arc::new(allowlist),
        }
    }

    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    pub fn is_allowed_host(&self, url: &str) -> bool {
        is_allowed_host(url, &self.allowlist)
    }

    pub fn should_open_externally(&self, url: &str) -> bool {
        should_open_externally(url, &self.allowlist)
    }

    /// Classifies `url`. The event kind does not influence the result; a
    /// redirect is judged by its target like any other navigation.
    pub fn decide(&self, url: &str, event: NavigationEvent) -> Decision {
        if self.should_open_externally(url) {
            tracing::debug!(%event, url, "gate: external");
            Decision::DenyAndRedirectExternal
        } else {
            Decision::AllowInPlace
        }
    }
}
