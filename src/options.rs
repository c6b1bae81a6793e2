//! Cookie serialization options and default merging.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Expiration for a cookie definition.
///
/// Callers may hand over a real timestamp or a textual date; textual dates
/// are normalized to an HTTP-date at serialization time when they parse,
/// and emitted verbatim when they do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expires {
    DateTime(OffsetDateTime),
    Text(String),
}

/// SameSite policy written into the `samesite` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Lax,
    Strict,
    #[serde(rename = "none")]
    NoRestriction,
}

impl SameSite {
    pub fn as_str(self) -> &'static str {
        match self {
            SameSite::Lax => "lax",
            SameSite::Strict => "strict",
            SameSite::NoRestriction => "none",
        }
    }
}

/// Optional attributes for a single cookie definition.
///
/// A store carries one of these as its defaults, supplied once at
/// construction; per-call options are merged over the defaults key by key.
/// Unset fields inherit; set fields win.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieOptions {
    pub path: Option<String>,
    pub domain: Option<String>,
    pub expires: Option<Expires>,
    pub secure: Option<bool>,
    pub http_only: Option<bool>,
    pub same_site: Option<SameSite>,
    /// Store the value verbatim instead of percent-encoding it.
    pub raw: Option<bool>,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_expires(mut self, expires: Expires) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = Some(http_only);
        self
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = Some(raw);
        self
    }

    /// Shallow merge: fields set in `overrides` win, everything else is
    /// taken from `defaults`. Explicit field-by-field combination so a
    /// new option cannot be forgotten silently.
    pub fn merge(defaults: &CookieOptions, overrides: &CookieOptions) -> CookieOptions {
        CookieOptions {
            path: overrides.path.clone().or_else(|| defaults.path.clone()),
            domain: overrides.domain.clone().or_else(|| defaults.domain.clone()),
            expires: overrides
                .expires
                .clone()
                .or_else(|| defaults.expires.clone()),
            secure: overrides.secure.or(defaults.secure),
            http_only: overrides.http_only.or(defaults.http_only),
            same_site: overrides.same_site.or(defaults.same_site),
            raw: overrides.raw.or(defaults.raw),
        }
    }
}
