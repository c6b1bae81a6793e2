//! Cookie-string parsing and serialization.
//!
//! This is the core of the crate: everything else is wiring around the
//! functions here. The raw jar string has the shape
//! `name1=value1; name2=value2` and a single cookie definition is written
//! back as `name=value;attr;attr=...`.

use std::collections::HashMap;
use std::sync::Arc;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use time::format_description::well_known::Rfc2822;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::options::{CookieOptions, Expires};

/// Encode set matching `encodeURIComponent`: alphanumerics and
/// `- _ . ! ~ * ' ( )` pass through, everything else is percent-encoded.
const COOKIE_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// HTTP-date as written into the `expires` attribute,
/// e.g. `Thu, 01 Jan 1970 00:00:00 GMT`.
const HTTP_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Hosts silently reject cookie definitions above this size; we only warn.
const MAX_COOKIE_BYTES: usize = 4096;

/// Percent-encode a cookie name or value for the wire.
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COOKIE_COMPONENT).to_string()
}

/// Percent-decode a cookie name or value.
///
/// Malformed sequences must never break the read path, so anything that
/// does not decode to valid UTF-8 is returned unmodified.
pub fn decode_component(encoded: &str) -> String {
    match percent_decode_str(encoded).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => encoded.to_string(),
    }
}

/// Format an expiration as an HTTP-date string in UTC.
pub fn format_http_date(datetime: OffsetDateTime) -> String {
    datetime
        .to_offset(time::UtcOffset::UTC)
        .format(HTTP_DATE)
        .unwrap_or_default()
}

/// Parse an `expires` date, accepting the HTTP-date shape we emit as well
/// as RFC 2822 dates.
pub fn parse_http_date(text: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(text, HTTP_DATE)
        .map(|naive| naive.assume_utc())
        .or_else(|_| OffsetDateTime::parse(text, &Rfc2822))
        .ok()
}

/// Parse a raw jar string into a name-to-value map.
///
/// Segments are separated by `"; "`. A segment with no `=`, or with `=` in
/// the first position (a nameless entry), contributes nothing. Hosts order
/// entries most-specific-path first, so on duplicate names the first
/// occurrence wins; later ones are discarded.
pub fn parse_cookie_string(raw: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    if raw.is_empty() {
        return cookies;
    }

    for segment in raw.split("; ") {
        let Some(eq) = segment.find('=') else { continue };
        if eq == 0 {
            continue;
        }
        let name = decode_component(&segment[..eq]);
        if cookies.contains_key(&name) {
            continue;
        }
        let value = decode_component(&segment[eq + 1..]);
        cookies.insert(name, value);
    }

    cookies
}

/// Single-slot memoization of the last parsed jar string.
///
/// Holds the raw string and the map parsed from it; replaced wholesale
/// whenever the raw string differs. Only one generation is retained.
#[derive(Debug, Default)]
pub struct ParseCache {
    slot: Option<(String, Arc<HashMap<String, String>>)>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the parsed map for `raw`, reparsing only if the string
    /// changed since the last lookup. Cache hits hand back the same
    /// `Arc`, so callers can observe hits via `Arc::ptr_eq`.
    pub fn lookup(&mut self, raw: &str) -> Arc<HashMap<String, String>> {
        if let Some((last_raw, parsed)) = &self.slot {
            if last_raw == raw {
                return Arc::clone(parsed);
            }
        }

        tracing::trace!(bytes = raw.len(), "reparsing cookie jar");
        let parsed = Arc::new(parse_cookie_string(raw));
        self.slot = Some((raw.to_string(), Arc::clone(&parsed)));
        parsed
    }
}

/// Build the attribute string written to the jar for a single cookie.
///
/// `value: None` means deletion: the value becomes empty and the
/// expiration is forced to the Unix epoch. There is no separate delete
/// primitive at the jar level.
///
/// Attribute order is fixed: path, expires, domain, secure, httponly,
/// samesite. Each attribute is emitted only when present.
pub fn build_set_cookie(name: &str, value: Option<&str>, options: &CookieOptions) -> String {
    let mut expires = options.expires.clone();
    let value = match value {
        Some(v) if options.raw.unwrap_or(false) => v.to_string(),
        Some(v) => encode_component(v),
        None => {
            expires = Some(Expires::DateTime(OffsetDateTime::UNIX_EPOCH));
            String::new()
        }
    };

    let mut out = format!("{}={}", encode_component(name), value);
    if let Some(path) = options.path.as_deref().filter(|p| !p.is_empty()) {
        out.push_str(";path=");
        out.push_str(path);
    }
    if let Some(formatted) = expires.as_ref().and_then(expires_attribute) {
        out.push_str(";expires=");
        out.push_str(&formatted);
    }
    if let Some(domain) = options.domain.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(";domain=");
        out.push_str(domain);
    }
    if options.secure.unwrap_or(false) {
        out.push_str(";secure");
    }
    if options.http_only.unwrap_or(false) {
        out.push_str(";httponly");
    }
    if let Some(same_site) = options.same_site {
        out.push_str(";samesite=");
        out.push_str(same_site.as_str());
    }

    // Hosts count a trailing terminator towards the 4096-byte cap. The
    // write is still attempted; the host drops oversized cookies silently.
    let cookie_len = out.len() + 1;
    if cookie_len > MAX_COOKIE_BYTES {
        tracing::warn!(
            name = %name,
            size = cookie_len,
            limit = MAX_COOKIE_BYTES,
            "cookie definition exceeds the size limit and may not be stored"
        );
    }

    out
}

/// Render an expiration for the `expires` attribute.
///
/// Textual dates are normalized through a parse when possible; text that
/// does not parse is emitted verbatim rather than dropped. Empty text
/// suppresses the attribute.
fn expires_attribute(expires: &Expires) -> Option<String> {
    match expires {
        Expires::DateTime(datetime) => Some(format_http_date(*datetime)),
        Expires::Text(text) if text.is_empty() => None,
        Expires::Text(text) => match parse_http_date(text) {
            Some(datetime) => Some(format_http_date(datetime)),
            None => Some(text.clone()),
        },
    }
}
