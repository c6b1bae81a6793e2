//! Access to the raw cookie jar resource.

use std::sync::{Arc, Mutex, PoisonError};

use time::OffsetDateTime;

use crate::cookiestring::parse_http_date;

/// The raw string-valued cookie resource exposed by the host environment.
///
/// `read` returns every cookie visible to the current context as a single
/// `name1=value1; name2=value2` string. `write` is assigned one cookie
/// definition (an attribute string) and the host applies it: insert,
/// update, or removal when the expiration is in the past. Writes are
/// fire-and-forget;
/// the only way to confirm the host accepted one is to read again.
///
/// Implementations back this with the actual host resource; tests and
/// embedders without a host use [`MemoryJar`].
pub trait CookieJar {
    fn read(&self) -> String;
    fn write(&self, set_cookie: &str);
}

/// In-memory jar emulating host cookie semantics, for deterministic tests.
///
/// Stores entries in insertion order with names kept in their encoded
/// form, the way a host jar would. Clones share the same underlying
/// entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryJar {
    entries: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemoryJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the jar with a raw string, bypassing write semantics.
    /// Lets tests set up host-produced orderings (e.g. duplicate names
    /// from differing paths) that `write` alone cannot create.
    pub fn from_raw(raw: &str) -> Self {
        let entries = raw
            .split("; ")
            .filter_map(|segment| {
                let (name, value) = segment.split_once('=')?;
                Some((name.to_string(), value.to_string()))
            })
            .collect();
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, Vec<(String, String)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CookieJar for MemoryJar {
    fn read(&self) -> String {
        self.lock_entries()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, set_cookie: &str) {
        let mut segments = set_cookie.split(';');
        let Some((name, value)) = segments.next().and_then(|pair| pair.split_once('=')) else {
            return;
        };

        let expired = segments
            .filter_map(|attr| attr.trim().split_once('='))
            .find(|(key, _)| key.eq_ignore_ascii_case("expires"))
            .and_then(|(_, date)| parse_http_date(date))
            .is_some_and(|expiry| expiry <= OffsetDateTime::now_utc());

        let mut entries = self.lock_entries();
        if expired {
            entries.retain(|(existing, _)| existing != name);
        } else if let Some(entry) = entries.iter_mut().find(|(existing, _)| existing == name) {
            entry.1 = value.to_string();
        } else {
            entries.push((name.to_string(), value.to_string()));
        }
    }
}
