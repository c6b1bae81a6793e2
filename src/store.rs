//! The cookie store service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde_json::Value;

use crate::cookiestring::{build_set_cookie, ParseCache};
use crate::error::CookieError;
use crate::jar::CookieJar;
use crate::options::CookieOptions;

/// Typed read/write/delete operations over a [`CookieJar`].
///
/// Reads go through a single-slot parse cache keyed on the raw jar
/// string; writes mutate the jar directly, which invalidates the cache on
/// the next read because the raw string differs. Default options are
/// supplied once at construction and merged under per-call options.
///
/// The jar is shared mutable state: the host and any other code in the
/// same context may change it between calls, and no multi-cookie
/// operation here is atomic.
pub struct CookieStore<J: CookieJar> {
    jar: J,
    defaults: CookieOptions,
    cache: Mutex<ParseCache>,
}

impl<J: CookieJar> CookieStore<J> {
    pub fn new(jar: J) -> Self {
        Self::with_defaults(jar, CookieOptions::default())
    }

    pub fn with_defaults(jar: J, defaults: CookieOptions) -> Self {
        Self {
            jar,
            defaults,
            cache: Mutex::new(ParseCache::new()),
        }
    }

    /// The default options this store was built with.
    pub fn defaults(&self) -> &CookieOptions {
        &self.defaults
    }

    /// Value of the named cookie, percent-decoded.
    pub fn get(&self, name: &str) -> Option<String> {
        self.read_all().get(name).cloned()
    }

    /// Value of the named cookie, parsed as JSON.
    ///
    /// Absent and empty values are returned as `None` without a parse
    /// attempt. A value that is not valid JSON comes back as a JSON
    /// string of the raw text; malformed data never fails the caller.
    pub fn get_object(&self, name: &str) -> Option<Value> {
        let raw = self.get(name)?;
        if raw.is_empty() {
            return None;
        }
        Some(serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
    }

    /// Every cookie visible in the jar, name to decoded value.
    ///
    /// Repeated calls without an intervening jar change return the same
    /// map instance.
    pub fn get_all(&self) -> Arc<HashMap<String, String>> {
        self.read_all()
    }

    /// Write one cookie. The value is percent-encoded unless the merged
    /// options set `raw`.
    pub fn put(&self, name: &str, value: &str, options: Option<&CookieOptions>) {
        let merged = self.merged(options);
        self.jar.write(&build_set_cookie(name, Some(value), &merged));
    }

    /// Write one cookie with the value serialized as JSON.
    pub fn put_object<T: Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
        options: Option<&CookieOptions>,
    ) -> Result<(), CookieError> {
        let serialized = serde_json::to_string(value)?;
        self.put(name, &serialized, options);
        Ok(())
    }

    /// Delete one cookie by writing an empty value with an epoch
    /// expiration. Path and domain from the merged options must match the
    /// original definition for the host to drop the right entry.
    pub fn remove(&self, name: &str, options: Option<&CookieOptions>) {
        let merged = self.merged(options);
        self.jar.write(&build_set_cookie(name, None, &merged));
    }

    /// Delete every cookie currently visible.
    ///
    /// Takes a snapshot of the names first, then issues one removal per
    /// name. Cookies added concurrently between the snapshot and
    /// completion are not guaranteed to be removed.
    pub fn remove_all(&self, options: Option<&CookieOptions>) {
        let snapshot = self.get_all();
        for name in snapshot.keys() {
            self.remove(name, options);
        }
    }

    fn read_all(&self) -> Arc<HashMap<String, String>> {
        let raw = self.jar.read();
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .lookup(&raw)
    }

    fn merged(&self, options: Option<&CookieOptions>) -> CookieOptions {
        match options {
            Some(overrides) => CookieOptions::merge(&self.defaults, overrides),
            None => self.defaults.clone(),
        }
    }
}
