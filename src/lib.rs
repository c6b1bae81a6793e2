//! # docjar
//!
//! A thin, typed abstraction over a browser-style document cookie store.
//!
//! The host exposes all cookies for the current context as one mutable
//! string (`name1=value1; name2=value2`); `docjar` layers typed
//! read/write/delete operations on top of it, with percent-encoding,
//! merge-able default options, and a single-slot parse cache keyed on
//! the raw string.
//!
//! ## Quick Start
//!
//! ```rust
//! use docjar::jar::MemoryJar;
//! use docjar::options::CookieOptions;
//! use docjar::store::CookieStore;
//!
//! let defaults = CookieOptions::new().with_path("/");
//! let store = CookieStore::with_defaults(MemoryJar::new(), defaults);
//!
//! store.put("session", "hello world", None);
//! assert_eq!(store.get("session").as_deref(), Some("hello world"));
//!
//! store.remove("session", None);
//! assert_eq!(store.get("session"), None);
//! ```
//!
//! ## Modules
//!
//! - [`jar`] - The raw jar resource trait and an in-memory fake
//! - [`options`] - Serialization attributes and default merging
//! - [`cookiestring`] - Parser, serializer, and the parse cache
//! - [`store`] - The typed store service
//! - [`error`] - Error definitions
//!
//! ## Caveats
//!
//! The jar is shared, process-wide mutable state. The host (and any
//! other code in the same context) may mutate it at any time, writes are
//! fire-and-forget, and multi-cookie operations are not atomic. Hosts
//! silently drop cookie definitions over 4096 bytes; `docjar` warns via
//! `tracing` and attempts the write anyway.

pub mod cookiestring;
pub mod error;
pub mod jar;
pub mod options;
pub mod store;
