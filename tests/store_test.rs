use std::sync::Arc;

use docjar::jar::{CookieJar, MemoryJar};
use docjar::options::{CookieOptions, Expires, SameSite};
use docjar::store::CookieStore;
use serde_json::json;

#[test]
fn test_put_then_get_round_trip() {
    let store = CookieStore::new(MemoryJar::new());
    store.put("session", "abc123", None);
    assert_eq!(store.get("session").as_deref(), Some("abc123"));
}

#[test]
fn test_round_trip_reserved_characters() {
    let store = CookieStore::new(MemoryJar::new());
    for value in ["a;b", "a=b", "hello world", "caf\u{e9} \u{2603}", "100%"] {
        store.put("k", value, None);
        assert_eq!(store.get("k").as_deref(), Some(value), "value {value:?}");
    }
}

#[test]
fn test_round_trip_encoded_name() {
    let store = CookieStore::new(MemoryJar::new());
    store.put("user name", "x", None);
    assert_eq!(store.get("user name").as_deref(), Some("x"));
}

#[test]
fn test_remove_then_get_is_absent() {
    let store = CookieStore::new(MemoryJar::new());
    store.put("a", "1", None);
    store.remove("a", None);
    assert_eq!(store.get("a"), None);
}

#[test]
fn test_remove_all_empties_the_jar() {
    let jar = MemoryJar::new();
    let store = CookieStore::new(jar.clone());
    for i in 0..10 {
        store.put(&format!("cookie{i}"), "v", None);
    }
    store.remove_all(None);
    assert!(store.get_all().is_empty());
    assert!(jar.is_empty());
}

#[test]
fn test_remove_all_on_empty_jar_is_a_no_op() {
    let store = CookieStore::new(MemoryJar::new());
    store.remove_all(None);
    assert!(store.get_all().is_empty());
}

#[test]
fn test_put_object_then_get_object_round_trips_structures() {
    let store = CookieStore::new(MemoryJar::new());
    let value = json!({
        "user": "ada",
        "roles": ["admin", "dev"],
        "active": true,
        "quota": 2.5,
        "nested": {"id": 42},
    });
    store.put_object("profile", &value, None).unwrap();
    assert_eq!(store.get_object("profile"), Some(value));

    store.put_object("count", &7, None).unwrap();
    assert_eq!(store.get_object("count"), Some(json!(7)));
}

#[test]
fn test_get_object_on_missing_cookie() {
    let store = CookieStore::new(MemoryJar::new());
    assert_eq!(store.get_object("nope"), None);
}

#[test]
fn test_cache_hit_across_reads() {
    let store = CookieStore::new(MemoryJar::new());
    store.put("a", "1", None);
    let first = store.get_all();
    let second = store.get_all();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_external_jar_mutation_is_observed() {
    // Another collaborator writing to the shared jar must show up on the
    // next read; the cache keys on the raw string, not on our own writes.
    let jar = MemoryJar::new();
    let store = CookieStore::new(jar.clone());
    store.put("a", "1", None);
    let before = store.get_all();

    jar.write("b=2");
    let after = store.get_all();
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(store.get("b").as_deref(), Some("2"));
}

#[test]
fn test_default_options_apply_to_writes() {
    let jar = MemoryJar::new();
    let defaults = CookieOptions::new().with_path("/");
    let store = CookieStore::with_defaults(jar.clone(), defaults);
    store.put("x", "hello world", None);
    assert_eq!(store.get("x").as_deref(), Some("hello world"));
    // The jar holds the encoded form; attributes live with the host, not
    // in the readable string.
    assert_eq!(jar.read(), "x=hello%20world");
}

#[test]
fn test_per_call_options_override_defaults_per_key() {
    let defaults = CookieOptions::new()
        .with_path("/")
        .with_domain("example.com")
        .with_secure(true);
    let store = CookieStore::with_defaults(MemoryJar::new(), defaults);

    let merged = CookieOptions::merge(
        store.defaults(),
        &CookieOptions::new().with_path("/app"),
    );
    assert_eq!(merged.path.as_deref(), Some("/app"));
    assert_eq!(merged.domain.as_deref(), Some("example.com"));
    assert_eq!(merged.secure, Some(true));
}

#[test]
fn test_put_accepts_expires_and_same_site_options() {
    let store = CookieStore::new(MemoryJar::new());
    let options = CookieOptions::new()
        .with_expires(Expires::Text("Fri, 01 Jan 2100 00:00:00 GMT".to_string()))
        .with_same_site(SameSite::Strict);
    store.put("k", "v", Some(&options));
    assert_eq!(store.get("k").as_deref(), Some("v"));
}

#[test]
fn test_oversized_cookie_write_does_not_panic() {
    let store = CookieStore::new(MemoryJar::new());
    let big = "x".repeat(5000);
    store.put("big", &big, None);
    assert_eq!(store.get("big").as_deref(), Some(big.as_str()));
}

#[test]
fn test_seeded_duplicate_names_keep_most_specific() {
    let store = CookieStore::new(MemoryJar::from_raw("a=1; b=2; a=3"));
    let all = store.get_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all["a"], "1");
}
