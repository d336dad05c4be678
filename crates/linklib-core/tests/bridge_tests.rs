//! Integration tests for bridge endpoint groups.

use linklib::bridge::{connect, n_connect, BackingStore, SharedStore};
use linklib::{connected, Endpoint, EndpointFactory, Link, LinkKind, Lookup, Missing};
use serde_json::{json, Value};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::Level;

/// Log sink shared between a test and the subscriber it installs.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_three_way_group() {
    let [a, b, c] = EndpointFactory::group::<3>();

    a.set("hello", true).unwrap();
    assert_eq!(c.get("hello"), Lookup::Found(json!(true)));

    b.set("nums", json!([1, 2, 3])).unwrap();
    assert_eq!(a.get("nums"), Lookup::Found(json!([1, 2, 3])));
}

#[test]
fn test_every_member_sees_every_write() {
    let group = n_connect(5);
    let values = [json!(1), json!("two"), json!({"three": 3}), Value::Null, json!([5])];

    for (i, (writer, value)) in group.iter().zip(values.iter()).enumerate() {
        let key = format!("k{}", i);
        writer.set(&key, value.clone()).unwrap();
        for reader in &group {
            assert_eq!(reader.get(&key), Lookup::Found(value.clone()));
        }
    }
}

#[test]
fn test_unset_keys_are_missing() {
    let (a, b) = connect();
    for key in ["", "x", "_hidden", "nested.key"] {
        assert!(a.get(key) == Missing);
        assert!(!b.exists(key));
    }
}

#[test]
fn test_globals_hide_private_keys() {
    let (a, b) = connect();
    a.set("public", 1).unwrap();
    a.set("_private", 2).unwrap();
    b.set("__dunder", 3).unwrap();

    let globals = b.globals().unwrap();
    assert!(globals.keys().all(|k| !k.starts_with('_')));
    assert_eq!(globals.get("public"), Some(&json!(1)));
    assert_eq!(a.get("_private"), Lookup::Found(json!(2)));
}

#[test]
fn test_private_write_warns_once_unless_suppressed() {
    let logs = CapturedLogs::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .with_max_level(Level::WARN)
        .finish();

    let (a, b) = connect();
    tracing::subscriber::with_default(subscriber, || {
        a.set("_x", 1).unwrap();
        a.set_with("_quiet", 2, false).unwrap();
        a.set("visible", 3).unwrap();
    });

    let warnings: Vec<String> = logs
        .lines()
        .into_iter()
        .filter(|line| line.contains("WARN"))
        .collect();
    assert_eq!(warnings.len(), 1, "unexpected log output: {:?}", logs.lines());
    assert!(warnings[0].contains("_x"));
    assert!(!warnings[0].contains("_quiet"));

    // both private keys were still written
    assert_eq!(b.get("_x"), Lookup::Found(json!(1)));
    assert_eq!(b.get("_quiet"), Lookup::Found(json!(2)));
}

#[test]
fn test_connected_within_and_across_groups() {
    let [a, b] = EndpointFactory::group::<2>();
    let [c, d] = EndpointFactory::group::<2>();

    assert!(connected(&a, &b));
    assert!(connected(&c, &d));
    assert!(!connected(&a, &c));
    assert!(!connected(&b, &d));
}

#[test]
fn test_stores_compare_by_identity() {
    let (a, _) = connect();
    let (b, _) = connect();
    // identical contents, different stores
    a.set("same", 1).unwrap();
    b.set("same", 1).unwrap();
    assert!(!connected(&a, &b));
    assert_ne!(a.store(), b.store());
}

#[test]
fn test_store_dropped_with_last_endpoint() {
    let (a, b) = connect();
    let store = a.store().clone();
    assert_eq!(store.handle_count(), 3);
    drop(a);
    drop(b);
    assert_eq!(store.handle_count(), 1);
}

#[test]
fn test_raw_endpoints_share_caller_store() {
    let store = SharedStore::new(BackingStore::new());
    let a = Endpoint::new(store.clone());
    let b = Endpoint::new(store.clone());

    a.set("direct", "yes").unwrap();
    assert_eq!(b.get("direct"), Lookup::Found(json!("yes")));
    assert_eq!(store.borrow().get_attr("direct"), Some(&json!("yes")));
}

#[test]
fn test_factory_hook_requires_setinfo() {
    // factory wiring on a store that lacks setinfo: writes degrade to Missing
    let (mut a, _) = connect();
    a.connect_to(SharedStore::new(BackingStore::new()));
    assert_eq!(a.set("k", 1), Err(Missing));
    assert!(a.get("k").is_missing());
}

#[test]
fn test_endpoint_kind() {
    let (a, _) = connect();
    assert_eq!(a.kind(), LinkKind::Bridge);
}
