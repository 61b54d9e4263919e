//! Integration Tests for the Cache API
//!
//! Exercises the public surface end to end: construction, recency eviction,
//! TTL expiry, notifications and the command shell.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::thread::sleep;
use std::time::Duration;

use recency_cache::shell::{handle_line, Response};
use recency_cache::{CacheOptions, Eviction, EvictionReason, LruCache};

// == Helper Functions ==

fn listen<V: Clone + 'static>(cache: &mut LruCache<V>) -> Rc<RefCell<Vec<Eviction<V>>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    cache.on_evict(move |event| sink.borrow_mut().push(event.clone()));
    events
}

fn key_set<V>(cache: &LruCache<V>) -> HashSet<String> {
    cache.keys().map(str::to_string).collect()
}

// == Construction ==

#[test]
fn test_construct_from_json_options() {
    let options = CacheOptions::from_json(r#"{"max": 2, "ttl": 50}"#).unwrap();
    let cache: LruCache<u32> = LruCache::new(options);

    assert_eq!(cache.capacity(), 2);
    assert_eq!(cache.ttl(), Some(Duration::from_millis(50)));

    let cache: LruCache<u32> = LruCache::new(CacheOptions::from_json("3").unwrap());
    assert_eq!(cache.capacity(), 3);
    assert!(cache.ttl().is_none());
}

// == Recency ==

#[test]
fn test_recency_correctness() {
    let mut cache = LruCache::new(2);

    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);
    assert_eq!(key_set(&cache), HashSet::from(["b".to_string(), "c".to_string()]));

    assert_eq!(cache.get("b"), Some(&2));
    cache.set("d", 4);

    assert_eq!(key_set(&cache), HashSet::from(["b".to_string(), "d".to_string()]));
    assert_eq!(cache.get("c"), None);
}

#[test]
fn test_each_insert_at_capacity_evicts_exactly_the_tail() {
    let mut cache = LruCache::new(3);
    let events = listen(&mut cache);

    for i in 0..10 {
        cache.set(i, i * 10);
        assert!(cache.len() <= 3);
    }

    let evicted: Vec<(String, i32)> = events
        .borrow()
        .iter()
        .map(|e| (e.key.clone(), e.value))
        .collect();
    let expected: Vec<(String, i32)> = (0..7).map(|i| (i.to_string(), i * 10)).collect();
    assert_eq!(evicted, expected);
    assert_eq!(cache.keys_by_recency().collect::<Vec<_>>(), vec!["9", "8", "7"]);
}

#[test]
fn test_idempotent_reinsertion() {
    let mut cache = LruCache::new(5);

    cache.set("other", "x");
    cache.set("k", "v1");
    cache.set("k", "v2");

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.keys_by_recency().next(), Some("k"));
    assert_eq!(cache.get("k"), Some(&"v2"));
}

// == TTL ==

#[test]
fn test_ttl_expiry_notifies_once() {
    let mut cache = LruCache::new(CacheOptions::new(10, 50));
    let events = listen(&mut cache);

    cache.set("k", "v".to_string());
    sleep(Duration::from_millis(60));

    assert_eq!(cache.get("k"), None);
    assert_eq!(cache.peek("k"), None);
    assert_eq!(
        *events.borrow(),
        vec![Eviction {
            key: "k".to_string(),
            value: "v".to_string(),
            reason: EvictionReason::Expired,
        }]
    );
}

#[test]
fn test_ttl_disabled_never_expires() {
    let mut cache = LruCache::new(CacheOptions::new(10, 0));

    cache.set("k", 1);
    sleep(Duration::from_millis(20));

    assert_eq!(cache.get("k"), Some(&1));
}

// == Silent Paths ==

#[test]
fn test_remove_clear_and_empty_evict_are_silent() {
    let mut cache = LruCache::new(CacheOptions::new(4, 60_000));
    let events = listen(&mut cache);

    cache.evict();
    cache.set("a", 1);
    cache.set("b", 2);
    assert_eq!(cache.remove("a"), Some(1));
    cache.clear();

    assert!(events.borrow().is_empty());
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.keys().count(), 0);
    assert_eq!(cache.capacity(), 4);
    assert_eq!(cache.ttl(), Some(Duration::from_secs(60)));
}

// == Channel Subscription ==

#[tokio::test]
async fn test_subscribe_delivers_before_set_returns() {
    let mut cache = LruCache::new(1);
    let mut rx = cache.subscribe();

    cache.set("a", "first".to_string());
    cache.set("b", "second".to_string());
    cache.evict();

    let first = rx.recv().await.unwrap();
    assert_eq!(first.key, "a");
    assert_eq!(first.value, "first");
    assert_eq!(first.reason, EvictionReason::Capacity);

    let second = rx.recv().await.unwrap();
    assert_eq!(second.key, "b");

    drop(cache);
    assert!(rx.recv().await.is_none());
}

// == Shell ==

#[test]
fn test_shell_session() {
    let mut cache = LruCache::new(2);
    let mut rx = cache.subscribe();

    handle_line(&mut cache, "set a 1");
    handle_line(&mut cache, "set b 2");
    handle_line(&mut cache, "get a");
    handle_line(&mut cache, "set c 3");

    let evicted = rx.try_recv().unwrap();
    assert_eq!(evicted.key, "b");

    assert_eq!(
        handle_line(&mut cache, "keys"),
        Response::Keys {
            keys: vec!["c".to_string(), "a".to_string()],
        }
    );
    assert!(matches!(
        handle_line(&mut cache, "set"),
        Response::Error { .. }
    ));
}
