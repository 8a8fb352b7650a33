//! KvStore interface tests.
//!
//! These tests verify the contract of the KvStore trait.
//! Each store implementation should run these tests.
//!
//! Every test works under its own random key prefix, except
//! `test_clear_all`, which wipes the whole store and so runs last.

use std::time::Duration;

use uuid::Uuid;

use kvtrace::interfaces::KvStore;

/// Unique prefix so runs against a shared store never collide.
pub fn scoped(name: &str) -> String {
    format!("{}:{}", name, Uuid::new_v4().simple())
}

// =============================================================================
// set / get
// =============================================================================

pub async fn test_get_missing<S: KvStore>(store: &S) {
    let key = scoped("missing");
    let value = store.get(&key).await.expect("get should succeed");
    assert!(value.is_none(), "missing key should be None");
}

pub async fn test_set_then_get<S: KvStore>(store: &S) {
    let key = scoped("set_get");
    store.set(&key, b"hello").await.expect("set should succeed");

    let value = store.get(&key).await.expect("get should succeed");
    assert_eq!(value, Some(b"hello".to_vec()));
}

pub async fn test_set_preserves_binary<S: KvStore>(store: &S) {
    let key = scoped("binary");
    let data = vec![0u8, 1, 2, 127, 128, 254, 255];
    store.set(&key, &data).await.expect("set should succeed");

    let value = store.get(&key).await.expect("get should succeed");
    assert_eq!(value, Some(data));
}

pub async fn test_set_overwrites<S: KvStore>(store: &S) {
    let key = scoped("overwrite");
    store.set(&key, b"first").await.expect("set should succeed");
    store.set(&key, b"second").await.expect("set should succeed");

    let value = store.get(&key).await.expect("get should succeed");
    assert_eq!(value, Some(b"second".to_vec()));
}

// =============================================================================
// incr
// =============================================================================

pub async fn test_incr_starts_at_one<S: KvStore>(store: &S) {
    let key = scoped("incr");
    assert_eq!(store.incr(&key).await.expect("incr should succeed"), 1);
    assert_eq!(store.incr(&key).await.expect("incr should succeed"), 2);
    assert_eq!(store.incr(&key).await.expect("incr should succeed"), 3);

    let raw = store.get(&key).await.expect("get should succeed");
    assert_eq!(raw, Some(b"3".to_vec()), "counter readable as text");
}

pub async fn test_incr_non_integer_is_an_error<S: KvStore>(store: &S) {
    let key = scoped("incr_text");
    store.set(&key, b"lots").await.expect("set should succeed");

    assert!(store.incr(&key).await.is_err(), "non-integer incr should fail");

    let raw = store.get(&key).await.expect("get should succeed");
    assert_eq!(raw, Some(b"lots".to_vec()), "failed incr leaves value");
}

pub async fn test_incr_overflow_is_an_error<S: KvStore>(store: &S) {
    let key = scoped("incr_max");
    let max = i64::MAX.to_string();
    store.set(&key, max.as_bytes()).await.expect("set should succeed");

    assert!(store.incr(&key).await.is_err(), "incr past i64::MAX should fail");

    let raw = store.get(&key).await.expect("get should succeed");
    assert_eq!(raw, Some(max.into_bytes()), "failed incr leaves value");
}

// =============================================================================
// append / append_all / range
// =============================================================================

pub async fn test_range_missing_is_empty<S: KvStore>(store: &S) {
    let list = scoped("empty_list");
    let items = store.range(&list).await.expect("range should succeed");
    assert!(items.is_empty());
}

pub async fn test_append_preserves_order<S: KvStore>(store: &S) {
    let list = scoped("ordered");
    for item in ["a", "b", "c"] {
        store
            .append(&list, item.as_bytes())
            .await
            .expect("append should succeed");
    }

    let items = store.range(&list).await.expect("range should succeed");
    assert_eq!(items, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
}

pub async fn test_append_all_writes_every_list<S: KvStore>(store: &S) {
    let inputs = scoped("inputs");
    let outputs = scoped("outputs");

    store
        .append_all(&[(inputs.as_str(), b"in-1".as_slice()), (outputs.as_str(), b"out-1".as_slice())])
        .await
        .expect("append_all should succeed");
    store
        .append_all(&[(inputs.as_str(), b"in-2".as_slice()), (outputs.as_str(), b"out-2".as_slice())])
        .await
        .expect("append_all should succeed");

    assert_eq!(
        store.range(&inputs).await.unwrap(),
        vec![b"in-1".to_vec(), b"in-2".to_vec()]
    );
    assert_eq!(
        store.range(&outputs).await.unwrap(),
        vec![b"out-1".to_vec(), b"out-2".to_vec()]
    );
}

pub async fn test_append_all_empty_is_noop<S: KvStore>(store: &S) {
    store
        .append_all(&[])
        .await
        .expect("empty append_all should succeed");
}

// =============================================================================
// set_with_expiry
// =============================================================================

pub async fn test_expiring_value_readable_before_ttl<S: KvStore>(store: &S) {
    let key = scoped("ttl_live");
    store
        .set_with_expiry(&key, b"fresh", Duration::from_secs(10))
        .await
        .expect("set_with_expiry should succeed");

    let value = store.get(&key).await.expect("get should succeed");
    assert_eq!(value, Some(b"fresh".to_vec()));
}

pub async fn test_expiring_value_evicted_after_ttl<S: KvStore>(store: &S) {
    let key = scoped("ttl_dead");
    store
        .set_with_expiry(&key, b"stale", Duration::from_secs(1))
        .await
        .expect("set_with_expiry should succeed");

    tokio::time::sleep(Duration::from_millis(1500)).await;

    let value = store.get(&key).await.expect("get should succeed");
    assert!(value.is_none(), "value should expire after its TTL");
}

// =============================================================================
// clear_all
// =============================================================================

pub async fn test_clear_all<S: KvStore>(store: &S) {
    let key = scoped("clear");
    let list = scoped("clear_list");
    store.set(&key, b"v").await.unwrap();
    store.append(&list, b"i").await.unwrap();

    store.clear_all().await.expect("clear_all should succeed");

    assert!(store.get(&key).await.unwrap().is_none());
    assert!(store.range(&list).await.unwrap().is_empty());
}

// =============================================================================
// Test runner macro
// =============================================================================

/// Run all KvStore interface tests against a store implementation.
#[macro_export]
macro_rules! run_kv_store_tests {
    ($store:expr) => {
        use $crate::storage::kv_store_tests::*;

        // set / get
        test_get_missing($store).await;
        println!("  test_get_missing: PASSED");

        test_set_then_get($store).await;
        println!("  test_set_then_get: PASSED");

        test_set_preserves_binary($store).await;
        println!("  test_set_preserves_binary: PASSED");

        test_set_overwrites($store).await;
        println!("  test_set_overwrites: PASSED");

        // incr
        test_incr_starts_at_one($store).await;
        println!("  test_incr_starts_at_one: PASSED");

        test_incr_non_integer_is_an_error($store).await;
        println!("  test_incr_non_integer_is_an_error: PASSED");

        test_incr_overflow_is_an_error($store).await;
        println!("  test_incr_overflow_is_an_error: PASSED");

        // lists
        test_range_missing_is_empty($store).await;
        println!("  test_range_missing_is_empty: PASSED");

        test_append_preserves_order($store).await;
        println!("  test_append_preserves_order: PASSED");

        test_append_all_writes_every_list($store).await;
        println!("  test_append_all_writes_every_list: PASSED");

        test_append_all_empty_is_noop($store).await;
        println!("  test_append_all_empty_is_noop: PASSED");

        // expiry
        test_expiring_value_readable_before_ttl($store).await;
        println!("  test_expiring_value_readable_before_ttl: PASSED");

        test_expiring_value_evicted_after_ttl($store).await;
        println!("  test_expiring_value_evicted_after_ttl: PASSED");

        // clear_all wipes everything, so it goes last
        test_clear_all($store).await;
        println!("  test_clear_all: PASSED");
    };
}
