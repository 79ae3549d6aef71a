use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::store::KeyValueStore;

// ---------------------------------------------------------------------------
// Cache entry
// ---------------------------------------------------------------------------

/// Timestamped envelope around a stored value. Never leaves this module;
/// callers only ever see the inner value or a miss.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry<T> {
    value: T,
    stored_at_epoch_millis: u64,
}

fn now_epoch_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// TTL cache
// ---------------------------------------------------------------------------

/// Read/write helper over the persistent store that stamps every value with
/// its write time and treats entries older than a caller-supplied max age as
/// absent.
///
/// The cache never surfaces errors: corrupt or unreadable entries read as
/// misses, and failed writes are logged and dropped, degrading to
/// "always miss" rather than failing the caller.
pub struct TtlCache {
    store: Arc<dyn KeyValueStore>,
}

impl TtlCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Fetch the value under `key` if one was stored less than `max_age_ms`
    /// ago. An entry aged exactly `max_age_ms` is already a miss.
    pub fn read<T: DeserializeOwned>(&self, key: &str, max_age_ms: u64) -> Option<T> {
        self.read_at(key, max_age_ms, now_epoch_millis())
    }

    /// Store `value` under `key` stamped with the current time, replacing
    /// any previous entry.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        self.write_at(key, value, now_epoch_millis());
    }

    /// Whether the store holds any entry under `key`, fresh or not. Used for
    /// opportunistic persistence, where an existing entry must keep its
    /// original timestamp.
    pub fn contains(&self, key: &str) -> bool {
        matches!(self.store.get(key), Ok(Some(_)))
    }

    fn read_at<T: DeserializeOwned>(&self, key: &str, max_age_ms: u64, now_ms: u64) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::debug!("cache read for {key} failed: {err}");
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("discarding corrupt cache entry under {key}: {err}");
                return None;
            }
        };

        if now_ms.saturating_sub(entry.stored_at_epoch_millis) >= max_age_ms {
            return None;
        }
        Some(entry.value)
    }

    fn write_at<T: Serialize>(&self, key: &str, value: &T, now_ms: u64) {
        let entry = CacheEntry {
            value,
            stored_at_epoch_millis: now_ms,
        };
        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("cache entry for {key} did not serialize: {err}");
                return;
            }
        };
        if let Err(err) = self.store.set(key, &json) {
            tracing::warn!("cache write for {key} failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};

    fn cache() -> TtlCache {
        TtlCache::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn round_trips_a_value() {
        let cache = cache();
        cache.write("posts", &vec!["a".to_string(), "b".to_string()]);
        let got: Vec<String> = cache.read("posts", 1000).unwrap();
        assert_eq!(got, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn misses_on_absent_key() {
        let cache = cache();
        assert_eq!(cache.read::<Vec<String>>("posts", 1000), None);
    }

    #[test]
    fn age_equal_to_max_age_is_a_miss() {
        let cache = cache();
        cache.write_at("k", &7_u32, 10_000);
        assert_eq!(cache.read_at::<u32>("k", 500, 10_500), None);
    }

    #[test]
    fn age_one_below_max_age_is_a_hit() {
        let cache = cache();
        cache.write_at("k", &7_u32, 10_000);
        assert_eq!(cache.read_at::<u32>("k", 500, 10_499), Some(7));
    }

    #[test]
    fn corrupt_entry_reads_as_miss() {
        let store = Arc::new(MemoryStore::new());
        store.set("k", "{ definitely not a cache entry").unwrap();
        let cache = TtlCache::new(store);
        assert_eq!(cache.read::<u32>("k", 1000), None);
    }

    #[test]
    fn wrong_shape_reads_as_miss() {
        let store = Arc::new(MemoryStore::new());
        store
            .set("k", r#"{"value":"text","storedAtEpochMillis":0}"#)
            .unwrap();
        let cache = TtlCache::new(store);
        // Stored a string, asking for a number.
        assert_eq!(cache.read_at::<u32>("k", 1000, 10), None);
    }

    #[test]
    fn overwrite_replaces_value_and_timestamp() {
        let cache = cache();
        cache.write_at("k", &1_u32, 1_000);
        cache.write_at("k", &2_u32, 5_000);
        assert_eq!(cache.read_at::<u32>("k", 100, 5_050), Some(2));
        // Judged against the new timestamp, not the old one.
        assert_eq!(cache.read_at::<u32>("k", 100, 5_100), None);
    }

    #[test]
    fn entry_uses_camel_case_field_names() {
        let store = Arc::new(MemoryStore::new());
        let cache = TtlCache::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);
        cache.write("k", &42_u32);

        let raw = store.get("k").unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["value"], 42);
        assert!(parsed["storedAtEpochMillis"].is_u64());
    }

    #[test]
    fn contains_sees_stale_entries() {
        let cache = cache();
        cache.write_at("k", &1_u32, 0);
        assert!(cache.contains("k"));
        assert!(!cache.contains("other"));
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk on fire")))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk on fire")))
        }
    }

    #[test]
    fn storage_failures_degrade_to_miss() {
        let cache = TtlCache::new(Arc::new(FailingStore));
        // Write is swallowed, read is a miss; neither panics or errors out.
        cache.write("k", &1_u32);
        assert_eq!(cache.read::<u32>("k", 1000), None);
    }
}
