use chrono::{DateTime, Duration, Utc};
use hourglass_rs::SafeTimeProvider;
use std::collections::HashMap;
use tracing::trace;

use crate::errors::Result;
use crate::types::UserId;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    loaded_at: DateTime<Utc>,
}

/// per-user read-through cache with a fixed time to live
#[derive(Debug, Clone)]
pub struct ReadThroughCache<V> {
    ttl: Duration,
    entries: HashMap<UserId, CacheEntry<V>>,
}

impl<V: Clone> ReadThroughCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached value for `user_id` if younger than the TTL, otherwise the
    /// loader's result, which replaces the entry. Loader errors leave the
    /// cache untouched.
    pub fn get_or_load<F>(&mut self, user_id: UserId, time_provider: &SafeTimeProvider, loader: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        let now = time_provider.now();
        if let Some(entry) = self.entries.get(&user_id) {
            if now - entry.loaded_at < self.ttl {
                trace!(user_id = %user_id, "cache hit");
                return Ok(entry.value.clone());
            }
        }

        trace!(user_id = %user_id, "cache miss");
        let value = loader()?;
        self.entries.insert(
            user_id,
            CacheEntry {
                value: value.clone(),
                loaded_at: now,
            },
        );
        Ok(value)
    }

    /// drop the user's entry after a mutation
    pub fn invalidate(&mut self, user_id: UserId) -> bool {
        self.entries.remove(&user_id).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DebtError;
    use chrono::TimeZone;
    use hourglass_rs::TimeSource;
    use std::cell::Cell;
    use uuid::Uuid;

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()))
    }

    #[test]
    fn test_hit_until_ttl_expires() {
        let time = test_time();
        let control = time.test_control().unwrap();
        let mut cache = ReadThroughCache::new(Duration::minutes(5));
        let user = Uuid::new_v4();
        let loads = Cell::new(0);
        let load = || -> Result<Vec<String>> {
            loads.set(loads.get() + 1);
            Ok(vec!["Groceries".to_string(), "Rent".to_string()])
        };

        assert_eq!(cache.get_or_load(user, &time, load).unwrap().len(), 2);
        control.advance(Duration::minutes(4));
        cache.get_or_load(user, &time, load).unwrap();
        assert_eq!(loads.get(), 1);

        control.advance(Duration::minutes(1));
        cache.get_or_load(user, &time, load).unwrap();
        assert_eq!(loads.get(), 2);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let time = test_time();
        let mut cache = ReadThroughCache::new(Duration::hours(1));
        let user = Uuid::new_v4();

        cache.get_or_load(user, &time, || Ok(1)).unwrap();
        assert!(cache.invalidate(user));
        assert!(!cache.invalidate(user));
        assert_eq!(cache.get_or_load(user, &time, || Ok(2)).unwrap(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_loader_error_is_not_cached() {
        let time = test_time();
        let mut cache: ReadThroughCache<u32> = ReadThroughCache::new(Duration::hours(1));
        let user = Uuid::new_v4();

        let err = cache.get_or_load(user, &time, || Err(DebtError::EmptyName));
        assert!(err.is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_load(user, &time, || Ok(7)).unwrap(), 7);
    }
}
