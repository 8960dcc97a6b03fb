//! In-process response cache
//!
//! Keyed by `(Kind, year, round)` with TTL staleness; the round component is
//! `None` for everything except an explicit race-results round, so different
//! rounds of the same season never collide. The clock is injected so tests
//! can expire entries without sleeping. There is no single-flight
//! deduplication: concurrent misses for the same key may each fetch, which is
//! fine because fetches are idempotent.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use crate::fetch::Kind;
use crate::record::Records;

/// Time source for TTL checks and current-year validation
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// Wall-clock time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Manually advanced clock for tests
pub struct ManualClock {
    now: Mutex<SystemTime>,
}

impl ManualClock {
    pub fn new(now: SystemTime) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Start at the Unix epoch plus the given number of seconds
    pub fn at_epoch_secs(secs: u64) -> Self {
        Self::new(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        *self.now.lock().unwrap()
    }
}

struct CacheEntry {
    records: Records,
    fetched_at: SystemTime,
}

pub type CacheKey = (Kind, u16, Option<u32>);

/// TTL cache of fetched record lists
pub struct Cache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl Cache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a fresh entry; expired entries are removed on the way out.
    pub fn get(&self, key: CacheKey, now: SystemTime) -> Option<Records> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(&key) {
            Some(entry) => {
                let age = now
                    .duration_since(entry.fetched_at)
                    .unwrap_or(Duration::ZERO);
                if age >= self.ttl {
                    log::debug!("cache entry for {:?} expired ({:?} old)", key, age);
                    entries.remove(&key);
                    None
                } else {
                    Some(entry.records.clone())
                }
            }
            None => None,
        }
    }

    /// Store records under the year they were actually served for
    pub fn put(&self, key: CacheKey, records: Records, now: SystemTime) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key,
            CacheEntry {
                records,
                fetched_at: now,
            },
        );
    }

    /// Drop every entry (CLI `--no-cache`)
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TeamStanding;

    fn sample_records() -> Records {
        Records::TeamStandings(vec![TeamStanding {
            position: Some(1),
            team: "McLaren".to_string(),
            points: Some(666.0),
            wins: Some(6),
        }])
    }

    #[test]
    fn test_hit_within_ttl() {
        let clock = ManualClock::at_epoch_secs(1_000_000);
        let cache = Cache::new(Duration::from_secs(600));

        cache.put((Kind::TeamStandings, 2023, None), sample_records(), clock.now());

        let hit = cache.get((Kind::TeamStandings, 2023, None), clock.now());
        assert_eq!(hit, Some(sample_records()));
    }

    #[test]
    fn test_miss_for_other_key() {
        let clock = ManualClock::at_epoch_secs(1_000_000);
        let cache = Cache::new(Duration::from_secs(600));

        cache.put((Kind::TeamStandings, 2023, None), sample_records(), clock.now());

        assert!(cache.get((Kind::TeamStandings, 2022, None), clock.now()).is_none());
        assert!(cache.get((Kind::DriverStandings, 2023, None), clock.now()).is_none());
    }

    #[test]
    fn test_rounds_are_distinct_keys() {
        let clock = ManualClock::at_epoch_secs(1_000_000);
        let cache = Cache::new(Duration::from_secs(600));

        cache.put((Kind::Results, 2023, None), Records::Results(vec![]), clock.now());

        // The latest-race entry must not answer for an explicit round
        assert!(cache.get((Kind::Results, 2023, Some(1)), clock.now()).is_none());
        assert!(cache.get((Kind::Results, 2023, None), clock.now()).is_some());
    }

    #[test]
    fn test_expiry_after_ttl() {
        let clock = ManualClock::at_epoch_secs(1_000_000);
        let cache = Cache::new(Duration::from_secs(600));

        cache.put((Kind::Calendar, 2023, None), Records::Calendar(vec![]), clock.now());
        clock.advance(Duration::from_secs(601));

        assert!(cache.get((Kind::Calendar, 2023, None), clock.now()).is_none());
        // The expired entry is gone, not just hidden
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_refreshes_entry() {
        let clock = ManualClock::at_epoch_secs(1_000_000);
        let cache = Cache::new(Duration::from_secs(600));

        cache.put((Kind::Calendar, 2023, None), Records::Calendar(vec![]), clock.now());
        clock.advance(Duration::from_secs(599));
        cache.put((Kind::Calendar, 2023, None), Records::Calendar(vec![]), clock.now());
        clock.advance(Duration::from_secs(2));

        // Fresh relative to the second put
        assert!(cache.get((Kind::Calendar, 2023, None), clock.now()).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let clock = ManualClock::at_epoch_secs(0);
        let cache = Cache::new(Duration::from_secs(600));

        cache.put((Kind::Calendar, 2023, None), Records::Calendar(vec![]), clock.now());
        cache.put((Kind::Results, 2023, None), Records::Results(vec![]), clock.now());
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::at_epoch_secs(100);
        let before = clock.now();
        clock.advance(Duration::from_secs(50));
        assert_eq!(clock.now().duration_since(before).unwrap(), Duration::from_secs(50));
    }
}
