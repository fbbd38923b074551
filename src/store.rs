//! Durable list of calorie entries: load-then-prune on startup, append, reset.
//!
//! Every mutation rewrites the whole collection under [`ENTRIES_KEY`].

use crate::clock::Clock;
use crate::errors::StorageError;
use crate::models::{DATE_FORMAT, Entry, EntryDraft};
use crate::storage::Storage;
use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use tracing::{debug, error, info};

pub const ENTRIES_KEY: &str = "calorie_entries";

/// Retention window in days, measured from the entry's local midnight.
///
/// An entry is kept only while strictly less than this many 24-hour days old,
/// so one exactly `RETENTION_DAYS * 24h` old is already dropped on load.
pub const RETENTION_DAYS: i64 = 7;

pub struct EntryStore<S, C> {
    storage: S,
    clock: C,
    entries: Vec<Entry>,
}

impl<S: Storage, C: Clock> EntryStore<S, C> {
    /// An empty store. Call [`EntryStore::load`] to pick up persisted entries.
    pub fn new(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[cfg(test)]
    pub(crate) fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Reads the persisted collection, drops entries outside the retention
    /// window and writes the survivors back.
    ///
    /// Missing or corrupt state loads as empty. A failed write-back is logged
    /// and the pruned list is still returned.
    pub fn load(&mut self) -> &[Entry] {
        let persisted = self.read_persisted();
        let total = persisted.len();
        let now = self.clock.now();

        self.entries = persisted
            .into_iter()
            .filter(|entry| within_retention(&entry.date, &now))
            .collect();

        let dropped = total - self.entries.len();
        if dropped > 0 {
            info!(dropped, kept = self.entries.len(), "pruned expired entries");
        }

        if let Err(err) = self.persist() {
            error!("failed to persist pruned entries: {err}");
        }

        &self.entries
    }

    /// Appends a new entry dated today. A draft with an empty comment or a
    /// malformed calorie value is ignored without error.
    pub fn append(&mut self, draft: EntryDraft) -> Result<&[Entry], StorageError> {
        let Some(kcal) = draft.kcal.as_ref().and_then(|kcal| kcal.value()) else {
            debug!(kcal = ?draft.kcal, "ignoring entry without a numeric calorie value");
            return Ok(&self.entries);
        };
        if draft.comment.is_empty() {
            debug!("ignoring entry without a comment");
            return Ok(&self.entries);
        }

        self.entries.push(Entry {
            date: self.clock.today(),
            comment: draft.comment,
            kcal,
            category: draft.category,
        });

        if let Err(err) = self.persist() {
            self.entries.pop();
            return Err(err);
        }

        Ok(&self.entries)
    }

    /// Discards the persisted collection.
    pub fn reset(&mut self) -> Result<&[Entry], StorageError> {
        self.storage.remove(ENTRIES_KEY)?;
        self.entries.clear();
        Ok(&self.entries)
    }

    fn read_persisted(&self) -> Vec<Entry> {
        match self.storage.read(ENTRIES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    error!("failed to parse persisted entries: {err}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                error!("failed to read persisted entries: {err}");
                Vec::new()
            }
        }
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&self.entries)?;
        self.storage.write(ENTRIES_KEY, &payload)
    }
}

/// True when `date`, read as midnight in `now`'s timezone, is less than
/// [`RETENTION_DAYS`] before `now`. Unparseable dates fall outside.
fn within_retention<Tz: TimeZone>(date: &str, now: &DateTime<Tz>) -> bool {
    let Ok(day) = NaiveDate::parse_from_str(date, DATE_FORMAT) else {
        return false;
    };
    let Some(midnight) = day
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.and_local_timezone(now.timezone()).earliest())
    else {
        return false;
    };

    now.clone().signed_duration_since(midnight) < Duration::days(RETENTION_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{Category, KcalInput};
    use crate::storage::MemoryStorage;

    fn clock_at(rfc3339: &str) -> FixedClock {
        FixedClock::new(DateTime::parse_from_rfc3339(rfc3339).unwrap())
    }

    fn entry(date: &str, kcal: f64, category: Category) -> Entry {
        Entry {
            date: date.into(),
            comment: format!("{category} on {date}"),
            kcal,
            category,
        }
    }

    fn seeded(entries: &[Entry], clock: FixedClock) -> EntryStore<MemoryStorage, FixedClock> {
        let raw = serde_json::to_string(entries).unwrap();
        EntryStore::new(MemoryStorage::with_item(ENTRIES_KEY, raw), clock)
    }

    fn persisted(store: &EntryStore<MemoryStorage, FixedClock>) -> Vec<Entry> {
        serde_json::from_str(store.storage().get(ENTRIES_KEY).unwrap()).unwrap()
    }

    #[test]
    fn load_drops_old_entries_and_rewrites_storage() {
        let clock = clock_at("2024-05-20T12:00:00+02:00");
        let stale = entry("2024-05-10", 400.0, Category::Dinner);
        let fresh = entry("2024-05-19", 250.0, Category::Lunch);
        let mut store = seeded(&[stale, fresh.clone()], clock);

        assert_eq!(store.load(), &[fresh.clone()]);
        assert_eq!(persisted(&store), vec![fresh]);
    }

    #[test]
    fn load_keeps_window_entries_in_order() {
        let clock = clock_at("2024-05-20T08:00:00+00:00");
        let entries = vec![
            entry("2024-05-20", 100.0, Category::Snacks),
            entry("2024-05-14", 300.0, Category::Breakfast),
            entry("2024-05-17", 200.0, Category::Dinner),
        ];
        let mut store = seeded(&entries, clock);

        assert_eq!(store.load(), entries.as_slice());
    }

    #[test]
    fn retention_boundary_is_seven_days_from_midnight() {
        let now = DateTime::parse_from_rfc3339("2024-05-20T00:00:00+00:00").unwrap();
        assert!(within_retention("2024-05-14", &now));
        assert!(!within_retention("2024-05-13", &now));

        let just_before = now - Duration::seconds(1);
        assert!(within_retention("2024-05-13", &just_before));
    }

    #[test]
    fn retention_keeps_future_dates_and_drops_garbage() {
        let now = DateTime::parse_from_rfc3339("2024-05-20T00:00:00+00:00").unwrap();
        assert!(within_retention("2024-06-01", &now));
        assert!(!within_retention("yesterday", &now));
        assert!(!within_retention("", &now));
    }

    #[test]
    fn load_treats_corrupt_state_as_empty() {
        let clock = clock_at("2024-05-20T12:00:00+00:00");
        let mut store = EntryStore::new(MemoryStorage::with_item(ENTRIES_KEY, "{not json"), clock);

        assert!(store.load().is_empty());
        assert_eq!(store.storage().get(ENTRIES_KEY), Some("[]"));
    }

    #[test]
    fn load_without_state_persists_empty_collection() {
        let mut store = EntryStore::new(MemoryStorage::new(), clock_at("2024-05-20T12:00:00Z"));
        assert!(store.load().is_empty());
        assert_eq!(store.storage().get(ENTRIES_KEY), Some("[]"));
    }

    #[test]
    fn load_survives_unreadable_storage() {
        struct Broken;

        impl Storage for Broken {
            fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Err(std::io::Error::other("disk gone").into())
            }

            fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Err(std::io::Error::other("disk gone").into())
            }

            fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
                Err(std::io::Error::other("disk gone").into())
            }
        }

        let mut store = EntryStore::new(Broken, clock_at("2024-05-20T12:00:00Z"));
        assert!(store.load().is_empty());
        assert!(store.reset().is_err());
    }

    #[test]
    fn append_dates_entry_today_and_persists() {
        let mut store = EntryStore::new(MemoryStorage::new(), clock_at("2024-05-20T21:15:00+02:00"));
        store.load();

        let draft = EntryDraft::new("Apple", KcalInput::Text("95".into()), Category::Snacks);
        let entries = store.append(draft).unwrap().to_vec();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, "2024-05-20");
        assert_eq!(entries[0].kcal, 95.0);
        assert_eq!(entries[0].category, Category::Snacks);
        assert_eq!(persisted(&store), entries);
    }

    #[test]
    fn append_ignores_empty_comment() {
        let mut store = EntryStore::new(MemoryStorage::new(), clock_at("2024-05-20T12:00:00Z"));
        let draft = EntryDraft::new("", KcalInput::Number(100.0), Category::Snacks);

        assert!(store.append(draft).unwrap().is_empty());
        assert_eq!(store.storage().get(ENTRIES_KEY), None);
    }

    #[test]
    fn append_ignores_malformed_kcal() {
        let mut store = EntryStore::new(MemoryStorage::new(), clock_at("2024-05-20T12:00:00Z"));
        store
            .append(EntryDraft::new("Toast", KcalInput::Number(120.0), Category::Breakfast))
            .unwrap();

        for kcal in [
            Some(KcalInput::Text("a lot".into())),
            Some(KcalInput::Text(String::new())),
            Some(KcalInput::Other(serde::de::IgnoredAny)),
            None,
        ] {
            let draft = EntryDraft {
                comment: "Soup".into(),
                kcal,
                category: Category::Lunch,
            };
            assert_eq!(store.append(draft).unwrap().len(), 1);
        }
    }

    #[test]
    fn session_does_not_reprune_after_load() {
        let clock = clock_at("2024-05-20T12:00:00Z");
        let kept = entry("2024-05-15", 500.0, Category::Dinner);
        let mut store = seeded(&[kept.clone()], clock);
        store.load();

        store.clock_mut().advance(Duration::days(10));
        store
            .append(EntryDraft::new("Pasta", KcalInput::Number(700.0), Category::Dinner))
            .unwrap();

        let entries = store.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], kept);
        assert_eq!(entries[1].date, "2024-05-30");
    }

    #[test]
    fn reset_clears_memory_and_storage() {
        let clock = clock_at("2024-05-20T12:00:00Z");
        let mut store = seeded(&[entry("2024-05-19", 10.0, Category::Lunch)], clock);
        store.load();

        assert!(store.reset().unwrap().is_empty());
        assert_eq!(store.storage().get(ENTRIES_KEY), None);
        assert!(store.reset().unwrap().is_empty());
    }
}
