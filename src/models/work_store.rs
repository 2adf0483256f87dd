//! The date-keyed entry store.

use std::collections::BTreeMap;
use std::collections::btree_map;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use super::date_key::{YearMonth, parse_date_key};
use super::work_entry::WorkEntry;

/// All work entries, one per calendar date.
///
/// Serializes as a JSON object keyed by `YYYY-MM-DD`. Keys that are not valid
/// dates are dropped on load with a warning; nothing could address them.
///
/// # Example
///
/// ```
/// use gongsu_calendar::models::{WorkEntry, WorkStore};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut store = WorkStore::new();
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// store.insert(date, WorkEntry {
///     work_days: Decimal::ONE,
///     work_hours: 8,
///     rate: Decimal::from(150000),
///     total_amount: Some(Decimal::from(150000)),
///     memo: String::new(),
///     updated_at: None,
/// });
/// assert_eq!(store.len(), 1);
/// assert!(store.get(&date).is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkStore {
    entries: BTreeMap<NaiveDate, WorkEntry>,
}

impl WorkStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from string keys, skipping any that are not dates.
    pub fn from_keyed<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = (String, WorkEntry)>,
    {
        let mut entries = BTreeMap::new();
        for (key, entry) in raw {
            match parse_date_key(&key) {
                Ok(date) => {
                    entries.insert(date, entry);
                }
                Err(_) => warn!(key = %key, "Skipping entry with invalid date key"),
            }
        }
        Self { entries }
    }

    /// Returns the entry for `date`, if any.
    pub fn get(&self, date: &NaiveDate) -> Option<&WorkEntry> {
        self.entries.get(date)
    }

    /// Returns a mutable reference to the entry for `date`, if any.
    pub fn get_mut(&mut self, date: &NaiveDate) -> Option<&mut WorkEntry> {
        self.entries.get_mut(date)
    }

    /// Inserts or replaces the entry for `date`, returning the previous one.
    pub fn insert(&mut self, date: NaiveDate, entry: WorkEntry) -> Option<WorkEntry> {
        self.entries.insert(date, entry)
    }

    /// Removes the entry for `date`, returning it if it existed.
    pub fn remove(&mut self, date: &NaiveDate) -> Option<WorkEntry> {
        self.entries.remove(date)
    }

    /// Returns true if an entry exists for `date`.
    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.entries.contains_key(date)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates entries in date order.
    pub fn iter(&self) -> btree_map::Iter<'_, NaiveDate, WorkEntry> {
        self.entries.iter()
    }

    /// Iterates entries mutably in date order.
    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, NaiveDate, WorkEntry> {
        self.entries.iter_mut()
    }

    /// Entries whose date falls in `month`.
    pub fn entries_in_month(
        &self,
        month: YearMonth,
    ) -> impl Iterator<Item = (&NaiveDate, &WorkEntry)> {
        self.entries
            .range(month.first_day()..)
            .take_while(move |(date, _)| month.contains(**date))
    }
}

impl FromIterator<(NaiveDate, WorkEntry)> for WorkStore {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, WorkEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for WorkStore {
    type Item = (NaiveDate, WorkEntry);
    type IntoIter = btree_map::IntoIter<NaiveDate, WorkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a WorkStore {
    type Item = (&'a NaiveDate, &'a WorkEntry);
    type IntoIter = btree_map::Iter<'a, NaiveDate, WorkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for WorkStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WorkStore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, WorkEntry>::deserialize(deserializer)?;
        Ok(Self::from_keyed(raw))
    }
}
