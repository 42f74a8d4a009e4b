use chrono::{Local, NaiveDateTime};

use super::storage::KeyValueStore;
use crate::error::StorageError;
use crate::models::QueryHistoryEntry;

pub const LAST_ID_KEY: &str = "last_vehicle_id";
pub const HISTORY_KEY: &str = "query_history";
/// Oldest entries are evicted once the history grows past this
pub const MAX_HISTORY: usize = 50;

const DATE_FORMAT: &str = "%Y/%-m/%-d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Wall-clock source for history timestamps
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local time of the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDateTime,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}

/// Last identifier and query history on top of a [`KeyValueStore`]
pub struct SessionPersistence<S> {
    store: S,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore> SessionPersistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }

    pub fn with_clock(store: S, clock: impl Clock + 'static) -> Self {
        Self { store, clock: Box::new(clock) }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append a history entry stamped with the current time and remember the identifier.
    ///
    /// Corrupt history already in storage is discarded rather than reported.
    ///
    /// # Errors
    ///
    /// Returns an error only when writing to the store fails.
    pub fn record_query(&mut self, identifier: &str) -> Result<QueryHistoryEntry, StorageError> {
        let now = self.clock.now();
        let entry = QueryHistoryEntry {
            identifier: identifier.to_string(),
            queried_at_date: now.format(DATE_FORMAT).to_string(),
            queried_at_time: now.format(TIME_FORMAT).to_string(),
        };

        let mut history = self.load_history();
        history.push(entry.clone());
        if history.len() > MAX_HISTORY {
            let overflow = history.len() - MAX_HISTORY;
            history.drain(..overflow);
        }

        let json = serde_json::to_string(&history)
            .map_err(|source| StorageError::Encode { key: HISTORY_KEY.to_string(), source })?;
        self.store.set(LAST_ID_KEY, identifier)?;
        self.store.set(HISTORY_KEY, &json)?;

        Ok(entry)
    }

    /// Last queried identifier, if any
    pub fn load_last_identifier(&self) -> Option<String> {
        match self.store.get(LAST_ID_KEY) {
            Ok(value) => value.filter(|id| !id.trim().is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read last identifier");
                None
            }
        }
    }

    /// Persisted history, oldest first; empty when missing or corrupt
    pub fn load_history(&self) -> Vec<QueryHistoryEntry> {
        match self.try_load_history() {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(error = %e, "treating query history as empty");
                Vec::new()
            }
        }
    }

    fn try_load_history(&self) -> Result<Vec<QueryHistoryEntry>, StorageError> {
        let Some(raw) = self.store.get(HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw)
            .map_err(|source| StorageError::Corrupt { key: HISTORY_KEY.to_string(), source })
    }

    /// Number of history entries dated today
    pub fn count_queries_today(&self) -> usize {
        let today = self.clock.now().format(DATE_FORMAT).to_string();
        self.load_history().iter().filter(|entry| entry.queried_at_date == today).count()
    }
}
