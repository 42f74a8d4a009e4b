//! Runtime configuration assembled from command-line flags and environment

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::session::{FileStore, PageAddress, SessionPersistence};
use crate::store::{RecordStore, load_store};
use crate::suggest::{DEFAULT_SUGGESTION_LIMIT, MatchMode};
use crate::system::SystemOptions;

/// Address that shareable links are built on when none is configured
pub const DEFAULT_BASE_URL: &str = "https://move.example.com/";
pub const DEFAULT_DELAY_MS: u64 = 300;
pub const LOG_FILENAME: &str = "scan-move.log";

#[derive(Debug, Clone)]
pub struct Config {
    /// Record data file; the bundled data set is used when absent
    pub data_file: Option<PathBuf>,
    pub state_dir: PathBuf,
    pub base_url: String,
    pub delay: Duration,
    pub auto_query: bool,
}

impl Config {
    pub fn new(state_dir: PathBuf) -> Self {
        Self {
            data_file: None,
            state_dir,
            base_url: DEFAULT_BASE_URL.to_string(),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            auto_query: false,
        }
    }

    pub fn load_store(&self) -> Result<Arc<RecordStore>> {
        let store = match &self.data_file {
            Some(path) => load_store(path)?,
            None => RecordStore::builtin()?,
        };
        Ok(Arc::new(store))
    }

    pub fn open_session(&self) -> Result<SessionPersistence<FileStore>> {
        Ok(SessionPersistence::new(FileStore::open(&self.state_dir)?))
    }

    pub fn log_file(&self) -> PathBuf {
        self.state_dir.join(LOG_FILENAME)
    }

    /// Options for a [`crate::QuerySystem`] on the base URL page, started from
    /// a scanned `address` when one is given
    pub fn system_options(&self, address: Option<&str>, match_mode: MatchMode) -> Result<SystemOptions> {
        let page = PageAddress::parse(&self.base_url).context("Invalid base URL")?;
        let address = match address {
            Some(scanned) => page.scanned(scanned).context("Invalid page address")?,
            None => page,
        };

        Ok(SystemOptions {
            delay: self.delay,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            match_mode,
            auto_query: self.auto_query,
            address,
        })
    }
}
