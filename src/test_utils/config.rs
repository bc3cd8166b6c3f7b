//! Run settings with millisecond waits, so absent elements time out quickly.

use crate::leaderboard::PaginationConfig;
use crate::orchestrator::RunSettings;
use std::time::Duration;

/// Builder for [`RunSettings`] used against a `FakeSession`.
#[derive(Debug)]
pub struct TestRunSettingsBuilder {
    listing_url: String,
    main_timeout: Duration,
    filter_timeout: Duration,
    poll_interval: Duration,
    max_pages: Option<usize>,
}

impl TestRunSettingsBuilder {
    pub fn new(listing_url: impl Into<String>) -> Self {
        Self {
            listing_url: listing_url.into(),
            main_timeout: Duration::from_millis(30),
            filter_timeout: Duration::from_millis(20),
            poll_interval: Duration::from_millis(5),
            max_pages: None,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub fn build(self) -> RunSettings {
        RunSettings {
            listing_url: self.listing_url,
            main_timeout: self.main_timeout,
            filter_timeout: self.filter_timeout,
            poll_interval: self.poll_interval,
            pagination: PaginationConfig {
                max_pages: self.max_pages,
            },
        }
    }
}

pub fn fast_settings(listing_url: &str) -> RunSettings {
    TestRunSettingsBuilder::new(listing_url).build()
}
