//! Run protocol: main traversal, filter traversals, merge, export.
//!
//! All steps share the single browser session and run strictly one after another.

use crate::browser::{PageWaiter, Session};
use crate::config::ScraperConfig;
use crate::error::{Error, Result};
use crate::export;
use crate::leaderboard::{
    AthleteTableCollector, FilterCollector, FilterSelectors, PaginationConfig, ResultsPaginator,
};
use crate::model::{AthleteRef, FilterDimension, FilterSet, Frame, LapTable, ATHLETE_COLUMN, FILTER_JOIN_KEY};
use std::path::Path;
use std::time::Duration;

/// Timing and paging knobs of one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub listing_url: String,
    pub main_timeout: Duration,
    pub filter_timeout: Duration,
    pub poll_interval: Duration,
    pub pagination: PaginationConfig,
}

impl From<&ScraperConfig> for RunSettings {
    fn from(config: &ScraperConfig) -> Self {
        Self {
            listing_url: config.url.clone(),
            main_timeout: config.wait_timeout(),
            filter_timeout: config.filter_wait_timeout(),
            poll_interval: config.poll_interval(),
            pagination: PaginationConfig {
                max_pages: config.max_pages,
            },
        }
    }
}

/// Counters reported at the end of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub athletes_visited: usize,
    pub tables_collected: usize,
    pub rows: usize,
    pub columns: usize,
}

/// Output of the main traversal.
#[derive(Debug, Clone)]
pub struct MainDataset {
    pub frame: Frame,
    pub athletes_visited: usize,
    pub tables_collected: usize,
}

pub struct Orchestrator<'a> {
    session: &'a dyn Session,
    settings: RunSettings,
}

impl<'a> Orchestrator<'a> {
    pub fn new(session: &'a dyn Session, settings: RunSettings) -> Self {
        Self { session, settings }
    }

    fn main_waiter(&self) -> PageWaiter<'a> {
        PageWaiter::new(self.session, self.settings.main_timeout, self.settings.poll_interval)
    }

    fn filter_waiter(&self) -> PageWaiter<'a> {
        PageWaiter::new(self.session, self.settings.filter_timeout, self.settings.poll_interval)
    }

    /// Step 1: visits every listed athlete and stacks their tables.
    ///
    /// # Errors
    ///
    /// [`Error::NoData`] when not a single table was collected.
    pub async fn collect_main(&self) -> Result<MainDataset> {
        tracing::info!("--- Collecting athlete performance data ---");
        let waiter = self.main_waiter();
        let collector = AthleteTableCollector::new(waiter);
        let mut paginator = ResultsPaginator::athletes(
            waiter,
            self.settings.listing_url.as_str(),
            self.settings.pagination.clone(),
        );

        let mut frames = Vec::new();
        let mut athletes_visited = 0;

        loop {
            let page = match paginator.next_page().await {
                Ok(Some(page)) => page,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Failed to read listing page: {}. Stopping.", e);
                    break;
                }
            };
            tracing::info!("Found {} athletes on page {}.", page.items.len(), page.number);

            for athlete in &page.items {
                tracing::info!("  -> Collecting data for: {}", athlete.name);
                athletes_visited += 1;
                match self.visit_athlete(&collector, athlete).await {
                    Ok(Some(table)) if !table.is_empty() => {
                        frames.push(Frame::from_athlete_table(&athlete.name, &table));
                    }
                    Ok(_) => {
                        tracing::warn!("  -> No usable table collected for {}", athlete.name);
                    }
                    Err(e) => {
                        tracing::warn!("  -> Failed to process athlete {}: {}", athlete.name, e);
                    }
                }
            }
        }

        if frames.is_empty() {
            tracing::error!("No main data was collected.");
            return Err(Error::NoData);
        }

        let tables_collected = frames.len();
        tracing::info!("--- Athlete performance data collected ({} tables) ---", tables_collected);
        Ok(MainDataset {
            frame: Frame::concat(frames),
            athletes_visited,
            tables_collected,
        })
    }

    async fn visit_athlete(
        &self,
        collector: &AthleteTableCollector<'_>,
        athlete: &AthleteRef,
    ) -> Result<Option<LapTable>> {
        self.session.goto(&athlete.profile_link).await?;
        collector.collect().await
    }

    /// Step 2: one filter traversal per dimension. Never fails; unreadable dimensions are empty.
    pub async fn collect_filters(&self) -> Vec<FilterSet> {
        let collector = FilterCollector::new(self.filter_waiter(), self.settings.pagination.clone());
        let mut sets = Vec::with_capacity(FilterDimension::ALL.len());
        for dimension in FilterDimension::ALL {
            let selectors = FilterSelectors::for_dimension(dimension);
            sets.push(
                collector
                    .collect(&self.settings.listing_url, dimension, &selectors)
                    .await,
            );
        }
        sets
    }

    /// Step 3: left-joins each filter set on the athlete name and drops the join keys.
    pub fn merge(main: Frame, filters: &[FilterSet]) -> Result<Frame> {
        tracing::info!("--- Merging all collected data ---");
        let mut merged = main;
        for set in filters {
            merged = merged.left_join(&Frame::from_filter_set(set), ATHLETE_COLUMN, FILTER_JOIN_KEY)?;
        }
        merged.drop_columns_with_prefix(FILTER_JOIN_KEY);
        Ok(merged)
    }

    /// Steps 1 to 3.
    pub async fn run(&self) -> Result<(Frame, RunSummary)> {
        let main = self.collect_main().await?;
        let filters = self.collect_filters().await;
        let merged = Self::merge(main.frame, &filters)?;

        let summary = RunSummary {
            athletes_visited: main.athletes_visited,
            tables_collected: main.tables_collected,
            rows: merged.len(),
            columns: merged.columns().len(),
        };
        Ok((merged, summary))
    }

    /// Steps 1 to 4. Nothing is written unless every earlier step succeeded.
    pub async fn run_and_export(&self, output: &Path) -> Result<RunSummary> {
        let (merged, summary) = self.run().await?;
        export::write_csv(&merged, output)?;
        tracing::info!("Done. Final table saved to '{}'", output.display());
        tracing::debug!("Preview:\n{}", merged.preview(5));
        Ok(summary)
    }
}
