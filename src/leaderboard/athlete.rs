use crate::browser::{Condition, ElementSnapshot, PageWaiter, WaitOutcome};
use crate::error::Result;
use crate::leaderboard::selectors::{LAPS_TAB, LAPS_TABLE, MAIN_TABLE};
use crate::leaderboard::table::TableExtractor;
use crate::model::LapTable;

/// Reads the split table of the athlete page currently loaded in the session.
///
/// Prefers the laps view. When its tab or table does not show up within the wait
/// window, falls back to the generic results table. An athlete with neither yields
/// `Ok(None)`, which is an expected outcome.
pub struct AthleteTableCollector<'a> {
    waiter: PageWaiter<'a>,
}

impl<'a> AthleteTableCollector<'a> {
    pub fn new(waiter: PageWaiter<'a>) -> Self {
        Self { waiter }
    }

    pub async fn collect(&self) -> Result<Option<LapTable>> {
        let table = match self.try_laps().await? {
            Some(table) => table,
            None => {
                tracing::info!("  -> Laps tab not found. Looking for the main table.");
                match self.fallback_main().await? {
                    Some(table) => table,
                    None => {
                        tracing::warn!("  -> No data table found for this athlete.");
                        return Ok(None);
                    }
                }
            }
        };

        Ok(TableExtractor::extract(&table)?)
    }

    async fn try_laps(&self) -> Result<Option<ElementSnapshot>> {
        if !self.waiter.click_when_ready(LAPS_TAB).await? {
            return Ok(None);
        }
        Ok(self.waiter.wait_for(LAPS_TABLE, Condition::Visible).await?.first())
    }

    async fn fallback_main(&self) -> Result<Option<ElementSnapshot>> {
        match self.waiter.wait_for(MAIN_TABLE, Condition::Visible).await? {
            WaitOutcome::Found(tables) => Ok(tables.into_iter().next()),
            WaitOutcome::NotFound => Ok(None),
        }
    }
}
