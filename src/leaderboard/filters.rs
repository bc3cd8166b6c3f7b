use crate::browser::{Condition, PageWaiter};
use crate::error::BrowserError;
use crate::leaderboard::pagination::{PaginationConfig, ResultsPaginator};
use crate::leaderboard::selectors::FilterSelectors;
use crate::model::{FilterDimension, FilterSet};

/// One entry of a filter menu, copied out before any navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub label: String,
    pub link: String,
}

/// Collects `(option, athlete name)` pairs for one filter dimension.
///
/// A dimension whose menu cannot be opened is optional: it produces an empty set.
pub struct FilterCollector<'a> {
    waiter: PageWaiter<'a>,
    pagination: PaginationConfig,
}

impl<'a> FilterCollector<'a> {
    pub fn new(waiter: PageWaiter<'a>, pagination: PaginationConfig) -> Self {
        Self { waiter, pagination }
    }

    pub async fn collect(
        &self,
        listing_url: &str,
        dimension: FilterDimension,
        selectors: &FilterSelectors,
    ) -> FilterSet {
        tracing::info!("--- Collecting filter: {} ---", dimension);
        let mut set = FilterSet::empty(dimension);

        let options = match self.read_options(listing_url, selectors).await {
            Ok(Some(options)) => options,
            Ok(None) => {
                tracing::warn!("Could not find the '{}' filter. Skipping.", dimension);
                return set;
            }
            Err(e) => {
                tracing::warn!("Failed to open the '{}' filter: {}. Skipping.", dimension, e);
                return set;
            }
        };

        for option in &options {
            tracing::info!("Processing filter option '{}'...", option.label);
            if let Err(e) = self.collect_option(option, &mut set).await {
                tracing::warn!("Failed to process filter option '{}': {}", option.label, e);
            }
        }

        if set.is_empty() {
            tracing::warn!("Filter '{}' listed no athletes.", dimension);
        } else {
            tracing::info!("Filter '{}': {} athletes listed", dimension, set.records.len());
        }
        set
    }

    /// Opens the filter menu and reads every option with both a label and a link.
    ///
    /// Returns `Ok(None)` when the menu or its option list does not appear in time.
    pub async fn read_options(
        &self,
        listing_url: &str,
        selectors: &FilterSelectors,
    ) -> Result<Option<Vec<FilterOption>>, BrowserError> {
        let session = self.waiter.session();
        session.goto(listing_url).await?;

        if !self.waiter.click_when_ready(&selectors.menu).await? {
            return Ok(None);
        }
        if !self.waiter.wait_for(&selectors.options, Condition::Visible).await?.is_found() {
            return Ok(None);
        }

        let anchors = session.query(&selectors.option_links(), Condition::Present).await?;
        let options = anchors
            .into_iter()
            .filter_map(|anchor| {
                let link = anchor.href.filter(|href| !href.is_empty())?;
                if anchor.text.is_empty() {
                    return None;
                }
                Some(FilterOption {
                    label: anchor.text,
                    link,
                })
            })
            .collect();
        Ok(Some(options))
    }

    async fn collect_option(&self, option: &FilterOption, set: &mut FilterSet) -> Result<(), BrowserError> {
        let mut paginator = ResultsPaginator::names(self.waiter, option.link.as_str(), self.pagination.clone());
        while let Some(page) = paginator.next_page().await? {
            for name in page.items {
                set.push(option.label.as_str(), name);
            }
        }
        Ok(())
    }
}
