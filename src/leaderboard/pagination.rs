//! Page-by-page walker over leaderboard listings.
//!
//! A listing has no total page count, so the walk ends at the first page that does not
//! render the results marker within the wait window, or that renders it without any
//! athlete link. Items are copied out of the page before the caller navigates anywhere
//! else.

use crate::browser::{Condition, ElementSnapshot, PageWaiter, WaitOutcome};
use crate::error::BrowserError;
use crate::leaderboard::selectors::{ATHLETE_LINKS, RESULTS_MARKER};
use crate::model::AthleteRef;

/// Type alias for the function turning athlete anchors into page items.
pub type ParseFn<'a, T> = Box<dyn Fn(&[ElementSnapshot]) -> Vec<T> + Send + Sync + 'a>;

/// Configuration for pagination behavior.
#[derive(Debug, Clone, Default)]
pub struct PaginationConfig {
    /// Optional cap on the number of pages read from one listing
    pub max_pages: Option<usize>,
}

/// Trait for types that can be collected across multiple pages.
pub trait PageItem: Clone + PartialEq {
    /// Returns a key that identifies this item for duplicate detection.
    /// Used to detect when a listing serves its last page again for out-of-range numbers.
    fn dedup_key(&self) -> String;
}

impl PageItem for AthleteRef {
    fn dedup_key(&self) -> String {
        format!("{}|{}", self.name, self.profile_link)
    }
}

impl PageItem for String {
    fn dedup_key(&self) -> String {
        self.clone()
    }
}

/// Items read from one listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage<T> {
    pub number: usize,
    pub items: Vec<T>,
}

/// Builds the URL of `page` for a listing.
///
/// Page 1 is the listing itself. Later pages add a `page` parameter, joined with `&`
/// when the listing already carries a query string.
pub fn page_url(listing_url: &str, page: usize) -> String {
    if page <= 1 {
        return listing_url.to_string();
    }
    let separator = if listing_url.contains('?') { '&' } else { '?' };
    format!("{}{}page={}", listing_url, separator, page)
}

/// Athlete anchors with both a name and a link, in document order.
pub fn athlete_refs(anchors: &[ElementSnapshot]) -> Vec<AthleteRef> {
    anchors
        .iter()
        .filter_map(|anchor| {
            let link = anchor.href.as_deref().filter(|href| !href.is_empty())?;
            Some(AthleteRef {
                name: anchor.text.clone(),
                profile_link: link.to_string(),
            })
        })
        .collect()
}

/// Athlete display names, in document order.
pub fn athlete_names(anchors: &[ElementSnapshot]) -> Vec<String> {
    anchors.iter().map(|anchor| anchor.text.clone()).collect()
}

/// Lazy, single-pass sequence of listing pages.
///
/// Each call to [`next_page`](Self::next_page) navigates the shared session, so the
/// sequence cannot be restarted and must be consumed in order.
pub struct ResultsPaginator<'a, T> {
    waiter: PageWaiter<'a>,
    listing_url: String,
    config: PaginationConfig,
    parse_fn: ParseFn<'a, T>,
    next: usize,
    last_keys: Vec<String>,
    finished: bool,
}

impl<'a> ResultsPaginator<'a, AthleteRef> {
    /// Paginator over the athletes of a listing, with their profile links.
    pub fn athletes(waiter: PageWaiter<'a>, listing_url: impl Into<String>, config: PaginationConfig) -> Self {
        Self::new(waiter, listing_url, config, athlete_refs)
    }
}

impl<'a> ResultsPaginator<'a, String> {
    /// Paginator over athlete names only.
    pub fn names(waiter: PageWaiter<'a>, listing_url: impl Into<String>, config: PaginationConfig) -> Self {
        Self::new(waiter, listing_url, config, athlete_names)
    }
}

impl<'a, T: PageItem> ResultsPaginator<'a, T> {
    pub fn new<P>(
        waiter: PageWaiter<'a>,
        listing_url: impl Into<String>,
        config: PaginationConfig,
        parse_fn: P,
    ) -> Self
    where
        P: Fn(&[ElementSnapshot]) -> Vec<T> + Send + Sync + 'a,
    {
        Self {
            waiter,
            listing_url: listing_url.into(),
            config,
            parse_fn: Box::new(parse_fn),
            next: 1,
            last_keys: Vec::new(),
            finished: false,
        }
    }

    /// Navigates to the next page and returns its items, or `None` once the listing ends.
    ///
    /// # Errors
    ///
    /// Navigation or DOM query failures. The sequence is finished afterwards.
    pub async fn next_page(&mut self) -> Result<Option<ListingPage<T>>, BrowserError> {
        if self.finished {
            return Ok(None);
        }
        let result = self.read_page().await;
        if !matches!(result, Ok(Some(_))) {
            self.finished = true;
        }
        result
    }

    async fn read_page(&mut self) -> Result<Option<ListingPage<T>>, BrowserError> {
        let number = self.next;
        if let Some(max_pages) = self.config.max_pages {
            if number > max_pages {
                tracing::info!("Reached the page limit ({}) for {}", max_pages, self.listing_url);
                return Ok(None);
            }
        }

        let url = page_url(&self.listing_url, number);
        if number > 1 {
            tracing::info!("Opening page {}: {}", number, url);
        }
        let session = self.waiter.session();
        session.goto(&url).await?;

        if let WaitOutcome::NotFound = self.waiter.wait_for(RESULTS_MARKER, Condition::Present).await? {
            tracing::info!(
                "Page {} did not show the results table in time or does not exist. Done.",
                number
            );
            return Ok(None);
        }

        // copy everything out before anyone navigates away
        let anchors = session.query(ATHLETE_LINKS, Condition::Present).await?;
        let items = (self.parse_fn)(&anchors);
        if items.is_empty() {
            tracing::info!("No athletes found on page {}. Done.", number);
            return Ok(None);
        }

        let keys: Vec<String> = items.iter().map(|item| item.dedup_key()).collect();
        if keys == self.last_keys {
            tracing::warn!("Page {} repeats the previous page. Done.", number);
            return Ok(None);
        }
        self.last_keys = keys;
        self.next += 1;

        Ok(Some(ListingPage { number, items }))
    }
}
