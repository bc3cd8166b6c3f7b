//! Browser capability interface.
//!
//! The scraping components only talk to a [`Session`]; the Chromium implementation
//! lives in [`chromium`] and the test double in `test_utils::fake_session`.

mod chromium;
mod waiter;

pub use chromium::ChromiumSession;
pub use waiter::{PageWaiter, WaitOutcome};

use crate::error::BrowserError;
use async_trait::async_trait;
use serde_derive::Deserialize;
use std::fmt;

/// State an element has to reach before a wait is satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// The element exists in the DOM.
    Present,
    /// The element exists and is rendered.
    Visible,
    /// The element is visible and accepts input.
    Clickable,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Condition::Present => write!(f, "present"),
            Condition::Visible => write!(f, "visible"),
            Condition::Clickable => write!(f, "clickable"),
        }
    }
}

/// Plain values copied out of a DOM element.
///
/// Snapshots stay valid after the page they came from has been navigated away from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ElementSnapshot {
    /// Rendered text, trimmed.
    pub text: String,
    /// Resolved link target for anchors.
    #[serde(default)]
    pub href: Option<String>,
    /// Serialized markup of the element and its subtree.
    pub outer_html: String,
}

/// A single controllable browser page.
#[async_trait]
pub trait Session: Send + Sync {
    /// Navigates the page and returns once the new document has loaded.
    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    /// Returns every element matching `selector` that currently satisfies `condition`.
    ///
    /// Never waits; polling is the job of [`PageWaiter`].
    async fn query(
        &self,
        selector: &str,
        condition: Condition,
    ) -> Result<Vec<ElementSnapshot>, BrowserError>;

    /// Clicks the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<(), BrowserError>;

    /// Releases the browser. Further calls fail with [`BrowserError::Closed`].
    async fn close(&self) -> Result<(), BrowserError>;
}
