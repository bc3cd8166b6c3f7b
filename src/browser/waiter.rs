//! Bounded polling waits over a [`Session`].

use crate::browser::{Condition, ElementSnapshot, Session};
use crate::error::BrowserError;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Result of a bounded wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The condition held; carries every matching element in document order.
    Found(Vec<ElementSnapshot>),
    /// The timeout elapsed first.
    NotFound,
}

impl WaitOutcome {
    /// Returns the first matched element, if any.
    pub fn first(self) -> Option<ElementSnapshot> {
        match self {
            WaitOutcome::Found(elements) => elements.into_iter().next(),
            WaitOutcome::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, WaitOutcome::Found(_))
    }
}

/// Polls a session at a fixed interval until a condition holds or the timeout elapses.
///
/// A timeout is reported as [`WaitOutcome::NotFound`], never as an error. There is no
/// retry after the window closes.
#[derive(Clone, Copy)]
pub struct PageWaiter<'a> {
    session: &'a dyn Session,
    timeout: Duration,
    poll_interval: Duration,
}

impl<'a> PageWaiter<'a> {
    pub fn new(session: &'a dyn Session, timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            session,
            timeout,
            poll_interval,
        }
    }

    pub fn session(&self) -> &'a dyn Session {
        self.session
    }

    /// Waits until at least one element matching `selector` satisfies `condition`.
    ///
    /// # Errors
    ///
    /// Only non-transient session failures (closed browser, failed interaction) are
    /// returned. Script failures while the document is changing count as "not yet".
    pub async fn wait_for(
        &self,
        selector: &str,
        condition: Condition,
    ) -> Result<WaitOutcome, BrowserError> {
        let deadline = Instant::now() + self.timeout;

        loop {
            match self.session.query(selector, condition).await {
                Ok(elements) if !elements.is_empty() => {
                    return Ok(WaitOutcome::Found(elements));
                }
                Ok(_) => {}
                Err(e) if e.is_transient() => {
                    tracing::debug!("Query for '{}' not ready: {}", selector, e);
                }
                Err(e) => return Err(e),
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::debug!(
                    "Gave up waiting for '{}' to be {} after {:?}",
                    selector,
                    condition,
                    self.timeout
                );
                return Ok(WaitOutcome::NotFound);
            }
            sleep(self.poll_interval.min(deadline - now)).await;
        }
    }

    /// Waits for `selector` to become clickable, then clicks it.
    ///
    /// Returns `false` without clicking when the element never became clickable.
    pub async fn click_when_ready(&self, selector: &str) -> Result<bool, BrowserError> {
        match self.wait_for(selector, Condition::Clickable).await? {
            WaitOutcome::Found(_) => {
                self.session.click(selector).await?;
                Ok(true)
            }
            WaitOutcome::NotFound => Ok(false),
        }
    }
}
