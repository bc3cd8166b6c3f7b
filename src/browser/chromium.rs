//! [`Session`] backed by a Chromium instance driven over the DevTools protocol.

use crate::browser::{Condition, ElementSnapshot, Session};
use crate::config::BrowserConfig;
use crate::error::BrowserError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub struct ChromiumSession {
    browser: Mutex<Option<Browser>>,
    page: Page,
    handler: JoinHandle<()>,
    closed: AtomicBool,
}

impl ChromiumSession {
    /// Launches the browser and opens the single page every component shares.
    pub async fn launch(config: &BrowserConfig) -> Result<Self, BrowserError> {
        let mut builder = CdpConfig::builder()
            .request_timeout(Duration::from_secs(config.request_timeout_sec));

        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder.build().map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(cdp_config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        tracing::debug!("Browser launched (headless={})", config.headless);

        Ok(Self {
            browser: Mutex::new(Some(browser)),
            page,
            handler,
            closed: AtomicBool::new(false),
        })
    }

    fn ensure_open(&self) -> Result<(), BrowserError> {
        if self.closed.load(Ordering::SeqCst) {
            Err(BrowserError::Closed)
        } else {
            Ok(())
        }
    }
}

/// Wraps `body` in a script where `candidates` holds every element matching `selector`
/// and `satisfies(el)` tests `condition`.
fn matching_script(selector: &str, condition: Condition, body: &str) -> String {
    // serde_json string encoding is a valid JS string literal
    let selector = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
    let condition = serde_json::to_string(&condition.to_string())
        .unwrap_or_else(|_| "\"present\"".to_string());
    format!(
        r#"(() => {{
    const condition = {condition};
    const visible = (el) => {{
        const style = window.getComputedStyle(el);
        const rect = el.getBoundingClientRect();
        return style.display !== 'none' && style.visibility !== 'hidden'
            && (rect.width > 0 || rect.height > 0);
    }};
    const enabled = (el) => !el.disabled
        && el.getAttribute('aria-disabled') !== 'true'
        && window.getComputedStyle(el).pointerEvents !== 'none';
    const satisfies = (el) => condition === 'present'
        || (visible(el) && (condition !== 'clickable' || enabled(el)));
    const candidates = Array.from(document.querySelectorAll({selector}));
    {body}
}})()"#
    )
}

/// Builds the expression that snapshots every element matching `selector` under `condition`.
fn query_script(selector: &str, condition: Condition) -> String {
    matching_script(
        selector,
        condition,
        r#"return candidates.filter(satisfies).map((el) => ({
        text: (el.innerText || el.textContent || '').trim(),
        href: typeof el.href === 'string' ? el.href : el.getAttribute('href'),
        outer_html: el.outerHTML,
    }));"#,
    )
}

/// Builds the expression returning the document-order index of the first clickable
/// match of `selector`, or -1.
fn clickable_index_script(selector: &str) -> String {
    matching_script(
        selector,
        Condition::Clickable,
        "return candidates.findIndex(satisfies);",
    )
}

#[async_trait]
impl Session for ChromiumSession {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.ensure_open()?;
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::navigation(url, e))?;
        Ok(())
    }

    async fn query(
        &self,
        selector: &str,
        condition: Condition,
    ) -> Result<Vec<ElementSnapshot>, BrowserError> {
        self.ensure_open()?;
        self.page
            .evaluate(query_script(selector, condition))
            .await
            .map_err(|e| BrowserError::Script(e.to_string()))?
            .into_value::<Vec<ElementSnapshot>>()
            .map_err(|e| BrowserError::Script(e.to_string()))
    }

    async fn click(&self, selector: &str) -> Result<(), BrowserError> {
        self.ensure_open()?;
        let index = self
            .page
            .evaluate(clickable_index_script(selector))
            .await
            .map_err(|e| BrowserError::Script(e.to_string()))?
            .into_value::<i64>()
            .map_err(|e| BrowserError::Script(e.to_string()))?;
        let index = usize::try_from(index)
            .map_err(|_| BrowserError::interaction(selector, "no clickable element"))?;

        // same query, same document order as the script above
        let mut elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| BrowserError::interaction(selector, e))?;
        if index >= elements.len() {
            return Err(BrowserError::interaction(selector, "element detached before click"));
        }
        elements
            .swap_remove(index)
            .click()
            .await
            .map_err(|e| BrowserError::interaction(selector, e))?;
        Ok(())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let mut guard = self.browser.lock().await;
        if let Some(mut browser) = guard.take() {
            let closed = browser.close().await;
            // reap the child even if the close command was rejected
            let _ = browser.wait().await;
            self.handler.abort();
            closed.map_err(|e| BrowserError::Close(e.to_string()))?;
        }
        Ok(())
    }
}
