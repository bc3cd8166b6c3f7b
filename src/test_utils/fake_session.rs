//! In-memory [`Session`] serving canned HTML per URL.
//!
//! Visibility follows the `hidden` attribute and inline `display:none` on the element
//! or any ancestor. `disabled` elements are never clickable. Clicking an element with
//! an `href` navigates to it, like following a link.

use crate::browser::{Condition, ElementSnapshot, Session};
use crate::error::BrowserError;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

const BLANK: &str = "<html><head></head><body></body></html>";

#[derive(Debug, Default)]
struct State {
    current: String,
    history: Vec<String>,
    clicks: Vec<String>,
    transient_failures: usize,
    closed: bool,
}

#[derive(Debug, Default)]
pub struct FakeSession {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    state: Mutex<State>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `html` at `url`. Unknown URLs load an empty document.
    pub fn with_page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_string(), html);
        self
    }

    /// The next `count` queries fail with a script error.
    pub fn with_transient_failures(mut self, count: usize) -> Self {
        self.state.get_mut().unwrap().transient_failures = count;
        self
    }

    /// Navigating to `url` fails. The attempt still shows up in [`history`](Self::history).
    pub fn with_failing_navigation(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Every URL navigated to, including failed attempts and followed clicks.
    pub fn history(&self) -> Vec<String> {
        self.state.lock().unwrap().history.clone()
    }

    /// Selectors successfully clicked, in order.
    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().unwrap().clicks.clone()
    }

    fn navigate(&self, state: &mut State, url: &str) -> Result<(), BrowserError> {
        if state.closed {
            return Err(BrowserError::Closed);
        }
        state.history.push(url.to_string());
        if self.failing.contains(url) {
            return Err(BrowserError::navigation(url, "net::ERR_CONNECTION_REFUSED"));
        }
        state.current = self
            .pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| BLANK.to_string());
        Ok(())
    }

    fn matching(state: &State, selector: &str, condition: Condition) -> Result<Vec<ElementSnapshot>, BrowserError> {
        let selector = Selector::parse(selector)
            .map_err(|e| BrowserError::Script(format!("invalid selector '{}': {}", selector, e)))?;
        let document = Html::parse_document(&state.current);
        let found = document
            .select(&selector)
            .filter(|element| satisfies(*element, condition))
            .map(snapshot)
            .collect();
        Ok(found)
    }
}

fn is_hidden(element: ElementRef) -> bool {
    let value = element.value();
    if value.attr("hidden").is_some() {
        return true;
    }
    value
        .attr("style")
        .map(|style| {
            let style: String = style.chars().filter(|c| !c.is_whitespace()).collect();
            style.to_lowercase().contains("display:none")
        })
        .unwrap_or(false)
}

fn satisfies(element: ElementRef, condition: Condition) -> bool {
    let visible = || !is_hidden(element) && !element.ancestors().filter_map(ElementRef::wrap).any(is_hidden);
    match condition {
        Condition::Present => true,
        Condition::Visible => visible(),
        Condition::Clickable => visible() && element.value().attr("disabled").is_none(),
    }
}

fn snapshot(element: ElementRef) -> ElementSnapshot {
    ElementSnapshot {
        text: element
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" "),
        href: element.value().attr("href").map(str::to_string),
        outer_html: element.html(),
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        let mut state = self.state.lock().unwrap();
        self.navigate(&mut state, url)
    }

    async fn query(
        &self,
        selector: &str,
        condition: Condition,
    ) -> Result<Vec<ElementSnapshot>, BrowserError> {
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return Err(BrowserError::Closed);
        }
        if state.transient_failures > 0 {
            state.transient_failures -= 1;
            return Err(BrowserError::Script("document is being replaced".to_string()));
        }
        Self::matching(&state, selector, condition)
    }

    async fn click(&self, selector: &str) -> Result<(), BrowserError> {
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return Err(BrowserError::Closed);
        }
        let target = Self::matching(&state, selector, Condition::Clickable)?
            .into_iter()
            .next()
            .ok_or_else(|| BrowserError::interaction(selector, "no clickable element"))?;

        state.clicks.push(selector.to_string());
        match target.href.filter(|href| !href.is_empty()) {
            Some(href) => self.navigate(&mut state, &href),
            None => Ok(()),
        }
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.state.lock().unwrap().closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::html::page;

    #[tokio::test]
    async fn click_follows_links_and_ignores_plain_buttons() {
        let session = FakeSession::new()
            .with_page("a", page(r#"<button id="b">B</button><a id="l" href="b">L</a>"#))
            .with_page("b", page("<p>b</p>"));
        session.goto("a").await.unwrap();

        session.click("#b").await.unwrap();
        session.click("#l").await.unwrap();

        assert_eq!(session.history(), vec!["a", "b"]);
        assert_eq!(session.clicks(), vec!["#b", "#l"]);
    }

    #[tokio::test]
    async fn hidden_ancestor_hides_element() {
        let session = FakeSession::new().with_page("a", page(r#"<div hidden><span>x</span></div>"#));
        session.goto("a").await.unwrap();

        assert_eq!(session.query("span", Condition::Present).await.unwrap().len(), 1);
        assert!(session.query("span", Condition::Visible).await.unwrap().is_empty());
        assert!(session.click("span").await.is_err());
    }
}
