//! `PagePort` implementation over a live chromiumoxide page.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use dashmap::DashMap;
use serde_json::Value;
use tracing::{debug, trace};

use listcheck_actions::PagePort;
use listcheck_core_types::{CheckError, ElementHandle, Locator};

use crate::resolve::{tag_by_text, tag_by_text_scoped};

/// Only the dedicated "no node matched" variant means an empty result set.
/// Transport, protocol and session failures keep their error character.
fn is_no_match(err: &CdpError) -> bool {
    matches!(err, CdpError::NotFound)
}

const VISIBLE_FN: &str = r#"function() {
    const style = window.getComputedStyle(this);
    if (style.visibility === 'hidden' || style.display === 'none') return false;
    const rect = this.getBoundingClientRect();
    return rect.width > 0 && rect.height > 0;
}"#;

const INTERACTABLE_FN: &str = r#"function() {
    const style = window.getComputedStyle(this);
    if (style.visibility === 'hidden' || style.display === 'none') return false;
    if (style.pointerEvents === 'none' || this.disabled) return false;
    const rect = this.getBoundingClientRect();
    if (rect.width === 0 || rect.height === 0) return false;
    const hit = document.elementFromPoint(rect.left + rect.width / 2, rect.top + rect.height / 2);
    return hit === this || this.contains(hit) || (hit && hit.contains(this));
}"#;

/// One CDP page plus a registry translating opaque handles back to the
/// protocol's element objects. Handles go stale on navigation; the registry
/// is flushed then.
pub struct CdpPagePort {
    page: Page,
    elements: DashMap<u64, Arc<Element>>,
    next_id: AtomicU64,
}

impl CdpPagePort {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            elements: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }

    fn register(&self, elements: Vec<Element>) -> Vec<ElementHandle> {
        elements
            .into_iter()
            .map(|element| {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                self.elements.insert(id, Arc::new(element));
                ElementHandle(id)
            })
            .collect()
    }

    fn element(&self, handle: &ElementHandle) -> Result<Arc<Element>, CheckError> {
        self.elements
            .get(&handle.0)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| CheckError::page(format!("{handle} is not registered on this page")))
    }

    fn flush_registry(&self) {
        self.elements.clear();
    }

    async fn find_css(&self, selector: &str) -> Result<Vec<Element>, CheckError> {
        match self.page.find_elements(selector).await {
            Ok(elements) => Ok(elements),
            // The protocol reports "nothing matched" as `NotFound`; the port
            // contract is an empty result. Any other error is a real backend
            // failure and must surface, not feed the polling loop.
            Err(err) if is_no_match(&err) => Ok(Vec::new()),
            Err(err) => Err(CheckError::page(err.to_string())),
        }
    }

    async fn bool_probe(&self, handle: &ElementHandle, function: &str) -> Result<bool, CheckError> {
        let value = self.eval_on(handle, function).await?;
        Ok(value.as_bool().unwrap_or(false))
    }
}

#[async_trait]
impl PagePort for CdpPagePort {
    async fn goto(&self, url: &str) -> Result<(), CheckError> {
        debug!(url, "navigating");
        self.flush_registry();
        self.page
            .goto(url)
            .await
            .map_err(|err| CheckError::page(format!("goto {url} failed: {err}")))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|err| CheckError::page(format!("navigation to {url} failed: {err}")))?;
        Ok(())
    }

    async fn back(&self) -> Result<(), CheckError> {
        self.flush_registry();
        self.page
            .evaluate("window.history.back()")
            .await
            .map_err(|err| CheckError::page(format!("history back failed: {err}")))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|err| CheckError::page(format!("history navigation failed: {err}")))?;
        Ok(())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, CheckError> {
        let elements = match locator {
            Locator::Css { .. } | Locator::Field { .. } => {
                let selector = locator
                    .as_css()
                    .ok_or_else(|| CheckError::page("unresolvable locator"))?;
                self.find_css(&selector).await?
            }
            Locator::Text { content, exact } => {
                let tag = tag_by_text(content, *exact);
                self.page
                    .evaluate(tag.script)
                    .await
                    .map_err(|err| CheckError::page(format!("text tagging failed: {err}")))?;
                self.find_css(&tag.selector).await?
            }
        };
        trace!(%locator, count = elements.len(), "located");
        Ok(self.register(elements))
    }

    async fn find_within(
        &self,
        scope: &ElementHandle,
        locator: &Locator,
    ) -> Result<Vec<ElementHandle>, CheckError> {
        let elements = match locator {
            Locator::Css { .. } | Locator::Field { .. } => {
                let selector = locator
                    .as_css()
                    .ok_or_else(|| CheckError::page("unresolvable locator"))?;
                let scope_el = self.element(scope)?;
                match scope_el.find_elements(&*selector).await {
                    Ok(elements) => elements,
                    Err(err) if is_no_match(&err) => Vec::new(),
                    Err(err) => return Err(CheckError::page(err.to_string())),
                }
            }
            Locator::Text { content, exact } => {
                let tag = tag_by_text_scoped(content, *exact);
                {
                    let scope_el = self.element(scope)?;
                    scope_el
                        .call_js_fn(&tag.script, false)
                        .await
                        .map_err(|err| {
                            CheckError::page(format!("scoped text tagging failed: {err}"))
                        })?;
                }
                self.find_css(&tag.selector).await?
            }
        };
        Ok(self.register(elements))
    }

    async fn read_text(&self, handle: &ElementHandle) -> Result<String, CheckError> {
        let element = self.element(handle)?;
        let text = element
            .inner_text()
            .await
            .map_err(|err| CheckError::page(format!("text read on {handle} failed: {err}")))?;
        Ok(text.unwrap_or_default())
    }

    async fn is_visible(&self, handle: &ElementHandle) -> Result<bool, CheckError> {
        self.bool_probe(handle, VISIBLE_FN).await
    }

    async fn is_interactable(&self, handle: &ElementHandle) -> Result<bool, CheckError> {
        self.bool_probe(handle, INTERACTABLE_FN).await
    }

    async fn click(&self, handle: &ElementHandle) -> Result<(), CheckError> {
        let element = self.element(handle)?;
        element
            .click()
            .await
            .map_err(|err| CheckError::page(format!("click on {handle} failed: {err}")))?;
        Ok(())
    }

    async fn send_keys(&self, handle: &ElementHandle, text: &str) -> Result<(), CheckError> {
        let element = self.element(handle)?;
        element
            .focus()
            .await
            .map_err(|err| CheckError::page(format!("focus on {handle} failed: {err}")))?;
        element
            .type_str(text)
            .await
            .map_err(|err| CheckError::page(format!("typing into {handle} failed: {err}")))?;
        Ok(())
    }

    async fn eval(&self, script: &str) -> Result<Value, CheckError> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|err| CheckError::page(format!("script evaluation failed: {err}")))?;
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    async fn eval_on(&self, handle: &ElementHandle, function: &str) -> Result<Value, CheckError> {
        let element = self.element(handle)?;
        let returns = element
            .call_js_fn(function, false)
            .await
            .map_err(|err| CheckError::page(format!("script call on {handle} failed: {err}")))?;
        Ok(returns.result.value.unwrap_or(Value::Null))
    }
}
