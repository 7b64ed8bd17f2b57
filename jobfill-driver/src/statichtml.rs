use crate::backend::{ElementHandle, PageDriver};
use crate::error::{DriverError, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Written-but-not-rendered state for one element. The HTML itself is
/// never mutated, so re-discovery on the same page is side-effect-free.
#[derive(Debug, Default, Clone)]
struct NodeState {
    text: Option<String>,
    selected: Option<usize>,
    checked: Option<bool>,
}

/// Offline backend over pre-loaded HTML fixtures. Used for dry runs and
/// for exercising the fill engine without a browser.
///
/// Element handles are the node's position in document traversal order,
/// which is stable across repeated queries of the same page.
pub struct StaticBackend {
    pages: HashMap<String, String>,
    current: Option<String>,
    state: Mutex<HashMap<usize, NodeState>>,
}

impl StaticBackend {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            current: None,
            state: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    pub fn add_page(&mut self, url: impl Into<String>, html: impl Into<String>) {
        self.pages.insert(url.into(), html.into());
    }

    fn document(&self) -> Result<Html> {
        let url = self
            .current
            .as_ref()
            .ok_or_else(|| DriverError::Session("no page loaded".to_string()))?;
        let html = self
            .pages
            .get(url)
            .ok_or_else(|| DriverError::Session(format!("page vanished: {}", url)))?;
        Ok(Html::parse_document(html))
    }

    fn node_index(document: &Html, target: scraper::ElementRef<'_>) -> usize {
        document
            .tree
            .nodes()
            .position(|n| n.id() == target.id())
            .unwrap_or(0)
    }

    fn parse_handle(el: &ElementHandle) -> Result<usize> {
        el.raw()
            .parse::<usize>()
            .map_err(|_| DriverError::NoSuchElement(format!("bad handle: {}", el.raw())))
    }

    /// Run `f` on the element behind `el` in the current document.
    fn with_element<T>(
        &self,
        el: &ElementHandle,
        f: impl FnOnce(scraper::ElementRef<'_>) -> T,
    ) -> Result<T> {
        let index = Self::parse_handle(el)?;
        let document = self.document()?;
        let node = document
            .tree
            .nodes()
            .nth(index)
            .ok_or_else(|| DriverError::NoSuchElement(format!("no node at index {}", index)))?;
        let element = scraper::ElementRef::wrap(node)
            .ok_or_else(|| DriverError::NoSuchElement(format!("node {} is not an element", index)))?;
        Ok(f(element))
    }

    fn labels_of(element: scraper::ElementRef<'_>) -> Vec<String> {
        let option_selector = Selector::parse("option").expect("static selector");
        element
            .select(&option_selector)
            .map(|o| o.text().collect::<String>().trim().to_string())
            .collect()
    }

    /// Text written into an element by a fill pass, if any. Test/inspection
    /// hook; not part of the `PageDriver` surface.
    pub fn entered_text(&self, el: &ElementHandle) -> Option<String> {
        let index = Self::parse_handle(el).ok()?;
        self.state.lock().unwrap().get(&index)?.text.clone()
    }

    /// Label of the option selected by a fill pass, if any.
    pub fn selected_label(&self, el: &ElementHandle) -> Option<String> {
        let index = Self::parse_handle(el).ok()?;
        let selected = self.state.lock().unwrap().get(&index)?.selected?;
        self.with_element(el, |element| Self::labels_of(element).get(selected).cloned())
            .ok()
            .flatten()
    }
}

impl Default for StaticBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageDriver for StaticBackend {
    async fn goto(&mut self, url: &str) -> Result<()> {
        if !self.pages.contains_key(url) {
            return Err(DriverError::Navigation(format!("no fixture for {}", url)));
        }
        debug!("Static backend switching to {}", url);
        self.current = Some(url.to_string());
        self.state.lock().unwrap().clear();
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        self.current
            .clone()
            .ok_or_else(|| DriverError::Session("no page loaded".to_string()))
    }

    async fn dom_ready(&self, _timeout: Duration) -> Result<bool> {
        Ok(true)
    }

    async fn query(&self, selector: &str) -> Result<Option<ElementHandle>> {
        let parsed = Selector::parse(selector)
            .map_err(|e| DriverError::InvalidSelector(format!("{}: {}", selector, e)))?;
        let document = self.document()?;
        Ok(document
            .select(&parsed)
            .next()
            .map(|element| ElementHandle::new(Self::node_index(&document, element).to_string())))
    }

    async fn tag_name(&self, el: &ElementHandle) -> Result<String> {
        self.with_element(el, |element| element.value().name().to_lowercase())
    }

    async fn attribute(&self, el: &ElementHandle, name: &str) -> Result<Option<String>> {
        self.with_element(el, |element| {
            element.value().attr(name).map(|v| v.to_string())
        })
    }

    async fn set_text(&self, el: &ElementHandle, value: &str) -> Result<()> {
        let index = Self::parse_handle(el)?;
        // Overwrite, not append: the contract is clear-then-write.
        self.state
            .lock()
            .unwrap()
            .entry(index)
            .or_default()
            .text = Some(value.to_string());
        Ok(())
    }

    async fn option_labels(&self, el: &ElementHandle) -> Result<Vec<String>> {
        self.with_element(el, Self::labels_of)
    }

    async fn select_option(&self, el: &ElementHandle, index: usize) -> Result<()> {
        let count = self.with_element(el, |element| Self::labels_of(element).len())?;
        if index >= count {
            return Err(DriverError::NoSuchElement(format!(
                "select has no option at index {}",
                index
            )));
        }
        let node = Self::parse_handle(el)?;
        self.state
            .lock()
            .unwrap()
            .entry(node)
            .or_default()
            .selected = Some(index);
        Ok(())
    }

    async fn is_checked(&self, el: &ElementHandle) -> Result<bool> {
        let index = Self::parse_handle(el)?;
        if let Some(checked) = self.state.lock().unwrap().get(&index).and_then(|s| s.checked) {
            return Ok(checked);
        }
        // Fall back to the markup's initial state.
        self.with_element(el, |element| element.value().attr("checked").is_some())
    }

    async fn set_checked(&self, el: &ElementHandle, want: bool) -> Result<()> {
        let index = Self::parse_handle(el)?;
        self.state
            .lock()
            .unwrap()
            .entry(index)
            .or_default()
            .checked = Some(want);
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        // No pixels to capture; dump the active markup as the debug artifact.
        let url = self
            .current
            .as_ref()
            .ok_or_else(|| DriverError::Session("no page loaded".to_string()))?;
        let html = self.pages.get(url).cloned().unwrap_or_default();
        std::fs::write(path, html)?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.current = None;
        Ok(())
    }
}
