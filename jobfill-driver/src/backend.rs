use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Opaque reference to a live element. The payload is only meaningful to
/// the backend that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle(pub(crate) String);

impl ElementHandle {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn raw(&self) -> &str {
        &self.0
    }
}

/// Capability surface the filling engine needs from a browser.
///
/// Implemented once per backend; the engine never depends on a concrete
/// backend type. All methods that touch the page may block on the
/// underlying transport and are called sequentially for one session.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to a URL. Failure here is a session-level fault.
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// URL of the currently loaded page.
    async fn current_url(&self) -> Result<String>;

    /// Wait for the DOM to be ready, bounded by `timeout`. Expiry returns
    /// `Ok(false)` - never an error - so callers can proceed best-effort.
    async fn dom_ready(&self, timeout: Duration) -> Result<bool>;

    /// First element matching the CSS selector, or `None`. A selector this
    /// backend cannot parse returns `DriverError::InvalidSelector`.
    async fn query(&self, selector: &str) -> Result<Option<ElementHandle>>;

    /// Lowercase tag name of the element.
    async fn tag_name(&self, el: &ElementHandle) -> Result<String>;

    /// Attribute value, or `None` when the attribute is absent.
    async fn attribute(&self, el: &ElementHandle, name: &str) -> Result<Option<String>>;

    /// Clear existing content and write `value` verbatim.
    async fn set_text(&self, el: &ElementHandle, value: &str) -> Result<()>;

    /// Visible labels of a select element's options, in document order.
    async fn option_labels(&self, el: &ElementHandle) -> Result<Vec<String>>;

    /// Select the option at `index` of a select element.
    async fn select_option(&self, el: &ElementHandle, index: usize) -> Result<()>;

    /// Checked state of a checkbox or radio element.
    async fn is_checked(&self, el: &ElementHandle) -> Result<bool>;

    /// Drive the checked state to `want`. No-op when the state already
    /// matches, so repeated calls with the same value toggle at most once.
    async fn set_checked(&self, el: &ElementHandle, want: bool) -> Result<()>;

    /// Debug capture of the current page to `path`.
    async fn screenshot(&self, path: &Path) -> Result<()>;

    /// Release browser resources. Idempotent and safe to call even when
    /// setup partially failed.
    async fn close(&mut self) -> Result<()>;
}
