use crate::catalog::rules_for;
use crate::classify::classify;
use crate::error::{CoreError, Result};
use crate::field::DiscoveredField;
use crate::fill::{FillOutcome, fill_all};
use crate::locate::locate;
use crate::platform::{PlatformId, detect_platform};
use crate::record::{NormalizedRecord, ResumeData};
use jobfill_driver::PageDriver;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Lifecycle of one page within a session. Transitions are one-way except
/// that discovery may be re-run, which re-enters `FieldsDiscovered` with a
/// fresh field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    Unnavigated,
    Navigated,
    PlatformDetected,
    FieldsDiscovered,
    Filled,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Unnavigated => "unnavigated",
            SessionState::Navigated => "navigated",
            SessionState::PlatformDetected => "platform-detected",
            SessionState::FieldsDiscovered => "fields-discovered",
            SessionState::Filled => "filled",
        }
    }
}

/// One browser session driving one page at a time. Exclusively owns its
/// backend for the whole lifetime; two sessions are fully independent.
pub struct FillSession {
    driver: Box<dyn PageDriver>,
    state: SessionState,
    platform: Option<PlatformId>,
    fields: Vec<DiscoveredField>,
}

impl FillSession {
    pub fn new(driver: Box<dyn PageDriver>) -> Self {
        Self {
            driver,
            state: SessionState::Unnavigated,
            platform: None,
            fields: Vec::new(),
        }
    }

    fn require_state(&self, minimum: SessionState, expected: &'static str) -> Result<()> {
        if self.state < minimum {
            return Err(CoreError::InvalidState {
                expected,
                actual: self.state.as_str(),
            });
        }
        Ok(())
    }

    /// Navigate to a page and wait (bounded) for the DOM. Navigation
    /// failure is fatal for the session; a page that is merely not ready
    /// yet is logged and the pass proceeds best-effort.
    pub async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<()> {
        self.driver.goto(url).await?;

        if !self.driver.dom_ready(timeout).await? {
            warn!("Page {} not ready after {:?}; continuing anyway", url, timeout);
        }

        // A new page restarts the lifecycle.
        self.platform = None;
        self.fields.clear();
        self.state = SessionState::Navigated;
        info!("Navigated to {}", url);
        Ok(())
    }

    /// Derive the platform from the current URL, once per page.
    pub async fn detect_platform(&mut self) -> Result<PlatformId> {
        self.require_state(SessionState::Navigated, "navigated")?;

        if let Some(platform) = self.platform {
            return Ok(platform);
        }

        let platform = match self.driver.current_url().await {
            Ok(url) => detect_platform(&url),
            Err(e) => {
                warn!("Could not read current URL: {}", e);
                PlatformId::Unknown
            }
        };

        info!("Detected platform: {}", platform);
        self.platform = Some(platform);
        if self.state < SessionState::PlatformDetected {
            self.state = SessionState::PlatformDetected;
        }
        Ok(platform)
    }

    /// Walk the platform's selector catalog and resolve each logical name
    /// to a typed field. Absent fields are simply omitted. Repeatable: a
    /// re-run replaces the previous field set, so the same unchanged page
    /// yields the same fields with no duplicates.
    pub async fn discover_fields(&mut self) -> Result<&[DiscoveredField]> {
        self.require_state(SessionState::PlatformDetected, "platform-detected")?;
        let platform = self.platform.unwrap_or(PlatformId::Unknown);

        let mut fields = Vec::new();
        for rule in rules_for(platform) {
            let Some((handle, matched_selector)) =
                locate(self.driver.as_ref(), rule.selectors).await
            else {
                debug!("No element for {}", rule.logical_name);
                continue;
            };

            let kind = classify(self.driver.as_ref(), &handle).await;
            debug!(
                "Discovered {} as {} via {}",
                rule.logical_name, kind, matched_selector
            );
            fields.push(DiscoveredField::new(
                rule.logical_name,
                kind,
                matched_selector,
                handle,
            ));
        }

        info!(
            "Found {} form fields for platform: {}",
            fields.len(),
            platform
        );
        self.fields = fields;
        self.state = SessionState::FieldsDiscovered;
        Ok(&self.fields)
    }

    /// Fill every discovered field from the resume. Partial failures land
    /// in the outcome; this only errors for session-level faults.
    pub async fn fill(&mut self, resume: &ResumeData) -> Result<FillOutcome> {
        self.require_state(SessionState::FieldsDiscovered, "fields-discovered")?;

        let record = NormalizedRecord::from_resume(resume);
        let outcome = fill_all(self.driver.as_ref(), &mut self.fields, &record).await;
        self.state = SessionState::Filled;
        Ok(outcome)
    }

    /// Debug capture of the current page.
    pub async fn screenshot(&self, path: &Path) -> Result<()> {
        self.require_state(SessionState::Navigated, "navigated")?;
        Ok(self.driver.screenshot(path).await?)
    }

    /// Release the underlying browser. Safe to call repeatedly and after
    /// partial setup.
    pub async fn close(&mut self) -> Result<()> {
        Ok(self.driver.close().await?)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn platform(&self) -> Option<PlatformId> {
        self.platform
    }

    pub fn fields(&self) -> &[DiscoveredField] {
        &self.fields
    }
}
