use jobfill_driver::ElementHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interaction semantics of a form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Text,
    Textarea,
    Select,
    Checkbox,
    Radio,
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WidgetKind::Text => "text",
            WidgetKind::Textarea => "textarea",
            WidgetKind::Select => "select",
            WidgetKind::Checkbox => "checkbox",
            WidgetKind::Radio => "radio",
        };
        f.write_str(s)
    }
}

/// A logical field resolved to a live element on the current page.
/// At most one per logical name per page; discarded at the end of the
/// fill pass.
#[derive(Debug, Clone)]
pub struct DiscoveredField {
    pub logical_name: String,
    pub widget_kind: WidgetKind,
    pub matched_selector: String,
    pub handle: ElementHandle,
    pub filled: bool,
    pub error: Option<String>,
}

impl DiscoveredField {
    pub fn new(
        logical_name: impl Into<String>,
        widget_kind: WidgetKind,
        matched_selector: impl Into<String>,
        handle: ElementHandle,
    ) -> Self {
        Self {
            logical_name: logical_name.into(),
            widget_kind,
            matched_selector: matched_selector.into(),
            handle,
            filled: false,
            error: None,
        }
    }
}
