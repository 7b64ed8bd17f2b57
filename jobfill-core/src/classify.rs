use crate::field::WidgetKind;
use jobfill_driver::{ElementHandle, PageDriver};

/// Assign a widget kind to a located element.
///
/// Fixed priority: select tag, textarea tag, checkbox type, radio type,
/// then text. Never fails - introspection errors resolve to `Text`, the
/// most permissive kind, rather than aborting discovery.
pub async fn classify(driver: &dyn PageDriver, el: &ElementHandle) -> WidgetKind {
    let tag = driver.tag_name(el).await.unwrap_or_default();
    match tag.as_str() {
        "select" => WidgetKind::Select,
        "textarea" => WidgetKind::Textarea,
        _ => {
            let input_type = driver
                .attribute(el, "type")
                .await
                .ok()
                .flatten()
                .unwrap_or_default()
                .to_lowercase();
            match input_type.as_str() {
                "checkbox" => WidgetKind::Checkbox,
                "radio" => WidgetKind::Radio,
                _ => WidgetKind::Text,
            }
        }
    }
}
