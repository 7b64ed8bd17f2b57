use crate::field::{DiscoveredField, WidgetKind};
use crate::record::NormalizedRecord;
use jobfill_driver::{DriverError, PageDriver};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Coarse outcome of one field in a fill pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    Filled,
    Failed,
    Skipped,
}

/// Aggregate result of one fill pass. Produced fresh per pass and never
/// merged across passes. Status is keyed by logical name so forms with
/// several same-kind widgets keep per-field granularity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FillOutcome {
    pub filled: usize,
    pub failed: usize,
    pub errors: Vec<String>,
    pub field_status: Vec<(String, FieldStatus)>,
}

/// Interpretation of a resolved value for checkbox toggling. Everything
/// except the conventional "off" spellings counts as set.
pub fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "" | "false" | "no" | "0" | "off"
    )
}

/// Write one value into one field, dispatching on widget kind.
pub async fn fill_field(
    driver: &dyn PageDriver,
    field: &DiscoveredField,
    value: &str,
) -> Result<(), DriverError> {
    match field.widget_kind {
        WidgetKind::Text | WidgetKind::Textarea => driver.set_text(&field.handle, value).await,
        WidgetKind::Select => fill_select(driver, field, value).await,
        WidgetKind::Checkbox => {
            // Toggle only on mismatch; refilling the same value is a no-op.
            let want = is_truthy(value);
            if driver.is_checked(&field.handle).await? != want {
                driver.set_checked(&field.handle, want).await?;
            }
            Ok(())
        }
        // Radios get a real selection action instead of the historical
        // fall-through to text entry.
        WidgetKind::Radio => driver.set_checked(&field.handle, true).await,
    }
}

/// Pick the first option whose visible label contains `value`
/// (case-insensitive). When nothing matches, settle for the first option
/// rather than leaving the control unselected; that fallback still counts
/// as a successful fill.
async fn fill_select(
    driver: &dyn PageDriver,
    field: &DiscoveredField,
    value: &str,
) -> Result<(), DriverError> {
    let labels = driver.option_labels(&field.handle).await?;
    if labels.is_empty() {
        return Err(DriverError::NoSuchElement(format!(
            "{} has no options",
            field.logical_name
        )));
    }

    let needle = value.to_lowercase();
    let index = labels
        .iter()
        .position(|label| label.to_lowercase().contains(&needle));

    match index {
        Some(i) => driver.select_option(&field.handle, i).await,
        None => {
            debug!(
                "No option matching '{}' for {}; falling back to first option",
                value, field.logical_name
            );
            driver.select_option(&field.handle, 0).await
        }
    }
}

/// Run one fill pass over all discovered fields.
///
/// Fields are independent: a value that fails to write is recorded and the
/// pass moves on, so one broken control never blocks the rest of the form.
/// Fields with no resolvable value are skipped and count in neither
/// bucket. Always returns an outcome, never an error.
pub async fn fill_all(
    driver: &dyn PageDriver,
    fields: &mut [DiscoveredField],
    record: &NormalizedRecord,
) -> FillOutcome {
    let mut outcome = FillOutcome::default();

    for field in fields.iter_mut() {
        let Some(value) = record.lookup(&field.logical_name) else {
            debug!("No value for {}; skipping", field.logical_name);
            outcome
                .field_status
                .push((field.logical_name.clone(), FieldStatus::Skipped));
            continue;
        };

        match fill_field(driver, field, value).await {
            Ok(()) => {
                field.filled = true;
                outcome.filled += 1;
                outcome
                    .field_status
                    .push((field.logical_name.clone(), FieldStatus::Filled));
            }
            Err(e) => {
                warn!("Error filling {}: {}", field.logical_name, e);
                field.error = Some(e.to_string());
                outcome.failed += 1;
                outcome
                    .errors
                    .push(format!("Failed to fill {}: {}", field.logical_name, e));
                outcome
                    .field_status
                    .push((field.logical_name.clone(), FieldStatus::Failed));
            }
        }
    }

    info!(
        "Fill pass complete: {} filled, {} failed",
        outcome.filled, outcome.failed
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness_spellings() {
        for value in ["true", "yes", "1", "on", "Ann", "anything"] {
            assert!(is_truthy(value), "'{}' should be truthy", value);
        }
        for value in ["", "false", "No", "0", "OFF", "  "] {
            assert!(!is_truthy(value), "'{}' should be falsy", value);
        }
    }
}
