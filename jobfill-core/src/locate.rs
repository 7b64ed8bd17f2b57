use jobfill_driver::{DriverError, ElementHandle, PageDriver};
use tracing::debug;

/// Resolve a candidate selector chain to a live element.
///
/// Candidates are tried in order; the first structural match wins,
/// regardless of visibility or enablement. A selector the backend cannot
/// parse counts as "no match, continue" - one bad pattern must not sink
/// the chain. Finding nothing at all is a normal outcome (the field is
/// absent on this platform), so the return is an `Option`, not a `Result`.
pub async fn locate(
    driver: &dyn PageDriver,
    candidates: &[&str],
) -> Option<(ElementHandle, String)> {
    for selector in candidates {
        match driver.query(selector).await {
            Ok(Some(handle)) => {
                debug!("Matched selector {}", selector);
                return Some((handle, selector.to_string()));
            }
            Ok(None) => continue,
            Err(DriverError::InvalidSelector(e)) => {
                debug!("Selector {} rejected by backend: {}", selector, e);
                continue;
            }
            Err(e) => {
                debug!("Query failed for {}: {}", selector, e);
                continue;
            }
        }
    }
    None
}
