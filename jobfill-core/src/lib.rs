pub mod catalog;
pub mod classify;
pub mod error;
pub mod field;
pub mod fill;
pub mod locate;
pub mod platform;
pub mod record;
pub mod report;
pub mod session;

pub use catalog::{SelectorRule, rules_for};
pub use error::CoreError;
pub use field::{DiscoveredField, WidgetKind};
pub use fill::{FieldStatus, FillOutcome};
pub use platform::{PlatformId, detect_platform};
pub use record::{NormalizedRecord, ResumeData};
pub use report::{FillReport, ReportFormat};
pub use session::{FillSession, SessionState};

pub fn print_banner() {
    println!(
        r#"
     _       _      __ _ _ _
    (_) ___ | |__  / _(_) | |
    | |/ _ \| '_ \| |_| | | |
    | | (_) | |_) |  _| | | |
   _/ |\___/|_.__/|_| |_|_|_|
  |__/   resume -> form, best effort
"#
    );
}
