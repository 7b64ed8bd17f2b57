use crate::field::{DiscoveredField, WidgetKind};
use crate::fill::{FieldStatus, FillOutcome};
use crate::platform::PlatformId;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldReportLine {
    pub logical_name: String,
    pub widget_kind: WidgetKind,
    pub matched_selector: String,
    pub status: FieldStatus,
}

/// Renderable summary of one fill pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillReport {
    pub run_id: String,
    pub url: String,
    pub platform: PlatformId,
    pub generated_at: DateTime<Utc>,
    pub filled: usize,
    pub failed: usize,
    pub skipped: usize,
    pub fields: Vec<FieldReportLine>,
    pub errors: Vec<String>,
}

impl FillReport {
    pub fn new(
        url: impl Into<String>,
        platform: PlatformId,
        fields: &[DiscoveredField],
        outcome: &FillOutcome,
    ) -> Self {
        let lines: Vec<FieldReportLine> = outcome
            .field_status
            .iter()
            .map(|(name, status)| {
                let field = fields.iter().find(|f| &f.logical_name == name);
                FieldReportLine {
                    logical_name: name.clone(),
                    widget_kind: field.map(|f| f.widget_kind).unwrap_or(WidgetKind::Text),
                    matched_selector: field
                        .map(|f| f.matched_selector.clone())
                        .unwrap_or_default(),
                    status: *status,
                }
            })
            .collect();

        let skipped = lines
            .iter()
            .filter(|l| l.status == FieldStatus::Skipped)
            .count();

        Self {
            run_id: Uuid::new_v4().to_string(),
            url: url.into(),
            platform,
            generated_at: Utc::now(),
            filled: outcome.filled,
            failed: outcome.failed,
            skipped,
            fields: lines,
            errors: outcome.errors.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_text(&self) -> String {
        let mut report = String::new();
        report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
        report.push_str("# Summary:\n");
        report.push_str(&format!("  Page: {}\n", self.url));
        report.push_str(&format!("  Platform: {}\n", self.platform));
        report.push_str(&format!(
            "  Fields: {} filled, {} failed, {} skipped\n",
            self.filled, self.failed, self.skipped
        ));
        report.push_str(&format!(
            "  Generated: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

        report.push_str("# Fields:\n");
        for line in &self.fields {
            let marker = match line.status {
                FieldStatus::Filled => "✓".green().to_string(),
                FieldStatus::Failed => "✗".red().to_string(),
                FieldStatus::Skipped => "-".bright_black().to_string(),
            };
            report.push_str(&format!(
                "  {} {} ({}) {}\n",
                marker,
                line.logical_name,
                line.widget_kind,
                line.matched_selector.bright_black()
            ));
        }

        if !self.errors.is_empty() {
            report.push_str("\n# Errors:\n");
            for error in &self.errors {
                report.push_str(&format!("  {} {}\n", "!".yellow(), error));
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> FillOutcome {
        FillOutcome {
            filled: 1,
            failed: 1,
            errors: vec!["Failed to fill email: boom".to_string()],
            field_status: vec![
                ("firstName".to_string(), FieldStatus::Filled),
                ("email".to_string(), FieldStatus::Failed),
                ("skills".to_string(), FieldStatus::Skipped),
            ],
        }
    }

    #[test]
    fn test_report_counts_and_lines() {
        let report = FillReport::new("https://x.test/apply", PlatformId::Generic, &[], &outcome());
        assert_eq!(report.filled, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.fields.len(), 3);
    }

    #[test]
    fn test_text_render_mentions_every_field() {
        let report = FillReport::new("https://x.test/apply", PlatformId::Generic, &[], &outcome());
        let text = report.render_text();
        assert!(text.contains("firstName"));
        assert!(text.contains("email"));
        assert!(text.contains("skills"));
        assert!(text.contains("1 filled, 1 failed, 1 skipped"));
    }

    #[test]
    fn test_json_render_is_valid() {
        let report = FillReport::new("https://x.test/apply", PlatformId::Generic, &[], &outcome());
        let json = report.to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["platform"], "generic");
        assert_eq!(parsed["filled"], 1);
    }

    #[test]
    fn test_format_from_str() {
        assert!(matches!(ReportFormat::from_str("TEXT"), Some(ReportFormat::Text)));
        assert!(matches!(ReportFormat::from_str("json"), Some(ReportFormat::Json)));
        assert!(ReportFormat::from_str("yaml").is_none());
    }
}
