use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contact block of a structured resume. Field names mirror the JSON the
/// extraction service produces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub website: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub company: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub programming: Vec<String>,
    pub frameworks: Vec<String>,
    pub tools: Vec<String>,
}

/// Structured resume as delivered by the external extraction service.
/// This crate never parses documents itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub contact: ContactInfo,
    pub summary: String,
    pub experience: Vec<WorkExperience>,
    pub skills: Skills,
}

impl ResumeData {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

/// Flattened, resolver-ready view of a resume: an insertion-ordered list
/// of (logical name, value) pairs.
///
/// The order is load-bearing. `lookup` resolves ambiguous field names to
/// the first-inserted matching key, so the same record always fills the
/// same form the same way.
#[derive(Debug, Clone, Default)]
pub struct NormalizedRecord {
    entries: Vec<(String, String)>,
}

impl NormalizedRecord {
    /// Flatten a structured resume. Contact fields are copied verbatim
    /// under their logical names; only the most recent experience entry
    /// contributes company/title/description; skills become one
    /// comma-joined string, technical preferred, programming as fallback -
    /// never both. Empty values are dropped so they resolve to "no value"
    /// instead of blanking out a form field.
    pub fn from_resume(resume: &ResumeData) -> Self {
        let mut record = Self::default();
        let c = &resume.contact;
        record.push("firstName", &c.first_name);
        record.push("lastName", &c.last_name);
        record.push("email", &c.email);
        record.push("phone", &c.phone);
        record.push("address", &c.address);
        record.push("city", &c.city);
        record.push("state", &c.state);
        record.push("zip", &c.zip);
        record.push("country", &c.country);

        if let Some(latest) = resume.experience.first() {
            record.push("company", &latest.company);
            record.push("title", &latest.title);
            record.push("experience", &latest.description);
        }

        let skills = if !resume.skills.technical.is_empty() {
            resume.skills.technical.join(", ")
        } else {
            resume.skills.programming.join(", ")
        };
        record.push("skills", &skills);

        record
    }

    /// Build a record from explicit pairs, preserving order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::default();
        for (key, value) in pairs {
            record.entries.push((key.into(), value.into()));
        }
        record
    }

    fn push(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.entries.push((key.to_string(), value.to_string()));
        }
    }

    /// Resolve a logical field name to a value.
    ///
    /// Case-insensitive bidirectional substring match: an entry matches
    /// when its key contains the field name or the field name contains the
    /// key. The first-inserted matching entry wins; this lets one entry
    /// satisfy several loosely named fields across platforms, at the cost
    /// of an ambiguity the insertion order deliberately resolves.
    pub fn lookup(&self, logical_name: &str) -> Option<&str> {
        let needle = logical_name.to_lowercase();
        for (key, value) in &self.entries {
            let key = key.to_lowercase();
            if key.contains(&needle) || needle.contains(&key) {
                return Some(value);
            }
        }
        None
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
