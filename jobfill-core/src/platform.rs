use serde::{Deserialize, Serialize};
use std::fmt;

/// Job-application platform a page belongs to. Derived once per page from
/// the navigated URL and immutable for the page's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    Linkedin,
    Greenhouse,
    Workday,
    Lever,
    Bamboohr,
    Icims,
    Generic,
    Unknown,
}

/// Hostname fragments checked top-down; the first hit wins. Order is part
/// of the contract - workday.com must not shadow greenhouse.io and so on.
pub const DETECTION_RULES: &[(&str, PlatformId)] = &[
    ("linkedin.com", PlatformId::Linkedin),
    ("greenhouse.io", PlatformId::Greenhouse),
    ("workday.com", PlatformId::Workday),
    ("lever.co", PlatformId::Lever),
    ("bamboohr.com", PlatformId::Bamboohr),
    ("icims.com", PlatformId::Icims),
];

/// Match a URL against the detection table. Unrecognized hosts are
/// `Generic`, never an error; `Unknown` is reserved for the case where the
/// current URL itself could not be obtained.
pub fn detect_platform(url: &str) -> PlatformId {
    let url = url.to_lowercase();
    for (pattern, platform) in DETECTION_RULES {
        if url.contains(pattern) {
            return *platform;
        }
    }
    PlatformId::Generic
}

impl PlatformId {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "linkedin" => Some(PlatformId::Linkedin),
            "greenhouse" => Some(PlatformId::Greenhouse),
            "workday" => Some(PlatformId::Workday),
            "lever" => Some(PlatformId::Lever),
            "bamboohr" => Some(PlatformId::Bamboohr),
            "icims" => Some(PlatformId::Icims),
            "generic" => Some(PlatformId::Generic),
            "unknown" => Some(PlatformId::Unknown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformId::Linkedin => "linkedin",
            PlatformId::Greenhouse => "greenhouse",
            PlatformId::Workday => "workday",
            PlatformId::Lever => "lever",
            PlatformId::Bamboohr => "bamboohr",
            PlatformId::Icims => "icims",
            PlatformId::Generic => "generic",
            PlatformId::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
