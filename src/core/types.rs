use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::core::constants::{export_modes, filters};
use crate::core::error::TeleCheckError;

/// Verdict the remote service assigned to a link.
///
/// Statuses are compared lower-cased; anything other than the three known
/// verdicts is kept verbatim as a service-defined tag (e.g. `mega`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkStatus {
    Valid,
    Invalid,
    Unknown,
    Other(String),
}

impl LinkStatus {
    /// Parse a raw service status. Empty input becomes `Unknown`.
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        match lowered.as_str() {
            "" | "unknown" => LinkStatus::Unknown,
            "valid" => LinkStatus::Valid,
            "invalid" => LinkStatus::Invalid,
            _ => LinkStatus::Other(lowered),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LinkStatus::Valid => "valid",
            LinkStatus::Invalid => "invalid",
            LinkStatus::Unknown => "unknown",
            LinkStatus::Other(tag) => tag,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, LinkStatus::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, LinkStatus::Invalid)
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LinkStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LinkStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(LinkStatus::parse(&raw))
    }
}

/// Normalized verdict for one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkResult {
    /// The URL text as extracted
    pub link: String,
    pub status: LinkStatus,
    /// Human-readable explanation from the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl LinkResult {
    pub fn new<L: Into<String>>(link: L, status: LinkStatus, reason: Option<String>) -> Self {
        Self {
            link: link.into(),
            status,
            reason,
        }
    }

    /// An `unknown` verdict carrying the given reason.
    pub fn unknown<L: Into<String>, R: Into<String>>(link: L, reason: R) -> Self {
        Self::new(link, LinkStatus::Unknown, Some(reason.into()))
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    pub fn is_invalid(&self) -> bool {
        self.status.is_invalid()
    }

    /// The reason, or the status name when the service gave none.
    pub fn reason_or_status(&self) -> &str {
        self.reason.as_deref().unwrap_or(self.status.as_str())
    }
}

/// A located occurrence of a URL pattern within source text.
///
/// Offsets are byte offsets into the original text, `start..end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl UrlMatch {
    pub fn new<S: Into<String>>(text: S, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Which subset of a result set is shown or exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultFilter {
    #[default]
    All,
    Valid,
    Invalid,
}

impl ResultFilter {
    pub fn matches(&self, result: &LinkResult) -> bool {
        match self {
            ResultFilter::All => true,
            ResultFilter::Valid => result.is_valid(),
            ResultFilter::Invalid => result.is_invalid(),
        }
    }

    /// Title line used by the numbered export.
    pub fn title(&self) -> &'static str {
        match self {
            ResultFilter::All => "All Links",
            ResultFilter::Valid => "Valid Links",
            ResultFilter::Invalid => "Invalid Links",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultFilter::All => filters::ALL_LINKS,
            ResultFilter::Valid => filters::VALID,
            ResultFilter::Invalid => filters::INVALID,
        }
    }
}

impl FromStr for ResultFilter {
    type Err = TeleCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            filters::ALL_LINKS => Ok(ResultFilter::All),
            filters::VALID => Ok(ResultFilter::Valid),
            filters::INVALID => Ok(ResultFilter::Invalid),
            other => Err(TeleCheckError::InvalidArgument(format!(
                "Unknown filter '{other}'. Expected one of: {}.",
                filters::ALL.join(", ")
            ))),
        }
    }
}

/// Textual list format produced by the export formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    Numbered,
    Gapped,
    Plain,
    Original,
}

impl ExportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportMode::Numbered => export_modes::NUMBERED,
            ExportMode::Gapped => export_modes::GAPPED,
            ExportMode::Plain => export_modes::PLAIN,
            ExportMode::Original => export_modes::ORIGINAL,
        }
    }
}

impl FromStr for ExportMode {
    type Err = TeleCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            export_modes::NUMBERED => Ok(ExportMode::Numbered),
            export_modes::GAPPED => Ok(ExportMode::Gapped),
            export_modes::PLAIN => Ok(ExportMode::Plain),
            export_modes::ORIGINAL => Ok(ExportMode::Original),
            other => Err(TeleCheckError::InvalidArgument(format!(
                "Unknown export mode '{other}'. Expected one of: {}.",
                export_modes::ALL.join(", ")
            ))),
        }
    }
}

/// How the current input was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckMode {
    /// Free-form text, links extracted and checked in one request
    #[default]
    Bulk,
    /// One link checked on its own
    Single,
}

/// Ordered verdicts produced by a single check.
///
/// Replaced wholesale by each new check; never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    entries: Vec<LinkResult>,
}

impl ResultSet {
    pub fn new(entries: Vec<LinkResult>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LinkResult> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[LinkResult] {
        &self.entries
    }

    /// Entries accepted by `filter`, in result-set order.
    pub fn filtered(&self, filter: ResultFilter) -> Vec<LinkResult> {
        self.entries
            .iter()
            .filter(|result| filter.matches(result))
            .cloned()
            .collect()
    }

    pub fn valid_count(&self) -> usize {
        self.entries.iter().filter(|r| r.is_valid()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.entries.iter().filter(|r| r.is_invalid()).count()
    }

    /// Everything that is neither valid nor invalid, service tags included.
    pub fn other_count(&self) -> usize {
        self.len() - self.valid_count() - self.invalid_count()
    }
}

impl From<Vec<LinkResult>> for ResultSet {
    fn from(entries: Vec<LinkResult>) -> Self {
        Self::new(entries)
    }
}

impl IntoIterator for ResultSet {
    type Item = LinkResult;
    type IntoIter = std::vec::IntoIter<LinkResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a LinkResult;
    type IntoIter = std::slice::Iter<'a, LinkResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Aggregate counters owned by the remote service. Read-only here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsData {
    pub total: u64,
    pub valid: u64,
    pub invalid: u64,
}

/// Wire form of `GET /stats`; both key spellings are accepted.
#[derive(Debug, Default, Deserialize)]
struct RawStats {
    total_checked: Option<u64>,
    valid_links: Option<u64>,
    invalid_links: Option<u64>,
    total: Option<u64>,
    valid: Option<u64>,
    invalid: Option<u64>,
}

impl<'de> Deserialize<'de> for StatsData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawStats::deserialize(deserializer)?;
        Ok(StatsData {
            total: raw.total_checked.or(raw.total).unwrap_or(0),
            valid: raw.valid_links.or(raw.valid).unwrap_or(0),
            invalid: raw.invalid_links.or(raw.invalid).unwrap_or(0),
        })
    }
}
