//! # Feature Data Model
//!
//! Read-only records handed to the interactive screens by the parsing layer.
//!
//! All types deserialize from JSON (camelCase keys) so a record captured from
//! the scraper can be replayed straight into the viewer. Every field other
//! than `title` is optional on the wire and defaults to empty.

use serde::{Deserialize, Serialize};

/// Support classification for one browser version range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportStatus {
    Supported,
    Unsupported,
    Partial,
    #[default]
    Unknown,
}

impl SupportStatus {
    pub fn icon(self) -> &'static str {
        match self {
            SupportStatus::Supported => "✅",
            SupportStatus::Unsupported => "❌",
            SupportStatus::Partial => "◐",
            SupportStatus::Unknown => "﹖",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SupportStatus::Supported => "Supported",
            SupportStatus::Unsupported => "Not supported",
            SupportStatus::Partial => "Partial support",
            SupportStatus::Unknown => "Unknown",
        }
    }

    /// All statuses in legend order.
    pub fn all() -> [SupportStatus; 4] {
        [
            SupportStatus::Supported,
            SupportStatus::Unsupported,
            SupportStatus::Partial,
            SupportStatus::Unknown,
        ]
    }
}

/// Whether a range is a released, the current, or an upcoming version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Era {
    #[default]
    Past,
    Current,
    Future,
}

impl Era {
    pub fn label(self) -> &'static str {
        match self {
            Era::Past => "past",
            Era::Current => "current",
            Era::Future => "future",
        }
    }
}

/// One version range row inside a browser block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportRange {
    pub label: String,
    #[serde(default)]
    pub status: SupportStatus,
    #[serde(default)]
    pub era: Era,
    /// Note markers such as `"1"`, `"4"` referencing the Notes tab.
    #[serde(default)]
    pub note_refs: Vec<String>,
    /// Raw tooltip text, e.g. `Global usage: 1.58% - Supported`.
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserBlock {
    pub name: String,
    #[serde(default)]
    pub ranges: Vec<SupportRange>,
}

/// A named text section shown in the details region.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TabText {
    pub name: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Everything the feature screen knows about one caniuse feature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub spec_url: Option<String>,
    #[serde(default)]
    pub spec_status: Option<String>,
    #[serde(default)]
    pub usage_supported: Option<f64>,
    #[serde(default)]
    pub usage_partial: Option<f64>,
    #[serde(default)]
    pub usage_total: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub browser_blocks: Vec<BrowserBlock>,
    /// Ordered tab name → text pairs.
    #[serde(default)]
    pub tabs: Vec<TabText>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub resources: Vec<Link>,
    #[serde(default)]
    pub subfeatures: Vec<Link>,
}

/// One row of an ambiguous search result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchMatch {
    pub label: String,
    pub identifier: String,
}
