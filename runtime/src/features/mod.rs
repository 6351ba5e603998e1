//! Feature names and the per-request feature record.
//!
//! The classifier was trained on a closed set of twenty columns. Every value
//! produced anywhere in the pipeline is keyed by one of these names; the
//! assembler later aligns the record to whatever order the model expects.

pub mod lexical;
pub mod url_parts;

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A column the extraction pipeline knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureName {
    NumDots,
    NumDash,
    UrlLength,
    AtSymbol,
    NumUnderscore,
    NumPercent,
    NumQueryComponents,
    NumAmpersand,
    NumHash,
    NumNumericChars,
    NoHttps,
    IpAddress,
    HostnameLength,
    PathLength,
    QueryLength,
    DoubleSlashInPath,
    IframeOrFrame,
    PopUpWindow,
    RightClickDisabled,
    ExtFormAction,
}

impl FeatureName {
    /// Every known feature, in canonical extraction order.
    pub const ALL: [FeatureName; 20] = [
        Self::NumDots,
        Self::NumDash,
        Self::UrlLength,
        Self::AtSymbol,
        Self::NumUnderscore,
        Self::NumPercent,
        Self::NumQueryComponents,
        Self::NumAmpersand,
        Self::NumHash,
        Self::NumNumericChars,
        Self::NoHttps,
        Self::IpAddress,
        Self::HostnameLength,
        Self::PathLength,
        Self::QueryLength,
        Self::DoubleSlashInPath,
        Self::IframeOrFrame,
        Self::PopUpWindow,
        Self::RightClickDisabled,
        Self::ExtFormAction,
    ];

    /// Features derived from the URL string alone.
    pub const LEXICAL: [FeatureName; 16] = [
        Self::NumDots,
        Self::NumDash,
        Self::UrlLength,
        Self::AtSymbol,
        Self::NumUnderscore,
        Self::NumPercent,
        Self::NumQueryComponents,
        Self::NumAmpersand,
        Self::NumHash,
        Self::NumNumericChars,
        Self::NoHttps,
        Self::IpAddress,
        Self::HostnameLength,
        Self::PathLength,
        Self::QueryLength,
        Self::DoubleSlashInPath,
    ];

    /// Features that need the fetched page.
    pub const HTML: [FeatureName; 4] = [
        Self::IframeOrFrame,
        Self::PopUpWindow,
        Self::RightClickDisabled,
        Self::ExtFormAction,
    ];

    /// Column name as it appears in the model's manifest.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NumDots => "NumDots",
            Self::NumDash => "NumDash",
            Self::UrlLength => "UrlLength",
            Self::AtSymbol => "AtSymbol",
            Self::NumUnderscore => "NumUnderscore",
            Self::NumPercent => "NumPercent",
            Self::NumQueryComponents => "NumQueryComponents",
            Self::NumAmpersand => "NumAmpersand",
            Self::NumHash => "NumHash",
            Self::NumNumericChars => "NumNumericChars",
            Self::NoHttps => "NoHttps",
            Self::IpAddress => "IpAddress",
            Self::HostnameLength => "HostnameLength",
            Self::PathLength => "PathLength",
            Self::QueryLength => "QueryLength",
            Self::DoubleSlashInPath => "DoubleSlashInPath",
            Self::IframeOrFrame => "IframeOrFrame",
            Self::PopUpWindow => "PopUpWindow",
            Self::RightClickDisabled => "RightClickDisabled",
            Self::ExtFormAction => "ExtFormAction",
        }
    }

    /// Look up a manifest column name. Matching is exact (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FeatureName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Feature values computed for a single URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureRecord {
    values: BTreeMap<FeatureName, f64>,
}

impl FeatureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a feature, replacing any previous value.
    pub fn set(&mut self, name: FeatureName, value: f64) {
        self.values.insert(name, value);
    }

    /// Set a 0/1 feature.
    pub fn set_flag(&mut self, name: FeatureName, on: bool) {
        self.set(name, if on { 1.0 } else { 0.0 });
    }

    /// Set a count or length feature.
    pub fn set_count(&mut self, name: FeatureName, count: usize) {
        self.set(name, count as f64);
    }

    pub fn get(&self, name: FeatureName) -> Option<f64> {
        self.values.get(&name).copied()
    }

    /// Look up by manifest column name; unknown names yield `None`.
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        FeatureName::from_name(name).and_then(|f| self.get(f))
    }

    pub fn contains(&self, name: FeatureName) -> bool {
        self.values.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// Merge another record into this one; `other` wins on conflicts.
    pub fn merge(&mut self, other: FeatureRecord) {
        self.values.extend(other.values);
    }
}

impl FromIterator<(FeatureName, f64)> for FeatureRecord {
    fn from_iter<I: IntoIterator<Item = (FeatureName, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
