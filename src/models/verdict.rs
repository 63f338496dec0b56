use crate::models::form::FieldName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of comparing one field against the recognized text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Match,
    Mismatch,
    NotFound,
    Warning,
}

impl VerdictStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Mismatch => "mismatch",
            Self::NotFound => "not_found",
            Self::Warning => "warning",
        }
    }
}

/// Structured verdict for a single field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Verdict {
    pub field: FieldName,
    pub status: VerdictStatus,
    pub message: String,
}

impl Verdict {
    pub fn new(field: FieldName, status: VerdictStatus, message: impl Into<String>) -> Self {
        Self {
            field,
            status,
            message: message.into(),
        }
    }

    pub fn matched(field: FieldName, message: impl Into<String>) -> Self {
        Self::new(field, VerdictStatus::Match, message)
    }

    pub fn mismatch(field: FieldName, message: impl Into<String>) -> Self {
        Self::new(field, VerdictStatus::Mismatch, message)
    }

    pub fn not_found(field: FieldName, message: impl Into<String>) -> Self {
        Self::new(field, VerdictStatus::NotFound, message)
    }

    pub fn warning(field: FieldName, message: impl Into<String>) -> Self {
        Self::new(field, VerdictStatus::Warning, message)
    }

    pub fn is_match(&self) -> bool {
        self.status == VerdictStatus::Match
    }
}

/// Ways a caller may reduce a verdict list to a single pass/fail
///
/// The engine never aggregates on its own; these are offered so callers pick
/// one explicitly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Every verdict, advisory ones included, must be `match`
    #[default]
    AllMatch,
    /// Only brand name, product type and alcohol content must be `match`
    RequiredFieldsMatch,
    /// Always passes; the per-field statuses are left for the reader
    TransportSuccess,
}

/// Ordered verdicts for one verification call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct VerdictList(Vec<Verdict>);

impl VerdictList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, verdict: Verdict) {
        self.0.push(verdict);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Verdict> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Verdict] {
        &self.0
    }

    /// Verdict reported for a field, if any
    pub fn get(&self, field: FieldName) -> Option<&Verdict> {
        self.0.iter().find(|v| v.field == field)
    }

    /// Field order as produced
    pub fn fields(&self) -> Vec<FieldName> {
        self.0.iter().map(|v| v.field).collect()
    }

    /// Apply an aggregation policy
    pub fn passes(&self, policy: AggregationPolicy) -> bool {
        match policy {
            AggregationPolicy::AllMatch => self.0.iter().all(Verdict::is_match),
            AggregationPolicy::RequiredFieldsMatch => self
                .0
                .iter()
                .filter(|v| v.field.is_required())
                .all(Verdict::is_match),
            AggregationPolicy::TransportSuccess => true,
        }
    }

    /// Overall message for the given policy
    pub fn summary(&self, policy: AggregationPolicy) -> &'static str {
        if self.passes(policy) {
            "SUCCESS: All required label information matches the application form."
        } else {
            "FAILURE: Discrepancies found between the label and the application form."
        }
    }
}

impl IntoIterator for VerdictList {
    type Item = Verdict;
    type IntoIter = std::vec::IntoIter<Verdict>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a VerdictList {
    type Item = &'a Verdict;
    type IntoIter = std::slice::Iter<'a, Verdict>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Verdict>> for VerdictList {
    fn from(verdicts: Vec<Verdict>) -> Self {
        Self(verdicts)
    }
}

/// Result of a full image-to-verdicts run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationReport {
    pub verdicts: VerdictList,
    pub recognized_text: String,
    pub checked_at: DateTime<Utc>,
}

impl VerificationReport {
    pub fn new(verdicts: VerdictList, recognized_text: impl Into<String>) -> Self {
        Self {
            verdicts,
            recognized_text: recognized_text.into(),
            checked_at: Utc::now(),
        }
    }
}
