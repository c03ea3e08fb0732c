//! The plan data model: the validated shape of a generated roadmap.
//!
//! These types mirror the generation endpoint's wire contract. A `Plan` is
//! pure data with no mutation methods; a new generation replaces it
//! wholesale. Validation is the producer's responsibility; consumers may
//! assume the shape but must tolerate absent optional sections, which
//! deserialize to empty collections and suppress their rendered sections.

use serde::{Deserialize, Serialize};

/// A full generated goal roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub title: String,
    /// Displayed quoted under the title.
    pub summary: String,
    /// Invariant: `0 <= success_rate <= 100`.
    pub success_rate: u8,
    /// The wire contract historically carried a misspelled key; both
    /// spellings are accepted on deserialize.
    #[serde(alias = "reasonForSuccesRate")]
    pub reason_for_success_rate: String,
    #[serde(default)]
    pub roadmap: Vec<Quarter>,
    #[serde(default)]
    pub tips: Vec<Tip>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl Plan {
    /// Success rate as a fraction in `[0.0, 1.0]`. Rates above 100 clamp to
    /// a full indicator.
    pub fn success_fraction(&self) -> f32 {
        f32::from(self.success_rate.min(100)) / 100.0
    }
}

/// One quarter of the roadmap, owned exclusively by its `Plan`.
///
/// Labels are not required to be unique or ordered; display order follows
/// sequence order in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quarter {
    pub quarter: QuarterLabel,
    pub months: String,
    pub goal: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// The four quarter labels a generation may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuarterLabel {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl std::fmt::Display for QuarterLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QuarterLabel::Q1 => "Q1",
            QuarterLabel::Q2 => "Q2",
            QuarterLabel::Q3 => "Q3",
            QuarterLabel::Q4 => "Q4",
        };
        f.write_str(s)
    }
}

/// A single step inside a quarter. The `step` ordinal is decorative display
/// data: only meaningful within its quarter, never validated for
/// uniqueness or contiguity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub step: u32,
    pub title: String,
    pub description: String,
}

/// A single expert tip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tip {
    pub tip: String,
}
