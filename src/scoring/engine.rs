use super::questions::Answers;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest total still classified as low risk
pub const LOW_MAX: u64 = 4;
/// Highest total still classified as medium risk
pub const MEDIUM_MAX: u64 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::Low, RiskTier::Medium, RiskTier::High];

    /// Classify a total score: `<=4` low, `5..=9` medium, `>=10` high
    pub fn from_score(total: u64) -> Self {
        if total <= LOW_MAX {
            RiskTier::Low
        } else if total <= MEDIUM_MAX {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    pub total: u64,
    pub tier: RiskTier,
}

/// Sum the answers and classify the total. Pure; no side effects.
pub fn calculate_score(answers: &Answers) -> ScoreResult {
    let total = answers.total();
    ScoreResult {
        total,
        tier: RiskTier::from_score(total),
    }
}
