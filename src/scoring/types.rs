use serde::{Deserialize, Serialize};

/// Weighted-mean bound for a candidate to be rated critical.
pub const CRITICAL_RISK_MEAN: f32 = 0.9;
/// Weighted-mean bound for a candidate to be rated high.
pub const HIGH_RISK_MEAN: f32 = 0.8;
/// Weighted-mean bound for a candidate to be rated medium.
pub const MEDIUM_RISK_MEAN: f32 = 0.7;

/// Overall overlap percentage bound for a HIGH verdict.
pub const HIGH_OVERLAP_PCT: f32 = 60.0;
/// Overall overlap percentage bound for a MEDIUM verdict.
pub const MEDIUM_OVERLAP_PCT: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Per-candidate risk category.
pub enum RiskCategory {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskCategory {
    /// Categorizes from the weighted similarity mean. The mean may exceed
    /// 1.0 because of methodology weighting, which is how a candidate lands
    /// in `Critical` from matches whose raw similarity never does.
    pub fn from_weighted_mean(mean: f32) -> Self {
        if mean > CRITICAL_RISK_MEAN {
            Self::Critical
        } else if mean > HIGH_RISK_MEAN {
            Self::High
        } else if mean > MEDIUM_RISK_MEAN {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
/// Whole-document risk verdict.
pub enum RiskAssessment {
    Low,
    Medium,
    High,
    /// No candidate produced a qualifying match; overlap is unmeasured, not
    /// zero.
    Unknown,
}

impl RiskAssessment {
    /// Bands an overall overlap percentage into a verdict.
    pub fn from_overall_overlap(pct: f32) -> Self {
        if pct > HIGH_OVERLAP_PCT {
            Self::High
        } else if pct > MEDIUM_OVERLAP_PCT {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Score for one candidate document.
pub struct CandidateScore {
    /// Weighted mean similarity as a percentage, one decimal. May exceed
    /// 100 for methodology-heavy matches; never exceeds 150.
    pub overlap_percentage: f32,
    /// Matches whose raw similarity clears the strong threshold.
    pub high_risk_matches: usize,
    pub total_matches: usize,
    pub risk_category: RiskCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Per-candidate score keyed by its URL, in candidate order.
pub struct CandidateBreakdown {
    pub url: String,
    pub score: CandidateScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Aggregated verdict across all candidates.
pub struct AggregateScores {
    /// Mean of per-candidate overlaps, one decimal. `None` when no candidate
    /// qualified.
    pub overall_overlap_pct: Option<f32>,
    /// `max(0, 100 - overall)`, one decimal. `None` when overlap is unknown.
    pub novelty_score: Option<f32>,
    pub risk_assessment: RiskAssessment,
    pub total_high_risk_matches: usize,
    /// Candidates that contributed at least one qualifying match.
    pub candidates_scored: usize,
    pub breakdown: Vec<CandidateBreakdown>,
}

impl AggregateScores {
    /// The unknown sentinel: nothing measured, nothing claimed.
    pub fn unknown() -> Self {
        Self {
            overall_overlap_pct: None,
            novelty_score: None,
            risk_assessment: RiskAssessment::Unknown,
            total_high_risk_matches: 0,
            candidates_scored: 0,
            breakdown: Vec::new(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.risk_assessment.is_unknown()
    }
}
