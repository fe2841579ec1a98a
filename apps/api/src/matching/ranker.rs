//! Ranker/Filter: multi-job mode selection over finished results.
//!
//! Algorithm:
//! 1. Gate: keep results whose `overall_score` lies in [50, 100] percent
//! 2. Rank: sort by `final_score` descending (order among ties is unspecified)
//! 3. Truncate to the top 5
//!
//! Pure function over the result list; callers finish every pair before ranking.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::matching::combiner::{to_percent, CompleteScores};

/// Relevance gate on the unweighted overall score, in percent.
pub const OVERALL_BAND: RangeInclusive<f64> = 50.0..=100.0;
pub const TOP_N: usize = 5;

/// One scored job description. Every score is a percentage rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch {
    pub job_label: String,
    pub final_score: f64,
    pub overall_score: f64,
    pub education_score: f64,
    pub experience_score: f64,
    pub skills_score: f64,
}

impl RankedMatch {
    pub fn from_scores(job_label: impl Into<String>, scores: &CompleteScores) -> Self {
        let combined = scores.combine();
        RankedMatch {
            job_label: job_label.into(),
            final_score: to_percent(combined.final_score),
            overall_score: to_percent(combined.overall_score),
            education_score: to_percent(scores.education),
            experience_score: to_percent(scores.experience),
            skills_score: to_percent(scores.skills),
        }
    }
}

/// Gates on `overall_score`, ranks by `final_score`, keeps the top five.
pub fn rank_matches(results: Vec<RankedMatch>) -> Vec<RankedMatch> {
    let mut gated: Vec<RankedMatch> = results
        .into_iter()
        .filter(|r| OVERALL_BAND.contains(&r.overall_score))
        .collect();

    // Sort descending: highest final score first
    gated.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    gated.truncate(TOP_N);
    gated
}
