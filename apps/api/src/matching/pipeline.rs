//! Match Pipeline: raw document text → sub-scores → combined result(s).
//!
//! The two modes treat a missing sub-score differently:
//! - single job: the whole analysis fails with `AppError::ScoringFailed`
//! - many jobs: the pair is dropped and the run continues
//!
//! Pairs in a multi-job run are independent. They run with bounded concurrency and
//! ranking starts only once every pair has finished.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::documents::Document;
use crate::errors::AppError;
use crate::matching::combiner::{CompleteScores, SubScores};
use crate::matching::judgment::{JudgmentScorer, ScoreDimension};
use crate::matching::lexical::lexical_score;
use crate::matching::normalize::{normalize, NormalizedText};
use crate::matching::ranker::{rank_matches, RankedMatch};

/// User-visible message when a single-job analysis cannot be completed.
pub const SCORING_FAILED_MESSAGE: &str = "Failed to calculate scores. Please try again.";

/// Single-job result. All values are unit-interval floats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchScores {
    pub education: f64,
    pub skills: f64,
    pub experience: f64,
    pub final_score: f64,
    pub overall_score: f64,
}

impl From<CompleteScores> for MatchScores {
    fn from(scores: CompleteScores) -> Self {
        let combined = scores.combine();
        MatchScores {
            education: scores.education,
            skills: scores.skills,
            experience: scores.experience,
            final_score: combined.final_score,
            overall_score: combined.overall_score,
        }
    }
}

/// Multi-job result: the ranked top matches plus how many pairs were tried and dropped.
/// `evaluated` counts the job descriptions passed in, not files that failed to load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingOutcome {
    pub matches: Vec<RankedMatch>,
    pub evaluated: usize,
    pub dropped: usize,
}

/// Computes the three sub-scores for one pair: two judge round trips, one local similarity.
pub async fn evaluate_pair(
    resume: &NormalizedText,
    job_description: &NormalizedText,
    judge: &dyn JudgmentScorer,
) -> SubScores {
    let education = judge
        .judge(resume, job_description, ScoreDimension::Education)
        .await;
    let skills = judge
        .judge(resume, job_description, ScoreDimension::Skills)
        .await;
    let experience = Some(lexical_score(resume, job_description));

    SubScores {
        education,
        skills,
        experience,
    }
}

/// Scores one resume against one job description.
pub async fn analyze_single(
    resume_text: &str,
    job_description_text: &str,
    judge: &dyn JudgmentScorer,
) -> Result<MatchScores, AppError> {
    let resume = normalize(resume_text);
    let job_description = normalize(job_description_text);

    let scores = evaluate_pair(&resume, &job_description, judge).await;
    debug!("Single-job sub-scores: {scores:?}");

    let complete = scores.complete().ok_or_else(|| {
        info!(
            "Single-job analysis incomplete, missing: {}",
            scores.missing().join(", ")
        );
        AppError::ScoringFailed(SCORING_FAILED_MESSAGE.to_string())
    })?;

    Ok(MatchScores::from(complete))
}

/// Scores one resume against every job description, then gates, ranks and truncates.
pub async fn analyze_many(
    resume_text: &str,
    job_descriptions: Vec<Document>,
    judge: Arc<dyn JudgmentScorer>,
    concurrency: usize,
) -> Result<RankingOutcome, AppError> {
    let resume = Arc::new(normalize(resume_text));
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let evaluated = job_descriptions.len();

    let mut tasks = JoinSet::new();
    for document in job_descriptions {
        let resume = resume.clone();
        let judge = judge.clone();
        let semaphore = semaphore.clone();

        tasks.spawn(async move {
            // never closed, so acquisition only waits
            let _permit = semaphore.acquire_owned().await.ok();
            let job_description = normalize(&document.text);
            let scores = evaluate_pair(&resume, &job_description, judge.as_ref()).await;
            (document.label, scores)
        });
    }

    let mut scored = Vec::with_capacity(evaluated);
    let mut dropped = 0;
    while let Some(joined) = tasks.join_next().await {
        let (label, scores) = joined.map_err(|e| {
            AppError::Internal(anyhow::Error::new(e).context("pair evaluation task failed"))
        })?;

        match scores.complete() {
            Some(complete) => {
                debug!("'{label}' scored {complete:?}");
                scored.push(RankedMatch::from_scores(label, &complete));
            }
            None => {
                dropped += 1;
                info!(
                    "Dropping '{label}': missing {}",
                    scores.missing().join(", ")
                );
            }
        }
    }

    // Completion order is arbitrary; fix the input order before the (stable) ranking sort.
    scored.sort_by(|a, b| a.job_label.cmp(&b.job_label));
    let matches = rank_matches(scored);

    info!(
        "Ranked {} of {evaluated} job description(s), {dropped} dropped",
        matches.len()
    );

    Ok(RankingOutcome {
        matches,
        evaluated,
        dropped,
    })
}
