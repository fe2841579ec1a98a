//! Axum route handlers for the Matching API.

use std::collections::HashMap;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::documents::{extract_pdf_text, load_job_descriptions};
use crate::errors::AppError;
use crate::matching::pipeline::{analyze_many, analyze_single, MatchScores, RankingOutcome};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    #[serde(flatten)]
    pub scores: MatchScores,
    /// `final_score` as a whole percentage, truncated.
    pub match_percent: u32,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    #[serde(flatten)]
    pub outcome: RankingOutcome,
    /// JD files found in the directory but not readable; not part of `evaluated`.
    pub skipped: Vec<String>,
}

/// One uploaded file from a multipart form.
struct Upload {
    file_name: String,
    bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Multipart fields `resume` and `job_description` (PDF).
/// Scores the pair; any missing sub-score fails the request with 422.
pub async fn handle_match(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let mut uploads = collect_uploads(&mut multipart).await?;
    let resume = require_upload(&mut uploads, "resume")?;
    let job_description = require_upload(&mut uploads, "job_description")?;

    let resume_text = extract_pdf_text(&resume.file_name, resume.bytes).await?;
    let jd_text = extract_pdf_text(&job_description.file_name, job_description.bytes).await?;

    let scores = analyze_single(&resume_text, &jd_text, state.judge.as_ref()).await?;
    info!(
        "Scored '{}' against '{}': final={:.2}",
        resume.file_name, job_description.file_name, scores.final_score
    );

    let match_percent = (scores.final_score * 100.0) as u32;
    Ok(Json(MatchResponse {
        scores,
        match_percent,
    }))
}

/// POST /api/v1/match/rank
///
/// Multipart field `resume` (PDF). Scores it against every job-description PDF in the
/// configured directory and returns the top matches.
pub async fn handle_rank(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RankResponse>, AppError> {
    let mut uploads = collect_uploads(&mut multipart).await?;
    let resume = require_upload(&mut uploads, "resume")?;
    let resume_text = extract_pdf_text(&resume.file_name, resume.bytes).await?;

    let loaded = load_job_descriptions(&state.config.jd_dir).await?;

    let outcome = analyze_many(
        &resume_text,
        loaded.documents,
        state.judge.clone(),
        state.config.rank_concurrency,
    )
    .await?;

    Ok(Json(RankResponse {
        outcome,
        skipped: loaded.skipped,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart helpers
// ────────────────────────────────────────────────────────────────────────────

async fn collect_uploads(multipart: &mut Multipart) -> Result<HashMap<String, Upload>, AppError> {
    let mut uploads = HashMap::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let file_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{name}.pdf"));
        let bytes = field.bytes().await?;
        uploads.insert(name, Upload { file_name, bytes });
    }
    Ok(uploads)
}

fn require_upload(uploads: &mut HashMap<String, Upload>, name: &str) -> Result<Upload, AppError> {
    uploads
        .remove(name)
        .filter(|upload| !upload.bytes.is_empty())
        .ok_or_else(|| AppError::Validation(format!("a PDF upload named '{name}' is required")))
}
