//! Axum route handlers for the analysis API.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::analysis::extract::{extract_text, FileFormat};
use crate::analysis::scoring::ScoreBreakdown;
use crate::analysis::sections::{ContactDetails, Sections};
use crate::errors::AppError;
use crate::state::AppState;

/// Longest `resume_text` preview returned to the client, in characters.
const PREVIEW_CHARS: usize = 500;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub filename: String,
    pub resume_text: String,
    pub sections: Sections,
    pub contact: ContactDetails,
    pub score: ScoreBreakdown,
    pub word_count: usize,
    pub character_count: usize,
}

/// POST /analyze
///
/// Multipart pipeline: read the `resume` file and the optional
/// `job_description` field, extract text, detect sections, score, respond.
/// The upload is processed entirely in memory and never stored.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut resume: Option<(String, Bytes)> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("resume") {
            let filename = field.file_name().unwrap_or_default().to_string();
            resume = Some((filename, field.bytes().await?));
        } else if field.name() == Some("job_description") {
            job_description = field.text().await?;
        }
    }

    let (filename, data) =
        resume.ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;

    if filename.is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }

    let format = FileFormat::from_filename(&filename).ok_or_else(|| {
        AppError::Validation("Invalid file type. Only PDF, DOCX, TXT allowed".to_string())
    })?;

    let filename = sanitize_filename(&filename);
    info!(filename = %filename, bytes = data.len(), format = ?format, "Analyzing resume");

    let text = extract_text(format, &data)?;

    let sections = state.detector.detect(&text);
    let contact = state.detector.contact_details(&text);
    let score = state.scorer.score(&text, &sections, &job_description);

    info!(
        filename = %filename,
        overall_score = score.overall_score,
        suggestions = score.suggestions.len(),
        "Analysis complete"
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        filename,
        resume_text: preview(&text),
        word_count: text.split_whitespace().count(),
        character_count: text.chars().count(),
        sections,
        contact,
        score,
    }))
}

/// Upload-name hygiene: path separators and whitespace become underscores,
/// anything outside `[A-Za-z0-9_.-]` is dropped, leading and trailing dots
/// and underscores are stripped. The name is only echoed back, never used as
/// a path.
fn sanitize_filename(filename: &str) -> String {
    let replaced = filename.replace(&['/', '\\'][..], " ");
    let joined = replaced.split_whitespace().collect::<Vec<_>>().join("_");
    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(&['.', '_'][..])
        .to_string()
}

/// The first 500 characters of the text, with a trailing ellipsis when cut.
fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
