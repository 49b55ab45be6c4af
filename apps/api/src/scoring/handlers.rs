use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::feedback::{build_feedback, FeedbackReport};
use crate::models::profile::JobProfile;
use crate::models::resume::ParsedResume;
use crate::parsing::{clean_text, read_document, FileFormat};
use crate::scoring::batch::{rank_resumes, BatchReport, RankOptions, UploadedFile, DEFAULT_TOP_N};
use crate::scoring::ScoreResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ParseResponse {
    pub file_name: String,
    pub format: FileFormat,
    pub parsed: ParsedResume,
}

#[derive(Serialize)]
pub struct ScoreResponse {
    pub category: String,
    pub role: String,
    #[serde(flatten)]
    pub score: ScoreResult,
    pub parsed_data: ParsedResume,
    pub feedback: FeedbackReport,
}

#[derive(Deserialize)]
pub struct ScoreTextRequest {
    pub text: String,
    pub category: String,
    pub role: String,
    /// Extension of the file the text came from; only `pdf` earns the format check.
    pub file_extension: Option<String>,
}

#[derive(Serialize)]
pub struct RankResponse {
    pub category: String,
    pub role: String,
    #[serde(flatten)]
    pub report: BatchReport,
}

/// Multipart fields shared by the upload endpoints.
#[derive(Default)]
struct UploadForm {
    files: Vec<UploadedFile>,
    category: Option<String>,
    role: Option<String>,
    top_n: Option<String>,
    min_score: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" | "files" => {
                    let file_name = field
                        .file_name()
                        .map(str::to_string)
                        .ok_or_else(|| AppError::Validation(format!("Field '{name}' has no file name")))?;
                    let bytes: Bytes = field.bytes().await?;
                    form.files.push(UploadedFile { file_name, bytes });
                }
                "category" => form.category = Some(field.text().await?),
                "role" => form.role = Some(field.text().await?),
                "top_n" => form.top_n = Some(field.text().await?),
                "min_score" => form.min_score = Some(field.text().await?),
                _ => {}
            }
        }
        Ok(form)
    }

    fn single_file(&mut self) -> Result<UploadedFile, AppError> {
        match self.files.len() {
            1 => Ok(self.files.remove(0)),
            0 => Err(AppError::Validation("Missing 'file' field".to_string())),
            n => Err(AppError::Validation(format!("Expected one file, got {n}"))),
        }
    }

    fn target(&self) -> Result<(String, String), AppError> {
        let category = required(&self.category, "category")?;
        let role = required(&self.role, "role")?;
        Ok((category, role))
    }
}

fn required(value: &Option<String>, field: &str) -> Result<String, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(format!("Missing '{field}' field")))
}

fn parse_number<T: std::str::FromStr>(value: &Option<String>, field: &str, default: T) -> Result<T, AppError> {
    match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Validation(format!("'{field}' must be a non-negative integer"))),
        None => Ok(default),
    }
}

fn lookup_profile<'a>(state: &'a AppState, category: &str, role: &str) -> Result<&'a JobProfile, AppError> {
    state
        .profiles
        .get(category, role)
        .ok_or_else(|| AppError::NotFound(format!("No job profile for '{category}' / '{role}'")))
}

async fn score_and_respond(
    state: &AppState,
    category: String,
    role: String,
    text: &str,
    format: Option<FileFormat>,
) -> Result<ScoreResponse, AppError> {
    let profile = lookup_profile(state, &category, &role)?;
    let parsed = state.extractor.extract(text).await;
    let score = state.engine.score(&parsed, profile, text, format).await;
    let feedback = build_feedback(&score);
    info!(
        "Scored resume for {} / {}: total={}",
        category, role, score.total_score
    );
    Ok(ScoreResponse {
        category,
        role,
        score,
        parsed_data: parsed,
        feedback,
    })
}

/// POST /api/v1/resumes/parse
/// Multipart `file` (.pdf or .docx) -> extracted entities.
pub async fn handle_parse(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    let file = UploadForm::read(multipart).await?.single_file()?;
    let (format, text) = read_document(&file.file_name, file.bytes).await?;
    let parsed = state.extractor.extract(&text).await;
    Ok(Json(ParseResponse {
        file_name: file.file_name,
        format,
        parsed,
    }))
}

/// POST /api/v1/resumes/score
/// Multipart `file`, `category`, `role`.
pub async fn handle_score(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScoreResponse>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let (category, role) = form.target()?;
    lookup_profile(&state, &category, &role)?;
    let file = form.single_file()?;
    let (format, text) = read_document(&file.file_name, file.bytes).await?;
    let response = score_and_respond(&state, category, role, &text, Some(format)).await?;
    Ok(Json(response))
}

/// POST /api/v1/resumes/score-text
/// Scores already-extracted text.
pub async fn handle_score_text(
    State(state): State<AppState>,
    Json(req): Json<ScoreTextRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("'text' must not be empty".to_string()));
    }
    let format = req
        .file_extension
        .as_deref()
        .and_then(|ext| FileFormat::from_extension(ext).ok());
    let text = clean_text(&req.text);
    let response = score_and_respond(&state, req.category, req.role, &text, format).await?;
    Ok(Json(response))
}

/// POST /api/v1/resumes/rank
/// Multipart: repeated `files`, `category`, `role`, optional `top_n` and `min_score`.
pub async fn handle_rank(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RankResponse>, AppError> {
    let form = UploadForm::read(multipart).await?;
    let (category, role) = form.target()?;
    let profile = lookup_profile(&state, &category, &role)?;
    if form.files.is_empty() {
        return Err(AppError::Validation("Upload at least one file in 'files'".to_string()));
    }

    let top_n: usize = parse_number(&form.top_n, "top_n", DEFAULT_TOP_N)?;
    if top_n == 0 {
        return Err(AppError::Validation("'top_n' must be at least 1".to_string()));
    }
    let options = RankOptions {
        top_n,
        min_score: parse_number(&form.min_score, "min_score", 0)?,
        concurrency: state.config.batch_concurrency,
    };

    let report = rank_resumes(&state.extractor, &state.engine, profile, form.files, options).await;
    Ok(Json(RankResponse {
        category,
        role,
        report,
    }))
}
