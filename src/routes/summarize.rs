use std::path::Path;

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::dto::sentiment::SentimentVerdict;
use crate::dto::summarize::{SummarizeParams, SummarizePathRequest, SummarizeResponse};
use crate::errors::AppError;
use crate::services::sentiment::label_for;
use crate::services::summarizer::ChainStrategy;
use crate::services::{chunker, summarizer, text_extract};
use crate::state::AppState;

/// Summarize an uploaded document. Multipart form: a `file` part plus text
/// parts `prompt` (required), `strategy`, `num_summaries`, `chunk_size`,
/// `chunk_overlap`.
pub async fn summarize_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SummarizeResponse>, AppError> {
    let max_file_size = state.config.upload.max_file_size_mb * 1024 * 1024;

    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut params = SummarizeParams::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("unnamed").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                file = Some((filename, content_type, data.to_vec()));
            }
            "prompt" => params.prompt = read_text_field(field).await?,
            "strategy" => {
                params.strategy = read_text_field(field)
                    .await?
                    .parse::<ChainStrategy>()
                    .map_err(AppError::Validation)?;
            }
            "num_summaries" => {
                params.num_summaries = Some(parse_field(read_text_field(field).await?, &name)?);
            }
            "chunk_size" => {
                params.chunk_size = Some(parse_field(read_text_field(field).await?, &name)?);
            }
            "chunk_overlap" => {
                params.chunk_overlap = Some(parse_field(read_text_field(field).await?, &name)?);
            }
            other => {
                return Err(AppError::Validation(format!(
                    "Unexpected form field '{other}'"
                )));
            }
        }
    }

    let (filename, content_type, data) =
        file.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    if data.len() > max_file_size {
        return Err(AppError::Validation(format!(
            "File too large. Maximum size is {} MB",
            state.config.upload.max_file_size_mb
        )));
    }

    if !text_extract::is_supported(&content_type, &filename) {
        return Err(AppError::Validation(format!(
            "Unsupported file type: {content_type} ('{filename}')"
        )));
    }

    let blocks = text_extract::load_bytes(&data, &content_type, &filename).await?;
    run_pipeline(&state, &filename, &blocks, &params).await.map(Json)
}

/// Summarize a document already on the server's filesystem.
pub async fn summarize_path(
    State(state): State<AppState>,
    Json(payload): Json<SummarizePathRequest>,
) -> Result<Json<SummarizeResponse>, AppError> {
    let path = Path::new(&payload.path);
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| payload.path.clone());

    let blocks = text_extract::load_path(path).await?;
    run_pipeline(&state, &filename, &blocks, &payload.params)
        .await
        .map(Json)
}

/// Shared load-split-summarize-classify pipeline.
async fn run_pipeline(
    state: &AppState,
    filename: &str,
    blocks: &[String],
    params: &SummarizeParams,
) -> Result<SummarizeResponse, AppError> {
    if params.prompt.trim().is_empty() {
        return Err(AppError::Validation("Prompt cannot be empty".to_string()));
    }

    let chunk_size = params.chunk_size.unwrap_or(state.config.chunking.chunk_size);
    let chunk_overlap = params
        .chunk_overlap
        .unwrap_or(state.config.chunking.chunk_overlap);
    let num_summaries = params
        .num_summaries
        .unwrap_or(state.config.summary.default_num_summaries)
        .clamp(1, state.config.summary.max_summaries);

    let text = text_extract::concat_blocks(blocks);
    let chunks = chunker::split(&text, chunk_size, chunk_overlap)?;

    tracing::info!(
        "summarize: '{filename}' -> {} blocks, {} chunks (size={chunk_size}, overlap={chunk_overlap})",
        blocks.len(),
        chunks.len()
    );

    let summaries = summarizer::summarize(
        &state.llm,
        &chunks,
        &params.prompt,
        params.strategy,
        num_summaries,
    )
    .await?;

    // Sentiment runs over the whole batch of summaries, not each one
    let joined = summaries.join("\n");
    let scores = state.classifier.scores(&joined);

    Ok(SummarizeResponse {
        filename: filename.to_string(),
        chunk_count: chunks.len(),
        strategy: params.strategy,
        summaries,
        sentiment: SentimentVerdict {
            label: label_for(scores),
            scores,
        },
    })
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form field: {e}")))
}

fn parse_field<T: std::str::FromStr>(value: String, name: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| AppError::Validation(format!("Invalid value for '{name}': {value}")))
}
