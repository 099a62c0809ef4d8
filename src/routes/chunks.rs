use axum::{extract::State, Json};

use crate::dto::chunks::{ChunkPreviewRequest, ChunkPreviewResponse};
use crate::errors::AppError;
use crate::services::chunker;
use crate::state::AppState;

/// Interactive chunk-boundary debugging: split the submitted text and render
/// the color-coded view of it.
pub async fn preview(
    State(state): State<AppState>,
    Json(payload): Json<ChunkPreviewRequest>,
) -> Result<Json<ChunkPreviewResponse>, AppError> {
    let chunk_size = payload
        .chunk_size
        .unwrap_or(state.config.chunking.chunk_size);
    let chunk_overlap = payload
        .chunk_overlap
        .unwrap_or(state.config.chunking.chunk_overlap);

    let chunks = chunker::split(&payload.text, chunk_size, chunk_overlap)?;
    let html = chunker::colorize(&payload.text, chunk_size, chunk_overlap)?;

    Ok(Json(ChunkPreviewResponse {
        chunk_count: chunks.len(),
        chunk_size,
        chunk_overlap,
        chunks,
        html,
    }))
}
