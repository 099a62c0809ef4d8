use axum::{extract::State, Json};

use crate::dto::sentiment::{SentimentRequest, SentimentVerdict};
use crate::errors::AppError;
use crate::services::sentiment::label_for;
use crate::state::AppState;

pub async fn classify(
    State(state): State<AppState>,
    Json(payload): Json<SentimentRequest>,
) -> Result<Json<SentimentVerdict>, AppError> {
    if payload.text.trim().is_empty() {
        return Err(AppError::Validation("Text cannot be empty".to_string()));
    }

    let scores = state.classifier.scores(&payload.text);
    Ok(Json(SentimentVerdict {
        label: label_for(scores),
        scores,
    }))
}
