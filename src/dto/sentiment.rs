use serde::{Deserialize, Serialize};

use crate::services::sentiment::{PolarityScores, SentimentLabel};

#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SentimentVerdict {
    pub label: SentimentLabel,
    pub scores: PolarityScores,
}
