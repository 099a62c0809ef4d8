use serde::{Deserialize, Serialize};

use crate::dto::sentiment::SentimentVerdict;
use crate::services::summarizer::ChainStrategy;

/// Tuning knobs shared by both summarize endpoints. Unset fields fall back
/// to the configured defaults.
#[derive(Debug, Default, Deserialize)]
pub struct SummarizeParams {
    pub prompt: String,
    #[serde(default)]
    pub strategy: ChainStrategy,
    pub num_summaries: Option<u32>,
    pub chunk_size: Option<usize>,
    pub chunk_overlap: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizePathRequest {
    pub path: String,
    #[serde(flatten)]
    pub params: SummarizeParams,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub filename: String,
    pub chunk_count: usize,
    pub strategy: ChainStrategy,
    pub summaries: Vec<String>,
    pub sentiment: SentimentVerdict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_request_deserializes_flat() {
        let req: SummarizePathRequest = serde_json::from_str(
            r#"{"path": "/data/report.pdf", "prompt": "Summarize the findings",
                "strategy": "refine", "num_summaries": 2}"#,
        )
        .unwrap();
        assert_eq!(req.path, "/data/report.pdf");
        assert_eq!(req.params.strategy, ChainStrategy::Refine);
        assert_eq!(req.params.num_summaries, Some(2));
        assert_eq!(req.params.chunk_size, None);
    }

    #[test]
    fn test_strategy_defaults_to_map_reduce() {
        let req: SummarizePathRequest =
            serde_json::from_str(r#"{"path": "a.txt", "prompt": "Summarize"}"#).unwrap();
        assert_eq!(req.params.strategy, ChainStrategy::MapReduce);
    }
}
