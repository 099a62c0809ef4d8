use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::llm_provider::LlmClient;
use crate::services::sentiment::SentimentClassifier;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub llm: Arc<LlmClient>,
    pub classifier: Arc<SentimentClassifier>,
}

impl AppState {
    pub fn new(config: AppConfig, llm: LlmClient, classifier: SentimentClassifier) -> Self {
        Self {
            config: Arc::new(config),
            llm: Arc::new(llm),
            classifier: Arc::new(classifier),
        }
    }
}
