pub mod chunker;
pub mod llm_provider;
pub mod sentiment;
pub mod summarizer;
pub mod text_extract;
