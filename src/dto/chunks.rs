use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChunkPreviewRequest {
    pub text: String,
    pub chunk_size: Option<usize>,
    pub chunk_overlap: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ChunkPreviewResponse {
    pub chunk_count: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub chunks: Vec<String>,
    /// Color-coded markup of the chunking, ready to render inline.
    pub html: String,
}
