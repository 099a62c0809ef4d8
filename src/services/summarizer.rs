//! Summarization orchestration: forwards ordered chunks to the LLM client
//! under one of three combination strategies and collects the requested
//! number of final summaries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::services::llm_provider::{LlmClient, ServiceError};

/// Prompt used for the per-chunk pass of `map_reduce`.
const MAP_INSTRUCTION: &str = "Summarize";

/// How partial chunk results are merged into one summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainStrategy {
    /// One pass over all chunks joined together.
    Direct,
    /// Summarize each chunk independently, then merge the partials.
    #[default]
    MapReduce,
    /// Fold each chunk into a running summary.
    Refine,
}

impl ChainStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainStrategy::Direct => "direct",
            ChainStrategy::MapReduce => "map_reduce",
            ChainStrategy::Refine => "refine",
        }
    }
}

impl fmt::Display for ChainStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(ChainStrategy::Direct),
            "map_reduce" => Ok(ChainStrategy::MapReduce),
            "refine" => Ok(ChainStrategy::Refine),
            other => Err(format!(
                "unknown strategy '{other}' (expected direct, map_reduce, or refine)"
            )),
        }
    }
}

fn render_prompt(instruction: &str, text: &str) -> String {
    format!("{instruction}:\n\n{text}")
}

/// Produce `num_summaries` summaries of `chunks` under `strategy`. Each
/// repeat is an independent run against the same inputs; outputs are
/// collected in order.
pub async fn summarize(
    llm: &LlmClient,
    chunks: &[String],
    instruction: &str,
    strategy: ChainStrategy,
    num_summaries: u32,
) -> Result<Vec<String>, ServiceError> {
    if chunks.is_empty() {
        return Err(ServiceError::EmptyInput);
    }

    tracing::info!(
        "summarize: {} chunks, strategy={strategy}, repeats={num_summaries}, model={}",
        chunks.len(),
        llm.model()
    );

    let mut summaries = Vec::with_capacity(num_summaries as usize);
    for run in 0..num_summaries {
        let summary = match strategy {
            ChainStrategy::Direct => direct(llm, chunks, instruction).await?,
            ChainStrategy::MapReduce => map_reduce(llm, chunks, instruction).await?,
            ChainStrategy::Refine => refine(llm, chunks, instruction).await?,
        };
        tracing::debug!("summarize: run {run} produced {} chars", summary.len());
        summaries.push(summary);
    }

    Ok(summaries)
}

async fn direct(llm: &LlmClient, chunks: &[String], instruction: &str) -> Result<String, ServiceError> {
    llm.complete(&render_prompt(instruction, &chunks.join("\n\n")))
        .await
}

async fn map_reduce(
    llm: &LlmClient,
    chunks: &[String],
    instruction: &str,
) -> Result<String, ServiceError> {
    let mut partials = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        let partial = llm.complete(&render_prompt(MAP_INSTRUCTION, chunk)).await?;
        tracing::debug!("map_reduce: chunk {i} summarized ({} chars)", partial.len());
        partials.push(partial);
    }
    llm.complete(&render_prompt(instruction, &partials.join("\n\n")))
        .await
}

async fn refine(llm: &LlmClient, chunks: &[String], instruction: &str) -> Result<String, ServiceError> {
    let mut summary = llm.complete(&render_prompt(instruction, &chunks[0])).await?;
    for (i, chunk) in chunks.iter().enumerate().skip(1) {
        let prompt = format!(
            "{instruction}.\n\nExisting summary:\n{summary}\n\nAdditional context:\n{chunk}\n\n\
             Refine the existing summary so it also covers the additional context."
        );
        summary = llm.complete(&prompt).await?;
        tracing::debug!("refine: folded chunk {i} ({} chars so far)", summary.len());
    }
    Ok(summary)
}
