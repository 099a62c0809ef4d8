pub mod chunks;
pub mod sentiment;
pub mod summarize;
