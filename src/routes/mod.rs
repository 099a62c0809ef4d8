pub mod chunks;
pub mod health;
pub mod sentiment;
pub mod summarize;
