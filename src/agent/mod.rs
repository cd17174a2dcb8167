//! The hosted conversational agent and the tools it may call.
//!
//! The agent decides on its own whether, when and how often to invoke a
//! registered tool; callers only see the final text of a run.

pub mod chat;
pub mod tools;

pub use chat::ChatAgent;
pub use tools::{ScrapeJobsTool, Tool, ToolRegistry};

use async_trait::async_trait;

/// Name the agent is created under
pub const AGENT_NAME: &str = "JobScraperAgent";

/// Standing instructions given to the agent
pub const AGENT_INSTRUCTIONS: &str =
    "You are an assistant that finds and summarizes job postings.";

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("agent request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("agent service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed agent response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("agent response contained no choices")]
    EmptyResponse,

    #[error("agent kept calling tools after {0} rounds without replying")]
    ToolRounds(usize),
}

/// A conversational agent holding one session thread
#[async_trait]
pub trait Agent: Send {
    /// Submit one user message and run the agent to completion, returning its reply
    async fn run(&mut self, input: &str) -> Result<String, AgentError>;
}
