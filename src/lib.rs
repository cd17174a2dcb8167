// Re-export modules
pub mod agent;
pub mod config;
pub mod conversation;
pub mod extract;
pub mod fetchers;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{AgentConfig, AppConfig, ConfigError, ScrapeConfig};
pub use conversation::{Conversation, Transcript};
pub use extract::JobExtractor;
pub use results::{ExtractionResult, JobPosting};
