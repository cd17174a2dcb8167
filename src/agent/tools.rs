use crate::extract::JobExtractor;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// A function the agent may invoke mid-conversation.
///
/// Tools always answer with text; failures are described in the text rather
/// than raised, since the agent can only reason over what it reads.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the arguments object
    fn parameters(&self) -> Value;

    async fn call(&self, args: Value) -> String;
}

/// Declared shape of a tool as advertised to the agent
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Set of tools the agent can call, looked up by name
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any earlier tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    /// Specs of every registered tool, in registration order
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools
            .iter()
            .map(|t| ToolSpec {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters(),
            })
            .collect()
    }

    /// Invoke the named tool with raw JSON arguments as sent by the agent
    pub async fn dispatch(&self, name: &str, arguments: &str) -> String {
        let Some(tool) = self.tools.iter().find(|t| t.name() == name) else {
            ::log::warn!("Agent requested unknown tool {}", name);
            return format!("Unknown tool: {name}");
        };

        let args = if arguments.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            match serde_json::from_str::<Value>(arguments) {
                Ok(args) => args,
                Err(e) => {
                    ::log::warn!("Unparsable arguments for {}: {}", name, e);
                    return format!("Invalid arguments for {name}: {e}");
                }
            }
        };

        ::log::debug!("Dispatching tool {} with {}", name, args);
        tool.call(args).await
    }
}

/// Arguments of the `scrape_jobs` tool
#[derive(Debug, Deserialize)]
struct ScrapeJobsArgs {
    keyword: String,
    location: String,
}

/// Exposes [`JobExtractor`] to the agent as `scrape_jobs`
pub struct ScrapeJobsTool {
    extractor: JobExtractor,
}

impl ScrapeJobsTool {
    pub const NAME: &'static str = "scrape_jobs";

    pub fn new(extractor: JobExtractor) -> Self {
        Self { extractor }
    }
}

#[async_trait]
impl Tool for ScrapeJobsTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Scrape job listings from Indeed using keyword and location."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "keyword": {
                    "type": "string",
                    "description": "Job title, skill or other search keywords"
                },
                "location": {
                    "type": "string",
                    "description": "City, region or country to search in"
                }
            },
            "required": ["keyword", "location"]
        })
    }

    async fn call(&self, args: Value) -> String {
        match serde_json::from_value::<ScrapeJobsArgs>(args) {
            Ok(args) => self.extractor.extract(&args.keyword, &args.location).await,
            Err(e) => format!("Invalid arguments for {}: {e}", Self::NAME),
        }
    }
}
