use crate::agent::tools::{ToolRegistry, ToolSpec};
use crate::agent::{AGENT_INSTRUCTIONS, AGENT_NAME, Agent, AgentError};
use crate::config::AgentConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Upper bound on tool-call rounds within a single run
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 5;

// -- Chat completions wire types --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum WireRole {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireMessage {
    role: WireRole,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl WireMessage {
    fn text(role: WireRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: WireRole::Tool,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    call_type: String,
    function: WireFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Serialize)]
struct WireToolDefinition {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: WireFunctionDefinition,
}

#[derive(Debug, Serialize)]
struct WireFunctionDefinition {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

impl From<ToolSpec> for WireToolDefinition {
    fn from(spec: ToolSpec) -> Self {
        Self {
            tool_type: "function",
            function: WireFunctionDefinition {
                name: spec.name,
                description: spec.description,
                parameters: spec.parameters,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [WireMessage],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireToolDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

fn function_type() -> String {
    "function".to_string()
}

/// Agent backed by an OpenAI-compatible chat completions endpoint.
///
/// One value is one session: the thread of messages lives as long as the
/// agent, so later turns see earlier ones. Tool calls requested by the model
/// are dispatched through the [`ToolRegistry`] and their text results are fed
/// back until the model answers in prose.
pub struct ChatAgent {
    client: Client,
    completions_url: String,
    model: String,
    api_key: Option<String>,
    tools: ToolRegistry,
    thread: Vec<WireMessage>,
    max_tool_rounds: usize,
}

impl ChatAgent {
    /// Open a session against the configured endpoint with the given tools
    pub fn new(config: &AgentConfig, tools: ToolRegistry) -> Result<Self, AgentError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let completions_url = format!("{}/chat/completions", config.endpoint.trim_end_matches('/'));

        ::log::info!(
            "Created agent {} with {} tool(s)",
            AGENT_NAME,
            tools.specs().len()
        );

        Ok(Self {
            client,
            completions_url,
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            tools,
            thread: vec![WireMessage::text(WireRole::System, AGENT_INSTRUCTIONS)],
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        })
    }

    /// Override the tool round limit
    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    /// Number of messages in the session thread, system instructions included
    pub fn message_count(&self) -> usize {
        self.thread.len()
    }

    async fn complete(&self) -> Result<WireMessage, AgentError> {
        let tools = self
            .tools
            .specs()
            .into_iter()
            .map(WireToolDefinition::from)
            .collect::<Vec<_>>();
        let tool_choice = (!tools.is_empty()).then_some("auto");

        let request = ChatRequest {
            model: &self.model,
            messages: &self.thread,
            tools,
            tool_choice,
        };

        let mut builder = self.client.post(&self.completions_url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        ::log::debug!("Agent service returned HTTP {}", status.as_u16());

        if !status.is_success() {
            return Err(AgentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(AgentError::EmptyResponse)?;
        ::log::debug!("Agent finish reason: {:?}", choice.finish_reason);

        Ok(choice.message)
    }

    async fn run_to_completion(&mut self) -> Result<String, AgentError> {
        let mut rounds = 0;

        loop {
            let message = self.complete().await?;
            let calls = message.tool_calls.clone().unwrap_or_default();
            let reply = message.content.clone().unwrap_or_default();
            self.thread.push(message);

            if calls.is_empty() {
                return Ok(reply);
            }
            if rounds == self.max_tool_rounds {
                return Err(AgentError::ToolRounds(self.max_tool_rounds));
            }
            rounds += 1;

            for call in calls {
                ::log::info!("Agent invoked tool {}", call.function.name);
                let output = self
                    .tools
                    .dispatch(&call.function.name, &call.function.arguments)
                    .await;
                self.thread.push(WireMessage::tool_result(call.id, output));
            }
        }
    }
}

#[async_trait]
impl Agent for ChatAgent {
    async fn run(&mut self, input: &str) -> Result<String, AgentError> {
        let checkpoint = self.thread.len();
        self.thread.push(WireMessage::text(WireRole::User, input));

        let result = self.run_to_completion().await;
        if let Err(e) = &result {
            ::log::warn!("Agent run failed, rolling back thread: {}", e);
            self.thread.truncate(checkpoint);
        }
        result
    }
}
