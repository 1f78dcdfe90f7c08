//! `OpenAI` chat-completion provider with function calling

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CompletionOutcome, CompletionProvider};
use crate::conversation::Turn;
use crate::tools::{ToolDefinition, ToolInvocation};
use crate::{Error, Result};

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Chat completions via the `OpenAI` API
pub struct OpenAiCompletion {
    client: reqwest::Client,
    api_key: String,
}

impl OpenAiCompletion {
    /// Create a new completion provider
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "OpenAI API key required for chat completions".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletion {
    async fn complete(
        &self,
        model: &str,
        turns: &[Turn],
        tools: &[ToolDefinition],
    ) -> Result<CompletionOutcome> {
        let request = ChatCompletionRequest {
            model,
            messages: turns,
            tools,
        };

        let response = self
            .client
            .post(COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "completion request failed");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "completion API error");
            return Err(Error::Completion(format!(
                "completion API error {status}: {body}"
            )));
        }

        let result: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse completion response");
            e
        })?;

        let message = result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| Error::Completion("completion response had no choices".to_string()))?;

        let tool_calls = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| {
                // Arguments arrive as a JSON string; unparseable ones become
                // an empty object and flow through the failure path
                let arguments = serde_json::from_str(&call.function.arguments)
                    .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));
                ToolInvocation {
                    name: call.function.name,
                    arguments,
                }
            })
            .collect();

        Ok(CompletionOutcome {
            text: message.content,
            tool_calls,
        })
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    tools: &'a [ToolDefinition],
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}
