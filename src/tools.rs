//! Declarative tool list offered to the completion provider

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Tool name for the weather lookup capability
pub const WEATHER_TOOL: &str = "get_weather_for_city";

/// Tool name for the email dispatch capability
pub const EMAIL_TOOL: &str = "send_email_to_user";

/// A capability descriptor in the provider's function-calling format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDefinition,
}

/// The function half of a tool definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A tool call requested by the completion provider
///
/// Ephemeral: created from one completion response, dispatched immediately,
/// never persisted.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: serde_json::Value,
}

impl ToolInvocation {
    /// Extract a string argument, defaulting to empty when absent
    ///
    /// Missing arguments flow through the collaborator's failure path
    /// rather than aborting the round.
    #[must_use]
    pub fn string_arg(&self, key: &str) -> String {
        self.arguments
            .get(key)
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

/// The fixed tool list offered on every completion call
#[must_use]
pub fn builtin_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: WEATHER_TOOL.to_string(),
                description: "Get the weather for a given city. You can use this to get \
                              the live weather information for the user."
                    .to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "city": {
                            "type": "string",
                            "description": "The city you want to know the weather of.",
                        },
                    },
                    "required": ["city"],
                    "additionalProperties": false,
                }),
            },
        },
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: EMAIL_TOOL.to_string(),
                description: "Send an email to a user given an email address. You can use \
                              this to email any information the user requests if they \
                              provide an email address."
                    .to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "email_account": {
                            "type": "string",
                            "description": "The email account you want to send the email to.",
                        },
                        "subject": {
                            "type": "string",
                            "description": "The subject line you want for the email.",
                        },
                        "message": {
                            "type": "string",
                            "description": "The actual content/body/text of your email.",
                        },
                    },
                    "required": ["email_account", "subject", "message"],
                    "additionalProperties": false,
                }),
            },
        },
    ]
}
