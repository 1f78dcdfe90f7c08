//! External collaborator seams: completion, weather, and email providers
//!
//! Each hard operation is delegated to a third-party service behind a
//! trait, so the orchestration logic can be exercised with scripted
//! providers in tests.

mod completion;
mod email;
mod weather;

pub use completion::OpenAiCompletion;
pub use email::ResendEmail;
pub use weather::OpenWeatherMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::conversation::Turn;
use crate::tools::{ToolDefinition, ToolInvocation};
use crate::Result;

/// One completion response: optional text plus any requested tool calls
#[derive(Debug, Clone, Default)]
pub struct CompletionOutcome {
    pub text: Option<String>,
    pub tool_calls: Vec<ToolInvocation>,
}

/// Chat-completion capability
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Request one completion over the conversation with the given tools
    ///
    /// # Errors
    ///
    /// Returns error if the provider call fails; completion failures are
    /// not locally recovered and propagate to the caller.
    async fn complete(
        &self,
        model: &str,
        turns: &[Turn],
        tools: &[ToolDefinition],
    ) -> Result<CompletionOutcome>;
}

/// Result of a weather lookup
///
/// Provider failures are folded into the `failed` branch; this type is the
/// wire format returned by `GET /get_weather/{city}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WeatherReport {
    /// Lookup succeeded
    Success {
        /// Temperature in degrees Celsius
        temp: f64,
        description: String,
    },
    /// Lookup failed
    Failed { message: String },
}

/// Weather lookup capability
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current weather for a city
    ///
    /// Infallible at this boundary: any upstream error becomes
    /// [`WeatherReport::Failed`].
    async fn current_weather(&self, city: &str) -> WeatherReport;
}

/// Result of an email dispatch
///
/// Echoes the recipient and body back to the caller; this type is the wire
/// format returned by `POST /send_email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum EmailReceipt {
    /// Email was accepted by the provider
    Success {
        receiver_email_account: String,
        message: String,
    },
    /// Email could not be sent
    Failure {
        receiver_email_account: String,
        message: String,
    },
}

impl EmailReceipt {
    /// Whether the dispatch succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Email dispatch capability
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send an email
    ///
    /// Infallible at this boundary: provider exceptions are caught and
    /// converted to [`EmailReceipt::Failure`], never propagated.
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> EmailReceipt;
}
