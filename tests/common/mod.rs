//! Shared test doubles for the provider seams

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use chime_gateway::api::ApiState;
use chime_gateway::{
    CompletionOutcome, CompletionProvider, EmailProvider, EmailReceipt, Orchestrator, Result,
    ToolDefinition, Turn, WeatherProvider, WeatherReport,
};

/// Completion provider that replays a fixed script of outcomes
///
/// Each call pops the next outcome; when the script runs dry it returns a
/// plain text reply.
pub struct ScriptedCompletion {
    script: Mutex<Vec<CompletionOutcome>>,
}

impl ScriptedCompletion {
    pub fn new(outcomes: Vec<CompletionOutcome>) -> Self {
        let mut script = outcomes;
        script.reverse();
        Self {
            script: Mutex::new(script),
        }
    }

    /// Provider that always answers with plain text and no tool calls
    pub fn text_only(text: &str) -> Self {
        Self::new(vec![CompletionOutcome {
            text: Some(text.to_string()),
            tool_calls: Vec::new(),
        }])
    }
}

#[async_trait]
impl CompletionProvider for ScriptedCompletion {
    async fn complete(
        &self,
        _model: &str,
        _turns: &[Turn],
        _tools: &[ToolDefinition],
    ) -> Result<CompletionOutcome> {
        let next = self.script.lock().unwrap().pop();
        Ok(next.unwrap_or_else(|| CompletionOutcome {
            text: Some("fallback reply".to_string()),
            tool_calls: Vec::new(),
        }))
    }
}

/// Weather provider returning a fixed report
pub struct FixedWeather {
    pub report: WeatherReport,
}

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn current_weather(&self, _city: &str) -> WeatherReport {
        self.report.clone()
    }
}

/// Email provider that always succeeds, echoing its input
pub struct AcceptingEmail;

#[async_trait]
impl EmailProvider for AcceptingEmail {
    async fn send(&self, recipient: &str, _subject: &str, body: &str) -> EmailReceipt {
        EmailReceipt::Success {
            receiver_email_account: recipient.to_string(),
            message: body.to_string(),
        }
    }
}

/// Email provider that always fails, echoing its input
pub struct RejectingEmail;

#[async_trait]
impl EmailProvider for RejectingEmail {
    async fn send(&self, recipient: &str, _subject: &str, body: &str) -> EmailReceipt {
        EmailReceipt::Failure {
            receiver_email_account: recipient.to_string(),
            message: body.to_string(),
        }
    }
}

/// Build an orchestrator over the given doubles
pub fn orchestrator(
    completion: impl CompletionProvider + 'static,
    weather: WeatherReport,
    email_fails: bool,
) -> Orchestrator {
    let email: Arc<dyn EmailProvider> = if email_fails {
        Arc::new(RejectingEmail)
    } else {
        Arc::new(AcceptingEmail)
    };

    Orchestrator::new(
        Arc::new(completion),
        Arc::new(FixedWeather { report: weather }),
        email,
    )
}

/// Build API state over the given doubles
pub fn api_state(
    completion: impl CompletionProvider + 'static,
    weather: WeatherReport,
    email_fails: bool,
) -> Arc<ApiState> {
    let completion: Arc<dyn CompletionProvider> = Arc::new(completion);
    let weather_provider: Arc<dyn WeatherProvider> =
        Arc::new(FixedWeather { report: weather });
    let email: Arc<dyn EmailProvider> = if email_fails {
        Arc::new(RejectingEmail)
    } else {
        Arc::new(AcceptingEmail)
    };

    Arc::new(ApiState {
        orchestrator: Orchestrator::new(completion, weather_provider.clone(), email.clone()),
        weather: weather_provider,
        email,
        default_model: "test-model".to_string(),
    })
}

/// A success weather report used by most scenarios
pub fn boston_weather() -> WeatherReport {
    WeatherReport::Success {
        temp: 15.0,
        description: "clear sky".to_string(),
    }
}
