//! Conversation orchestrator: one reasoning round with tool follow-up
//!
//! Given a conversation ending in a user turn, runs one completion, executes
//! any requested tool calls in order, folds their results back in as system
//! turns, and (when tools ran) issues one follow-up completion.

use std::sync::Arc;

use crate::conversation::{Role, Turn};
use crate::providers::{CompletionProvider, EmailProvider, WeatherProvider, WeatherReport};
use crate::tools::{self, ToolInvocation};
use crate::{Error, Result};

/// Runs reasoning rounds against the completion provider
///
/// Stateless across calls: each round operates only on the turns it is
/// given and appends only the turns generated during that round.
pub struct Orchestrator {
    completion: Arc<dyn CompletionProvider>,
    weather: Arc<dyn WeatherProvider>,
    email: Arc<dyn EmailProvider>,
}

impl Orchestrator {
    /// Create an orchestrator over the three collaborators
    #[must_use]
    pub fn new(
        completion: Arc<dyn CompletionProvider>,
        weather: Arc<dyn WeatherProvider>,
        email: Arc<dyn EmailProvider>,
    ) -> Self {
        Self {
            completion,
            weather,
            email,
        }
    }

    /// Run one full reasoning round, returning the extended conversation
    ///
    /// Appends zero or more tool-result system turns plus at most one
    /// assistant turn. Collaborator failures become failure-status system
    /// turns; completion provider failures propagate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversation`] if the conversation does not end
    /// with a user turn, or a completion error if the provider call fails.
    pub async fn run_round(&self, mut turns: Vec<Turn>, model: &str) -> Result<Vec<Turn>> {
        if !turns.last().is_some_and(|t| t.role == Role::User) {
            return Err(Error::Conversation(
                "conversation must end with a user turn".to_string(),
            ));
        }

        let tool_list = tools::builtin_tools();
        let outcome = self.completion.complete(model, &turns, &tool_list).await?;

        if outcome.tool_calls.is_empty() {
            // No tools requested: the provider's text is the reply
            turns.push(Turn::assistant(outcome.text.unwrap_or_default()));
            return Ok(turns);
        }

        tracing::debug!(count = outcome.tool_calls.len(), "executing tool calls");
        for invocation in &outcome.tool_calls {
            if let Some(turn) = self.dispatch(invocation).await {
                turns.push(turn);
            }
        }

        // Second completion over the tool results, same tool list
        let followup = self.completion.complete(model, &turns, &tool_list).await?;
        if let Some(text) = followup.text {
            turns.push(Turn::assistant(text));
        }

        Ok(turns)
    }

    /// Dispatch one tool invocation to its collaborator
    ///
    /// Returns the system turn summarizing the result, or `None` for
    /// unknown tool names (logged and skipped).
    async fn dispatch(&self, invocation: &ToolInvocation) -> Option<Turn> {
        match invocation.name.as_str() {
            tools::WEATHER_TOOL => {
                let city = invocation.string_arg("city");
                let report = self.weather.current_weather(&city).await;
                Some(weather_turn(&city, &report))
            }
            tools::EMAIL_TOOL => {
                let recipient = invocation.string_arg("email_account");
                let subject = invocation.string_arg("subject");
                let body = invocation.string_arg("message");
                let receipt = self.email.send(&recipient, &subject, &body).await;
                if receipt.is_success() {
                    Some(Turn::system("Email was successfully sent."))
                } else {
                    tracing::warn!(recipient, "email collaborator reported failure");
                    Some(Turn::system(
                        "Unable to send the email to the user due to technical issues.",
                    ))
                }
            }
            other => {
                tracing::warn!(tool = other, "unknown tool requested, skipping");
                None
            }
        }
    }
}

/// Render a weather result as a system turn for the follow-up completion
fn weather_turn(city: &str, report: &WeatherReport) -> Turn {
    match report {
        WeatherReport::Success { temp, description } => Turn::system(format!(
            "The temperature in {city} is {temp}°C. The weather is {description}. \
             Respond to the user as requested."
        )),
        WeatherReport::Failed { .. } => {
            tracing::warn!(city, "weather collaborator reported failure");
            Turn::system("Unable to get the weather due to technical issues.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_turn_mentions_temperature_and_description() {
        let report = WeatherReport::Success {
            temp: 15.0,
            description: "clear sky".to_string(),
        };
        let turn = weather_turn("Boston", &report);
        assert!(turn.content.contains("Boston"));
        assert!(turn.content.contains("15"));
        assert!(turn.content.contains("clear sky"));
    }

    #[test]
    fn weather_turn_failure_is_unambiguous() {
        let report = WeatherReport::Failed {
            message: "boom".to_string(),
        };
        let turn = weather_turn("Boston", &report);
        assert!(turn.content.contains("Unable to get the weather"));
    }
}
