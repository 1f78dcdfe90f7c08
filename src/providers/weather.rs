//! `OpenWeatherMap` lookup collaborator

use async_trait::async_trait;
use serde::Deserialize;

use super::{WeatherProvider, WeatherReport};
use crate::{Error, Result};

const WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Current-weather lookups via `OpenWeatherMap`
pub struct OpenWeatherMap {
    client: reqwest::Client,
    api_key: String,
}

impl OpenWeatherMap {
    /// Create a new weather provider
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "OpenWeatherMap API key required for weather lookups".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
        })
    }

    async fn fetch(&self, city: &str) -> Result<WeatherReport> {
        let response = self
            .client
            .get(WEATHER_URL)
            .query(&[("q", city), ("appid", &self.api_key), ("units", "metric")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, city, "weather API error");
            return Ok(WeatherReport::Failed {
                message: format!("error: Unable to fetch weather data for {city}."),
            });
        }

        let data: WeatherResponse = response.json().await?;
        let description = data
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_default();

        Ok(WeatherReport::Success {
            temp: data.main.temp,
            description,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMap {
    async fn current_weather(&self, city: &str) -> WeatherReport {
        match self.fetch(city).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(error = %e, city, "weather lookup failed");
                WeatherReport::Failed {
                    message: format!("error: Unable to fetch weather data for {city}."),
                }
            }
        }
    }
}

#[derive(Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
    weather: Vec<WeatherDescription>,
}

#[derive(Deserialize)]
struct WeatherMain {
    temp: f64,
}

#[derive(Deserialize)]
struct WeatherDescription {
    description: String,
}
