use async_trait::async_trait;
use reqwest::{Client, Url};
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::{
    Config,
    error::FetchError,
    model::{ErrorBody, WeatherResult},
};

/// Path of the weather endpoint, relative to the backend base URL.
pub const WEATHER_PATH: &str = "api/weather/";

/// Source of weather data for a city.
#[async_trait]
pub trait WeatherBackend: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherResult, FetchError>;
}

/// Talks to the weather backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// `{base_url}/api/weather/?city={city}`, with the city percent-encoded.
    pub fn weather_url(&self, city: &str) -> Result<Url, FetchError> {
        let mut base = self.base_url.trim_end_matches('/').to_string();
        base.push('/');

        let mut url = Url::parse(&base)
            .and_then(|base| base.join(WEATHER_PATH))
            .map_err(|e| FetchError::Setup(format!("invalid base URL '{}': {e}", self.base_url)))?;

        url.set_query(Some(&format!("city={}", urlencoding::encode(city))));
        Ok(url)
    }
}

#[async_trait]
impl WeatherBackend for HttpBackend {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherResult, FetchError> {
        let url = self.weather_url(city)?;
        debug!(%url, "requesting weather");

        let res = self.http.get(url).send().await.map_err(classify_send_error)?;

        let status = res.status();
        let body = match res.text().await {
            Ok(body) => body,
            Err(e) if status.is_success() => return Err(FetchError::Decode(e.to_string())),
            Err(e) => {
                warn!(%status, error = %e, "failed to read error body");
                String::new()
            }
        };

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .filter(|msg| !msg.trim().is_empty());
            warn!(%status, body = %truncate_body(&body), "weather backend returned an error");
            return Err(FetchError::Server {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, body = %truncate_body(&body), "unexpected weather payload");
            FetchError::Decode(e.to_string())
        })
    }
}

/// A send error either never left the client (setup) or got no answer (unreachable).
fn classify_send_error(err: reqwest::Error) -> FetchError {
    if err.is_builder() {
        FetchError::Setup(err.to_string())
    } else {
        FetchError::Unreachable(err.to_string())
    }
}

/// Construct the backend described by config and environment.
pub fn backend_from_config(config: &Config) -> Box<dyn WeatherBackend> {
    let base_url = config.resolved_api_url();
    debug!(%base_url, "using weather backend");
    Box::new(HttpBackend::new(base_url))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let end = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
