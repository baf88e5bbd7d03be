//! Search controller: query text, request status and the submit action.
//!
//! The controller is driven by discrete events from a front end. Each submit
//! runs one cycle `Loading -> Succeeded | Failed`; a submit that arrives while
//! a request is still in flight is ignored, so at most one request is
//! outstanding at a time.

use tracing::{debug, info, warn};

use crate::{
    backend::WeatherBackend,
    error::{EMPTY_CITY_MESSAGE, FetchError},
    mapper::WeatherView,
    model::WeatherResult,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded(Box<WeatherResult>),
    Failed(String),
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestStatus::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&WeatherResult> {
        match self {
            RequestStatus::Succeeded(result) => Some(result.as_ref()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

/// Input from the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    QueryChanged(String),
    KeyPressed(Key),
    SubmitPressed,
}

#[derive(Debug)]
pub struct SearchController {
    backend: Box<dyn WeatherBackend>,
    query: String,
    status: RequestStatus,
    /// City of the cycle that produced the current status.
    submitted_city: Option<String>,
}

impl SearchController {
    pub fn new(backend: Box<dyn WeatherBackend>) -> Self {
        Self {
            backend,
            query: String::new(),
            status: RequestStatus::Idle,
            submitted_city: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    /// False while a request is in flight.
    pub fn can_submit(&self) -> bool {
        !self.status.is_loading()
    }

    /// Display model of the last successful lookup, if the status holds one.
    pub fn view(&self) -> Option<WeatherView> {
        let result = self.status.result()?;
        let city = self.submitted_city.as_deref().unwrap_or(&self.query);
        Some(WeatherView::new(city, result))
    }

    pub async fn handle(&mut self, event: SearchEvent) -> &RequestStatus {
        match event {
            SearchEvent::QueryChanged(text) => self.set_query(text),
            SearchEvent::KeyPressed(Key::Enter) | SearchEvent::SubmitPressed => {
                return self.submit().await;
            }
            SearchEvent::KeyPressed(Key::Other) => {}
        }
        &self.status
    }

    /// Run one full submit cycle for the current query.
    pub async fn submit(&mut self) -> &RequestStatus {
        if let Some(city) = self.begin_submit() {
            let outcome = self.backend.fetch_weather(&city).await;
            self.finish(outcome);
        }
        &self.status
    }

    /// First half of a submit.
    ///
    /// Returns the city to fetch and moves to `Loading`, or returns `None` when
    /// the query is blank (status becomes `Failed`) or a request is already in
    /// flight (status unchanged).
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.status.is_loading() {
            debug!(query = %self.query, "submit ignored while loading");
            return None;
        }

        if self.query.trim().is_empty() {
            self.submitted_city = None;
            self.status = RequestStatus::Failed(EMPTY_CITY_MESSAGE.to_string());
            return None;
        }

        let city = self.query.clone();
        info!(%city, "looking up weather");
        self.submitted_city = Some(city.clone());
        self.status = RequestStatus::Loading;
        Some(city)
    }

    /// Second half of a submit: record the backend outcome.
    ///
    /// Outcomes arriving when no request is in flight are dropped.
    pub fn finish(&mut self, outcome: Result<WeatherResult, FetchError>) -> &RequestStatus {
        if !self.status.is_loading() {
            debug!("dropping outcome with no request in flight");
            return &self.status;
        }

        self.status = match outcome {
            Ok(result) => RequestStatus::Succeeded(Box::new(result)),
            Err(err) => {
                warn!(error = %err, "weather lookup failed");
                RequestStatus::Failed(err.user_message())
            }
        };
        &self.status
    }
}
