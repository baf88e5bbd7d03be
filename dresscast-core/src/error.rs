//! Failure taxonomy for a weather lookup and the messages shown to the user.

use thiserror::Error;

/// Shown when the submitted city is empty or whitespace.
pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name";
/// Shown when the backend answered with an error but gave no usable reason.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data";
/// Shown when the request went out and nothing came back.
pub const UNREACHABLE_MESSAGE: &str =
    "No response from server. Please check if the backend is running.";
/// Shown when the request could not be built or dispatched.
pub const SETUP_MESSAGE: &str = "Error setting up the request";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The backend responded with a non-2xx status.
    #[error("backend returned {status}: {}", .message.as_deref().unwrap_or("<no error field>"))]
    Server { status: u16, message: Option<String> },

    /// The request was sent but no response was received.
    #[error("no response from backend: {0}")]
    Unreachable(String),

    /// The request could not be constructed or dispatched.
    #[error("failed to set up request: {0}")]
    Setup(String),

    /// A 2xx response whose body is not a weather payload.
    #[error("failed to decode weather payload: {0}")]
    Decode(String),
}

impl FetchError {
    /// The message the user sees for this failure.
    ///
    /// A structured server error is passed through verbatim unless it is blank.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Server { message: Some(msg), .. } if !msg.trim().is_empty() => msg.clone(),
            FetchError::Server { .. } | FetchError::Decode(_) => FETCH_FAILED_MESSAGE.to_string(),
            FetchError::Unreachable(_) => UNREACHABLE_MESSAGE.to_string(),
            FetchError::Setup(_) => SETUP_MESSAGE.to_string(),
        }
    }
}
