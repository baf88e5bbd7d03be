//! Core library for the `dresscast` CLI.
//!
//! This crate defines:
//! - Configuration handling (backend URL, log level)
//! - The weather backend abstraction and its HTTP client
//! - Backend payload models
//! - The search controller and the display mapping
//!
//! It is used by `dresscast-cli`, but any other front end can drive the same
//! [`SearchController`].

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod mapper;
pub mod model;

pub use backend::{HttpBackend, WeatherBackend, backend_from_config};
pub use config::Config;
pub use controller::{Key, RequestStatus, SearchController, SearchEvent};
pub use error::FetchError;
pub use mapper::{ClothingSection, WeatherView};
pub use model::{ClothingSuggestions, WeatherResult};
