pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{build_backend, GeminiClient, OllamaClient};
pub use config::{cli::LocalStorage, AppConfig, BackendKind};
pub use crate::core::{planner::ItineraryPlanner, prompt::build_prompt, session::SessionSlot};
pub use domain::model::{parse_month, GenerationOutcome, TripRequest, FAILURE_SENTINEL};
pub use utils::error::{ItineraryError, Result};
