pub mod cli;
pub mod toml_config;

use crate::adapters::{gemini, ollama};
use crate::domain::model::{DEFAULT_DAYS, DEFAULT_LOCATION};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_required_field, validate_url, Validate};
use serde::{Deserialize, Serialize};
use toml_config::FileConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted Gemini API, needs GOOGLE_API_KEY
    #[default]
    Gemini,
    /// Locally hosted model server
    Ollama,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "itinerary-gen")]
#[command(about = "AI planner for travel itineraries")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_LOCATION, help = "Destination to plan for")]
    pub location: String,

    #[arg(long, default_value_t = DEFAULT_DAYS, value_parser = clap::value_parser!(u8).range(1..=7), help = "Number of days (1-7)")]
    pub days: u8,

    #[arg(long, default_value = "January", help = "Month of the trip")]
    pub month: String,

    #[arg(long, value_enum)]
    pub backend: Option<BackendKind>,

    #[arg(long, help = "Override the backend's model name")]
    pub model: Option<String>,

    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<String>,

    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, help = "Show the last generated itinerary and exit")]
    pub show_last: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            endpoint: gemini::DEFAULT_ENDPOINT.to_string(),
            model: gemini::DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaSettings {
    pub base_url: String,
    pub model: String,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base_url: ollama::DEFAULT_BASE_URL.to_string(),
            model: ollama::DEFAULT_MODEL.to_string(),
        }
    }
}

/// Resolved settings. Precedence: CLI flags > config file > environment > defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend: BackendKind,
    pub gemini: GeminiSettings,
    pub ollama: OllamaSettings,
    pub output_path: String,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            gemini: GeminiSettings::default(),
            ollama: OllamaSettings::default(),
            output_path: "./output".to_string(),
            log_format: LogFormat::default(),
            verbose: false,
        }
    }
}

impl AppConfig {
    /// 套用設定檔中有填的欄位
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(backend) = file.backend.and_then(|b| b.kind) {
            self.backend = backend;
        }
        if let Some(section) = file.gemini {
            if let Some(endpoint) = section.endpoint {
                self.gemini.endpoint = endpoint;
            }
            if let Some(model) = section.model {
                self.gemini.model = model;
            }
            if let Some(api_key) = toml_config::resolved_value(section.api_key) {
                self.gemini.api_key = Some(api_key);
            }
        }
        if let Some(section) = file.ollama {
            if let Some(base_url) = section.base_url {
                self.ollama.base_url = base_url;
            }
            if let Some(model) = section.model {
                self.ollama.model = model;
            }
        }
        if let Some(path) = file.output.and_then(|o| o.path) {
            self.output_path = path;
        }
        if let Some(logging) = file.logging {
            if let Some(format) = logging.format {
                self.log_format = format;
            }
            self.verbose |= logging.verbose.unwrap_or(false);
        }
        self
    }

    /// Fills the Gemini key from `GOOGLE_API_KEY` when no other source set it.
    pub fn with_env_api_key(self) -> Self {
        self.with_api_key_fallback(std::env::var(gemini::API_KEY_ENV).ok())
    }

    pub fn with_api_key_fallback(mut self, key: Option<String>) -> Self {
        if self.gemini.api_key.is_none() {
            self.gemini.api_key = key.filter(|k| !k.trim().is_empty());
        }
        self
    }

    #[cfg(feature = "cli")]
    pub fn apply_cli(mut self, cli: &CliConfig) -> Self {
        if let Some(backend) = cli.backend {
            self.backend = backend;
        }
        if let Some(model) = &cli.model {
            match self.backend {
                BackendKind::Gemini => self.gemini.model = model.clone(),
                BackendKind::Ollama => self.ollama.model = model.clone(),
            }
        }
        if let Some(path) = &cli.output_path {
            self.output_path = path.clone();
        }
        self.verbose |= cli.verbose;
        self
    }

    #[cfg(feature = "cli")]
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = &cli.config {
            config = config.merge_file(FileConfig::from_file(path)?);
        }
        Ok(config.with_env_api_key().apply_cli(cli))
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output.path", &self.output_path)?;
        match self.backend {
            BackendKind::Gemini => {
                validate_url("gemini.endpoint", &self.gemini.endpoint)?;
                validate_required_field("gemini.api_key", &self.gemini.api_key)?;
            }
            BackendKind::Ollama => {
                validate_url("ollama.base_url", &self.ollama.base_url)?;
            }
        }
        Ok(())
    }
}
