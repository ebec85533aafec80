use crate::config::{BackendKind, LogFormat};
use crate::utils::error::{ItineraryError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Optional TOML config file. Every section and field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub backend: Option<BackendSection>,
    pub gemini: Option<GeminiSection>,
    pub ollama: Option<OllamaSection>,
    pub output: Option<OutputSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendSection {
    pub kind: Option<BackendKind>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiSection {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OllamaSection {
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub format: Option<LogFormat>,
    pub verbose: Option<bool>,
}

impl FileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ItineraryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ItineraryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

/// 空白或仍是 `${VAR}` 的值視為未設定
pub fn resolved_value(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && !env_var_pattern().is_match(v))
}

/// 替換環境變數 (例如 ${GOOGLE_API_KEY})，找不到的保留原樣
fn substitute_env_vars(content: &str) -> String {
    env_var_pattern()
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[backend]
kind = "gemini"

[gemini]
endpoint = "https://gemini.example.com"
model = "gemini-1.5-flash"
api_key = "abc"

[ollama]
base_url = "http://127.0.0.1:11434"
model = "llama3"

[output]
path = "./itineraries"

[logging]
format = "json"
verbose = true
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.backend.unwrap().kind, Some(BackendKind::Gemini));
        let gemini = config.gemini.unwrap();
        assert_eq!(gemini.model.as_deref(), Some("gemini-1.5-flash"));
        assert_eq!(gemini.api_key.as_deref(), Some("abc"));
        assert_eq!(config.logging.unwrap().format, Some(LogFormat::Json));
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = FileConfig::from_toml_str("").unwrap();
        assert!(config.backend.is_none());
        assert!(config.gemini.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ITINERARY_TEST_API_KEY", "secret-from-env");

        let toml_content = r#"
[gemini]
api_key = "${ITINERARY_TEST_API_KEY}"
model = "${ITINERARY_TEST_UNSET_VAR}"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();
        let gemini = config.gemini.unwrap();
        assert_eq!(gemini.api_key.as_deref(), Some("secret-from-env"));
        assert_eq!(gemini.model.as_deref(), Some("${ITINERARY_TEST_UNSET_VAR}"));

        std::env::remove_var("ITINERARY_TEST_API_KEY");
    }

    #[test]
    fn test_resolved_value_drops_placeholders() {
        assert_eq!(resolved_value(Some("abc".to_string())), Some("abc".to_string()));
        assert_eq!(resolved_value(Some("   ".to_string())), None);
        assert_eq!(resolved_value(Some("${NOT_SET_ANYWHERE}".to_string())), None);
        assert_eq!(resolved_value(None), None);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = FileConfig::from_toml_str("[backend]\nkind = \"openai\"\n");
        assert!(matches!(result, Err(ItineraryError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[ollama]\nmodel = \"qwen2\"\n")
            .unwrap();

        let config = FileConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.ollama.unwrap().model.as_deref(), Some("qwen2"));
    }
}
