use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;

use crate::error::AgentError;

/// File read by [`crate::agent::new_agent`] when no configuration is supplied.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Supported providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// OpenAI Responses API.
    #[serde(rename = "chatgpt")]
    ChatGpt,
    /// Anthropic Messages API.
    Claude,
    /// DeepSeek chat completions.
    #[serde(rename = "deepseek")]
    DeepSeek,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::ChatGpt, Self::Claude, Self::DeepSeek];

    /// Selector string accepted by [`ProviderKind::from_str`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChatGpt => "chatgpt",
            Self::Claude => "claude",
            Self::DeepSeek => "deepseek",
        }
    }

    /// Prefix of this provider's configuration keys.
    pub fn config_prefix(self) -> &'static str {
        match self {
            Self::ChatGpt => "openai",
            Self::Claude => "claude",
            Self::DeepSeek => "deepseek",
        }
    }

    /// Key holding the API token, e.g. `openai_api_token`.
    pub fn token_key(self) -> String {
        format!("{}_api_token", self.config_prefix())
    }

    /// Key holding the endpoint override, e.g. `claude_text_input_endpoint`.
    pub fn endpoint_key(self) -> String {
        format!("{}_text_input_endpoint", self.config_prefix())
    }

    /// Key holding the timeout override in whole seconds.
    pub fn timeout_key(self) -> String {
        format!("{}_timeout_seconds", self.config_prefix())
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = AgentError;

    /// Parses a selector, ignoring ASCII case and surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use askai::config::ProviderKind;
    ///
    /// assert_eq!("DeepSeek".parse::<ProviderKind>().unwrap(), ProviderKind::DeepSeek);
    /// assert!("gemini".parse::<ProviderKind>().is_err());
    /// ```
    fn from_str(selector: &str) -> Result<Self, Self::Err> {
        let normalized = selector.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| AgentError::UnknownProvider {
                selector: selector.to_string(),
            })
    }
}

/// Key/value lookup used to resolve credentials and endpoints.
///
/// Tests inject in-memory maps; production code reads [`YamlConfig`].
pub trait ConfigSource: Send + Sync {
    /// Returns the value for `key`, or `None` when the key is absent.
    fn get_string(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Flat key/value configuration parsed from a YAML document.
///
/// Only top-level scalar entries are kept. Numbers and booleans are stored in their
/// textual form and keys are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct YamlConfig {
    values: HashMap<String, String>,
}

impl YamlConfig {
    /// Reads and parses a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Config`] if the file cannot be read or is not a YAML mapping.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AgentError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| {
            AgentError::config(format!("failed to read {}: {err}", path.display()))
        })?;
        let config = Self::from_yaml_str(&contents)?;
        tracing::debug!(path = %path.display(), keys = config.values.len(), "loaded configuration");
        Ok(config)
    }

    /// Parses YAML text.
    ///
    /// # Examples
    ///
    /// ```
    /// use askai::config::{ConfigSource, YamlConfig};
    ///
    /// let config = YamlConfig::from_yaml_str("DeepSeek_API_Token: sk-1\nretries: 3\n").unwrap();
    /// assert_eq!(config.get_string("deepseek_api_token").as_deref(), Some("sk-1"));
    /// assert_eq!(config.get_string("retries").as_deref(), Some("3"));
    /// ```
    pub fn from_yaml_str(contents: &str) -> Result<Self, AgentError> {
        let document: YamlValue = serde_yaml::from_str(contents)
            .map_err(|err| AgentError::config(format!("failed to parse configuration: {err}")))?;

        let mapping = match document {
            YamlValue::Mapping(mapping) => mapping,
            // An empty file parses as null.
            YamlValue::Null => return Ok(Self::default()),
            _ => {
                return Err(AgentError::config(
                    "configuration root must be a key/value mapping",
                ));
            }
        };

        let values = mapping
            .into_iter()
            .filter_map(|(key, value)| {
                let key = scalar_to_string(&key)?;
                let value = scalar_to_string(&value)?;
                Some((key.to_ascii_lowercase(), value))
            })
            .collect();

        Ok(Self { values })
    }
}

fn scalar_to_string(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(text) => Some(text.clone()),
        YamlValue::Number(number) => Some(number.to_string()),
        YamlValue::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

impl ConfigSource for YamlConfig {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(&key.to_ascii_lowercase()).cloned()
    }
}

/// In-memory overrides consulted before a base source.
///
/// Override keys are matched case-insensitively, like [`YamlConfig`] keys.
pub struct LayeredConfig<B> {
    overrides: HashMap<String, String>,
    base: B,
}

impl<B: ConfigSource> LayeredConfig<B> {
    pub fn new(base: B) -> Self {
        Self {
            overrides: HashMap::new(),
            base,
        }
    }

    /// Adds or replaces an override.
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key: String = key.into();
        self.overrides.insert(key.to_ascii_lowercase(), value.into());
        self
    }
}

impl<B: ConfigSource> ConfigSource for LayeredConfig<B> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.overrides
            .get(&key.to_ascii_lowercase())
            .cloned()
            .or_else(|| self.base.get_string(key))
    }
}

/// Per-provider values resolved from a [`ConfigSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub api_token: String,
    /// Empty means "use the provider's default endpoint".
    pub endpoint: String,
    pub timeout: Option<Duration>,
}

impl ProviderSettings {
    /// Reads the token, endpoint and optional timeout for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::MissingCredential`] when the token is absent or blank and
    /// [`AgentError::Config`] when the timeout is not a positive integer.
    pub fn resolve(kind: ProviderKind, source: &dyn ConfigSource) -> Result<Self, AgentError> {
        let token_key = kind.token_key();
        let api_token = source
            .get_string(&token_key)
            .map(|token| token.trim().to_string())
            .unwrap_or_default();
        if api_token.is_empty() {
            return Err(AgentError::MissingCredential {
                provider: kind.as_str(),
                key: token_key,
            });
        }

        let endpoint = source
            .get_string(&kind.endpoint_key())
            .map(|endpoint| endpoint.trim().to_string())
            .unwrap_or_default();

        let timeout_key = kind.timeout_key();
        let timeout = match source.get_string(&timeout_key) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(seconds) if seconds > 0 => Some(Duration::from_secs(seconds)),
                _ => {
                    return Err(AgentError::config(format!(
                        "`{timeout_key}` must be a positive number of seconds, got `{raw}`"
                    )));
                }
            },
            None => None,
        };

        Ok(Self {
            api_token,
            endpoint,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn selector_parsing_is_case_insensitive() {
        assert_eq!("chatgpt".parse::<ProviderKind>().unwrap(), ProviderKind::ChatGpt);
        assert_eq!(" Claude ".parse::<ProviderKind>().unwrap(), ProviderKind::Claude);

        match "openai".parse::<ProviderKind>() {
            Err(AgentError::UnknownProvider { selector }) => assert_eq!(selector, "openai"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn chatgpt_keys_use_openai_prefix() {
        assert_eq!(ProviderKind::ChatGpt.token_key(), "openai_api_token");
        assert_eq!(
            ProviderKind::ChatGpt.endpoint_key(),
            "openai_text_input_endpoint"
        );
        assert_eq!(ProviderKind::DeepSeek.token_key(), "deepseek_api_token");
        assert_eq!(
            ProviderKind::Claude.endpoint_key(),
            "claude_text_input_endpoint"
        );
    }

    #[test]
    fn yaml_file_is_loaded_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "openai_api_token: sk-test\nopenai_text_input_endpoint: http://localhost:8080/v1/responses\nnested:\n  ignored: true"
        )
        .expect("write");

        let config = YamlConfig::load(file.path()).expect("load");
        assert_eq!(config.get_string("openai_api_token").as_deref(), Some("sk-test"));
        assert_eq!(
            config.get_string("openai_text_input_endpoint").as_deref(),
            Some("http://localhost:8080/v1/responses")
        );
        assert_eq!(config.get_string("nested"), None);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = YamlConfig::load(dir.path().join("absent.yaml")).expect_err("missing");
        assert!(matches!(err, AgentError::Config { .. }), "got {err:?}");
    }

    #[test]
    fn non_mapping_document_is_rejected() {
        let err = YamlConfig::from_yaml_str("- a\n- b\n").expect_err("sequence");
        assert!(matches!(err, AgentError::Config { .. }));
        let err = YamlConfig::from_yaml_str("key: [unterminated").expect_err("syntax");
        assert!(matches!(err, AgentError::Config { .. }));
        assert!(YamlConfig::from_yaml_str("").is_ok());
    }

    #[test]
    fn overrides_win_over_base() {
        let base = map(&[("claude_api_token", "from-file"), ("claude_timeout_seconds", "45")]);
        let layered = LayeredConfig::new(base).with_override("claude_api_token", "from-memory");

        assert_eq!(
            layered.get_string("claude_api_token").as_deref(),
            Some("from-memory")
        );
        assert_eq!(layered.get_string("claude_timeout_seconds").as_deref(), Some("45"));
    }

    #[test]
    fn override_keys_ignore_case() {
        let base = YamlConfig::from_yaml_str("openai_api_token: from-file\n").expect("yaml");
        let layered = LayeredConfig::new(base).with_override("OpenAI_API_Token", "from-memory");

        assert_eq!(
            layered.get_string("openai_api_token").as_deref(),
            Some("from-memory")
        );
        assert_eq!(
            layered.get_string("OPENAI_API_TOKEN").as_deref(),
            Some("from-memory")
        );
        let settings = ProviderSettings::resolve(ProviderKind::ChatGpt, &layered).expect("settings");
        assert_eq!(settings.api_token, "from-memory");
    }

    #[test]
    fn settings_require_a_token() {
        let source = map(&[("deepseek_api_token", "  ")]);
        match ProviderSettings::resolve(ProviderKind::DeepSeek, &source) {
            Err(AgentError::MissingCredential { provider, key }) => {
                assert_eq!(provider, "deepseek");
                assert_eq!(key, "deepseek_api_token");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn settings_read_endpoint_and_timeout() {
        let source = map(&[
            ("claude_api_token", "key"),
            ("claude_text_input_endpoint", "https://proxy.local/v1/messages"),
            ("claude_timeout_seconds", "90"),
        ]);
        let settings = ProviderSettings::resolve(ProviderKind::Claude, &source).expect("settings");
        assert_eq!(settings.api_token, "key");
        assert_eq!(settings.endpoint, "https://proxy.local/v1/messages");
        assert_eq!(settings.timeout, Some(Duration::from_secs(90)));

        let source = map(&[("claude_api_token", "key"), ("claude_timeout_seconds", "0")]);
        let err = ProviderSettings::resolve(ProviderKind::Claude, &source).expect_err("zero");
        assert!(matches!(err, AgentError::Config { .. }));
    }
}
