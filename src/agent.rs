use std::sync::Arc;

use crate::config::{DEFAULT_CONFIG_FILE, ConfigSource, ProviderKind, ProviderSettings, YamlConfig};
use crate::error::AgentError;
use crate::http::DynHttpTransport;
use crate::http::reqwest::default_dyn_transport;
use crate::provider::DynAgent;
use crate::provider::chatgpt::ChatGptClient;
use crate::provider::claude::ClaudeClient;
use crate::provider::deepseek::DeepSeekClient;

/// Builds the agent named by `selector` on top of the default reqwest transport.
///
/// When `config` is `None` the settings are read from `config.yaml` in the working
/// directory.
///
/// # Errors
///
/// - [`AgentError::UnknownProvider`] if `selector` is not `chatgpt`, `claude` or `deepseek`.
/// - [`AgentError::Config`] if `config.yaml` cannot be read or parsed.
/// - [`AgentError::MissingCredential`] if the provider's token is empty.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use askai::agent::new_agent;
/// use askai::config::ProviderKind;
/// use askai::provider::AiAgent;
///
/// let config = HashMap::from([("deepseek_api_token".to_string(), "sk-test".to_string())]);
/// let agent = new_agent("deepseek", Some(&config)).expect("agent");
/// assert_eq!(agent.kind(), ProviderKind::DeepSeek);
/// ```
pub fn new_agent(selector: &str, config: Option<&dyn ConfigSource>) -> Result<DynAgent, AgentError> {
    let kind: ProviderKind = selector.parse()?;
    let settings = match config {
        Some(source) => ProviderSettings::resolve(kind, source)?,
        None => ProviderSettings::resolve(kind, &YamlConfig::load(DEFAULT_CONFIG_FILE)?)?,
    };
    Ok(build_agent(kind, settings, default_dyn_transport()?))
}

/// Same as [`new_agent`] but with an explicit configuration and transport.
pub fn new_agent_with_transport(
    selector: &str,
    config: &dyn ConfigSource,
    transport: DynHttpTransport,
) -> Result<DynAgent, AgentError> {
    let kind: ProviderKind = selector.parse()?;
    let settings = ProviderSettings::resolve(kind, config)?;
    Ok(build_agent(kind, settings, transport))
}

/// Constructs the concrete client for `kind` from already resolved settings.
pub fn build_agent(
    kind: ProviderKind,
    settings: ProviderSettings,
    transport: DynHttpTransport,
) -> DynAgent {
    let ProviderSettings {
        api_token,
        endpoint,
        timeout,
    } = settings;

    match kind {
        ProviderKind::ChatGpt => {
            let mut client = ChatGptClient::new(transport, api_token).with_endpoint(endpoint);
            if let Some(timeout) = timeout {
                client = client.with_timeout(timeout);
            }
            Arc::new(client)
        }
        ProviderKind::Claude => {
            let mut client = ClaudeClient::new(transport, api_token).with_endpoint(endpoint);
            if let Some(timeout) = timeout {
                client = client.with_timeout(timeout);
            }
            Arc::new(client)
        }
        ProviderKind::DeepSeek => {
            let mut client = DeepSeekClient::new(transport, api_token).with_endpoint(endpoint);
            if let Some(timeout) = timeout {
                client = client.with_timeout(timeout);
            }
            Arc::new(client)
        }
    }
}
