//! One-call client facade over ChatGPT, Claude and DeepSeek HTTP APIs.
//!
//! Build a provider-specific request, wrap it in a [`Request`], obtain an agent from
//! [`new_agent`] and call [`AiAgent::ask_ai`]. The answer comes back as a [`Response`]
//! holding the provider's own response type.

pub mod agent;
pub mod config;
pub mod error;
pub mod http;
pub mod provider;
pub mod types;

pub use agent::{new_agent, new_agent_with_transport};
pub use config::{ConfigSource, ProviderKind};
pub use error::AgentError;
pub use provider::{AiAgent, DynAgent};
pub use types::{Request, Response, Role, TextRequest, TextResponse};
