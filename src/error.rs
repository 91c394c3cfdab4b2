use thiserror::Error;

/// Aggregates every failure mode exposed by the agents.
///
/// Nothing is retried or recovered internally, so every variant reaches the caller
/// as-is. For [`AgentError::Upstream`] the raw response body is kept verbatim to
/// help diagnose provider-side rejections.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The configuration source could not be read or parsed.
    #[error("configuration error: {message}")]
    Config { message: String },
    /// The resolved API token for the selected provider is empty.
    #[error("missing API token for {provider}: set `{key}` in the configuration")]
    MissingCredential {
        /// Provider selector, such as `chatgpt`.
        provider: &'static str,
        /// Configuration key that was expected to carry the token.
        key: String,
    },
    /// The provider selector does not name a known provider.
    #[error("unknown ai agent: {selector}")]
    UnknownProvider { selector: String },
    /// The request envelope is empty, has the wrong payload, or misses a required field.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    /// The request could not be sent or the response could not be fully read.
    #[error("network error: {message}")]
    Network { message: String },
    /// The provider answered with a status outside `200..300`.
    #[error("unexpected status {status}: {body}")]
    Upstream {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Raw response body, kept verbatim for debugging.
        body: String,
    },
    /// A successful response body did not match the provider's response schema.
    #[error("failed to decode {provider} response: {message}")]
    Decode {
        /// Provider whose response failed to decode.
        provider: &'static str,
        /// Parser diagnostic.
        message: String,
    },
}

impl AgentError {
    /// Creates an [`AgentError::InvalidInput`] from a textual description.
    ///
    /// # Examples
    ///
    /// ```
    /// use askai::error::AgentError;
    ///
    /// let err = AgentError::invalid_input("messages is required");
    /// assert!(matches!(err, AgentError::InvalidInput { .. }));
    /// ```
    pub fn invalid_input<T: Into<String>>(message: T) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an [`AgentError::Network`] from a textual description.
    pub fn network<T: Into<String>>(message: T) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates an [`AgentError::Config`] from a textual description.
    pub fn config<T: Into<String>>(message: T) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an [`AgentError::Decode`] for the given provider.
    pub fn decode<T: Into<String>>(provider: &'static str, message: T) -> Self {
        Self::Decode {
            provider,
            message: message.into(),
        }
    }

    /// Returns the upstream HTTP status when the error came from a non-2xx response.
    ///
    /// # Examples
    ///
    /// ```
    /// use askai::error::AgentError;
    ///
    /// let err = AgentError::Upstream { status: 404, body: "{}".into() };
    /// assert_eq!(err.status(), Some(404));
    /// assert_eq!(AgentError::network("reset").status(), None);
    /// ```
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw upstream body for [`AgentError::Upstream`].
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            Self::Upstream { body, .. } => Some(body),
            _ => None,
        }
    }
}
