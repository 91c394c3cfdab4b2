//! OpenAI Responses API (`POST /v1/responses`).

mod provider;
mod request;
pub mod types;

pub use provider::{ChatGptClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use types::*;
