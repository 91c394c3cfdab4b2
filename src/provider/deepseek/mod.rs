//! DeepSeek chat completions (`POST /chat/completions`).

mod provider;
mod request;
pub mod types;

pub use provider::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, DeepSeekClient};
pub use types::*;
