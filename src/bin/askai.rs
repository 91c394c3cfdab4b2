use std::path::PathBuf;
use std::process::ExitCode;

use askai::config::{DEFAULT_CONFIG_FILE, ProviderKind, YamlConfig};
use askai::provider::{chatgpt, claude, deepseek};
use askai::{AgentError, AiAgent, Request, Role, new_agent};
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Ask one provider a single question and print the raw response envelope.
#[derive(Debug, Parser)]
#[command(name = "askai", version)]
struct Cli {
    /// Provider to ask: chatgpt, claude or deepseek.
    provider: String,

    /// Prompt text.
    prompt: String,

    /// YAML file holding `<provider>_api_token` and `<provider>_text_input_endpoint`.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Model identifier; the provider default is used when omitted.
    #[arg(long)]
    model: Option<String>,

    /// Output token budget.
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Print only the answer text instead of the full envelope.
    #[arg(long)]
    text: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error("failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}

fn build_request(kind: ProviderKind, cli: &Cli) -> Request {
    let model = cli.model.clone().unwrap_or_default();
    match kind {
        ProviderKind::ChatGpt => Request::new(chatgpt::TextInputRequest {
            model,
            input: cli.prompt.clone(),
            max_output_tokens: cli.max_tokens,
            ..Default::default()
        }),
        ProviderKind::Claude => Request::new(claude::TextInputRequest {
            model,
            max_tokens: cli.max_tokens,
            messages: vec![claude::TextInputMessage {
                role: Role::user(),
                content: cli.prompt.clone(),
            }],
            ..Default::default()
        }),
        ProviderKind::DeepSeek => Request::new(deepseek::TextInputRequest {
            model,
            max_tokens: cli.max_tokens,
            messages: vec![deepseek::TextInputMessage {
                role: Role::user(),
                content: cli.prompt.clone(),
            }],
            ..Default::default()
        }),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let kind: ProviderKind = cli.provider.parse()?;
    let config = YamlConfig::load(&cli.config)?;
    let agent = new_agent(kind.as_str(), Some(&config))?;

    let response = agent.ask_ai(build_request(kind, &cli)).await?;
    if cli.text {
        println!("{}", response.text().unwrap_or_default());
    } else {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
