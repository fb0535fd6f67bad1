use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use faithcheck_detect::settings::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT,
};
use faithcheck_detect::{DetectionStrategy, Settings};
use faithcheck_llm::{DEEPSEEK_BASE_URL, DEEPSEEK_CHAT_MODEL};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report per case
    Text,
    /// One JSON array with every case report
    Json,
}

/// Generate context-grounded answers and judge them for hallucinations.
#[derive(Debug, Parser)]
#[command(name = "faithcheck", version, about)]
pub struct Cli {
    /// Bearer credential for the chat-completion API
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "FAITHCHECK_BASE_URL", default_value = DEEPSEEK_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "FAITHCHECK_GENERATOR_MODEL", default_value = DEEPSEEK_CHAT_MODEL)]
    pub generator_model: String,

    #[arg(long, env = "FAITHCHECK_DETECTOR_MODEL", default_value = DEEPSEEK_CHAT_MODEL)]
    pub detector_model: String,

    /// Detection strategy to run; repeat to run several in order (default: all)
    #[arg(long = "strategy", value_name = "TAG")]
    pub strategies: Vec<String>,

    /// JSON or YAML file with `{id, context, question}` cases (default: built-in cases)
    #[arg(long, value_name = "FILE")]
    pub cases: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, env = "FAITHCHECK_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Attempt ceiling for transient API failures
    #[arg(long, env = "FAITHCHECK_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        let strategies = if self.strategies.is_empty() {
            DetectionStrategy::ALL
                .iter()
                .map(|s| s.as_str().to_string())
                .collect()
        } else {
            self.strategies.clone()
        };

        Settings {
            generator_model: self.generator_model.clone(),
            detector_model: self.detector_model.clone(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: Some(self.max_tokens),
            timeout: Duration::from_secs(self.timeout_secs),
            max_attempts: self.max_attempts,
            strategies,
        }
    }
}
