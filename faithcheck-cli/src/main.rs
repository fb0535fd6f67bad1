mod args;

use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use faithcheck_detect::settings::DEFAULT_STRATEGY;
use faithcheck_detect::{builtin_cases, load_cases, DetectionStrategy, Pipeline};
use faithcheck_llm::ResilientClient;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, OutputFormat};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = cli.settings();
    settings.validate()?;
    for tag in &settings.strategies {
        if tag.parse::<DetectionStrategy>().is_err() {
            tracing::warn!(
                strategy = %tag,
                "unknown strategy will be reported as an error verdict"
            );
        }
    }

    let cases = match &cli.cases {
        Some(path) => load_cases(path)?,
        None => builtin_cases(),
    };

    let text = cli.format == OutputFormat::Text;
    if text {
        let banner = "=".repeat(60);
        println!("{banner}");
        println!("LLM hallucination detection");
        println!("{banner}");
        println!("Generator model: {}", settings.generator_model);
        println!("Detector model: {}", settings.detector_model);
        println!("Default detection strategy: {DEFAULT_STRATEGY}");
        println!("Strategies to run: {}", settings.strategies.join(", "));
    }

    let client = ResilientClient::builder()
        .base_url(&cli.base_url)?
        .api_key(cli.api_key.clone().unwrap_or_default())
        .timeout(settings.timeout)
        .retry_policy(settings.retry_policy())
        .build()
        .context("building API client")?;
    if !client.is_initialized() {
        bail!("API client could not be initialized: set DEEPSEEK_API_KEY or pass --api-key");
    }
    if !client.check_connection().await {
        bail!("API connection failed or the API key is invalid");
    }

    let pipeline = Pipeline::new(&client, &settings);
    match cli.format {
        OutputFormat::Text => {
            for case in &cases {
                let report = pipeline.run_case(case).await;
                println!("\n{report}");
            }
            let banner = "=".repeat(60);
            println!("\n{banner}\nAll test cases processed.\n{banner}");
        }
        OutputFormat::Json => {
            let reports = pipeline.run(&cases).await;
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(())
}
