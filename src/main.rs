//! Parley - Chat-Completion Conversation Loop
//!
//! Main entry point for the CLI application.

use std::sync::Arc;

use clap::Parser;
use parley::{Config, OpenAiProvider, Session, ToolRegistry, Transcript, WeatherTool};

/// Parley - run one tool-calling conversation against a completions endpoint
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The user prompt that seeds the conversation
    #[arg(long, short = 'p')]
    prompt: Option<String>,

    /// Model to query
    #[arg(long, short = 'm')]
    model: Option<String>,

    /// Completions endpoint base URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Maximum provider round-trips
    #[arg(long)]
    max_turns: Option<usize>,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(ref model) = args.model {
        config.provider.model = model.clone();
    }

    if let Some(ref endpoint) = args.endpoint {
        config.provider.endpoint = endpoint.clone();
    }

    if let Some(max_turns) = args.max_turns {
        config.session.max_turns = max_turns;
    }

    if args.debug {
        config.session.debug = true;
    }

    config.validate()?;

    let provider = Arc::new(OpenAiProvider::from_config(&config)?);

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(WeatherTool::from_config(&config)));

    let session = Session::from_config(&config, provider, Arc::new(registry));

    let prompt = args
        .prompt
        .unwrap_or_else(|| "What is the weather like in San Francisco?".to_string());
    let mut transcript = Transcript::seeded(prompt);

    let outcome = session.run(&mut transcript).await?;
    println!("{}", outcome.final_text);

    Ok(())
}
