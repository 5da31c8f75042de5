//! Interactive debate runner.
//!
//! Reads debate topics from the command line or from stdin in a
//! loop, runs each debate against an OpenAI-compatible endpoint and
//! prints the outcome.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use debate::backends::openai::OpenAI;
use debate::{Debate, DebateConfig, DebateOutcome, PromptSet, ResilienceConfig, ResilientChat};

#[derive(Parser, Debug)]
#[command(name = "debate", about = "Run a multi-agent debate on a topic")]
struct Cli {
    /// Debate topic; when omitted, topics are read interactively
    topic: Option<String>,

    /// Number of debate players
    #[arg(short = 'p', long, default_value_t = 3)]
    players: usize,

    /// Maximum number of rounds before the judge is called
    #[arg(short = 'r', long, default_value_t = 3)]
    rounds: usize,

    /// Model name
    #[arg(short, long)]
    model: Option<String>,

    /// OpenAI-compatible endpoint base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Sampling temperature
    #[arg(short, long, default_value_t = 0.0)]
    temperature: f32,

    /// JSON file overriding the built-in prompt templates
    #[arg(long)]
    prompts: Option<PathBuf>,

    /// Fixed delay before every model call, in milliseconds
    #[arg(long, default_value_t = 0)]
    sleep_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let api_key =
        std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY environment variable not set")?;
    let backend = OpenAI::new(
        api_key,
        cli.base_url.clone(),
        cli.model.clone(),
        Some(cli.temperature),
        None,
        None,
    )?;
    let provider = Arc::new(ResilientChat::new(
        Box::new(backend),
        ResilienceConfig {
            pre_call_delay_ms: cli.sleep_ms,
            ..ResilienceConfig::defaults()
        },
    ));

    let prompts = match &cli.prompts {
        Some(path) => PromptSet::from_path(path)?,
        None => PromptSet::default(),
    };

    if let Some(topic) = &cli.topic {
        let outcome = run_debate(topic, &cli, &prompts, provider).await?;
        print_outcome(topic, &outcome);
        return Ok(());
    }

    let stdin = std::io::stdin();
    loop {
        print!("\nEnter your debate topic: ");
        std::io::stdout().flush()?;
        let mut topic = String::new();
        if stdin.lock().read_line(&mut topic)? == 0 {
            return Ok(());
        }
        let topic = topic.trim();
        if topic.is_empty() {
            continue;
        }
        let outcome = run_debate(topic, &cli, &prompts, provider.clone()).await?;
        print_outcome(topic, &outcome);
    }
}

async fn run_debate(
    topic: &str,
    cli: &Cli,
    prompts: &PromptSet,
    provider: Arc<ResilientChat>,
) -> Result<DebateOutcome> {
    let config = DebateConfig::new(topic)
        .num_players(cli.players)
        .max_rounds(cli.rounds);
    let mut debate = Debate::bootstrap(config, prompts.clone(), provider).await?;
    let outcome = debate.run().await?;
    Ok(outcome)
}

fn print_outcome(topic: &str, outcome: &DebateOutcome) {
    println!("\n===== Debate Done! =====");
    println!("\n----- Debate Topic -----");
    println!("{topic}");
    println!("\n----- Debate Summary -----");
    println!("{}", outcome.summary);
    println!("\n----- Debate Answer -----");
    println!("{}", outcome.debate_answer);
    println!("\n----- Debate Reason -----");
    println!("{}", outcome.reason);
    if !outcome.success {
        println!("\n(no final answer was reached)");
    }
}
