use std::process::ExitCode;

use clap::Parser;

use market_feed::cli::{render_table, Cli};
use market_feed::config::Config;
use market_feed::{MarketAggregator, Result};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::builtin(),
    };
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }

    let requests = cli.instrument_requests()?;
    let aggregator = MarketAggregator::from_config(config)?;
    let (summaries, batch_error) = aggregator.aggregate(&requests).await.into_parts();

    if let Some(err) = &batch_error {
        if err.is_no_content() {
            eprintln!("Error: {}", err);
            return Ok(ExitCode::FAILURE);
        }
        eprintln!("Warning: {}", err);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print!("{}", render_table(&summaries));
    }

    Ok(ExitCode::SUCCESS)
}
