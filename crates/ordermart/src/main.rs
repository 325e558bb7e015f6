use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ordermart_core::{db, pipeline, sink};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Order warehouse ETL", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform a directory of order files, optionally loading the result
    Run(RunArgs),
    /// Check that the target database is reachable
    Ping,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Directory containing newline-delimited JSON order files
    #[arg(long)]
    data_dir: PathBuf,

    /// Load the transformed tables into Postgres
    #[arg(long)]
    load: bool,

    /// Schema the target tables live in
    #[arg(long, default_value = sink::DEFAULT_SCHEMA)]
    schema: String,

    /// Print the full run receipt as JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Ping => ping().await,
    }
}

async fn run(args: RunArgs) -> Result<()> {
    let sink = if args.load {
        let url = database_url()?;
        let sink = sink::PgSink::connect(&url, args.schema)
            .await
            .context("failed to connect to the target database")?;
        Some(sink)
    } else {
        None
    };

    let receipt = pipeline::execute_run(&args.data_dir, sink.as_ref()).await?;

    if let Some(sink) = sink {
        sink.close().await;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        println!("\n--- Run Summary ---");
        println!(
            "  Files parsed: {} (failed: {})",
            receipt.extract.parsed, receipt.extract.failed
        );
        println!("  Records extracted: {}", receipt.extract.records);
        for table in &receipt.tables {
            println!("  {:<18} {:>6} rows", table.table, table.rows);
        }
        if let Some(load) = &receipt.load {
            println!(
                "  Loaded {} rows across {} tables ({} failed)",
                load.loaded_rows(),
                load.tables.len(),
                load.failures()
            );
        }
    }

    if let Some(load) = &receipt.load {
        if load.failures() > 0 {
            anyhow::bail!("{} table(s) failed to load", load.failures());
        }
    }

    Ok(())
}

async fn ping() -> Result<()> {
    let url = database_url()?;
    let sink = sink::PgSink::connect(&url, sink::DEFAULT_SCHEMA)
        .await
        .context("failed to connect to the target database")?;
    sink.ping().await.context("connectivity check failed")?;
    info!("database connection is healthy");
    sink.close().await;
    Ok(())
}

fn database_url() -> Result<String> {
    dotenvy::dotenv().ok();
    db::database_url_from_env().context("database configuration is incomplete")
}
