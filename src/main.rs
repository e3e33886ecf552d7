use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use logscope_ingest::Loader;
use logscope_query::{QueryEngine, RecordFilter};
use logscope_store::LogStore;
use logscope_types::RecordView;

mod config;

use config::AppConfig;

/// Logscope - load a directory of log files and query them
#[derive(Parser, Debug)]
#[command(name = "logscope")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory of log files to load (overrides the config file)
    #[arg(value_name = "LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only records with this exact level
    #[arg(long)]
    level: Option<String>,

    /// Only records from this exact component
    #[arg(long)]
    component: Option<String>,

    /// Only records at or after this time (YYYY-MM-DD HH:MM:SS)
    #[arg(long, value_name = "TIME")]
    start_time: Option<String>,

    /// Only records at or before this time (YYYY-MM-DD HH:MM:SS)
    #[arg(long, value_name = "TIME")]
    end_time: Option<String>,

    /// Print aggregate counts instead of records
    #[arg(long)]
    stats: bool,

    /// Look up a single record by id
    #[arg(long, value_name = "ID")]
    id: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing for debugging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(args);

    // Handle any errors
    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

fn run(args: Args) -> Result<()> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(dir) = args.log_dir {
        config.log_dir = dir;
    }

    // Populate the store before serving any query
    let store = LogStore::new();
    let loader = Loader::new(&config.log_dir).with_extension(&config.extension);
    let summary = loader.load_into(&store)?;
    tracing::info!(
        dir = %config.log_dir.display(),
        loaded = summary.loaded,
        rejected = summary.rejected,
        "store populated"
    );

    let engine = QueryEngine::new(store);

    if let Some(id) = &args.id {
        let record = engine.find_by_id(id)?;
        println!("{}", serde_json::to_string_pretty(&RecordView::from(&record))?);
        return Ok(());
    }

    if args.stats {
        println!("{}", serde_json::to_string_pretty(&engine.stats())?);
        return Ok(());
    }

    let filter = RecordFilter::from_params(
        args.level.as_deref(),
        args.component.as_deref(),
        args.start_time.as_deref(),
        args.end_time.as_deref(),
    )?;
    let views: Vec<RecordView> = engine.filter(&filter).iter().map(RecordView::from).collect();
    println!("{}", serde_json::to_string_pretty(&views)?);

    Ok(())
}
