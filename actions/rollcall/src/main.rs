use clap::{Args as ClapArgs, Parser, Subcommand};
use futures::Stream;
use rollcall::prelude::*;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Normalize congressional roll-call votes and bill action logs
#[derive(Parser, Debug)]
#[command(name = "rollcall")]
#[command(about = "Normalize roll-call votes and bills into typed JSON records and timelines")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

/// Options shared by the record-processing commands
#[derive(ClapArgs, Debug)]
struct RecordOptions {
    /// Directory containing raw record files. Precedence: this flag, then the
    /// ROLLCALL_DIR env var, then data_dir in the config file, then ./data
    #[arg(long = "data-dir")]
    data_dir: Option<String>,

    /// Sort order of files: ASC or DESC
    #[arg(long, value_parser = ["ASC", "DESC"])]
    sort: Option<String>,

    /// Limit number of files
    #[arg(long)]
    limit: Option<usize>,

    /// Number of failed records tolerated before giving up
    #[arg(long = "failure-threshold")]
    failure_threshold: Option<usize>,

    /// YAML config file (default: ./rollcall.yml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read file paths from stdin instead of discovering files
    /// Useful for stdio pipelines: find ... | rollcall votes --stdin
    #[arg(long)]
    stdin: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify raw vote records and print one JSON line per vote
    Votes(RecordOptions),

    /// Normalize raw bill details and print each bill's decisions and timeline
    Bills(RecordOptions),

    /// Print the procedural goal of a vote question
    Goal {
        #[arg(long)]
        question: String,

        #[arg(long, default_value = "")]
        description: String,
    },
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  votes   Classify raw vote records");
    println!("  bills   Normalize bills and build their timelines");
    println!("  goal    Print the procedural goal of a vote question");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rollcall=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_config(options: &RecordOptions, kind: RecordKind) -> anyhow::Result<Config> {
    let file = FileConfig::discover(options.config.as_deref())?;

    let data_dir = resolve_data_dir(
        options.data_dir.as_ref().map(PathBuf::from),
        std::env::var_os(DATA_DIR_ENV).map(PathBuf::from),
        &file,
    );

    let mut builder = ConfigBuilder::from_file(&file, "data")
        .kind(kind)
        .data_dir(data_dir);
    if let Some(sort) = &options.sort {
        builder = builder.sort_order_str(sort)?;
    }
    if let Some(limit) = options.limit {
        builder = builder.limit(limit);
    }
    if let Some(threshold) = options.failure_threshold {
        builder = builder.failure_threshold(threshold);
    }

    Ok(builder.build()?)
}

/// Write each entry as one JSON line. Per-record errors go to the log; running
/// past the failure threshold ends the command with an error.
async fn print_entries(stream: impl Stream<Item = rollcall::Result<Entry>>) -> anyhow::Result<()> {
    futures::pin_mut!(stream);
    while let Some(result) = stream.next().await {
        match result {
            Ok(entry) => {
                let json = serde_json::to_string(&entry)?;
                println!("{}", json);
            }
            Err(e @ Error::TooManyFailures { .. }) => return Err(e.into()),
            Err(e) => {
                tracing::error!("{}", e);
            }
        }
    }
    Ok(())
}

async fn run_records_command(options: RecordOptions, kind: RecordKind) -> anyhow::Result<()> {
    let config = build_config(&options, kind)?;

    if options.stdin {
        let stdin = io::stdin();
        let paths = stdin
            .lock()
            .lines()
            .filter_map(|line| line.ok())
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>();

        print_entries(RecordProcessor::process_from_stdin(&config, paths.into_iter())).await
    } else {
        let processor = RecordProcessor::new(config);
        print_entries(processor.process()).await
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Some(Command::Votes(options)) => run_records_command(options, RecordKind::Votes).await,
        Some(Command::Bills(options)) => run_records_command(options, RecordKind::Bills).await,
        Some(Command::Goal {
            question,
            description,
        }) => {
            let goal = categorize(&question, &description);
            println!("{}", serde_json::to_string(&goal)?);
            Ok(())
        }
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
