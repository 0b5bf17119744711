use std::path::PathBuf;

use anyhow::{Context, Result};
use charges_core::config::AppConfig;
use charges_core::store::FileReportStore;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(author, version, about = "Monthly charges abstract parser", long_about = None)]
struct Cli {
    /// TOML config file (falls back to CHARGES_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding saved reports (overrides config and CHARGES_STORE_DIR)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a report and print it without saving
    Parse(ParseArgs),
    /// Parse a report and save it under its as-at date
    Save(SaveArgs),
    /// List saved reports, newest first
    List,
    /// Print a saved report with its manual entries merged in
    Show(ShowArgs),
    /// Write a saved report as CSV
    Export(ExportArgs),
    /// Remove a saved report
    Delete(KeyArgs),
    /// Add a manual ledger entry to a saved report
    Entry(EntryArgs),
    /// Print the configured head table
    Heads,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Args, Debug, Default)]
struct SummaryArgs {
    /// Keep total and balance heads in the output
    #[arg(long, conflicts_with = "exclude_summaries")]
    include_summaries: bool,
    /// Drop total and balance heads even if the config keeps them
    #[arg(long)]
    exclude_summaries: bool,
}

impl SummaryArgs {
    fn resolve(&self, config: &AppConfig) -> bool {
        if self.include_summaries {
            true
        } else if self.exclude_summaries {
            false
        } else {
            config.include_summaries
        }
    }
}

#[derive(Args, Debug)]
struct ParseArgs {
    /// Report text file, or `-` for stdin
    input: PathBuf,
    #[command(flatten)]
    summaries: SummaryArgs,
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct SaveArgs {
    /// Report text file, or `-` for stdin
    input: PathBuf,
    #[command(flatten)]
    summaries: SummaryArgs,
}

#[derive(Args, Debug)]
struct KeyArgs {
    /// Report date as YYYY-MM-DD
    iso: String,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Report date as YYYY-MM-DD
    iso: String,
    #[command(flatten)]
    summaries: SummaryArgs,
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Report date as YYYY-MM-DD
    iso: String,
    /// Output file; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
    #[command(flatten)]
    summaries: SummaryArgs,
}

#[derive(Args, Debug)]
struct EntryArgs {
    /// Report date as YYYY-MM-DD
    iso: String,
    /// Head code from the head table
    #[arg(long)]
    code: String,
    /// Amount for the month
    #[arg(long, allow_negative_numbers = true)]
    month: Option<f64>,
    /// Total upto the previous month
    #[arg(long, allow_negative_numbers = true)]
    prior: Option<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(dir) = cli.store_dir {
        config.store_dir = dir;
    }
    let mut store = FileReportStore::new(config.store_dir.clone());
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Parse(args) => {
            let text = commands::read_input(&args.input)?;
            let include = args.summaries.resolve(&config);
            commands::preview(&text, include, args.format, &mut stdout)
        }
        Command::Save(args) => {
            let text = commands::read_input(&args.input)?;
            let include = args.summaries.resolve(&config);
            let iso = commands::save(&mut store, &text, include)?;
            info!(iso = %iso, "Report saved");
            commands::print_line(&mut stdout, &format!("saved report {iso}"))
        }
        Command::List => commands::list(&store, &mut stdout),
        Command::Show(args) => {
            let include = args.summaries.resolve(&config);
            commands::show(&store, &args.iso, include, args.format, &mut stdout)
        }
        Command::Export(args) => {
            let include = args.summaries.resolve(&config);
            match args.out {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    commands::export(&store, &args.iso, include, file)?;
                    info!(path = %path.display(), "Exported report");
                    Ok(())
                }
                None => commands::export(&store, &args.iso, include, &mut stdout),
            }
        }
        Command::Delete(args) => commands::delete(&mut store, &args.iso, &mut stdout),
        Command::Entry(args) => commands::add_entry(
            &mut store,
            &config.heads,
            &args.iso,
            &args.code,
            args.month,
            args.prior,
            &mut stdout,
        ),
        Command::Heads => commands::heads(&config.heads, &mut stdout),
    }
}
