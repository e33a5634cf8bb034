use analytics::RatioEngine;
use analyzer::Analyzer;
use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{Config, LogFormat, init_tracing, load_config, load_config_from};
use core_types::{FinancialTable, Metric};
use loader::{LoaderOptions, TableCache, list_banks};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

mod render;

/// The main entry point for the BankStax dashboard.
fn main() -> anyhow::Result<()> {
    // Load environment overrides from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("loading configuration from '{}'", path.display()))?,
        None => load_config().context("loading configuration")?,
    };
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    if let Some(data) = &cli.data {
        config.data.file_path = data.clone();
    }
    let _log_guard = init_tracing(&config.logging)?;

    let mut cache = TableCache::new(LoaderOptions {
        delimiter: config.data.delimiter_byte(),
    });
    let table = cache
        .get_or_load(&config.data.file_path)
        .with_context(|| format!("loading bank data from '{}'", config.data.file_path.display()))?;

    let app = App {
        config,
        table,
        analyzer: Analyzer::new(RatioEngine::new()),
        json: cli.json,
    };

    // Execute the appropriate command
    match cli.command {
        Commands::Banks => app.banks(),
        Commands::Metrics(args) => app.metrics(&args.bank),
        Commands::Stress(args) => app.stress(&args.bank),
        Commands::Peers(args) => app.peers(&args.bank, args.metric),
        Commands::Series(args) => app.series(args.metric),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Bank balance-sheet ratios compared against peers and regulatory benchmarks.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file. Defaults to ./config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Line-items file, overriding `data.file_path` from the configuration.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Print raw results as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    /// Format of log output on stderr.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every bank in the data file.
    Banks,
    /// Key financial ratios for one bank, against benchmarks.
    Metrics(BankArgs),
    /// CCAR stress-test ratios for one bank, against benchmarks.
    Stress(BankArgs),
    /// One bank against the mean, max and min of all other banks.
    Peers(PeersArgs),
    /// A metric for every bank, in file order.
    Series(SeriesArgs),
}

#[derive(Parser)]
struct BankArgs {
    /// The bank's name exactly as it appears in the data file.
    #[arg(long)]
    bank: String,
}

#[derive(Parser)]
struct PeersArgs {
    /// The bank's name exactly as it appears in the data file.
    #[arg(long)]
    bank: String,

    /// A ratio key (e.g. "npa_ratio"), line-item key (e.g. "total_deposits") or column name.
    #[arg(long, value_parser = parse_metric)]
    metric: Metric,
}

#[derive(Parser)]
struct SeriesArgs {
    /// A ratio key (e.g. "npa_ratio"), line-item key (e.g. "total_deposits") or column name.
    #[arg(long, value_parser = parse_metric)]
    metric: Metric,
}

fn parse_metric(s: &str) -> Result<Metric, core_types::CoreError> {
    s.parse()
}

// ==============================================================================
// Command Handlers
// ==============================================================================

struct App {
    config: Config,
    table: Arc<FinancialTable>,
    analyzer: Analyzer,
    json: bool,
}

impl App {
    fn banks(&self) -> anyhow::Result<()> {
        let banks = list_banks(&self.table);
        self.emit(&banks, || render::banks_table(&banks))
    }

    fn metrics(&self, bank: &str) -> anyhow::Result<()> {
        let metrics = self.analyzer.engine().key_metrics_for(&self.table, bank)?;
        self.emit(&metrics, || {
            println!("Key Metrics: {bank}");
            render::ratio_table(&metrics, &self.config.benchmarks)
        })
    }

    fn stress(&self, bank: &str) -> anyhow::Result<()> {
        let metrics = self.analyzer.engine().stress_metrics_for(&self.table, bank)?;
        self.emit(&metrics, || {
            println!("CCAR Stress Test Analysis: {bank}");
            render::ratio_table(&metrics, &self.config.benchmarks)
        })
    }

    fn peers(&self, bank: &str, metric: Metric) -> anyhow::Result<()> {
        let comparison = self.analyzer.peer_comparison(&self.table, bank, metric)?;
        let benchmark = self.config.benchmarks.for_metric(metric);
        self.emit(&comparison, || render::peer_table(&comparison, benchmark))
    }

    fn series(&self, metric: Metric) -> anyhow::Result<()> {
        let series = self.analyzer.all_bank_series(&self.table, metric);
        self.emit(&series, || render::series_table(metric, &series))
    }

    /// Prints `value` as JSON in `--json` mode, otherwise the table built by `table`.
    fn emit<T, F>(&self, value: &T, table: F) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce() -> comfy_table::Table,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", table());
        }
        Ok(())
    }
}
