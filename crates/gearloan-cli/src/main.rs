// Rust guideline compliant 2026-10-19

//! Gearloan CLI Application
//!
//! Command-line interface for the Gearloan equipment lending system.

use anyhow::Context;
use clap::Parser;
use gearloan_app::InventoryService;
use gearloan_cli::{commands, create_formatter, logging, session, should_use_color, Command};
use gearloan_core::{Config, OutputFormat, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "gear",
    version,
    about = "Gearloan: equipment catalog and lending ledger",
    long_about = "Gearloan tracks a catalog of lendable equipment and every loan made from it. Quantities are kept consistent with active loans at all times.",
    after_help = "Examples:\n  gear --catalog demos/catalog.json catalog --search camera\n  gear --catalog demos/catalog.json borrow EQ002 --borrower-id 984106503 --name Wu --from 2024-11-20T14:03:00Z --until 2024-11-20T16:10:00Z\n  gear --catalog demos/catalog.json history 984106503\n  gear --catalog demos/catalog.json session < script.txt\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<FormatArg>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Custom config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed file with the catalog and past loans (overrides the config)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Json,
    Table,
    Plain,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Plain => OutputFormat::Plain,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    if let Some(catalog) = cli.catalog.clone() {
        config.catalog_path = Some(catalog);
    }

    // The log filter comes from the config; report the load after init.
    logging::init(cli.verbose, &config.log_filter);
    tracing::debug!(path = %config_path.display(), ?config, "configuration loaded");

    // --format beats --json, which beats the configured default.
    let format = match (cli.format, cli.json) {
        (Some(arg), _) => arg.into(),
        (None, true) => OutputFormat::Json,
        (None, false) => config.output_format,
    };
    let use_color = !cli.no_color && should_use_color();
    let formatter = create_formatter(format, use_color);

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(ExitCode::SUCCESS);
    };

    let service = InventoryService::from_config(&config).with_context(|| match &config.catalog_path {
        Some(path) => format!("Failed to load catalog from {}", path.display()),
        None => "Failed to create an empty inventory".to_string(),
    })?;

    if let Command::Session = command {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        session::run(&service, formatter.as_ref(), stdin.lock(), &mut stdout)
            .context("Session input or output failed")?;
        return Ok(ExitCode::SUCCESS);
    }

    match commands::run(&service, command, formatter.as_ref()) {
        Ok(output) => {
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let rendered = formatter.format_error(&e);
            if format == OutputFormat::Json {
                println!("{}", rendered);
            } else {
                eprintln!("{}", rendered);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
