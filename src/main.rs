//! respdiff: compare HTTP responses across environments
//!
//! Fetches the same resource from two URLs and reports the differences as
//! JSON structural diffs or HTML element text diffs.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use respdiff::{
    cli,
    config::{
        self, AppConfig, CliOverrides, CompareConfig, CompareUrls, CONFIG_DIR_NAME,
        CONFIG_FILE_NAMES,
    },
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "respdiff")]
#[command(version)]
#[command(about = "Compare HTTP responses served from two URLs", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No differences detected (or --fail-on-change not set)
    1  Differences detected with --fail-on-change
    3  Error occurred

EXAMPLES:
    # Compare two JSON APIs
    respdiff compare https://staging.example.com/api/v1/status https://example.com/api/v1/status

    # Compare the text of selected HTML elements
    respdiff compare https://staging.example.com/ https://example.com/ -e title -e h1

    # CI check with machine-readable output
    respdiff compare $STAGING $PROD -o json -O diff.json --fail-on-change")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "RESPDIFF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `compare` subcommand
#[derive(Parser)]
struct CompareArgs {
    /// URL of side A (the reference)
    url_a: String,

    /// URL of side B
    url_b: String,

    /// CSS selector of an HTML element to compare; repeat for several.
    /// Without any, the bodies are compared as JSON.
    #[arg(short = 'e', long = "element", value_name = "SELECTOR")]
    elements: Vec<String>,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// User-Agent header sent to both sides
    #[arg(long)]
    user_agent: Option<String>,

    /// Maximum redirects to follow (0 disables redirects)
    #[arg(long)]
    max_redirects: Option<usize>,

    /// Extra request header as NAME:VALUE; repeat for several
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Exit with code 1 if any differences are detected
    #[arg(long)]
    fail_on_change: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the responses of two URLs
    Compare(CompareArgs),

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .respdiff.yaml in the current directory
    Init,
    /// Generate JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Parse a `NAME:VALUE` header argument.
fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in '{raw}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Collect the flags given on the command line.
fn cli_overrides(cli: &Cli, args: &CompareArgs) -> CliOverrides {
    CliOverrides {
        timeout_secs: args.timeout,
        user_agent: args.user_agent.clone(),
        max_redirects: args.max_redirects,
        headers: args.headers.iter().cloned().collect(),
        elements: args.elements.clone(),
        format: args.output,
        output_file: args.output_file.clone(),
        no_color: cli.no_color,
        fail_on_change: args.fail_on_change,
        quiet: cli.quiet,
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Dispatch to command handlers.
fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Compare(args) => {
            let overrides = cli_overrides(&cli, args);
            let (app, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            if let Some(path) = &loaded_from {
                tracing::debug!("Loaded config from {}", path.display());
            }
            let config = CompareConfig::from_app(
                app,
                CompareUrls {
                    a: args.url_a.clone(),
                    b: args.url_b.clone(),
                },
            );
            cli::run_compare(config)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "respdiff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order, git root after the first):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(CONFIG_FILE_NAMES[0]);
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Schema { output } => {
                let schema = config::generate_json_schema()?;
                match output {
                    Some(path) => {
                        std::fs::write(path, &schema)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        eprintln!("Schema written to {}", path.display());
                    }
                    None => println!("{schema}"),
                }
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}
