use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use qubo_core::{Analyzer, Severity};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod template;

use crate::config::QuboConfig;
use crate::render::Printer;

/// Environment variable holding a log filter (e.g. `debug`, `qubo_core=trace`)
const LOG_ENV: &str = "QUBO_LOG";

/// Exit code: command succeeded and the solver passes
const EXIT_OK: i32 = 0;
/// Exit code: the solver fails a guideline or has no entry point
const EXIT_INVALID: i32 = 1;
/// Exit code: usage, I/O or config error
const EXIT_ERROR: i32 = 2;

/// qubo: QUBO solver contract checker
///
/// Inspect a solver script before uploading it: the inputs its `solve`
/// function takes, the outputs it returns, and the upload guidelines.
#[derive(Parser)]
#[command(name = "qubo", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Suppress stdout; only the exit code reports the result
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log filter (overrides $QUBO_LOG and the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the input parameters of the entry point
    Inputs {
        /// Path to .py solver
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the outputs named by the entry point's return statement
    Outputs {
        /// Path to .py solver
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the upload guidelines
    Validate {
        /// Path to .py solver
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Full analysis: inputs, outputs, guidelines and fingerprint
    Analyze {
        /// Path to .py solver
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the SHA-256 fingerprint of a solver
    Hash {
        /// Path to .py solver
        file: PathBuf,
    },

    /// Scaffold a new solver that meets every guideline
    Init {
        /// Solver name (file is written as <name>.py)
        name: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            EXIT_ERROR
        }
    };

    process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let mut config = QuboConfig::resolve(cli.config)?;
    if cli.no_color {
        config.output.color = false;
    }
    if !config.output.color {
        colored::control::set_override(false);
    }

    let level = cli
        .log_level
        .or_else(|| std::env::var(LOG_ENV).ok())
        .unwrap_or_else(|| config.log.level.clone());
    init_logging(&level);

    let analyzer = Analyzer::new(config.analyzer.clone());
    let entry_point = analyzer.options().entry_point.clone();
    let printer = Printer::new(cli.quiet);
    let as_json = |flag: bool| flag || config.output.json;

    let code = match cli.command {
        Commands::Inputs { file, json } => {
            let text = read_solver(&file)?;
            let extraction = analyzer.extract_inputs(&text);
            if as_json(json) {
                printer.json(&render::extraction_json(&entry_point, &extraction))?;
            } else {
                render::diagnostics(&extraction.diagnostic);
                render::parameters(&printer, "inputs", &extraction.parameters);
            }
            extraction_exit_code(extraction.diagnostic.map(|d| d.severity))
        }
        Commands::Outputs { file, json } => {
            let text = read_solver(&file)?;
            let extraction = analyzer.extract_outputs(&text);
            if as_json(json) {
                printer.json(&render::extraction_json(&entry_point, &extraction))?;
            } else {
                render::diagnostics(&extraction.diagnostic);
                render::parameters(&printer, "outputs", &extraction.parameters);
            }
            extraction_exit_code(extraction.diagnostic.map(|d| d.severity))
        }
        Commands::Validate { file, json } => {
            let text = read_solver(&file)?;
            let validation = analyzer.validate_guidelines(&text);
            if as_json(json) {
                printer.json(&render::validation_json(&entry_point, &validation))?;
            } else {
                render::checklist(&printer, &entry_point, &validation);
                render::verdict(&printer, validation.all_passed());
            }
            if validation.all_passed() {
                EXIT_OK
            } else {
                EXIT_INVALID
            }
        }
        Commands::Analyze { file, json } => {
            let text = read_solver(&file)?;
            let analysis = analyzer.analyze(&text);
            if as_json(json) {
                printer.json(&serde_json::to_value(&analysis)?)?;
            } else {
                render::diagnostics(&analysis.diagnostics);
                render::analysis(&printer, &analysis);
            }
            if analysis.is_publishable() {
                EXIT_OK
            } else {
                EXIT_INVALID
            }
        }
        Commands::Hash { file } => {
            let text = read_solver(&file)?;
            printer.line(qubo_core::fingerprint(&text));
            EXIT_OK
        }
        Commands::Init { name } => {
            let name = name.unwrap_or_else(|| "solver".to_string());
            let path = PathBuf::from(format!("{}.py", name));
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            std::fs::write(&path, template::render(&name, &entry_point))
                .with_context(|| format!("cannot write {}", path.display()))?;
            tracing::info!(path = %path.display(), "created solver template");
            printer.line(format!("created {}", path.display()));
            EXIT_OK
        }
        Commands::Version => {
            printer.line(format!("qubo {}", env!("CARGO_PKG_VERSION")));
            EXIT_OK
        }
    };

    Ok(code)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Read a solver script; only `.py` files are accepted
fn read_solver(path: &Path) -> Result<String> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("py") {
        bail!(
            "Please upload a valid `.py` file (got {})",
            path.display()
        );
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read solver");
    Ok(text)
}

/// A missing entry point fails the command; a missing return only warns
fn extraction_exit_code(severity: Option<Severity>) -> i32 {
    match severity {
        Some(Severity::Error) => EXIT_INVALID,
        Some(Severity::Warning) | None => EXIT_OK,
    }
}
