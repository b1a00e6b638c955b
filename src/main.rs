mod discover;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use skillcheck_core::config::{AppConfig, OutputFormat};
use skillcheck_core::{CliError, ExitCode};
use skillcheck_report::{to_prompt, ReportGenerator};
use skillcheck_skills::{check_all, parse_many, Spec};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "skillcheck",
    about = "Validate SKILL.md documents against the agent-skills and claude-code specifications",
    version,
    author
)]
struct Cli {
    /// Path to config file (default: ~/.config/skillcheck/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate skill directories
    Check {
        /// Skill directories, or directories to search for skills
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,
        /// Specification to validate against: auto, agent-skills, claude-code
        #[arg(long)]
        spec: Option<Spec>,
        /// Output format: text or json
        #[arg(long)]
        format: Option<OutputFormat>,
        /// Exit non-zero when warnings are reported
        #[arg(long)]
        fail_on_warnings: bool,
    },

    /// Print the <available_skills> prompt block
    Prompt {
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Initialize default configuration file
    Init,
    /// Print config file path
    Path,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
                _ => ExitCode::Usage,
            };
            let _ = err.print();
            std::process::exit(code.code());
        }
    };

    // Set up tracing.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "skillcheck=info,warn".into()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            err.downcast_ref::<CliError>()
                .map(CliError::exit_code)
                .unwrap_or(ExitCode::ParseFailure)
        }
    };

    std::process::exit(code.code());
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Check {
            paths,
            spec,
            format,
            fail_on_warnings,
        } => {
            let mut config = load_config(config_path)?;
            // Apply CLI overrides.
            if let Some(spec) = spec {
                config.check.spec = spec;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            if fail_on_warnings {
                config.check.fail_on_warnings = true;
            }
            run_check(&paths, &config)
        }
        Commands::Prompt { paths } => run_prompt(&paths, &load_config(config_path)?),
        Commands::Config { action } => {
            handle_config_command(action, config_path)?;
            Ok(ExitCode::Success)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let loaded = match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load {}", path.display())),
        None => AppConfig::load(),
    };
    loaded.map_err(|e| CliError::Config(format!("{:#}", e)).into())
}

fn run_check(paths: &[PathBuf], config: &AppConfig) -> Result<ExitCode> {
    let dirs = discover::discover(paths, &config.discovery);
    tracing::info!(
        "Checking {} skill directories against {}",
        dirs.len(),
        config.check.spec
    );

    let reports = check_all(&dirs, config.check.spec);

    let rendered = match config.output.format {
        OutputFormat::Text => ReportGenerator::text_report(&reports),
        OutputFormat::Json => {
            let value = ReportGenerator::json_report(&reports);
            format!("{}\n", serde_json::to_string_pretty(&value)?)
        }
    };
    write_output(&rendered)?;

    Ok(ExitCode::for_reports(&reports, config.check.fail_on_warnings))
}

fn run_prompt(paths: &[PathBuf], config: &AppConfig) -> Result<ExitCode> {
    let dirs = discover::discover(paths, &config.discovery);
    let (skills, failures) = parse_many(&dirs);

    for (path, err) in &failures {
        tracing::warn!("Skipping {}: {}", path.display(), err);
    }

    write_output(&format!("{}\n", to_prompt(&skills)))?;

    if failures.is_empty() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::ParseFailure)
    }
}

fn write_output(text: &str) -> std::result::Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn handle_config_command(action: Option<ConfigAction>, custom_path: Option<&Path>) -> Result<()> {
    let path = custom_path
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::default_path);

    match action {
        Some(ConfigAction::Show) | None => {
            let toml_str = toml::to_string_pretty(&load_config(custom_path)?)?;
            println!("{}", toml_str);
        }
        Some(ConfigAction::Init) => {
            if path.exists() {
                println!("Config already exists at: {}", path.display());
            } else {
                AppConfig::default().save_to(&path)?;
                println!("Created default config at: {}", path.display());
            }
        }
        Some(ConfigAction::Path) => {
            println!("{}", path.display());
        }
    }
    Ok(())
}
