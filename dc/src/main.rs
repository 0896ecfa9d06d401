//! dealcoach - account planning and sales role-play
//!
//! CLI entry point for the HTTP server and the terminal tools.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use dealcoach::cli::{Cli, Command, OutputFormat, get_log_path};
use dealcoach::config::{Config, load_dotenv};
use dealcoach::llm::create_client;
use dealcoach::orchestrator::{Generator, Orchestrator};
use dealcoach::prompts::{PromptComposer, PromptLoader};
use dealcoach::server::{self, AppState};
use dealcoach::repl;

fn setup_logging(verbose: bool, to_stderr: bool) -> Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    if to_stderr {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    } else {
        let log_path = get_log_path();
        if let Some(log_dir) = log_path.parent() {
            fs::create_dir_all(log_dir).context("Failed to create log directory")?;
        }

        // Write to the log file, not stdout/stderr
        let log_file = fs::File::create(&log_path).context("Failed to create log file")?;
        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_ansi(false)
            .with_env_filter(filter)
            .init();
    }

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

/// Everything a completion needs: client, templates, budgets and timeout
fn build_generator(config: &Config) -> Result<Generator> {
    config.validate()?;
    let client = create_client(&config.llm).map_err(|e| eyre::eyre!("Failed to create LLM client: {}", e))?;
    let loader = PromptLoader::new(config.prompts.expanded_dir().as_deref()).context("Failed to load prompts")?;
    let composer = PromptComposer::new(loader, &config.generation);
    Ok(Generator::new(
        client,
        Arc::new(composer),
        config.generation.completion_timeout(),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dotenv_path = load_dotenv();
    setup_logging(cli.verbose, cli.log_stderr).context("Failed to setup logging")?;
    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(
        "dealcoach loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Serve { host, port } => cmd_serve(config, host, port).await,
        Command::Coach { company, competitors } => cmd_coach(&config, &company, competitors.as_deref()).await,
        Command::Plan {
            company,
            contacts,
            competitors,
        } => cmd_plan(&config, &company, contacts.as_deref(), competitors.as_deref()).await,
        Command::Prompts { format } => cmd_prompts(&config, format),
    }
}

async fn cmd_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let generator = build_generator(&config)?;
    println!(
        "{} listening on {}:{}",
        "dealcoach".bright_cyan().bold(),
        config.server.host,
        config.server.port
    );
    let state = AppState::new(generator, &config.server);
    server::serve(&config.server, state).await
}

async fn cmd_coach(config: &Config, company: &str, competitors: Option<&str>) -> Result<()> {
    let generator = build_generator(config)?;
    repl::run_coaching(generator, company, competitors).await
}

async fn cmd_plan(config: &Config, company: &str, contacts: Option<&str>, competitors: Option<&str>) -> Result<()> {
    let generator = build_generator(config)?;
    let orchestrator = Orchestrator::start(generator, company, contacts, competitors)?;

    eprintln!("{}", format!("Generating account plan for {}...", company).dimmed());
    let plan = orchestrator.generate_plan().await?;
    println!("{}", plan);
    Ok(())
}

fn cmd_prompts(config: &Config, format: OutputFormat) -> Result<()> {
    let dir: Option<PathBuf> = config.prompts.expanded_dir();
    let loader = PromptLoader::new(dir.as_deref()).context("Failed to load prompts")?;

    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = loader
                .sources()
                .iter()
                .map(|(name, source)| serde_json::json!({ "name": name, "source": source.to_string() }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            for (name, source) in loader.sources() {
                println!("{:22} {}", name.yellow(), source);
            }
        }
    }
    Ok(())
}
