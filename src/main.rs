use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use depscan::{
    config::Config,
    model::ManifestFile,
    output::{print_summary, write_report},
    scan::DependencyScan,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "depscan")]
#[command(
    author,
    version,
    about = "Scan a project's dependencies for known vulnerabilities"
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a project directory and write a JSON report into it
    Scan {
        /// Project directory containing a dependency manifest
        #[arg(value_parser = existing_dir)]
        project_path: PathBuf,

        /// Report language (e.g. en, tr, es); prompted for when omitted
        #[arg(short, long)]
        language: Option<String>,
    },

    /// List recognised manifest files in lookup order
    ListManifests,

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scan {
            project_path,
            language,
        } => {
            let language = match language {
                Some(language) => language,
                None => prompt_language()?,
            };
            run_scan(project_path, language).await
        }
        Commands::ListManifests => {
            list_manifests();
            Ok(())
        }
        Commands::Config { init, path } => handle_config(init, path),
    }
}

async fn run_scan(project_path: PathBuf, language: String) -> Result<()> {
    let config = Config::load().context("failed to load config")?;
    let scan = DependencyScan::from_config(&config)?;

    let progress = if std::io::stderr().is_terminal() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("invalid progress template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Scanning {}...", project_path.display()));
        Some(pb)
    } else {
        None
    };

    let result = scan.run(&project_path, &language).await;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let vulnerabilities = result?;
    if vulnerabilities.is_empty() {
        println!("No vulnerabilities found or an error occurred during scanning.");
        return Ok(());
    }

    let report = write_report(&vulnerabilities, &project_path)?;
    print_summary(&vulnerabilities, &report);
    println!();
    println!("Scanning completed and report generated.");
    Ok(())
}

fn prompt_language() -> Result<String> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Report language (e.g. en, tr, es): ");
        std::io::stdout().flush()?;

        let line = lines
            .next()
            .context("no language given")?
            .context("failed to read language")?;
        let language = line.trim();
        if !language.is_empty() {
            return Ok(language.to_string());
        }
    }
}

fn existing_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("directory '{}' does not exist", s))
    }
}

fn list_manifests() {
    println!("Recognised manifests (first match wins):");
    println!();

    for (position, manifest) in ManifestFile::ALL.iter().enumerate() {
        let registry = manifest
            .registry()
            .map(|r| r.display_name())
            .unwrap_or("-");
        println!("  {:>2}. {:<20} latest version from: {}", position + 1, manifest.file_name(), registry);
    }
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    // Show current config
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'depscan config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
