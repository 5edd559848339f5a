use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::ScanError;
use crate::report::ScanReport;
use crate::scanner::Scanner;

mod config;
mod cursor;
mod error;
mod report;
mod scanner;
mod symbols;
mod token;

#[derive(Parser)]
#[command(author, version, about = "ProcScript Scanner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a ProcScript source file and report its tokens
    Scan {
        /// Path to the source file
        file: PathBuf,
        /// Emit the scan report as pretty-printed JSON
        #[arg(long)]
        json: bool,
        /// Print only the token listing
        #[arg(long)]
        tokens_only: bool,
    },
    /// Scan every source file in the configured sources directory
    Batch,
    /// Manage scanner configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration file contents
    Show,
    /// Initialize a configuration file with defaults
    Init,
    /// Open the configuration file in your editor
    Edit,
    /// List the effective settings
    List,
}

fn get_source_files(config: &Config) -> Result<Vec<PathBuf>, ScanError> {
    let sources_path = &config.sources_dir;

    if !sources_path.exists() {
        return Err(ScanError::FileNotFound(format!(
            "Sources directory not found: {}\n\nTo fix this:\n1. Create the directory\n2. Add your .{} files there\n3. Or set PSC_SOURCES_DIR in your environment",
            sources_path.display(),
            config.source_extension
        )));
    }

    if !sources_path.is_dir() {
        return Err(ScanError::FileNotFound(format!(
            "Expected {} to be a directory",
            sources_path.display()
        )));
    }

    let mut found_sources: Vec<PathBuf> = Vec::new();
    let files = fs::read_dir(sources_path).map_err(ScanError::Io)?;

    for entry in files.flatten() {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some(config.source_extension.as_str()) {
            found_sources.push(path);
        }
    }

    if found_sources.is_empty() {
        return Err(ScanError::FileNotFound(format!(
            "No .{} files found in: {}\n\nAdd your ProcScript sources to this directory, or set PSC_SOURCES_DIR to point somewhere else",
            config.source_extension,
            sources_path.display()
        )));
    }

    found_sources.sort();
    Ok(found_sources)
}

fn scan_file(path: &PathBuf) -> Result<Scanner, ScanError> {
    let source = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ScanError::FileNotFound(path.display().to_string())
        } else {
            ScanError::Io(e)
        }
    })?;

    let mut scanner = Scanner::new(&source);
    scanner.scan();
    Ok(scanner)
}

fn run_scan(file: &PathBuf, json: bool, tokens_only: bool) -> Result<(), ScanError> {
    let scanner = scan_file(file)?;

    if json {
        let scan_report = ScanReport::from_scanner(&scanner);
        match serde_json::to_string_pretty(&scan_report) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => return Err(ScanError::Io(e.into())),
        }
        return Ok(());
    }

    report::print_tokens(scanner.tokens());
    if tokens_only {
        return Ok(());
    }
    report::print_statistics(&scanner);
    report::print_symbol_table(scanner.symbol_table());
    report::print_error_report(scanner.error_handler());
    Ok(())
}

fn run_batch(config: &Config) -> Result<(), ScanError> {
    let sources = match get_source_files(config) {
        Ok(sources) => sources,
        Err(ScanError::FileNotFound(msg)) => {
            println!("Error: {}", msg);
            println!("\nCurrent configuration:");
            println!("  Environment: {}", config.env_name);
            println!("  Sources directory: {}", config.sources_dir.display());
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let mut total_tokens = 0;
    let mut total_errors = 0;
    for path in &sources {
        let scanner = scan_file(path)?;
        println!(
            "{}: {} tokens, {} errors, {} identifiers",
            path.display(),
            scanner.tokens().len(),
            scanner.error_handler().count(),
            scanner.symbol_table().len()
        );
        total_tokens += scanner.tokens().len();
        total_errors += scanner.error_handler().count();
    }

    println!(
        "\nScanned {} files: {} tokens, {} errors",
        sources.len(),
        total_tokens,
        total_errors
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load();

    match cli.command {
        Commands::Scan {
            file,
            json,
            tokens_only,
        } => {
            run_scan(&file, json, tokens_only)?;
        }
        Commands::Batch => {
            run_batch(&config)?;
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                let config_path = Config::get_config_path();
                if config_path.exists() {
                    let contents = fs::read_to_string(&config_path)?;
                    println!("{}", contents);
                } else {
                    println!("No configuration file at: {}", config_path.display());
                    println!("Run 'config init' to create one.");
                }
            }
            ConfigCommands::Init => {
                let config_path = Config::get_config_path();
                if config_path.exists() {
                    println!("Configuration file already exists at: {}", config_path.display());
                    println!("Use 'config edit' to modify it or remove the file to reinitialize.");
                } else {
                    Config::default().save()?;
                    println!("Initialized configuration at: {}", config_path.display());
                }
            }
            ConfigCommands::Edit => {
                let editor = std::env::var("EDITOR").unwrap_or_else(|_| {
                    if cfg!(windows) {
                        String::from("notepad")
                    } else {
                        String::from("nano")
                    }
                });

                let config_path = Config::get_config_path();
                if !config_path.exists() {
                    Config::default().save()?;
                }

                std::process::Command::new(editor).arg(config_path).status()?;
            }
            ConfigCommands::List => {
                println!("Environment: {}", config.env_name);
                println!("Sources directory: {}", config.sources_dir.display());
                println!("Source extension: .{}", config.source_extension);
                println!("Config file: {}", Config::get_config_path().display());
            }
        },
    }

    Ok(())
}
