/*!
 * wifi-scheme
 * Track which wireless scheme is selected and whether it is associated
 */

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::info;

use wifi_scheme::properties::SCHEME_CURRENT;
use wifi_scheme::signal::to_dbm;
use wifi_scheme::table::format_table;
use wifi_scheme::{SchemeConfig, StateReconciler, StatusTool, UpdateRequest};

#[derive(Parser)]
#[command(name = "wifi-scheme")]
#[command(about = "Wireless scheme state tracking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = wifi_scheme::config::DEFAULT_CONFIG_PATH)]
    config: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the stored scheme state
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a single stored property
    Get { key: String },
    /// List configured schemes, optionally filtered by a fuzzy query
    List { query: Option<String> },
    /// Select a scheme and probe whether it is associated
    Activate { scheme: String },
    /// Re-probe the currently selected scheme
    Refresh,
    /// Convert a raw link quality value to dBm
    Dbm {
        #[arg(allow_hyphen_values = true)]
        quality: i32,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("wifi_scheme={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Dbm { quality } => print_dbm(quality),
        command => run(command, &cli.config),
    }
}

fn run(command: Commands, config_path: &str) -> Result<ExitCode> {
    // Load configuration
    let config = SchemeConfig::load(config_path)?;
    let reconciler = config.reconciler()?;

    match command {
        Commands::Status { json } => show_status(&reconciler, json),
        Commands::Get { key } => get_property(&reconciler, &key),
        Commands::List { query } => list_schemes(&config, &reconciler, query.as_deref()),
        Commands::Activate { scheme } => activate(&config, &reconciler, &scheme),
        Commands::Refresh => refresh(&config, &reconciler),
        Commands::Dbm { quality } => print_dbm(quality),
    }
}

fn print_dbm(quality: i32) -> Result<ExitCode> {
    println!("{}", to_dbm(quality));
    Ok(ExitCode::SUCCESS)
}

fn show_status<T: StatusTool>(reconciler: &StateReconciler<T>, json: bool) -> Result<ExitCode> {
    let record = reconciler.store().load()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        let rows: Vec<Vec<&str>> = record.iter().map(|(k, v)| vec![k, v]).collect();
        print!("{}", format_table(&rows, "  "));
    }
    Ok(ExitCode::SUCCESS)
}

fn get_property<T: StatusTool>(reconciler: &StateReconciler<T>, key: &str) -> Result<ExitCode> {
    match reconciler.store().property(key)? {
        Some(value) => {
            println!("{}", value);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("{} is not set", key);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn list_schemes<T: StatusTool>(
    config: &SchemeConfig,
    reconciler: &StateReconciler<T>,
    query: Option<&str>,
) -> Result<ExitCode> {
    let catalog = config.catalog();
    let current = reconciler.store().property(SCHEME_CURRENT)?;

    let schemes: Vec<_> = match query {
        Some(query) => catalog.search(query).into_iter().map(|(s, _)| s).collect(),
        None => catalog.schemes().iter().collect(),
    };

    let rows: Vec<Vec<&str>> = schemes
        .iter()
        .map(|s| {
            let marker = if current.as_deref() == Some(s.name.as_str()) { "*" } else { "" };
            vec![marker, s.name.as_str(), s.interface.as_str(), s.target_ssid()]
        })
        .collect();
    print!("{}", format_table(&rows, "  "));
    Ok(ExitCode::SUCCESS)
}

fn activate<T: StatusTool>(
    config: &SchemeConfig,
    reconciler: &StateReconciler<T>,
    query: &str,
) -> Result<ExitCode> {
    let catalog = config.catalog();
    let scheme = catalog.resolve(query)?;
    info!("Activating scheme {} on {}", scheme.name, scheme.interface);

    let request = UpdateRequest::select(&scheme.interface, &scheme.name, scheme.target_ssid());
    let record = reconciler.update(&request)?;
    report(&scheme.name, record.scheme_active().unwrap_or(false));
    Ok(ExitCode::SUCCESS)
}

fn refresh<T: StatusTool>(config: &SchemeConfig, reconciler: &StateReconciler<T>) -> Result<ExitCode> {
    let current = reconciler.store().property(SCHEME_CURRENT)?;
    let catalog = config.catalog();
    let ssid = current
        .as_deref()
        .and_then(|name| catalog.find(name))
        .map(|s| s.target_ssid())
        .unwrap_or("");

    let record = reconciler.update(&UpdateRequest::refresh(ssid))?;
    report(
        current.as_deref().unwrap_or("(none)"),
        record.scheme_active().unwrap_or(false),
    );
    Ok(ExitCode::SUCCESS)
}

fn report(scheme: &str, active: bool) {
    let state = if active { "active" } else { "inactive" };
    println!("{}: {}", scheme, state);
}
