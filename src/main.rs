// Network Selection - Main Entry Point
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Network Selection CLI
//!
//! Lists the configured networks, shows the current selection and selects
//! a new network, remembering it for the next run.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use network_selection::{AppConfig, NetworkContext, SelectedNetworkStore, SettingsStore, VERSION};

/// Human-readable application name.
pub const APP_NAME: &str = "Network Selection";

/// Print version information and exit.
fn print_version() {
    println!("{} {}", APP_NAME, VERSION);
    println!("Copyright (C) 2026 Christos A. Daggas");
    println!("License: MIT");
}

/// Print help information and exit.
fn print_help() {
    println!(
        "Usage: {} [OPTIONS]",
        env::args().next().unwrap_or_else(|| "network-selection".to_string())
    );
    println!();
    println!("Show or change the selected network.");
    println!();
    println!("Options:");
    println!("  -l, --list          List configured networks");
    println!("  -j, --json          Print the list as JSON (with --list)");
    println!("  -c, --current       Print the selected network key (default)");
    println!("  -s, --select <KEY>  Select a network and remember it");
    println!("  -d, --debug         Enable debug logging");
    println!("  -h, --help          Show this help message and exit");
    println!("  -v, --version       Show version information and exit");
    println!();
    println!("Environment variables:");
    println!("  RUST_LOG            Set log level (trace, debug, info, warn, error)");
}

/// What the user asked for.
#[derive(Debug, Default)]
struct Options {
    list: bool,
    json: bool,
    select: Option<String>,
    debug: bool,
}

enum Parsed {
    Run(Options),
    Exit(ExitCode),
}

fn parse_args(args: &[String]) -> Parsed {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return Parsed::Exit(ExitCode::SUCCESS);
            }
            "-v" | "--version" => {
                print_version();
                return Parsed::Exit(ExitCode::SUCCESS);
            }
            "-l" | "--list" => options.list = true,
            "-j" | "--json" => options.json = true,
            "-c" | "--current" => {}
            "-d" | "--debug" => options.debug = true,
            "-s" | "--select" => match iter.next() {
                Some(key) => options.select = Some(key.clone()),
                None => {
                    eprintln!("Option {} requires a network key.", arg);
                    return Parsed::Exit(ExitCode::FAILURE);
                }
            },
            _ => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Try '--help' for more information.");
                return Parsed::Exit(ExitCode::FAILURE);
            }
        }
    }

    Parsed::Run(options)
}

fn print_networks(
    store: &SelectedNetworkStore,
    json: bool,
    out: &mut impl Write,
) -> network_selection::Result<()> {
    if json {
        let networks: Vec<_> = store.networks().iter().collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&networks)?)?;
        return Ok(());
    }

    let current = store.network();
    for entry in store.networks() {
        let marker = if entry.key == current { '*' } else { ' ' };
        match &entry.lcd {
            Some(lcd) => writeln!(out, "{} {:<12} {}  {}", marker, entry.key, entry, lcd)?,
            None => writeln!(out, "{} {:<12} {}", marker, entry.key, entry)?,
        }
    }
    Ok(())
}

/// Apply the requested selection, then print the list or the current key.
fn run(
    options: &Options,
    settings: &SettingsStore,
    out: &mut impl Write,
) -> network_selection::Result<()> {
    let store = settings.open_network_store();

    if let Some(key) = &options.select {
        if let Err(e) = store.set_network(key) {
            if e.is_selection_error() {
                let available: Vec<_> = store.networks().keys().collect();
                eprintln!("Available networks: {}", available.join(", "));
            }
            return Err(e);
        }
        // Saved even when unchanged, so a stale key on disk is replaced.
        settings.set_last_selected_network(key)?;
    }

    if options.list {
        print_networks(&store, options.json, out)
    } else {
        writeln!(out, "{}", store.network())?;
        Ok(())
    }
}

/// Log level from the flags, then the settings file, then INFO.
fn log_level(debug: bool, config: Option<&AppConfig>) -> tracing::Level {
    if debug {
        return tracing::Level::DEBUG;
    }

    match config {
        Some(config) => config.log_level.parse().unwrap_or_else(|_| {
            eprintln!("Ignoring invalid log level: {}", config.log_level);
            tracing::Level::INFO
        }),
        None => tracing::Level::INFO,
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Parsed::Run(options) => options,
        Parsed::Exit(code) => return code,
    };

    let level = log_level(options.debug, SettingsStore::load_config().as_ref());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting {} v{}", APP_NAME, VERSION);

    let settings = SettingsStore::new();
    match run(&options, &settings, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
