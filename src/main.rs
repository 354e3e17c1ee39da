// src/main.rs
//! wnb-calc - aircraft weight and balance calculator

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::{io, path::PathBuf, time::Duration};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use wnb_calc::{
    config::WnbConfig,
    display::TerminalDisplay,
    gps::{GpsKeepAlive, GpsSource},
    screen::{EnvelopeField, WnbScreen},
    store::ProfileStore,
    wnb::catalog,
    AircraftProfile, Status,
};

#[derive(Parser)]
#[command(name = "wnb-calc", version, about = "Aircraft weight and balance calculator")]
struct Cli {
    /// Config file (defaults to ~/.config/wnb-calc/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List built-in and saved profiles
    List,
    /// Compute gross weight and CG for a loading
    Compute {
        #[command(flatten)]
        load: LoadArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Exit with status 2 unless the loading is within limits
        #[arg(long)]
        check: bool,
    },
    /// Print the chart JSON for a loading
    Graph {
        #[command(flatten)]
        load: LoadArgs,
    },
    /// Save a loading as a named profile
    Save {
        #[command(flatten)]
        load: LoadArgs,
        #[arg(long)]
        make: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        reg: Option<String>,
    },
    /// Delete a saved profile
    Delete { name: String },
    /// Write a loading to a JSON file for editing
    Export {
        #[command(flatten)]
        load: LoadArgs,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Live view, optionally following a profile file
    Watch {
        #[command(flatten)]
        load: LoadArgs,
        /// Seconds between refreshes
        #[arg(long)]
        interval: Option<u64>,
        /// Do not keep the GPS alive
        #[arg(long)]
        no_gps: bool,
    },
}

#[derive(Args)]
struct LoadArgs {
    /// Built-in or saved profile (model, registration or full name)
    #[arg(short, long)]
    profile: Option<String>,
    /// Profile JSON file
    #[arg(short, long, conflicts_with = "profile")]
    file: Option<PathBuf>,
    /// Replace a station row
    #[arg(long = "station", value_name = "INDEX=DESC:ARM:WEIGHT")]
    stations: Vec<String>,
    /// Set a station weight
    #[arg(long = "weight", value_name = "INDEX=VALUE")]
    weights: Vec<String>,
    /// Set a station arm
    #[arg(long = "location", value_name = "INDEX=VALUE")]
    locations: Vec<String>,
    #[arg(long)]
    cg_min: Option<String>,
    #[arg(long)]
    cg_max: Option<String>,
    #[arg(long)]
    gross: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => WnbConfig::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WnbConfig::load().unwrap_or_else(|e| {
            warn!(error = %e, "using default configuration");
            WnbConfig::default()
        }),
    };

    let mut store = ProfileStore::open(config.profile_store_path()?).context("opening profile store")?;
    let startup = startup_profile(&cli.command, &config);

    match cli.command {
        Command::List => {
            println!("Built-in profiles:");
            for profile in catalog::builtin_profiles() {
                println!("  {}", profile.display_name());
            }
            if store.is_empty() {
                println!("No saved profiles ({})", store.path().display());
            } else {
                println!("Saved profiles:");
                for name in store.names() {
                    println!("  {}", name);
                }
            }
        }
        Command::Compute { load, json, check } => {
            let (screen, _) = open_screen(&load, &store, startup, GpsSource::None)?;
            let result = screen.form().calculate().context("cannot compute loading")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                TerminalDisplay::new().render(&mut io::stdout(), &screen, None, None)?;
            }

            if check && result.overall_status != Status::Ok {
                std::process::exit(2);
            }
        }
        Command::Graph { load } => {
            let (screen, _) = open_screen(&load, &store, startup, GpsSource::None)?;
            println!("{}", screen.graph_json()?);
        }
        Command::Save { load, make, model, reg } => {
            let (mut screen, _) = open_screen(&load, &store, startup, GpsSource::None)?;
            let (default_make, default_model, default_reg) = screen.save_defaults();
            let key = screen.save(
                &make.unwrap_or(default_make),
                &model.unwrap_or(default_model),
                &reg.unwrap_or(default_reg),
                &mut store,
            )?;
            println!("Saved {}", key);
        }
        Command::Delete { name } => {
            let removed = store.remove(&name)?;
            println!("Deleted {}", removed.display_name());
        }
        Command::Export { load, output } => {
            let (screen, _) = open_screen(&load, &store, startup, GpsSource::None)?;
            std::fs::write(&output, screen.extract().to_json()?)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Wrote {}", output.display());
        }
        Command::Watch { load, interval, no_gps } => {
            let source = if no_gps { GpsSource::None } else { config.gps_source()? };
            let (mut screen, contents) = open_screen(&load, &store, startup, source)?;
            let interval = Duration::from_secs(interval.unwrap_or_else(|| config.refresh_interval_secs()).max(1));

            TerminalDisplay::new()
                .run(&mut screen, load.file.as_deref().zip(contents), interval)
                .await?;
        }
    }

    Ok(())
}

/// Profile the watch view falls back to when none is given
fn startup_profile<'a>(command: &Command, config: &'a WnbConfig) -> Option<&'a str> {
    match command {
        Command::Watch { .. } => config.startup_profile.as_deref(),
        _ => None,
    }
}

/// Build the screen, pick the requested profile and apply command-line edits.
/// Also returns the profile file contents when the screen was loaded from one.
fn open_screen(
    load: &LoadArgs,
    store: &ProfileStore,
    startup: Option<&str>,
    source: GpsSource,
) -> anyhow::Result<(WnbScreen, Option<String>)> {
    let mut screen = WnbScreen::new(GpsKeepAlive::new(source));
    screen.add_profiles(store.profiles().cloned());

    let mut file_contents = None;
    if let Some(path) = &load.file {
        let contents = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let profile = AircraftProfile::from_json(&contents).with_context(|| format!("parsing {}", path.display()))?;
        screen.populate(&profile);
        file_contents = Some(contents);
    } else if let Some(name) = load.profile.as_deref().or(startup) {
        screen.load_named(name)?;
    }

    for arg in &load.stations {
        let (index, value) = split_index(arg)?;
        let mut parts = value.rsplitn(3, ':');
        let (weight, arm, description) = match (parts.next(), parts.next(), parts.next()) {
            (Some(weight), Some(arm), Some(description)) => (weight, arm, description),
            _ => bail!("station '{}' must look like INDEX=DESC:ARM:WEIGHT", arg),
        };
        screen.set_station(index, description, arm, weight)?;
    }
    for arg in &load.weights {
        let (index, value) = split_index(arg)?;
        screen.set_weight(index, value)?;
    }
    for arg in &load.locations {
        let (index, value) = split_index(arg)?;
        screen.set_location(index, value)?;
    }

    let overrides = [
        (EnvelopeField::CgMin, &load.cg_min),
        (EnvelopeField::CgMax, &load.cg_max),
        (EnvelopeField::Gross, &load.gross),
    ];
    for (field, value) in overrides {
        if let Some(text) = value {
            screen.set_envelope(field, text);
        }
    }

    Ok((screen, file_contents))
}

fn split_index(arg: &str) -> anyhow::Result<(usize, &str)> {
    let (index, value) = arg
        .split_once('=')
        .with_context(|| format!("'{}' must look like INDEX=VALUE", arg))?;
    let index = index
        .trim()
        .parse::<usize>()
        .with_context(|| format!("bad station index in '{}'", arg))?;
    Ok((index, value))
}
