use anyhow::{Context, Result};
use clap::Parser;
use contagion_core::metrics::DEFAULT_FILTER;
use contagion_core::tuning::parse_assignment;
use contagion_lib::app::{App, ShutdownManager};
use contagion_lib::model::config::AppConfig;
use contagion_lib::model::history::OutbreakEvent;
use contagion_lib::model::state::PopulationStats;
use contagion_lib::model::tuning::Tunables;
use contagion_lib::model::world::World;
use contagion_lib::ui::tui::Tui;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the simulation in
    #[arg(short, long, value_enum, default_value = "standard")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Seed for a reproducible run (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override a live parameter, e.g. `--set chance=0.3`. Repeatable.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<String>,

    /// Ticks to simulate in headless mode
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Log a progress line every N ticks in headless mode (0 disables)
    #[arg(long, default_value_t = 600)]
    report_every: u64,

    /// Print every non-routine outbreak event as a JSON line (headless mode)
    #[arg(long)]
    events: bool,

    /// Append logs to this file while the terminal UI is running
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Mode {
    Standard,
    Headless,
}

/// Final report printed by a headless run.
#[derive(Serialize)]
struct RunSummary {
    seed: Option<u64>,
    ticks: u64,
    eradicated_at: Option<u64>,
    stats: PopulationStats,
    tunables: Tunables,
}

fn build_config(args: &Args) -> Result<AppConfig> {
    let mut config = AppConfig::load_or_default(&args.config);
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }
    for assignment in &args.overrides {
        let (parameter, value) = parse_assignment(assignment)
            .with_context(|| format!("Bad --set argument `{assignment}`"))?;
        config.disease.set_parameter(parameter, value)?;
    }
    config.validate()?;
    Ok(config)
}

fn run_headless(args: &Args, config: AppConfig) -> Result<()> {
    let seed = config.world.seed;
    let mut world = World::new(config)?;

    let shutdown = ShutdownManager::new();
    shutdown.listen_for_ctrl_c();

    tracing::info!(
        population = world.population(),
        ticks = args.ticks,
        ?seed,
        "Running headless simulation"
    );

    let mut eradicated_at = None;
    while world.tick < args.ticks && !shutdown.is_shutdown_requested() {
        let events = world.update();
        for event in &events {
            if let OutbreakEvent::Eradicated { tick, .. } = event {
                eradicated_at = Some(*tick);
            }
            if args.events && !event.is_routine() {
                println!("{}", event.to_json()?);
            }
        }

        let stats = world.population_stats();
        if args.report_every > 0 && world.tick % args.report_every == 0 {
            tracing::info!(
                tick = world.tick,
                healthy = stats.healthy,
                infected = stats.infected,
                recovered = stats.recovered,
                "Progress"
            );
        }
        if eradicated_at.is_some() {
            break;
        }
    }

    let summary = RunSummary {
        seed,
        ticks: world.tick,
        eradicated_at,
        stats: world.population_stats().clone(),
        tunables: world.tunables,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn run_interactive(config: AppConfig, config_path: &Path) -> Result<()> {
    let mut tui = Tui::new()?;
    tui.init()?;

    let res = match App::new(config, config_path) {
        Ok(mut app) => app.run(&mut tui).await,
        Err(e) => Err(e),
    };

    tui.exit()?;

    if let Err(e) = res {
        eprintln!("Application error: {e}");
    } else {
        println!("Exited clean.");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.mode {
        Mode::Headless => {
            contagion_core::init_logging(DEFAULT_FILTER);
            let config = build_config(&args)?;
            run_headless(&args, config)?;
        }
        Mode::Standard => {
            if let Some(path) = &args.log_file {
                contagion_core::init_file_logging(path, DEFAULT_FILTER)
                    .with_context(|| format!("Cannot open log file {}", path.display()))?;
            }
            let config = build_config(&args)?;
            run_interactive(config, &args.config).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_arguments_parse() {
        let args = Args::try_parse_from([
            "contagion",
            "--mode",
            "headless",
            "--seed",
            "9",
            "--set",
            "chance=0.25",
            "--set",
            "speed=2",
            "--ticks",
            "120",
        ])
        .unwrap();
        assert!(matches!(args.mode, Mode::Headless));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.overrides.len(), 2);
        assert_eq!(args.ticks, 120);
        assert_eq!(args.report_every, 600);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Args::try_parse_from(["contagion", "--mode", "screensaver"]).is_err());
    }
}
