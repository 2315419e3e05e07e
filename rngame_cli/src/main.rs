use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use rand::{SeedableRng, rngs::StdRng};
use rngame_core::{
    animation::ThreadDelay,
    console::{Console, ConsoleError},
    preferences::PreferencesStore,
    session::{Session, SessionConfig},
    setup::acquire_preferences,
};

#[derive(Parser, Debug)]
#[command(version, about = "Explore a grid of hidden enemies and loot chests", long_about = None)]
struct Args {
    /// Directory holding saved preference files
    #[arg(short, long, value_name = "DIR", default_value = "preferences")]
    preferences_dir: PathBuf,

    /// Seed for a reproducible map
    #[arg(short, long)]
    seed: Option<u64>,

    /// Milliseconds per walking animation frame
    #[arg(long, value_name = "MS", default_value_t = 300)]
    step_delay_ms: u64,

    /// Walking animation frames per move
    #[arg(long, default_value_t = 3)]
    steps: usize,

    #[arg(long, default_value_t = 50)]
    player_health: i32,

    #[arg(long, default_value_t = 2)]
    player_speed: i32,

    /// Verbose logging to stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let store = PreferencesStore::open(&args.preferences_dir).with_context(|| {
        format!(
            "creating preferences directory {}",
            args.preferences_dir.display()
        )
    })?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    let Some(preferences) = closed_is_none(acquire_preferences(&mut console, &store))? else {
        return Ok(());
    };

    let rng = match args.seed {
        Some(seed) => {
            info!("using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };
    let config = SessionConfig {
        player_health: args.player_health,
        player_speed: args.player_speed,
        steps: args.steps,
        step_delay: Duration::from_millis(args.step_delay_ms),
        ..SessionConfig::default()
    };

    let mut session =
        Session::new(preferences, config, rng, ThreadDelay).context("setting up the map")?;
    session.run(&mut console)?;
    Ok(())
}

/// Treats closed stdin during setup as a normal exit.
fn closed_is_none<T>(result: Result<T, ConsoleError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ConsoleError::Closed) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Logs go to stderr so they never interleave with the prompts on stdout.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .parse_default_env()
        .init();
}
