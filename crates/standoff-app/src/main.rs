use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use standoff_app::config::{load_catalog, load_match_config};
use standoff_app::demo::{run_headless, scripted_inputs};
use standoff_app::game_loop::{GameLoop, TICK_DURATION};
use standoff_app::state::LoopCommand;
use standoff_app::Result;
use standoff_core::enums::{MatchPhase, PlayerSlot};
use standoff_sim::{MatchConfig, MatchEngine};

/// Run a scripted STANDOFF bout without a renderer.
#[derive(Debug, Parser)]
#[command(name = "standoff", version)]
struct Args {
    /// RON match configuration. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of extra RON archetype definitions.
    #[arg(long)]
    archetypes: Option<PathBuf>,

    /// Fight ticks to play before stopping.
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Run on the 60Hz game loop thread instead of as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Print the final snapshot as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "standoff failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_match_config(path)?,
        None => MatchConfig::default(),
    };
    let catalog = load_catalog(args.archetypes.as_deref())?;
    let mut engine = MatchEngine::new(config, &catalog)?;

    if !args.realtime {
        run_headless(&mut engine, args.ticks);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        return Ok(());
    }

    let game_loop = GameLoop::spawn(engine)?;
    let mut fight_tick = 0;
    while fight_tick < args.ticks {
        std::thread::sleep(TICK_DURATION);
        let Some(snapshot) = game_loop.output().snapshot() else {
            continue;
        };
        match snapshot.phase {
            MatchPhase::Finished => break,
            MatchPhase::Fighting => {
                for (slot, intent) in PlayerSlot::ALL.into_iter().zip(scripted_inputs(fight_tick)) {
                    game_loop.send(LoopCommand::Input { slot, intent })?;
                }
                fight_tick += 1;
            }
            MatchPhase::Intro | MatchPhase::Paused => {}
        }
    }
    // Let the final poses play.
    std::thread::sleep(Duration::from_millis(500));

    let stats = game_loop.output().stats();
    for slot in PlayerSlot::ALL {
        let player = stats.player(slot);
        info!(?slot, hits = player.hits, points = player.points, won = player.won, "bout summary");
    }
    if args.json {
        if let Some(snapshot) = game_loop.output().snapshot() {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }
    game_loop.shutdown();
    Ok(())
}
