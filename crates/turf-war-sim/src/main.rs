//! Turf War demo - a headless game played out by bot crews.

mod bot;
mod feed;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use turf_war_core::{
    Command, CrewEntry, CrewStats, GameEngine, GameSettings, GameSnapshot, SeededRng,
};

const DEMO_CREWS: [&str; 6] = [
    "BRONX KINGS",
    "QUEENS CREW",
    "BROOKLYN BOMBERS",
    "HARLEM WRITERS",
    "STATEN SPRAYERS",
    "MANHATTAN MOB",
];

/// Play a demo game of Turf War between bot crews
#[derive(Parser, Debug)]
#[command(name = "turf-war-sim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of crews
    #[arg(short, long, default_value = "3", value_parser = clap::value_parser!(u8).range(2..=6))]
    crews: u8,

    /// Settings file (JSON); missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many commands if nobody has won
    #[arg(short, long, default_value = "2000")]
    max_commands: u32,

    /// Print the final board as JSON instead of a scoreboard
    #[arg(long)]
    json: bool,
}

fn load_settings(path: Option<&PathBuf>) -> Result<GameSettings> {
    let Some(path) = path else {
        return Ok(GameSettings::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    GameSettings::from_json(&text).with_context(|| format!("invalid settings in {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = load_settings(args.config.as_ref())?;
    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let roster = CrewEntry::roster(&DEMO_CREWS[..args.crews as usize]);
    let mut engine = GameEngine::create(settings, roster, SeededRng::new(seed))?;
    let mut bot_rng = SeededRng::new(seed.rotate_left(17) ^ 0x5eed);
    tracing::info!(seed, crews = args.crews, "DEMO MODE - take over the city");

    let mut issued = 0;
    while !engine.state().is_terminal() && issued < args.max_commands {
        let holder = engine.state().current_holder();
        let command = bot::choose(engine.state(), holder, &mut bot_rng);
        let events = match engine.apply(command.clone()) {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(?command, %err, "bot command refused, passing");
                engine.apply(Command::pass(holder))?
            }
        };
        issued += 1;

        for event in &events {
            if let Some(line) = feed::describe(engine.state(), event) {
                tracing::info!(turn = engine.state().turn, "{line}");
            }
        }
    }

    let state = engine.state();
    let snapshot = GameSnapshot::capture(state);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    match state.winner() {
        Some(winner) => {
            let stats = CrewStats::for_player(state, winner);
            let name = &snapshot.players[winner as usize].name;
            println!("{name} wins on turn {}", state.turn);
            println!(
                "  cells {}  tags {}  throw-ups {}  burners {}",
                stats.owned_cells, stats.tags, stats.throw_ups, stats.burners
            );
        }
        None => println!("No winner after {issued} commands (turn {})", state.turn),
    }
    println!();
    for summary in snapshot.scoreboard() {
        let busted = if summary.penalty_turns > 0 {
            format!(" (BUSTED {})", summary.penalty_turns)
        } else {
            String::new()
        };
        println!(
            "{:<18} {} {:>3} cells {:>5} pts{}",
            summary.name, summary.color, summary.owned_cells, summary.points, busted
        );
    }
    Ok(())
}
