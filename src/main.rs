//! Cowork Quest headless runner
//!
//! Runs a level on the fixed timestep with the autopilot at the controls and
//! logs what happened. Useful for balance passes and for checking that a
//! level file loads and plays.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use cowork_quest::Session;
use cowork_quest::Tuning;
use cowork_quest::autopilot::Autopilot;
use cowork_quest::sim::character::{ALL_CHARACTERS, CharacterId};
use cowork_quest::sim::event::Host;
use cowork_quest::sim::level::{Level, builtin_level, builtin_levels};
use cowork_quest::sim::state::EntityId;

#[derive(Parser)]
#[command(version, about = "Headless runner for the Cowork Quest simulation")]
struct Cli {
    /// Built-in level to play
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Play a level descriptor from disk instead of a built-in level
    #[arg(long, value_name = "PATH")]
    level_file: Option<PathBuf>,

    /// Playable character
    #[arg(long, default_value = "entrepreneur")]
    character: CharacterId,

    /// Maximum ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// RNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Tuning overrides (JSON)
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    snapshot: bool,

    /// List built-in levels and characters, then exit
    #[arg(long)]
    list: bool,
}

/// Tallies host callbacks for the end-of-run summary
#[derive(Default)]
struct RunLog {
    defeated: u32,
    hurt: u32,
    power_ups: u32,
    boss_defeated: bool,
    outcome: Option<String>,
}

impl Host for RunLog {
    fn on_level_complete(&mut self, progression: u32, currency: u32) {
        self.outcome = Some(format!(
            "level complete (progression {progression}, currency {currency})"
        ));
    }

    fn on_game_over(&mut self) {
        self.outcome = Some("game over".to_string());
    }

    fn on_boss_defeated(&mut self) {
        self.boss_defeated = true;
    }

    fn on_enemy_defeated(&mut self, _id: EntityId) {
        self.defeated += 1;
    }

    fn on_player_hurt(&mut self, health: u32) {
        self.hurt += 1;
        log::debug!("Player hurt, health {health}");
    }

    fn on_power_up(&mut self, _id: EntityId, _kind: cowork_quest::sim::state::PowerUpKind) {
        self.power_ups += 1;
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if cli.list {
        for level in builtin_levels()? {
            println!("{:>2}  {:<28} {}", level.id, level.name, level.description);
        }
        let names: Vec<_> = ALL_CHARACTERS.iter().map(CharacterId::as_str).collect();
        println!("characters: {}", names.join(", "));
        return Ok(());
    }

    let level = match &cli.level_file {
        Some(path) => Level::load(path)?,
        None => builtin_level(cli.level)?,
    };
    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let mut session = Session::new(level, cli.character, tuning, cli.seed);
    let mut pilot = Autopilot::default();
    let mut host = RunLog::default();

    while session.world().time_ticks < cli.ticks && !session.is_finished() {
        let keys = pilot.keys(session.snapshot());
        session.step(keys, &mut host);
    }

    let world = session.world();
    log::info!(
        "Finished after {} ticks: {} | x={:.0} health={} defeated={} hurt={} power-ups={} boss={}",
        world.time_ticks,
        host.outcome.as_deref().unwrap_or("time limit reached"),
        world.player.pos.x,
        world.player.health,
        host.defeated,
        host.hurt,
        host.power_ups,
        host.boss_defeated,
    );

    if cli.snapshot {
        println!("{}", session.snapshot().to_json()?);
    }
    Ok(())
}
