//! Host-side session driver
//!
//! Owns one running level: builds the world from its descriptor, latches
//! held keys into per-tick intents, steps the simulation on a fixed
//! timestep, forwards events to the host and publishes a snapshot after
//! every completed tick.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::character::CharacterId;
use crate::sim::event::{GameEvent, Host};
use crate::sim::input::{InputLatch, KeyState};
use crate::sim::level::Level;
use crate::sim::snapshot::Snapshot;
use crate::sim::state::{SessionPhase, World};
use crate::sim::tick::tick;
use crate::tuning::Tuning;

pub struct Session {
    level: Level,
    character: CharacterId,
    tuning: Tuning,
    seed: u64,
    world: World,
    latch: InputLatch,
    accumulator: f32,
    snapshot: Snapshot,
    restarts: u32,
}

impl Session {
    pub fn new(level: Level, character: CharacterId, tuning: Tuning, seed: u64) -> Self {
        let world = World::new(&level, character, tuning.clone(), seed);
        let snapshot = Snapshot::capture(&world);
        Self {
            level,
            character,
            tuning,
            seed,
            world,
            latch: InputLatch::default(),
            accumulator: 0.0,
            snapshot,
            restarts: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// State as of the last completed tick
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn phase(&self) -> SessionPhase {
        self.world.phase
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// True once the level has been completed or lost
    pub fn is_finished(&self) -> bool {
        matches!(
            self.world.phase,
            SessionPhase::LevelComplete | SessionPhase::GameOver
        )
    }

    /// Run exactly one tick with the given held keys
    pub fn step(&mut self, keys: KeyState, host: &mut impl Host) -> Vec<GameEvent> {
        let input = self.latch.latch(keys);
        if self.is_finished() {
            return Vec::new();
        }

        let events = tick(&mut self.world, &input);
        for event in &events {
            event.dispatch(host);
        }
        self.snapshot = Snapshot::capture(&self.world);
        events
    }

    /// Feed frame time; runs as many fixed ticks as have accumulated.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, frame_dt: f32, keys: KeyState, host: &mut impl Host) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(keys, host);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop backlog we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Discard every entity and start the level again from its descriptor
    pub fn restart(&mut self) {
        self.restarts += 1;
        log::info!(
            "Restarting level {} (attempt {})",
            self.level.id,
            self.restarts + 1
        );
        self.world = World::new(&self.level, self.character, self.tuning.clone(), self.seed);
        self.latch.reset();
        self.accumulator = 0.0;
        self.snapshot = Snapshot::capture(&self.world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::builtin_level;

    #[derive(Default)]
    struct Counter {
        game_over: u32,
        pauses: u32,
    }

    impl Host for Counter {
        fn on_game_over(&mut self) {
            self.game_over += 1;
        }
        fn on_pause(&mut self) {
            self.pauses += 1;
        }
    }

    fn session() -> Session {
        let level = builtin_level(1).expect("level 1");
        Session::new(level, CharacterId::Entrepreneur, Tuning::default(), 9)
    }

    #[test]
    fn test_snapshot_published_after_tick() {
        let mut session = session();
        assert_eq!(session.snapshot().time_ticks, 0);
        session.step(KeyState::default(), &mut ());
        assert_eq!(session.snapshot().time_ticks, 1);
        assert!((session.snapshot().player.pos.y - 400.6).abs() < 1e-4);
    }

    #[test]
    fn test_held_pause_toggles_once() {
        let mut session = session();
        let mut host = Counter::default();
        let pause = KeyState {
            pause: true,
            ..Default::default()
        };
        for _ in 0..5 {
            session.step(pause, &mut host);
        }
        assert_eq!(host.pauses, 1);
        assert_eq!(session.phase(), SessionPhase::Paused);
    }

    #[test]
    fn test_advance_runs_fixed_substeps() {
        let mut session = session();
        assert_eq!(session.advance(SIM_DT * 0.5, KeyState::default(), &mut ()), 0);
        assert_eq!(session.advance(SIM_DT * 0.6, KeyState::default(), &mut ()), 1);
        // A long stall is capped
        assert_eq!(session.advance(1.0, KeyState::default(), &mut ()), MAX_SUBSTEPS);
        assert_eq!(session.world().time_ticks, 1 + MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_finished_session_ignores_ticks_until_restart() {
        let mut session = session();
        let mut host = Counter::default();
        session.world.player.pos.y = 700.0;
        session.step(KeyState::default(), &mut host);
        assert_eq!(host.game_over, 1);
        assert!(session.is_finished());

        let ticks = session.world().time_ticks;
        session.step(KeyState::default(), &mut host);
        assert_eq!(session.world().time_ticks, ticks);
        assert_eq!(host.game_over, 1);

        session.restart();
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.world().time_ticks, 0);
        assert_eq!(session.world().player.health, 3);
        assert!(session.world().enemies.iter().all(|e| e.alive));
        assert_eq!(session.restarts(), 1);
    }
}
