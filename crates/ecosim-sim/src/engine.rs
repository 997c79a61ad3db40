//! Simulation engine: the core of the ecosystem.
//!
//! `Simulation` owns the hecs ECS world (the organism registry), the spatial
//! grid, the link set and the cycle counter. It applies queued commands,
//! runs all systems once per `tick`, and produces `SimSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use ecosim_core::commands::SimCommand;
use ecosim_core::config::{validate_arena, SimConfig};
use ecosim_core::constants::{MAX_TIME_FACTOR, NOMINAL_FRAME_MS};
use ecosim_core::enums::{OrganismKind, SimPhase};
use ecosim_core::error::{validate_spawn_count, ConfigError, ValidationError};
use ecosim_core::events::SimEvent;
use ecosim_core::state::{LinkView, SimSnapshot};
use ecosim_core::types::{Arena, OrganismId, Position, SimTime, Velocity};

use crate::spatial::SpatialGrid;
use crate::systems;
use crate::world_setup::{self, IdAllocator};

/// Normalize a frame's elapsed wall time to nominal ticks, capped at 2x.
/// Negative or non-finite input yields 0.
pub fn time_factor(elapsed_ms: f64) -> f64 {
    if !elapsed_ms.is_finite() {
        return 0.0;
    }
    (elapsed_ms / NOMINAL_FRAME_MS).clamp(0.0, MAX_TIME_FACTOR)
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct Simulation {
    world: World,
    grid: SpatialGrid,
    links: Vec<LinkView>,
    time: SimTime,
    phase: SimPhase,
    config: SimConfig,
    rng: ChaCha8Rng,
    ids: IdAllocator,
    command_queue: VecDeque<SimCommand>,
    despawn_buffer: Vec<Entity>,
    /// Events of the most recent tick.
    events: Vec<SimEvent>,
}

impl Simulation {
    /// Create a new, empty, running simulation.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            world: World::new(),
            grid: SpatialGrid::new(config.grid_cell_size),
            links: Vec::new(),
            time: SimTime::default(),
            phase: SimPhase::Running,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            ids: IdAllocator::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            config,
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply queued commands, advance one tick unless paused, and return the
    /// resulting snapshot. `elapsed_ms` is the wall time since the last call.
    pub fn tick(&mut self, elapsed_ms: f64) -> SimSnapshot {
        // Events belong to one tick; a paused tick reports none.
        self.events.clear();
        self.process_commands();

        if self.phase == SimPhase::Running {
            let factor = time_factor(elapsed_ms);
            self.run_systems(factor);
            self.time.advance(factor);
        }

        self.snapshot()
    }

    /// Read-only view of the current state, including the events of the
    /// last `tick` call.
    pub fn snapshot(&self) -> SimSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.config.arena,
            self.config.energy.start_energy,
            &self.links,
            self.events.clone(),
        )
    }

    /// Spawn up to 100 organisms of `kind` at random positions.
    /// Returns how many were created, which can be fewer than requested
    /// when the population cap is reached.
    pub fn spawn(&mut self, kind: OrganismKind, count: i64) -> Result<usize, ValidationError> {
        let requested = validate_spawn_count(count)?;
        let allowed = match self.config.max_population {
            0 => requested,
            cap => requested.min(cap.saturating_sub(self.population())),
        };

        for _ in 0..allowed {
            world_setup::spawn_random(
                &mut self.world,
                &mut self.rng,
                &mut self.ids,
                &self.config.arena,
                kind,
                self.config.energy.start_energy,
            );
        }

        if allowed < requested {
            debug!(%kind, requested, allowed, "population cap limited spawn");
        }
        Ok(allowed)
    }

    /// Spawn one organism at an explicit position with explicit velocity and
    /// energy. The position is clamped into the arena; plants ignore velocity.
    pub fn spawn_at(
        &mut self,
        kind: OrganismKind,
        pos: Position,
        velocity: Velocity,
        energy: f64,
    ) -> OrganismId {
        let (_, id) = world_setup::spawn_at(
            &mut self.world,
            &mut self.ids,
            &self.config.arena,
            kind,
            pos,
            velocity,
            energy,
        );
        id
    }

    /// Clear every organism, the grid, all links and the cycle counter,
    /// then resume running. Organism ids keep counting up.
    pub fn reset(&mut self) {
        self.world.clear();
        self.grid.clear();
        self.links.clear();
        self.events.clear();
        self.time = SimTime::default();
        self.phase = SimPhase::Running;
        info!("simulation reset");
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.phase = if paused {
            SimPhase::Paused
        } else {
            SimPhase::Running
        };
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SimPhase::Paused
    }

    /// Adopt new arena bounds: re-clamp every organism and rebuild links.
    pub fn on_resize(&mut self, width: f64, height: f64) -> Result<(), ConfigError> {
        validate_arena(width, height)?;
        self.config.arena = Arena::new(width, height);
        systems::movement::clamp_all(&mut self.world, &self.config.arena);
        self.rebuild_links();
        info!(width, height, "arena resized");
        Ok(())
    }

    /// Get the current run state.
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn arena(&self) -> Arena {
        self.config.arena
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of alive organisms.
    pub fn population(&self) -> usize {
        self.world.len() as usize
    }

    /// Links built at the end of the last tick (or resize).
    pub fn links(&self) -> &[LinkView] {
        &self.links
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the ECS world, for tests that stage exact states.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::Spawn { kind, count } => {
                if let Err(err) = self.spawn(kind, count) {
                    warn!(%kind, %err, "spawn rejected");
                }
            }
            SimCommand::Reset => self.reset(),
            SimCommand::Pause => self.set_paused(true),
            SimCommand::Resume => self.set_paused(false),
            SimCommand::TogglePause => self.set_paused(!self.is_paused()),
            SimCommand::Resize { width, height } => {
                if let Err(err) = self.on_resize(width, height) {
                    warn!(%err, "resize rejected");
                }
            }
        }
    }

    fn rebuild_links(&mut self) {
        self.grid.rebuild(&self.world);
        systems::links::run(&self.world, &self.grid, &mut self.links);
    }

    /// Run all systems in order.
    fn run_systems(&mut self, time_factor: f64) {
        let energy = self.config.energy;

        // 1. Spatial index over the pre-movement positions
        self.grid.rebuild(&self.world);
        // 2. Plant growth
        systems::growth::run(&mut self.world, energy.plant_gain, time_factor);
        // 3. Movement, bouncing, metabolic decay, digestion countdown
        systems::movement::run(
            &mut self.world,
            &mut self.rng,
            &self.config.arena,
            &energy,
            time_factor,
        );
        // 4. Feeding
        let meals = systems::feeding::run(&mut self.world, &self.grid, &energy, &mut self.events);
        // 5. Reproduction
        let births = systems::reproduction::run(
            &mut self.world,
            &mut self.rng,
            &mut self.ids,
            &self.config.arena,
            energy.reproduce_cost,
            self.config.max_population,
            &mut self.events,
        );
        // 6. Death sweep
        let deaths =
            systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, &mut self.events);
        // 7. Links over the survivors
        self.rebuild_links();

        debug!(
            tick = self.time.tick + 1,
            time_factor,
            meals,
            births,
            deaths,
            population = self.population(),
            links = self.links.len(),
            "tick complete"
        );
    }
}
