//! Simulation constants and tuning parameters.

// --- Timing ---

/// Frame duration (ms) that corresponds to a time factor of 1.0.
pub const NOMINAL_FRAME_MS: f64 = 16.0;

/// Upper bound on the time factor, caps catch-up after a stall.
pub const MAX_TIME_FACTOR: f64 = 2.0;

// --- Arena ---

pub const DEFAULT_ARENA_WIDTH: f64 = 800.0;
pub const DEFAULT_ARENA_HEIGHT: f64 = 600.0;

// --- Spatial grid ---

/// Edge length of a spatial grid cell.
/// Must be >= every query radius so the 3x3 block scan is exhaustive.
pub const GRID_CELL_SIZE: f64 = 100.0;

// --- Energy (defaults for `EnergyParams`) ---

/// Energy plants gain per nominal tick.
pub const PLANT_GAIN: f64 = 0.1;
/// Energy from eating a plant.
pub const HERBIVORE_GAIN: f64 = 20.0;
/// Energy from eating a herbivore or omnivore.
pub const CARNIVORE_GAIN: f64 = 25.0;
/// Energy an omnivore gets from a plant.
pub const OMNIVORE_PLANT_GAIN: f64 = 10.0;
/// Energy an omnivore gets from a herbivore.
pub const OMNIVORE_MEAT_GAIN: f64 = 20.0;
/// Per-tick cost of moving (non-plants only).
pub const MOVE_COST: f64 = 0.1;
/// Per-tick metabolic upkeep (every organism).
pub const BASE_COST: f64 = 0.05;
/// Energy threshold and cost for reproduction; also the offspring's energy.
pub const REPRODUCE_COST: f64 = 30.0;
/// Energy of a freshly spawned organism.
pub const START_ENERGY: f64 = 50.0;

// --- Feeding ---

/// Organisms feed only below `START_ENERGY * HUNGER_RATIO`.
pub const HUNGER_RATIO: f64 = 0.75;
/// Feeding reach added to the eater's size.
pub const FEEDING_REACH: f64 = 5.0;
/// Ticks an organism must wait after feeding.
pub const DIGESTION_TICKS: f64 = 10.0;
/// Prey loses this multiple of what the predator gains.
pub const PREDATION_LOSS_FACTOR: f64 = 2.0;

// --- Movement ---

/// Per-nominal-tick probability of picking a new random heading.
pub const DIRECTION_CHANGE_CHANCE: f64 = 0.02;

// --- Reproduction ---

/// Per-tick probability that an eligible organism reproduces.
pub const REPRODUCE_CHANCE: f64 = 0.01;
/// Max offspring offset from the parent on each axis.
pub const OFFSPRING_JITTER: f64 = 10.0;

// --- Population ---

/// Max organisms created by a single spawn request.
pub const MAX_SPAWN_PER_REQUEST: usize = 100;
/// Default global population cap.
pub const DEFAULT_MAX_POPULATION: usize = 2000;

// --- Links ---

/// Organisms closer than this are linked for display.
pub const LINK_RADIUS: f64 = 100.0;

// --- Display hints ---

/// Lower bound of `OrganismView::energy_ratio`.
pub const MIN_ENERGY_RATIO: f64 = 0.3;
/// Organisms above `START_ENERGY * HIGH_ENERGY_RATIO` are flagged high-energy.
pub const HIGH_ENERGY_RATIO: f64 = 1.5;
