use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ecosim_app::config::AppConfig;
use ecosim_app::control;
use ecosim_app::state::AppState;
use ecosim_core::commands::SimCommand;

/// How often the driver polls the latest snapshot.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    info!(
        seed = config.sim.seed,
        width = config.sim.arena.width,
        height = config.sim.arena.height,
        run_secs = config.run_secs,
        "ecosim starting"
    );

    let state = AppState::new();
    control::start_simulation(&state, config.sim.clone())?;

    for request in &config.initial_population {
        control::send_command(
            &state,
            SimCommand::Spawn {
                kind: request.kind,
                count: request.count,
            },
        )?;
    }

    let result = drive(&state, &config);
    control::stop_simulation(&state)?;
    result
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Poll snapshots until the run time elapses (or, with `run_secs == 0`,
/// until nothing is left alive), reporting stats along the way.
fn drive(state: &AppState, config: &AppConfig) -> anyhow::Result<()> {
    let started = Instant::now();
    let run_for = Duration::from_secs_f64(config.run_secs);
    let mut next_report = config.report_interval_ticks;

    loop {
        std::thread::sleep(POLL_INTERVAL);
        let Some(snapshot) = control::get_snapshot(state)? else {
            continue;
        };

        if config.report_interval_ticks > 0 && snapshot.time.tick >= next_report {
            let stats = &snapshot.stats;
            info!(
                tick = snapshot.time.tick,
                plants = stats.plants,
                herbivores = stats.herbivores,
                carnivores = stats.carnivores,
                omnivores = stats.omnivores,
                average_energy = stats.average_energy,
                links = snapshot.links.len(),
                "population"
            );
            next_report = snapshot.time.tick + config.report_interval_ticks;
        }

        if config.run_secs > 0.0 {
            if started.elapsed() >= run_for {
                info!(
                    tick = snapshot.time.tick,
                    population = snapshot.stats.total,
                    "run time elapsed"
                );
                return Ok(());
            }
        } else if snapshot.time.tick > 0 && snapshot.stats.total == 0 {
            warn!(tick = snapshot.time.tick, "ecosystem died out");
            return Ok(());
        }
    }
}
