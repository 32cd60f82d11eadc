use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dissipation_core::{init_logging, master, AppConfig, Comparison, Metrics};
use dissipation_data::Mode;
use dissipation_io::{export, persistence, RunMetadata};
use dissipation_lib::runner;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Overrides the engine seed from the config file
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs the three-mode comparison and exports one row per tick
    Run {
        #[arg(short, long, default_value_t = 1000)]
        ticks: u64,
        #[arg(short, long)]
        out: PathBuf,
        /// Starts from a saved master-state checkpoint instead of generating one
        #[arg(long)]
        master: Option<PathBuf>,
        /// Also writes the final state of every engine as JSON
        #[arg(long)]
        frames: Option<PathBuf>,
    },
    /// Runs the 25-point phase-diagram sweep
    Sweep {
        #[arg(short, long)]
        out: PathBuf,
        /// Compressed JSON archive of the results
        #[arg(long)]
        results: Option<PathBuf>,
        /// Stops the sweep after this many ticks
        #[arg(long)]
        stop_after: Option<u64>,
    },
    /// Writes the master state for the configured seed as a checkpoint
    Snapshot {
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(&args.config)
        .with_context(|| format!("loading config from {}", args.config))?;
    if let Some(seed) = args.seed {
        config.engine.seed = seed;
    }
    tracing::info!(
        seed = config.engine.seed,
        fingerprint = %config.fingerprint(),
        "Configuration loaded"
    );

    let metrics = Metrics::new();
    match args.command {
        Command::Run {
            ticks,
            out,
            master: checkpoint,
            frames,
        } => {
            let mut comparison = match checkpoint {
                Some(path) => {
                    let state = persistence::load_master_state(&path)?;
                    anyhow::ensure!(
                        state.grid_size == config.engine.grid_size,
                        "Checkpoint grid size {} does not match config grid size {}",
                        state.grid_size,
                        config.engine.grid_size
                    );
                    Comparison::from_master(config.engine.clone(), state)
                }
                None => Comparison::new(config.engine.clone()),
            };
            let records = runner::run_comparison(&mut comparison, ticks, &metrics);
            export::write_comparison_file(&out, &RunMetadata::new(&config), &records)?;

            if let Some(path) = frames {
                let snapshots: Vec<_> = Mode::ALL
                    .iter()
                    .map(|&mode| comparison.snapshot(mode))
                    .collect();
                let json = serde_json::to_string(&snapshots)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?;
            }

            if let Some(last) = records.last() {
                for mode in Mode::ALL {
                    let stats = last.stats(mode);
                    tracing::info!(
                        mode = %mode,
                        total_heat = stats.total_heat,
                        agents = stats.agent_count,
                        energy_error = stats.energy_error,
                        "Final state"
                    );
                }
            }
        }
        Command::Sweep {
            out,
            results,
            stop_after,
        } => {
            let outcome = runner::run_sweep(&config, stop_after, &metrics);
            tracing::info!(
                phase = ?outcome.phase,
                points = outcome.results.len(),
                "Sweep ended"
            );
            export::write_sweep_file(&out, &RunMetadata::new(&config), &outcome.results)?;
            if let Some(path) = results {
                persistence::save_results(&outcome.results, &path)?;
            }
        }
        Command::Snapshot { out } => {
            let state = master::generate_from_config(&config.engine);
            persistence::save_master_state(&state, &out)?;
            tracing::info!(
                path = %out.display(),
                agents = state.agents.len(),
                energy = state.total_energy(),
                "Master state saved"
            );
        }
    }

    tracing::info!(
        ticks = metrics.tick_count(),
        violations = metrics.violations(),
        elapsed_ms = metrics.elapsed().as_millis() as u64,
        "Done"
    );
    Ok(())
}
