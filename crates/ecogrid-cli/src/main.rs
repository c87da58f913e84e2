//! Console runner for the Ecogrid predator/prey simulation.

mod render;
mod telemetry;
mod trigger;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ecogrid_core::{RandomSelector, RunConfig};
use ecogrid_world::{Renderer, RunTotals, World};
use render::{JsonRenderer, TextRenderer};
use std::io;
use std::path::PathBuf;
use tracing::{error, info};
use trigger::{AdvanceTrigger, EnterKey, Unattended};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "ecogrid",
    version,
    about = "Step through a predator/prey ecosystem on a bounded grid"
)]
struct Cli {
    /// JSON run configuration; command-line flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of grid rows.
    #[arg(long)]
    rows: Option<usize>,

    /// Number of grid columns.
    #[arg(long)]
    cols: Option<usize>,

    /// Predators placed at start.
    #[arg(long)]
    predators: Option<usize>,

    /// Prey placed at start.
    #[arg(long)]
    prey: Option<usize>,

    /// Random seed; drawn from entropy when omitted.
    #[arg(long, env = "ECOGRID_SEED")]
    seed: Option<u64>,

    /// Stop after this many ticks.
    #[arg(long)]
    ticks: Option<u64>,

    /// Advance without waiting for ENTER.
    #[arg(long)]
    unattended: bool,

    /// Output format for each frame.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

impl Cli {
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => RunConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.world.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.world.cols = cols;
        }
        if let Some(predators) = self.predators {
            config.world.initial_predators = predators;
        }
        if let Some(prey) = self.prey {
            config.world.initial_prey = prey;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.ticks.is_some() {
            config.max_ticks = self.ticks;
        }

        config.validate().context("invalid run configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init_telemetry(cli.format == Format::Json)?;

    let config = cli.run_config()?;

    // The only place the random source is seeded
    let selector = match config.seed {
        Some(seed) => RandomSelector::seeded(seed),
        None => RandomSelector::from_entropy(),
    };

    info!(
        rows = config.world.rows,
        cols = config.world.cols,
        predators = config.world.initial_predators,
        prey = config.world.initial_prey,
        seed = ?config.seed,
        max_ticks = ?config.max_ticks,
        "Starting Ecogrid"
    );

    let mut world = World::new(&config.world, config.organisms.clone(), selector)?;

    let stdout = io::stdout().lock();
    let mut renderer: Box<dyn Renderer> = match cli.format {
        Format::Text => Box::new(TextRenderer::new(stdout, !cli.unattended)),
        Format::Json => Box::new(JsonRenderer::new(stdout)),
    };

    let mut trigger: Box<dyn AdvanceTrigger> = if cli.unattended {
        Box::new(Unattended::new(config.max_ticks))
    } else {
        Box::new(EnterKey::new(io::stdin().lock()))
    };

    let totals = match run(&mut world, renderer.as_mut(), trigger.as_mut(), config.max_ticks) {
        Ok(totals) => totals,
        Err(e) => {
            let invariant_violation = e
                .downcast_ref::<ecogrid_core::Error>()
                .is_some_and(ecogrid_core::Error::is_invariant_violation);
            error!(
                tick = world.tick(),
                invariant_violation,
                "Simulation aborted: {:#}",
                e
            );
            return Err(e);
        }
    };

    info!(
        event = "run_summary",
        ticks = totals.ticks,
        predators = world.predators(),
        prey = world.prey(),
        predators_born = totals.predators_born,
        prey_born = totals.prey_born,
        prey_eaten = totals.prey_eaten,
        predators_starved = totals.predators_starved,
        "Run finished"
    );

    Ok(())
}

/// Render, wait, step; repeat until the trigger says stop or the tick limit
/// is hit. Unattended runs also end once both populations are gone.
fn run(
    world: &mut World,
    renderer: &mut dyn Renderer,
    trigger: &mut dyn AdvanceTrigger,
    max_ticks: Option<u64>,
) -> Result<RunTotals> {
    let mut totals = RunTotals::default();
    renderer.render(&world.view())?;

    while max_ticks.map_or(true, |limit| world.tick() < limit) {
        if !trigger.wait().context("failed to read advance signal")? {
            break;
        }

        let report = world.step()?;
        totals.record(&report);
        renderer.render(&world.view())?;

        if trigger.stop_when_extinct() && world.is_extinct() {
            info!(tick = report.tick, "Both populations died out");
            break;
        }
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecogrid_core::{OrganismConfig, WorldConfig};

    fn seeded_world(config: &WorldConfig, seed: u64) -> World {
        World::new(config, OrganismConfig::default(), RandomSelector::seeded(seed)).unwrap()
    }

    fn empty_world() -> WorldConfig {
        WorldConfig {
            rows: 3,
            cols: 3,
            initial_predators: 0,
            initial_prey: 0,
        }
    }

    struct Frames(Vec<u64>);

    impl Renderer for Frames {
        fn render(&mut self, view: &ecogrid_world::WorldView) -> ecogrid_core::Result<()> {
            self.0.push(view.tick);
            Ok(())
        }
    }

    #[test]
    fn test_run_renders_initial_frame_and_every_tick() {
        let config = WorldConfig {
            rows: 6,
            cols: 6,
            initial_predators: 2,
            initial_prey: 10,
        };
        let mut world = seeded_world(&config, 3);
        let mut frames = Frames(Vec::new());
        let mut trigger = Unattended::new(None);

        let totals = run(&mut world, &mut frames, &mut trigger, Some(4)).unwrap();
        assert_eq!(totals.ticks, world.tick());
        assert_eq!(frames.0[0], 0);
        assert_eq!(frames.0.len() as u64, world.tick() + 1);
        assert!(world.tick() <= 4);
    }

    #[test]
    fn test_run_stops_when_input_ends() {
        let mut world = seeded_world(&WorldConfig::default(), 3);
        let mut frames = Frames(Vec::new());
        let mut trigger = EnterKey::new(io::Cursor::new("\n\n"));

        let totals = run(&mut world, &mut frames, &mut trigger, None).unwrap();
        assert_eq!(totals.ticks, 2);
        assert_eq!(frames.0, vec![0, 1, 2]);
    }

    #[test]
    fn test_unattended_run_stops_once_extinct() {
        let mut world = seeded_world(&empty_world(), 3);
        let mut frames = Frames(Vec::new());
        let mut trigger = Unattended::new(None);

        let totals = run(&mut world, &mut frames, &mut trigger, None).unwrap();
        assert_eq!(totals.ticks, 1);
        assert_eq!(frames.0, vec![0, 1]);
    }

    #[test]
    fn test_interactive_run_continues_after_extinction() {
        let mut world = seeded_world(&empty_world(), 3);
        let mut frames = Frames(Vec::new());
        let mut trigger = EnterKey::new(io::Cursor::new("\n\n\n"));

        let totals = run(&mut world, &mut frames, &mut trigger, None).unwrap();
        assert!(world.is_extinct());
        assert_eq!(totals.ticks, 3);
        assert_eq!(frames.0, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "ecogrid",
            "--rows",
            "5",
            "--cols",
            "7",
            "--prey",
            "10",
            "--seed",
            "11",
            "--unattended",
        ]);
        let config = cli.run_config().unwrap();
        assert_eq!(config.world.rows, 5);
        assert_eq!(config.world.cols, 7);
        assert_eq!(config.world.initial_prey, 10);
        assert_eq!(config.world.initial_predators, 5);
        assert_eq!(config.seed, Some(11));
    }

    #[test]
    fn test_cli_rejects_overpopulated_grid() {
        let cli = Cli::parse_from([
            "ecogrid",
            "--rows",
            "5",
            "--cols",
            "5",
            "--predators",
            "10",
            "--prey",
            "20",
        ]);
        assert!(cli.run_config().is_err());
    }

    #[test]
    fn test_cli_rejects_overflowing_population() {
        let cli = Cli::parse_from([
            "ecogrid",
            "--predators",
            "18446744073709551615",
            "--prey",
            "1",
        ]);
        assert!(cli.run_config().is_err());
    }
}
