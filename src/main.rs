use anyhow::{Context, Result};
use log::info;
use projective_cube::io::{export_cube_net_png, load_move_script};
use projective_cube::moves::format_script;
use projective_cube::{EngineConfig, Puzzle, K_STAR};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "projective_cube", about = "Antipodal twisty-cube engine")]
struct Opt {
    /// Cube size N
    #[structopt(short, long, default_value = "3")]
    size: usize,

    /// Number of random slice turns to scramble with
    #[structopt(long, default_value = "0")]
    scramble: usize,

    /// Seed for the scramble
    #[structopt(long)]
    seed: Option<u64>,

    /// Move script applied after the scramble
    #[structopt(short, long, parse(from_os_str))]
    moves: Option<PathBuf>,

    /// Undo this many commands at the end
    #[structopt(long, default_value = "0")]
    undo: usize,

    /// Write the unfolded cube to this PNG
    #[structopt(long, parse(from_os_str))]
    png: Option<PathBuf>,

    /// Half-width of the critical regime band
    #[structopt(long, default_value = "0.05")]
    critical_band: f64,

    /// Commands kept for undo
    #[structopt(long, default_value = "256")]
    history: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let config = EngineConfig::new(opt.critical_band, opt.history)?;
    let mut puzzle = Puzzle::new(opt.size, config)?;

    if opt.scramble > 0 {
        let mut rng = match opt.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let applied = puzzle.scramble(&mut rng, opt.scramble)?;
        info!("scramble: {}", format_script(&applied));
    }

    if let Some(path) = &opt.moves {
        let commands = load_move_script(path, opt.size)?;
        puzzle.apply_all(&commands).context("Applying move script")?;
        info!("applied {} commands from {}", commands.len(), path.display());
    }

    for _ in 0..opt.undo {
        if puzzle.undo()?.is_none() {
            break;
        }
    }

    puzzle.check_consistency()?;
    let report = puzzle.report()?;

    println!("size:            {}", puzzle.size());
    println!("pairs:           {}/{} preserved", report.preserved, report.total);
    println!("integrity:       {:.4} (K* = {:.5})", report.integrity, K_STAR);
    println!("regime:          {}", report.regime);
    println!("commutator norm: {}", report.commutator_norm);
    println!("parity:          {}", report.parity);
    println!("solved:          {}", report.solved);

    if let Some(path) = &opt.png {
        export_cube_net_png(path, puzzle.cube())?;
        info!("wrote {}", path.display());
    }

    Ok(())
}
