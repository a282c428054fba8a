use anyhow::{Context, Result};
use projective_cube::io::{export_cube_net_png, load_move_script};
use projective_cube::{EngineConfig, Puzzle};

fn main() -> Result<()> {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let path = args.next().context("Requires path")?;
    let size = match args.next() {
        Some(s) => s.parse().context("Size must be an integer")?,
        None => 3,
    };

    let commands = load_move_script(&path, size)?;
    let mut puzzle = Puzzle::new(size, EngineConfig::default())?;
    puzzle.apply_all(&commands)?;

    let mut out_path = path;
    out_path.push_str(".png");
    export_cube_net_png(out_path, puzzle.cube())
}
