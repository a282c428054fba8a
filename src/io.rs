use crate::cube::CubeState;
use crate::geometry::Direction;
use crate::moves::{parse_script, Command};
use anyhow::{ensure, Context as AnyhowContext, Result};
use std::path::Path;

/// Face placement on the unfolded net, in face-sized units (column, row).
const NET_LAYOUT: [(Direction, usize, usize); 6] = [
    (Direction::PosY, 1, 0),
    (Direction::NegX, 0, 1),
    (Direction::PosZ, 1, 1),
    (Direction::PosX, 2, 1),
    (Direction::NegZ, 3, 1),
    (Direction::NegY, 1, 2),
];

/// Load a move script for a cube of `size` from a file.
pub fn load_move_script(path: impl AsRef<Path>, size: usize) -> Result<Vec<Command>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Reading move script {}", path.display()))?;
    parse_script(&text, size).with_context(|| format!("Parsing move script {}", path.display()))
}

/// Unfold the cube into a cross-shaped net. Returns (width, RGB data); the
/// image is `4N × 3N` with black where no face lands.
pub fn cube_net_rgb(cube: &CubeState) -> Result<(usize, Vec<u8>)> {
    let n = cube.size();
    let (width, height) = (4 * n, 3 * n);
    let mut buf = vec![0u8; width * height * 3];

    for (direction, face_col, face_row) in NET_LAYOUT {
        let colors = cube.face_colors(direction)?;
        for (i, color) in colors.into_iter().enumerate() {
            let x = face_col * n + i % n;
            let y = face_row * n + i / n;
            let px = (y * width + x) * 3;
            buf[px..px + 3].copy_from_slice(&color.rgb());
        }
    }

    Ok((width, buf))
}

/// Export the cube's unfolded net to a PNG file.
pub fn export_cube_net_png(path: impl AsRef<Path>, cube: &CubeState) -> Result<()> {
    let (width, buf) = cube_net_rgb(cube)?;
    write_png_rgb(path, &buf, width)
}

/// Writes the given RGB data to a PNG file
pub fn write_png_rgb(path: impl AsRef<Path>, buf: &[u8], width: usize) -> Result<()> {
    ensure!(width > 0, "Image width must be nonzero");
    ensure!(
        buf.len() % (width * 3) == 0,
        "Image data must be divisible by width"
    );
    let height = buf.len() / (width * 3);

    let file = std::fs::File::create(path).context("Creating PNG file")?;
    let w = std::io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width as _, height as _);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    writer.write_image_data(buf)?;

    Ok(())
}
