//! PNG output of a rendered [`LabelGrid`].
//!
//! Feature-gated behind `png` (default on). The pixel conversion itself lives
//! in [`crate::pixel`].

use gravity_basin_core::error::BasinError;
use gravity_basin_core::palette::LabelPalette;
use gravity_basin_core::sink::LabelGrid;
use std::path::{Path, PathBuf};

use crate::pixel::grid_to_rgba;

/// `dir/attractors_<epoch_secs>.png`.
pub fn timestamped_path(dir: &Path, epoch_secs: u64) -> PathBuf {
    dir.join(format!("attractors_{epoch_secs}.png"))
}

/// Writes the grid as a PNG, mapping labels through `palette`.
///
/// Creates the parent directory if needed. Returns
/// `BasinError::InvalidDimensions` if the grid does not fit `u32`, or
/// `BasinError::Io` on any write failure.
pub fn write_png(grid: &LabelGrid, palette: &LabelPalette, path: &Path) -> Result<(), BasinError> {
    let w = u32::try_from(grid.width()).map_err(|_| BasinError::InvalidDimensions)?;
    let h = u32::try_from(grid.height()).map_err(|_| BasinError::InvalidDimensions)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| BasinError::Io(format!("{}: {e}", parent.display())))?;
    }
    let img = image::RgbaImage::from_raw(w, h, grid_to_rgba(grid, palette))
        .ok_or_else(|| BasinError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| BasinError::Io(format!("{}: {e}", path.display())))
}
