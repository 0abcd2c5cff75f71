//! Pure conversion from a [`LabelGrid`] + [`LabelPalette`] to raw pixels.
//!
//! Kept free of the `image` crate so any consumer of raw RGBA bytes can use
//! it without the `png` feature.

use gravity_basin_core::palette::LabelPalette;
use gravity_basin_core::sink::LabelGrid;

/// Maps every label through the palette into an RGBA8 buffer.
///
/// Pixels are row-major, four bytes each (R, G, B, 255); the buffer length
/// is `width * height * 4`.
pub fn grid_to_rgba(grid: &LabelGrid, palette: &LabelPalette) -> Vec<u8> {
    let lut = palette.colors().map(|c| c.to_rgb8());
    grid.labels()
        .iter()
        .flat_map(|label| {
            let [r, g, b] = lut[label.index()];
            [r, g, b, 255u8]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravity_basin_core::classifier::PixelLabel;
    use gravity_basin_core::sink::Sink;

    #[test]
    fn grid_to_rgba_correct_length() {
        let grid = LabelGrid::new(8, 4).unwrap();
        let buf = grid_to_rgba(&grid, &LabelPalette::classic());
        assert_eq!(buf.len(), 8 * 4 * 4);
    }

    #[test]
    fn grid_to_rgba_alpha_always_255() {
        let grid = LabelGrid::new(5, 3).unwrap();
        let buf = grid_to_rgba(&grid, &LabelPalette::ocean());
        assert!(buf.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn grid_to_rgba_places_label_colors_row_major() {
        let mut grid = LabelGrid::new(2, 2).unwrap();
        grid.record(1, 0, PixelLabel::FarAway).unwrap();
        grid.record(0, 1, PixelLabel::StableOrbit).unwrap();
        grid.record(1, 1, PixelLabel::Attractor3).unwrap();
        let buf = grid_to_rgba(&grid, &LabelPalette::classic());
        assert_eq!(&buf[0..4], &[255, 0, 0, 255]);
        assert_eq!(&buf[4..8], &[0, 0, 0, 255]);
        assert_eq!(&buf[8..12], &[255, 255, 255, 255]);
        assert_eq!(&buf[12..16], &[255, 255, 0, 255]);
    }
}
