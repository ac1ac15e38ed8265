//! Area-averaging resampler.
//!
//! Destination cell `i` along an axis of source length `L` and grid length `N`
//! covers the source interval `[i*L/N, (i+1)*L/N)`. Every source pixel that
//! overlaps the interval contributes in proportion to the overlap, so grid
//! sizes that do not divide the crop evenly still give exact coverage-weighted
//! means instead of block approximations.

use image::GrayImage;

use crate::error::{Result, UniformityError};
use crate::grid::Grid;
use crate::region::Region;

/// Per destination index: `(source index, weight)` pairs. Weights of one
/// destination index sum to 1.
fn axis_weights(src_len: u32, dst_len: u32) -> Vec<Vec<(u32, f64)>> {
    let src = src_len as f64;
    let dst = dst_len as f64;
    let scale = src / dst;

    (0..dst_len)
        .map(|i| {
            let start = i as f64 * src / dst;
            let end = (i + 1) as f64 * src / dst;
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(src_len);

            (first..last)
                .filter_map(|s| {
                    let lo = start.max(s as f64);
                    let hi = end.min((s + 1) as f64);
                    let overlap = hi - lo;
                    (overlap > 0.0).then(|| (s, overlap / scale))
                })
                .collect()
        })
        .collect()
}

/// Unrounded coverage-weighted means of `region` in `gray`, row-major.
pub fn area_means(
    gray: &GrayImage,
    region: Region,
    grid_x: u32,
    grid_y: u32,
) -> Result<Vec<f64>> {
    if grid_x == 0 || grid_y == 0 {
        return Err(UniformityError::InvalidGridSize { grid_x, grid_y });
    }
    let (w, h) = gray.dimensions();
    if !region.fits_within(w, h) {
        return Err(UniformityError::InvalidRegion {
            region,
            width: w,
            height: h,
        });
    }

    let wx = axis_weights(region.width, grid_x);
    let wy = axis_weights(region.height, grid_y);

    let mut means = Vec::with_capacity(grid_x as usize * grid_y as usize);
    for row in &wy {
        for col in &wx {
            let mut acc = 0.0f64;
            for &(sy, fy) in row {
                let mut line = 0.0f64;
                for &(sx, fx) in col {
                    let p = gray.get_pixel(region.x + sx, region.y + sy).0[0];
                    line += p as f64 * fx;
                }
                acc += line * fy;
            }
            means.push(acc);
        }
    }
    Ok(means)
}

/// Crop `gray` to `region` and area-average it into a `grid_x` x `grid_y`
/// brightness grid, rounding each mean to the nearest integer with ties to
/// even.
pub fn resample_area(
    gray: &GrayImage,
    region: Region,
    grid_x: u32,
    grid_y: u32,
) -> Result<Grid<u8>> {
    let means = area_means(gray, region, grid_x, grid_y)?;
    let cells = means
        .into_iter()
        .map(|m| m.round_ties_even().clamp(0.0, 255.0) as u8)
        .collect();

    Grid::from_raw(grid_x, grid_y, cells).ok_or(UniformityError::InvalidGridSize { grid_x, grid_y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use image::Luma;

    fn full(gray: &GrayImage) -> Region {
        Region {
            x: 0,
            y: 0,
            width: gray.width(),
            height: gray.height(),
        }
    }

    #[test]
    fn weights_cover_each_cell_exactly_once() {
        for (src, dst) in [(10, 3), (7, 7), (3, 10), (1000, 80), (601, 45)] {
            let weights = axis_weights(src, dst);
            assert_eq!(weights.len(), dst as usize);
            for cell in &weights {
                let total: f64 = cell.iter().map(|&(_, w)| w).sum();
                assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn fractional_coverage_is_weighted() {
        // 3 source columns into 2 cells: cell 0 covers [0, 1.5), cell 1 [1.5, 3).
        let gray = GrayImage::from_raw(3, 1, vec![0, 90, 180]).unwrap();
        let means = area_means(&gray, full(&gray), 2, 1).unwrap();
        assert_abs_diff_eq!(means[0], (0.0 + 0.5 * 90.0) / 1.5, epsilon = 1e-9);
        assert_abs_diff_eq!(means[1], (0.5 * 90.0 + 180.0) / 1.5, epsilon = 1e-9);
    }

    #[test]
    fn even_blocks_are_plain_means() {
        let gray = GrayImage::from_fn(4, 2, |x, _| Luma([if x < 2 { 100 } else { 200 }]));
        let grid = resample_area(&gray, full(&gray), 2, 1).unwrap();
        assert_eq!(grid.cells(), &[100, 200]);
    }

    #[test]
    fn single_dot_is_averaged_not_sampled() {
        let mut gray = GrayImage::from_pixel(10, 10, Luma([200]));
        gray.put_pixel(3, 3, Luma([0]));
        let grid = resample_area(&gray, full(&gray), 2, 2).unwrap();
        // the dot lands in the top-left 5x5 cell: (24 * 200) / 25 = 192
        assert_eq!(grid.get(0, 0), 192);
        assert_eq!(grid.get(1, 0), 200);
        assert_eq!(grid.get(0, 1), 200);
    }

    #[test]
    fn half_way_means_round_to_even() {
        let gray = GrayImage::from_raw(4, 1, vec![100, 101, 101, 102]).unwrap();
        let grid = resample_area(&gray, full(&gray), 2, 1).unwrap();
        // 100.5 -> 100, 101.5 -> 102
        assert_eq!(grid.cells(), &[100, 102]);
    }

    #[test]
    fn identity_size_keeps_pixels() {
        let gray = GrayImage::from_fn(7, 5, |x, y| Luma([(x * 30 + y * 7) as u8]));
        let region = Region {
            x: 1,
            y: 1,
            width: 5,
            height: 3,
        };
        let grid = resample_area(&gray, region, 5, 3).unwrap();
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(grid.get(x, y), gray.get_pixel(x + 1, y + 1).0[0]);
            }
        }
    }

    #[test]
    fn upsampling_repeats_source_pixels() {
        let gray = GrayImage::from_raw(2, 1, vec![10, 250]).unwrap();
        let grid = resample_area(&gray, full(&gray), 4, 2).unwrap();
        assert_eq!(grid.cells(), &[10, 10, 250, 250, 10, 10, 250, 250]);
    }

    #[test]
    fn rejects_zero_grid_and_bad_region() {
        let gray = GrayImage::new(4, 4);
        assert!(matches!(
            resample_area(&gray, full(&gray), 0, 3),
            Err(UniformityError::InvalidGridSize { grid_x: 0, grid_y: 3 })
        ));
        let outside = Region {
            x: 2,
            y: 2,
            width: 3,
            height: 1,
        };
        assert!(matches!(
            resample_area(&gray, outside, 2, 2),
            Err(UniformityError::InvalidRegion { .. })
        ));
    }
}
