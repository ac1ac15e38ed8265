//! Display region detection.
//!
//! The photo is reduced to brightness, thresholded, and split into
//! 8-connected bright components with a two-pass union-find labelling. The
//! display is the component with the largest pixel area; when several share
//! that area, the one whose first pixel comes earliest in raster order
//! (top row first, then leftmost) wins.

use image::{GrayImage, Luma, RgbImage};

use crate::error::{Result, UniformityError};

/// Axis-aligned rectangle in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True when the region is non-empty and lies inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }
}

/// One 8-connected bright component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    /// Number of pixels in the component.
    pub area: u64,
    pub bounds: Region,
    /// Raster index (`y * width + x`) of the component's first pixel.
    pub first_pixel: usize,
}

// --- brightness ---

/// BT.601 luma with the same 14-bit fixed-point rounding OpenCV uses for its
/// RGB to gray conversion: `Y = 0.299 R + 0.587 G + 0.114 B`.
pub fn luma_bt601(r: u8, g: u8, b: u8) -> u8 {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    ((r as u32 * R + g as u32 * G + b as u32 * B + (1 << 13)) >> 14) as u8
}

pub fn to_brightness(photo: &RgbImage) -> GrayImage {
    let (w, h) = photo.dimensions();
    let mut gray = GrayImage::new(w, h);
    for (src, dst) in photo.pixels().zip(gray.pixels_mut()) {
        let [r, g, b] = src.0;
        *dst = Luma([luma_bt601(r, g, b)]);
    }
    gray
}

// --- union-find ---

struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // label 0 is background
        Self { parent: vec![0] }
    }

    fn make_label(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    /// Merge two sets; the smaller root label survives.
    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi as usize] = lo;
        }
    }
}

// --- connected components ---

struct ComponentAcc {
    area: u64,
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    first_pixel: usize,
}

impl ComponentAcc {
    fn new(x: u32, y: u32, idx: usize) -> Self {
        Self {
            area: 1,
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
            first_pixel: idx,
        }
    }

    fn add(&mut self, x: u32, y: u32) {
        self.area += 1;
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn finish(&self) -> Component {
        Component {
            area: self.area,
            bounds: Region {
                x: self.min_x,
                y: self.min_y,
                width: self.max_x - self.min_x + 1,
                height: self.max_y - self.min_y + 1,
            },
            first_pixel: self.first_pixel,
        }
    }
}

/// All 8-connected components of pixels with brightness `>= threshold`,
/// ordered by the raster position of their first pixel.
pub fn bright_components(gray: &GrayImage, threshold: u8) -> Vec<Component> {
    let (w, h) = gray.dimensions();
    let data = gray.as_raw();
    let width = w as usize;
    let mut labels = vec![0u32; data.len()];
    let mut uf = UnionFind::new();

    // First pass: provisional labels from the already-visited neighbours
    // (W, NW, N, NE) and equivalences between them.
    for y in 0..h as usize {
        for x in 0..width {
            let idx = y * width + x;
            if data[idx] < threshold {
                continue;
            }

            let mut neighbours = [0u32; 4];
            if x > 0 {
                neighbours[0] = labels[idx - 1];
            }
            if y > 0 {
                let up = idx - width;
                if x > 0 {
                    neighbours[1] = labels[up - 1];
                }
                neighbours[2] = labels[up];
                if x + 1 < width {
                    neighbours[3] = labels[up + 1];
                }
            }

            let mut label = 0u32;
            for &n in neighbours.iter().filter(|&&n| n != 0) {
                if label == 0 {
                    label = n;
                } else if n != label {
                    uf.union(label, n);
                }
            }
            if label == 0 {
                label = uf.make_label();
            }
            labels[idx] = label;
        }
    }

    // Second pass: resolve each pixel to its root and accumulate stats.
    // Raster order guarantees a root's first visit is its first pixel.
    let mut accs: Vec<Option<ComponentAcc>> = Vec::new();
    accs.resize_with(uf.parent.len(), || None);
    let mut order = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let idx = y as usize * width + x as usize;
            if labels[idx] == 0 {
                continue;
            }
            let root = uf.find(labels[idx]) as usize;
            if let Some(acc) = accs[root].as_mut() {
                acc.add(x, y);
            } else {
                accs[root] = Some(ComponentAcc::new(x, y, idx));
                order.push(root);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|root| accs[root].as_ref().map(ComponentAcc::finish))
        .collect()
}

/// Bounding rectangle of the largest bright component.
pub fn detect_display(gray: &GrayImage, threshold: u8) -> Result<Region> {
    let components = bright_components(gray, threshold);
    tracing::debug!("{} bright components at threshold {}", components.len(), threshold);

    // `components` is in raster order, so keeping the first strict maximum
    // implements the earliest-first tie-break.
    let mut best: Option<&Component> = None;
    for c in &components {
        if best.map_or(true, |b| c.area > b.area) {
            best = Some(c);
        }
    }

    let largest = best.ok_or(UniformityError::NoDisplayDetected { threshold })?;
    tracing::info!(
        "Display region: {}x{} at ({}, {}), {} bright pixels",
        largest.bounds.width,
        largest.bounds.height,
        largest.bounds.x,
        largest.bounds.y,
        largest.area
    );
    Ok(largest.bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn mask(rows: &[&str]) -> GrayImage {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        GrayImage::from_fn(w, h, |x, y| {
            let on = rows[y as usize].as_bytes()[x as usize] == b'#';
            Luma([if on { 255 } else { 0 }])
        })
    }

    #[test]
    fn luma_matches_bt601_weights() {
        assert_eq!(luma_bt601(0, 0, 0), 0);
        assert_eq!(luma_bt601(255, 255, 255), 255);
        assert_eq!(luma_bt601(255, 0, 0), 76);
        assert_eq!(luma_bt601(0, 255, 0), 150);
        assert_eq!(luma_bt601(0, 0, 255), 29);
        assert_eq!(luma_bt601(180, 180, 180), 180);
    }

    #[test]
    fn diagonal_pixels_are_connected() {
        let gray = mask(&[
            "#...", //
            ".#..", //
            "..#.", //
            "...#",
        ]);
        let comps = bright_components(&gray, 200);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].area, 4);
        assert_eq!(
            comps[0].bounds,
            Region {
                x: 0,
                y: 0,
                width: 4,
                height: 4
            }
        );
    }

    #[test]
    fn u_shape_merges_into_one_component() {
        let gray = mask(&[
            "#...#", //
            "#...#", //
            "#####",
        ]);
        let comps = bright_components(&gray, 200);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].area, 9);
    }

    #[test]
    fn anti_diagonal_via_north_east_neighbour() {
        let gray = mask(&[
            "...#", //
            "..#.", //
            ".#..",
        ]);
        let comps = bright_components(&gray, 200);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].bounds.x, 1);
        assert_eq!(comps[0].bounds.width, 3);
    }

    #[test]
    fn picks_largest_component() {
        let gray = mask(&[
            "##......", //
            "##..####", //
            "....####", //
            "....####",
        ]);
        let region = detect_display(&gray, 200).unwrap();
        assert_eq!(
            region,
            Region {
                x: 4,
                y: 1,
                width: 4,
                height: 3
            }
        );
    }

    #[test]
    fn equal_areas_prefer_first_in_raster_order() {
        let gray = mask(&[
            "....##", //
            "....##", //
            "......", //
            "##....", //
            "##....",
        ]);
        let region = detect_display(&gray, 200).unwrap();
        assert_eq!(region.x, 4);
        assert_eq!(region.y, 0);
    }

    #[test]
    fn threshold_is_inclusive() {
        let gray = GrayImage::from_pixel(3, 3, Luma([200]));
        let region = detect_display(&gray, 200).unwrap();
        assert_eq!(region.area(), 9);

        let dim = GrayImage::from_pixel(3, 3, Luma([199]));
        assert!(matches!(
            detect_display(&dim, 200),
            Err(UniformityError::NoDisplayDetected { threshold: 200 })
        ));
    }

    #[test]
    fn dark_image_has_no_display() {
        let photo = RgbImage::from_pixel(16, 9, Rgb([180, 180, 180]));
        let gray = to_brightness(&photo);
        assert!(matches!(
            detect_display(&gray, 200),
            Err(UniformityError::NoDisplayDetected { .. })
        ));
    }

    #[test]
    fn region_fit_checks() {
        let r = Region {
            x: 2,
            y: 3,
            width: 4,
            height: 5,
        };
        assert!(r.fits_within(6, 8));
        assert!(!r.fits_within(5, 8));
        assert!(!Region { width: 0, ..r }.fits_within(100, 100));
    }
}
