//! False-color heatmap rendering and JPEG output.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

use crate::colormap::{hot, normalize};
use crate::config::HeatmapStyle;
use crate::error::{Result, UniformityError};
use crate::font::{draw_text, draw_text_centered, text_height, text_width, CHAR_H};
use crate::Measurement;

pub const TITLE: &str = "Brightness Heatmap with Uniformity Markers";
pub const LEGEND_CAPTION: &str = "Brightness";

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);
const LABEL: Rgb<u8> = Rgb([0, 128, 0]);

/// Glyph scale for the per-cell labels; the default text size of 8 draws the
/// font at its native 5x7. A glyph is never taller than one cell of height
/// `cell_h`.
pub fn label_scale(text_size: u32, cell_h: u32) -> u32 {
    (text_size / 8).clamp(1, (cell_h / CHAR_H).max(1))
}

/// Pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl Rect {
    fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

#[derive(Debug)]
struct Layout {
    pad: u32,
    title_scale: u32,
    legend_scale: u32,
    plot: Rect,
    bar: Rect,
}

// --- layout ---

fn layout(width: u32, height: u32) -> Layout {
    let pad = (width.min(height) / 60).max(1);

    let title_scale = (height / 200)
        .min(width / (text_width(TITLE, 1) + 2))
        .max(1);
    let legend_scale = (height / 400).max(1);

    let top = pad * 2 + text_height(title_scale);
    let bottom = height.saturating_sub(pad * 2 + text_height(legend_scale));

    let bar_w = (width / 48).max(2);
    let tick_w = text_width("255", legend_scale);
    let legend_w = (bar_w + pad + tick_w).max(text_width(LEGEND_CAPTION, legend_scale));

    let legend_x0 = width.saturating_sub(pad + legend_w);
    let plot = Rect {
        x0: pad,
        y0: top,
        x1: legend_x0.saturating_sub(pad * 2),
        y1: bottom,
    };
    let bar = Rect {
        x0: legend_x0,
        y0: top,
        x1: legend_x0 + bar_w,
        y1: bottom,
    };

    Layout {
        pad,
        title_scale,
        legend_scale,
        plot,
        bar,
    }
}

fn fill(img: &mut RgbImage, r: Rect, color: Rgb<u8>) {
    let x1 = r.x1.min(img.width());
    let y1 = r.y1.min(img.height());
    for y in r.y0..y1 {
        for x in r.x0..x1 {
            img.put_pixel(x, y, color);
        }
    }
}

// --- rendering ---

fn draw_cells(img: &mut RgbImage, m: &Measurement, plot: Rect, text_size: u32) {
    let cols = m.brightness.cols();
    let rows = m.brightness.rows();
    let (lo, hi) = m.brightness.min_max();
    let (pw, ph) = (plot.width() as u64, plot.height() as u64);
    let scale = label_scale(text_size, (ph / rows as u64) as u32);

    let edge = |origin: u32, extent: u64, i: u32, n: u32| origin + (extent * i as u64 / n as u64) as u32;

    for cy in 0..rows {
        let y0 = edge(plot.y0, ph, cy, rows);
        let y1 = edge(plot.y0, ph, cy + 1, rows);
        for cx in 0..cols {
            let x0 = edge(plot.x0, pw, cx, cols);
            let x1 = edge(plot.x0, pw, cx + 1, cols);
            let cell = Rect { x0, y0, x1, y1 };
            let color = hot(normalize(m.brightness.get(cx, cy), lo, hi));
            fill(img, cell, color);

            let label = format!("{}%", m.percent.get(cx, cy));
            draw_text_centered(
                img,
                (x0 as i64 + x1 as i64) / 2,
                (y0 as i64 + y1 as i64) / 2,
                &label,
                scale,
                LABEL,
            );
        }
    }
}

fn draw_legend(img: &mut RgbImage, m: &Measurement, layout: &Layout) {
    let bar = layout.bar;
    if bar.is_empty() {
        return;
    }
    let (lo, hi) = m.brightness.min_max();
    let span = (bar.height() - 1).max(1) as f64;

    // top of the bar is the maximum
    for y in bar.y0..bar.y1 {
        let t = 1.0 - (y - bar.y0) as f64 / span;
        let value = lo as f64 + t * (hi as f64 - lo as f64);
        let color = hot(normalize(value.round() as u8, lo, hi));
        fill(img, Rect { y0: y, y1: y + 1, ..bar }, color);
    }

    let s = layout.legend_scale;
    let tick_x = (bar.x1 + layout.pad) as i64;
    let th = text_height(s) as i64;
    draw_text(img, tick_x, bar.y0 as i64, &hi.to_string(), s, INK);
    if hi > lo {
        let mid = ((lo as u32 + hi as u32) / 2).to_string();
        let mid_y = (bar.y0 as i64 + bar.y1 as i64) / 2 - th / 2;
        draw_text(img, tick_x, mid_y, &mid, s, INK);
        draw_text(img, tick_x, bar.y1 as i64 - th, &lo.to_string(), s, INK);
    }

    draw_text(
        img,
        bar.x0 as i64,
        (bar.y1 + layout.pad) as i64,
        LEGEND_CAPTION,
        s,
        INK,
    );
}

/// Render the heatmap for `m` at the resolution in `style`.
pub fn render_heatmap(m: &Measurement, style: &HeatmapStyle) -> Result<RgbImage> {
    let (w, h) = (style.resolution.width, style.resolution.height);
    if w == 0 || h == 0 {
        return Err(UniformityError::Render(format!(
            "output resolution must be positive, got {w}x{h}"
        )));
    }

    let layout = layout(w, h);
    let mut img = RgbImage::from_pixel(w, h, BACKGROUND);

    draw_text_centered(
        &mut img,
        (w / 2) as i64,
        (layout.pad + text_height(layout.title_scale) / 2) as i64,
        TITLE,
        layout.title_scale,
        INK,
    );

    if layout.plot.is_empty() {
        tracing::warn!("{}x{} is too small to draw the grid", w, h);
    } else {
        draw_cells(&mut img, m, layout.plot, style.text_size);
    }
    draw_legend(&mut img, m, &layout);

    Ok(img)
}

pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut out), quality.clamp(1, 100));
    img.write_with_encoder(encoder)
        .map_err(|e| UniformityError::Render(e.to_string()))?;
    Ok(out)
}

/// Render, encode and write the heatmap JPEG to `path`. The image is fully
/// encoded before the file is touched, so a render failure never leaves a
/// truncated file behind.
pub fn save_heatmap(path: &Path, m: &Measurement, style: &HeatmapStyle) -> Result<()> {
    let img = render_heatmap(m, style)?;
    let jpeg = encode_jpeg(&img, style.quality)?;
    std::fs::write(path, jpeg).map_err(|source| UniformityError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Heatmap written to {} ({})", path.display(), style.resolution);
    Ok(())
}
