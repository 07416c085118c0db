//! # Force vs. Layers Plot
//!
//! Rasterizes a layer sweep into a PNG chart: layer count on the x axis,
//! force (lbf) on the y axis from zero, with a dashed horizontal reference
//! line for every bone threshold that falls inside the plotted range.
//!
//! The chart carries no text; it is meant to be read next to the matrix
//! table printed for the same sweep.

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgb, RgbImage};
use tracing::info;

use crate::bones::BONE_TABLE;
use crate::calculations::CalculationResult;
use crate::errors::{CalcError, CalcResult};
use crate::file_io::write_atomic;

/// Default output file for plots.
pub const DEFAULT_PLOT_FILE: &str = "force_vs_layers.png";

const WIDTH: u32 = 800;
const HEIGHT: u32 = 500;
const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 30;
const MARGIN_TOP: u32 = 30;
const MARGIN_BOTTOM: u32 = 50;
const Y_GRID_LINES: u32 = 5;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([30, 30, 30]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);
const BONE_LINE: Rgb<u8> = Rgb([200, 90, 90]);
const SERIES: Rgb<u8> = Rgb([31, 119, 180]);

/// Maps data coordinates onto the pixel plot area.
struct PlotArea {
    x_min: f64,
    x_max: f64,
    y_max: f64,
}

impl PlotArea {
    fn left(&self) -> i64 {
        i64::from(MARGIN_LEFT)
    }

    fn right(&self) -> i64 {
        i64::from(WIDTH - MARGIN_RIGHT)
    }

    fn top(&self) -> i64 {
        i64::from(MARGIN_TOP)
    }

    fn bottom(&self) -> i64 {
        i64::from(HEIGHT - MARGIN_BOTTOM)
    }

    fn px(&self, x: f64) -> i64 {
        let span = (self.x_max - self.x_min).max(1.0);
        let frac = (x - self.x_min) / span;
        self.left() + (frac * (self.right() - self.left()) as f64).round() as i64
    }

    fn py(&self, y: f64) -> i64 {
        let frac = y / self.y_max;
        self.bottom() - (frac * (self.bottom() - self.top()) as f64).round() as i64
    }
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && x < i64::from(img.width()) && y < i64::from(img.height()) {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line; `dash` > 0 skips every other run of `dash` pixels.
fn line(img: &mut RgbImage, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: Rgb<u8>, dash: u32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let (mut x, mut y) = (x0, y0);
    let mut err = dx + dy;
    let mut step: u32 = 0;

    loop {
        if dash == 0 || (step / dash) % 2 == 0 {
            put(img, x, y, color);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
        step += 1;
    }
}

fn thick_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    for offset in -1..=1 {
        line(img, (from.0, from.1 + offset), (to.0, to.1 + offset), color, 0);
    }
}

fn marker(img: &mut RgbImage, (cx, cy): (i64, i64), color: Rgb<u8>) {
    for dy in -3..=3 {
        for dx in -3..=3 {
            put(img, cx + dx, cy + dy, color);
        }
    }
}

/// Round up to 1, 2 or 5 times a power of ten.
fn nice_ceiling(value: f64) -> f64 {
    if value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powi(value.log10().floor() as i32);
    let normalized = value / magnitude;
    let step = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

/// Render a layer sweep to an in-memory image.
pub fn render_force_plot(rows: &[CalculationResult]) -> CalcResult<RgbImage> {
    if rows.is_empty() {
        return Err(CalcError::Plot {
            reason: "No data points to plot".to_string(),
        });
    }
    if rows.iter().any(|r| !r.force_lbf.is_finite()) {
        return Err(CalcError::Plot {
            reason: "Force values must be finite".to_string(),
        });
    }

    let x_min = rows.iter().map(|r| r.layers).min().map(f64::from).unwrap_or(1.0);
    let x_max = rows.iter().map(|r| r.layers).max().map(f64::from).unwrap_or(1.0);
    let max_force = rows.iter().map(|r| r.force_lbf).fold(0.0, f64::max);
    let area = PlotArea {
        x_min,
        x_max,
        y_max: nice_ceiling(max_force * 1.05),
    };

    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

    // Grid
    for i in 1..=Y_GRID_LINES {
        let y = area.py(area.y_max * f64::from(i) / f64::from(Y_GRID_LINES));
        line(&mut img, (area.left(), y), (area.right(), y), GRID, 0);
    }
    for r in rows {
        let x = area.px(f64::from(r.layers));
        line(&mut img, (x, area.top()), (x, area.bottom()), GRID, 0);
    }

    for bone in BONE_TABLE.iter().filter(|b| b.threshold_lbf <= area.y_max) {
        let y = area.py(bone.threshold_lbf);
        line(&mut img, (area.left(), y), (area.right(), y), BONE_LINE, 6);
    }

    // Axes
    line(&mut img, (area.left(), area.top()), (area.left(), area.bottom()), AXIS, 0);
    line(&mut img, (area.left(), area.bottom()), (area.right(), area.bottom()), AXIS, 0);

    let points: Vec<(i64, i64)> = rows
        .iter()
        .map(|r| (area.px(f64::from(r.layers)), area.py(r.force_lbf)))
        .collect();
    for pair in points.windows(2) {
        thick_line(&mut img, pair[0], pair[1], SERIES);
    }
    for &p in &points {
        marker(&mut img, p, SERIES);
    }

    Ok(img)
}

/// Encode an image as PNG bytes.
pub fn encode_png(img: &RgbImage) -> CalcResult<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgb8)
        .map_err(|e| CalcError::Plot {
            reason: e.to_string(),
        })?;
    Ok(bytes)
}

/// Render and write a layer sweep plot to `path`.
pub fn save_force_plot(rows: &[CalculationResult], path: &Path) -> CalcResult<()> {
    let img = render_force_plot(rows)?;
    let bytes = encode_png(&img)?;
    write_atomic(path, &bytes)?;
    info!(path = %path.display(), points = rows.len(), "wrote force plot");
    Ok(())
}
