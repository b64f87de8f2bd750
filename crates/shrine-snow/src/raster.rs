//! The drawing surface the snowfall is painted onto.
//!
//! Painting happens in pixel space; [`SnowRaster`] quantises it onto terminal
//! cells and is then composited over whatever is already in the frame buffer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};
use shrine_core::{CellMetrics, Point};

use crate::chars::flake_glyph;
use crate::color::{Rgba, blend, rgb_of};

/// Something discs can be painted on.
pub trait Surface {
    /// Whether there is anything to draw on at all.
    fn is_empty(&self) -> bool;

    /// Wipe everything painted so far.
    fn clear(&mut self);

    /// Paint a filled disc of `radius` pixels centred on `center`.
    fn fill_disc(&mut self, center: Point, radius: f32, paint: Rgba);
}

/// A flake glyph occupying one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlakeMark {
    pub glyph: char,
    pub radius: f32,
    pub paint: Rgba,
}

/// What has been painted into one terminal cell this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RasterCell {
    /// Translucent wash over the cell background.
    pub tint: Option<Rgba>,
    /// Flake drawn in the cell.
    pub flake: Option<FlakeMark>,
}

impl RasterCell {
    pub fn is_blank(&self) -> bool {
        self.tint.is_none() && self.flake.is_none()
    }
}

/// Cell-resolution raster.
///
/// Discs wider than a cell are painted as area: every cell whose centre lies
/// inside gets tinted. Anything smaller becomes a glyph in the cell holding
/// its centre.
#[derive(Debug, Clone)]
pub struct SnowRaster {
    columns: u16,
    rows: u16,
    metrics: CellMetrics,
    cells: Vec<RasterCell>,
}

impl SnowRaster {
    /// Construct a new [`SnowRaster`].
    pub fn new(columns: u16, rows: u16, metrics: CellMetrics) -> Self {
        Self {
            columns,
            rows,
            metrics,
            cells: vec![RasterCell::default(); columns as usize * rows as usize],
        }
    }

    /// Match a new terminal size. Drops everything painted.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
        self.cells = vec![RasterCell::default(); columns as usize * rows as usize];
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// The painted state of a cell, if it's inside the raster.
    pub fn cell(&self, column: u16, row: u16) -> Option<&RasterCell> {
        self.index(column, row).map(|i| &self.cells[i])
    }

    fn index(&self, column: u16, row: u16) -> Option<usize> {
        (column < self.columns && row < self.rows)
            .then(|| row as usize * self.columns as usize + column as usize)
    }

    fn is_area_disc(&self, radius: f32) -> bool {
        radius * 2.0 > self.metrics.width_px.max(self.metrics.height_px) as f32
    }

    fn tint_disc(&mut self, center: Point, radius: f32, paint: Rgba) {
        let w = self.metrics.width_px as f32;
        let h = self.metrics.height_px as f32;

        let first_col = ((center.x - radius) / w).floor().max(0.0);
        let last_col = ((center.x + radius) / w).floor().min(self.columns as f32 - 1.0);
        let first_row = ((center.y - radius) / h).floor().max(0.0);
        let last_row = ((center.y + radius) / h).floor().min(self.rows as f32 - 1.0);
        if first_col > last_col || first_row > last_row {
            return;
        }

        for row in first_row as u16..=last_row as u16 {
            for column in first_col as u16..=last_col as u16 {
                if self.metrics.cell_center(column, row).distance_to(center) > radius {
                    continue;
                }
                if let Some(i) = self.index(column, row) {
                    let cell = &mut self.cells[i];
                    cell.tint = Some(match cell.tint {
                        Some(below) => paint.over(below),
                        None => paint,
                    });
                }
            }
        }
    }

    fn stamp_flake(&mut self, center: Point, radius: f32, paint: Rgba) {
        let Some((column, row)) = self.metrics.cell_at(center) else {
            return;
        };
        let Some(i) = self.index(column, row) else {
            return;
        };
        let cell = &mut self.cells[i];
        if cell.flake.is_some_and(|existing| existing.radius >= radius) {
            return;
        }
        cell.flake = Some(FlakeMark {
            glyph: flake_glyph(radius),
            radius,
            paint,
        });
    }
}

impl Surface for SnowRaster {
    fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn clear(&mut self) {
        self.cells.fill(RasterCell::default());
    }

    fn fill_disc(&mut self, center: Point, radius: f32, paint: Rgba) {
        if self.is_area_disc(radius) {
            self.tint_disc(center, radius, paint);
        } else {
            self.stamp_flake(center, radius, paint);
        }
    }
}

impl Widget for &SnowRaster {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        for row in 0..self.rows.min(area.height) {
            for column in 0..self.columns.min(area.width) {
                let Some(painted) = self.cell(column, row) else {
                    continue;
                };
                if painted.is_blank() {
                    continue;
                }
                let Some(target) = buf.cell_mut((area.x + column, area.y + row)) else {
                    continue;
                };

                let mut bg = rgb_of(target.bg);
                if let Some(tint) = painted.tint {
                    bg = blend(bg, tint);
                    target.set_bg(Color::Rgb(bg.0, bg.1, bg.2));
                }
                if let Some(flake) = painted.flake {
                    let (r, g, b) = blend(bg, flake.paint);
                    target.set_char(flake.glyph).set_fg(Color::Rgb(r, g, b));
                }
            }
        }
    }
}
