//! Core types shared by the shrine crates.
//!
//! Everything here lives in pixel space: terminal cells are mapped onto a
//! virtual raster through [`CellMetrics`], so the animation can reason in
//! pixels while the renderer works in cells.

/// A position in pixel space. `y` grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Construct a new [`Point`].
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Size of the drawable area in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Construct a new [`Viewport`].
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Viewport covering `columns` x `rows` terminal cells.
    pub fn from_cells(columns: u16, rows: u16, metrics: CellMetrics) -> Self {
        Self {
            width: columns as f32 * metrics.width_px as f32,
            height: rows as f32 * metrics.height_px as f32,
        }
    }

    /// A viewport with no area has nothing to draw on.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Pixel size of a single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub width_px: u16,
    pub height_px: u16,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width_px: 8,
            height_px: 16,
        }
    }
}

impl CellMetrics {
    /// Construct a new [`CellMetrics`].
    pub const fn new(width_px: u16, height_px: u16) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    /// Pixel position of the centre of the cell at `(column, row)`.
    pub fn cell_center(&self, column: u16, row: u16) -> Point {
        let w = self.width_px as f32;
        let h = self.height_px as f32;
        Point::new(column as f32 * w + w / 2.0, row as f32 * h + h / 2.0)
    }

    /// The cell containing `point`, or `None` when it lies left of or above
    /// the origin.
    pub fn cell_at(&self, point: Point) -> Option<(u16, u16)> {
        if point.x < 0.0 || point.y < 0.0 || self.width_px == 0 || self.height_px == 0 {
            return None;
        }
        let column = (point.x / self.width_px as f32).floor();
        let row = (point.y / self.height_px as f32).floor();
        if column > u16::MAX as f32 || row > u16::MAX as f32 {
            return None;
        }
        Some((column as u16, row as u16))
    }
}

/// Last known pointer position.
///
/// The resting value is an off-canvas sentinel, far enough outside the
/// viewport that nothing visible is ever within repulsion range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    position: Point,
}

impl PointerState {
    /// Position used while the pointer is away.
    pub const SENTINEL: Point = Point::new(-100.0, -100.0);

    /// Current pointer position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Record a pointer move.
    pub fn move_to(&mut self, position: Point) {
        self.position = position;
    }

    /// Reset to the sentinel.
    pub fn leave(&mut self) {
        self.position = Self::SENTINEL;
    }

    /// Whether the pointer is somewhere other than the sentinel.
    pub fn is_present(&self) -> bool {
        self.position != Self::SENTINEL
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Self::SENTINEL,
        }
    }
}
