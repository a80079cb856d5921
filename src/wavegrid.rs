use crate::surface::PixelSurface;
use crate::theme::Palette;

/// Side length of one grid cell in surface pixels.
pub const CELL_SIZE: usize = 3;

/// Injection footprint radius in grid cells.
const INJECT_RADIUS: f32 = 2.0;

/// Physics-model engine: a scalar wave-amplitude field on a coarse grid.
///
/// The field is double-buffered as an arena of two flat buffers plus a role
/// flag. `step()` exchanges the roles (never the data) and then runs the
/// leapfrog update, which needs the value from two generations back — that
/// value is exactly what the role swap leaves sitting in the new "current"
/// buffer. Border cells (the outermost ring) are skipped by the update and
/// keep whatever the swap placed there; the resulting edge artifacts are
/// part of the intended look.
pub struct WaveGrid {
    cols: usize,
    rows: usize,
    bufs: [Vec<f32>; 2],
    /// Index of the buffer currently holding the "current" field.
    current: usize,
    pub damping: f32,
}

impl WaveGrid {
    pub fn new(surface_width: usize, surface_height: usize, damping: f32) -> Self {
        let mut grid = Self {
            cols: 0,
            rows: 0,
            bufs: [Vec::new(), Vec::new()],
            current: 0,
            damping,
        };
        grid.allocate(surface_width, surface_height);
        grid
    }

    /// Size the grid for a surface, discarding any prior state. A zero-area
    /// surface yields an empty grid on which every operation is a no-op.
    pub fn allocate(&mut self, surface_width: usize, surface_height: usize) {
        self.cols = surface_width.div_ceil(CELL_SIZE);
        self.rows = surface_height.div_ceil(CELL_SIZE);
        let cells = self.cols * self.rows;
        self.bufs = [vec![0.0; cells], vec![0.0; cells]];
        self.current = 0;
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flat offset for a grid coordinate, or None when out of bounds.
    pub fn index_of(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || col >= self.cols as i32 || row < 0 || row >= self.rows as i32 {
            None
        } else {
            Some(row as usize * self.cols + col as usize)
        }
    }

    /// Amplitude of a cell in the current field; out of bounds reads as 0.
    pub fn amplitude(&self, col: i32, row: i32) -> f32 {
        self.index_of(col, row)
            .map(|idx| self.bufs[self.current][idx])
            .unwrap_or(0.0)
    }

    /// Amplitude of a cell in the previous field; out of bounds reads as 0.
    pub fn previous_amplitude(&self, col: i32, row: i32) -> f32 {
        self.index_of(col, row)
            .map(|idx| self.bufs[1 - self.current][idx])
            .unwrap_or(0.0)
    }

    /// Apply a disturbance at a surface-pixel position. Every cell within
    /// Euclidean radius 2 of the target cell is set (not accumulated) to
    /// `strength` scaled by linear falloff over distance.
    pub fn inject(&mut self, pixel_x: i32, pixel_y: i32, strength: f32) {
        let col = pixel_x.div_euclid(CELL_SIZE as i32);
        let row = pixel_y.div_euclid(CELL_SIZE as i32);
        let reach = INJECT_RADIUS as i32;

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let dist = ((dx * dx + dy * dy) as f32).sqrt();
                if dist <= INJECT_RADIUS {
                    if let Some(idx) = self.index_of(col + dx, row + dy) {
                        let falloff = 1.0 - dist / INJECT_RADIUS;
                        self.bufs[self.current][idx] = strength * falloff;
                    }
                }
            }
        }
    }

    /// One propagation step: swap buffer roles, then recompute every
    /// interior cell as `((left+right+top+bottom)/2 - old) * damping`,
    /// with neighbors read from the freshly-swapped previous field and
    /// `old` being the two-generations-back value left in place by the swap.
    pub fn step(&mut self) {
        self.current = 1 - self.current;

        if self.cols < 3 || self.rows < 3 {
            return; // no interior cells
        }

        let (head, tail) = self.bufs.split_at_mut(1);
        let (cur, prev): (&mut Vec<f32>, &Vec<f32>) = if self.current == 0 {
            (&mut head[0], &tail[0])
        } else {
            (&mut tail[0], &head[0])
        };

        let cols = self.cols;
        for row in 1..self.rows - 1 {
            let base = row * cols;
            for col in 1..cols - 1 {
                let idx = base + col;
                let neighbors = prev[idx - 1] + prev[idx + 1] + prev[idx - cols] + prev[idx + cols];
                cur[idx] = (neighbors / 2.0 - cur[idx]) * self.damping;
            }
        }
    }

    /// Paint the whole field onto the surface: one solid cellSize-square
    /// block per cell, colored by sign and |amplitude|/128, clipped at the
    /// surface edges. Full rewrite every call.
    pub fn rasterize(&self, surface: &mut PixelSurface, palette: &Palette) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let amp = self.bufs[self.current][row * self.cols + col];
                let color = if amp == 0.0 {
                    palette.still
                } else {
                    let normalized = (amp.abs() / 128.0).min(1.0);
                    palette.amplitude_color(normalized, amp > 0.0)
                };
                surface.fill_rect(col * CELL_SIZE, row * CELL_SIZE, CELL_SIZE, CELL_SIZE, color);
            }
        }
    }

    /// Zero both buffers in place.
    pub fn reset(&mut self) {
        self.bufs[0].fill(0.0);
        self.bufs[1].fill(0.0);
    }

    /// Count of cells with non-negligible amplitude, for status display.
    pub fn active_cells(&self) -> usize {
        self.bufs[self.current]
            .iter()
            .filter(|amp| amp.abs() > 0.5)
            .count()
    }
}
