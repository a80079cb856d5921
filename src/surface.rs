/// A single RGB pixel on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend `other` over `self` with the given alpha (0.0 keeps self,
    /// 1.0 replaces it).
    pub fn blend(self, other: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| (from as f32 + (to as f32 - from as f32) * a) as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// Linear interpolation between two colors, t in [0, 1].
    pub fn lerp(from: Rgb, to: Rgb, t: f32) -> Rgb {
        from.blend(to, t)
    }
}

/// One terminal cell of the rasterized surface. Half-block rendering packs
/// two vertically stacked pixels into a single cell: `top` becomes the
/// foreground of a '▀' glyph and `bottom` the background.
#[derive(Clone, Copy)]
pub struct SurfaceCell {
    pub x: u16,
    pub y: u16,
    pub top: Rgb,
    pub bottom: Rgb,
}

/// Software RGB raster target shared by both simulation engines.
///
/// Engines only ever receive `&mut PixelSurface` for the duration of a draw;
/// the surface itself is owned by the app.
pub struct PixelSurface {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocate for new dimensions. Contents are discarded.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgb::default(); width * height];
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Fill the whole surface with one color.
    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Blend `color` over every pixel with the given alpha. Used for the
    /// per-frame decay overlays.
    pub fn fade(&mut self, color: Rgb, alpha: f32) {
        for px in &mut self.pixels {
            *px = px.blend(color, alpha);
        }
    }

    /// Blend a single pixel. Out-of-range coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            self.pixels[idx] = self.pixels[idx].blend(color, alpha);
        }
    }

    /// Solid rectangle fill, clipped at the surface edges.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgb) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for py in y.min(self.height)..y_end {
            let row = py * self.width;
            for px in x.min(self.width)..x_end {
                self.pixels[row + px] = color;
            }
        }
    }

    /// Vertical linear gradient over the whole surface, blended with alpha.
    pub fn fill_vertical_gradient(&mut self, top: Rgb, bottom: Rgb, alpha: f32) {
        if self.height == 0 {
            return;
        }
        let denom = (self.height - 1).max(1) as f32;
        for y in 0..self.height {
            let color = Rgb::lerp(top, bottom, y as f32 / denom);
            let row = y * self.width;
            for x in 0..self.width {
                self.pixels[row + x] = self.pixels[row + x].blend(color, alpha);
            }
        }
    }

    /// Stroke a circle outline with the given stroke width, alpha-blended.
    /// Walks the circumference in small angular steps and stamps a square
    /// of `width` pixels at each step.
    pub fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, width: f32, color: Rgb, alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        let steps = ((std::f32::consts::TAU * radius).ceil() as usize * 2).max(8);
        let side = width.round().max(1.0) as i32;
        let lo = -(side / 2);
        let step_angle = std::f32::consts::TAU / steps as f32;
        for i in 0..steps {
            let angle = i as f32 * step_angle;
            let ix = (cx + radius * angle.cos()).round() as i32;
            let iy = (cy + radius * angle.sin()).round() as i32;
            for dy in lo..lo + side {
                for dx in lo..lo + side {
                    self.blend_pixel(ix + dx, iy + dy, color, alpha);
                }
            }
        }
    }

    /// Convert the pixel buffer to half-block terminal cells. Two vertically
    /// adjacent pixels map to one cell; an odd bottom row pairs with black.
    pub fn to_cells(&self) -> Vec<SurfaceCell> {
        let cell_rows = self.height.div_ceil(2);
        let mut cells = Vec::with_capacity(self.width * cell_rows);
        for cy in 0..cell_rows {
            for cx in 0..self.width {
                let top = self.pixels[cy * 2 * self.width + cx];
                let bottom = self
                    .get(cx, cy * 2 + 1)
                    .unwrap_or(Rgb::default());
                cells.push(SurfaceCell {
                    x: cx as u16,
                    y: cy as u16,
                    top,
                    bottom,
                });
            }
        }
        cells
    }

    /// Flatten to interleaved RGB bytes (for PNG export).
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for px in &self.pixels {
            out.push(px.r);
            out.push(px.g);
            out.push(px.b);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_extremes() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert_eq!(black.blend(white, 0.0), black);
        assert_eq!(black.blend(white, 1.0), white);
    }

    #[test]
    fn test_fill_rect_clips_at_edges() {
        let mut surface = PixelSurface::new(10, 10);
        let red = Rgb::new(255, 0, 0);
        surface.fill_rect(8, 8, 5, 5, red);
        assert_eq!(surface.get(8, 8), Some(red));
        assert_eq!(surface.get(9, 9), Some(red));
        assert_eq!(surface.get(7, 7), Some(Rgb::default()));
        // Nothing outside the surface was touched (no panic is the check).
        assert_eq!(surface.get(10, 10), None);
    }

    #[test]
    fn test_vertical_gradient_endpoints() {
        let mut surface = PixelSurface::new(4, 8);
        let top = Rgb::new(0, 30, 60);
        let bottom = Rgb::new(0, 61, 122);
        surface.fill_vertical_gradient(top, bottom, 1.0);
        assert_eq!(surface.get(0, 0), Some(top));
        assert_eq!(surface.get(3, 7), Some(bottom));
    }

    #[test]
    fn test_zero_area_surface_is_noop() {
        let mut surface = PixelSurface::new(0, 0);
        surface.clear(Rgb::new(1, 2, 3));
        surface.fade(Rgb::new(9, 9, 9), 0.5);
        surface.fill_rect(0, 0, 5, 5, Rgb::new(1, 1, 1));
        surface.stroke_circle(2.0, 2.0, 3.0, 2.0, Rgb::new(1, 1, 1), 1.0);
        assert!(surface.to_cells().is_empty());
    }

    #[test]
    fn test_to_cells_pairs_rows() {
        let mut surface = PixelSurface::new(2, 4);
        surface.fill_rect(0, 0, 2, 1, Rgb::new(10, 10, 10));
        surface.fill_rect(0, 1, 2, 1, Rgb::new(20, 20, 20));
        let cells = surface.to_cells();
        assert_eq!(cells.len(), 4); // 2 wide, 4 pixels tall = 2 cell rows
        assert_eq!(cells[0].top, Rgb::new(10, 10, 10));
        assert_eq!(cells[0].bottom, Rgb::new(20, 20, 20));
    }

    #[test]
    fn test_rgb_bytes_interleaved() {
        let mut surface = PixelSurface::new(1, 1);
        surface.clear(Rgb::new(1, 2, 3));
        assert_eq!(surface.to_rgb_bytes(), vec![1, 2, 3]);
    }
}
