use crate::surface::{PixelSurface, Rgb};
use crate::theme::Palette;
use rand::rngs::ThreadRng;
use rand::Rng;
use std::collections::VecDeque;

/// Hard cap on concurrent ripples. The oldest is evicted when exceeded.
pub const MAX_RIPPLES: usize = 20;

/// A ripple stops being drawn and is removed once its radius passes this
/// multiple of its maximum radius.
const OVERSHOOT: f32 = 1.2;

/// A single expanding ring disturbance.
///
/// Radius only ever grows; opacity and stroke width are pure functions of
/// radius and only ever shrink.
pub struct Ripple {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub max_radius: f32,
    pub speed: f32,
    pub opacity: f32,
    pub stroke_width: f32,
    pub color: Rgb,
}

impl Ripple {
    fn new(x: f32, y: f32, max_radius: f32, speed: f32, color: Rgb) -> Self {
        Self {
            x,
            y,
            radius: 0.0,
            max_radius,
            speed,
            opacity: 1.0,
            stroke_width: 2.0,
            color,
        }
    }

    /// Grow the ring and recompute the derived visuals.
    /// Returns false once the ripple has overshot its maximum radius.
    fn advance(&mut self) -> bool {
        self.radius += self.speed;
        let progress = self.radius / self.max_radius;
        self.opacity = (1.0 - progress).max(0.0);
        self.stroke_width = (2.0 * (1.0 - progress)).max(0.5);
        self.radius <= self.max_radius * OVERSHOOT
    }

    /// Draw three concentric decaying strokes plus an inner highlight ring.
    pub fn draw(&self, surface: &mut PixelSurface) {
        for ring in 0..3 {
            let offset = ring as f32 * 15.0;
            let alpha = self.opacity * (1.0 - ring as f32 * 0.3) * 0.6;
            let width = self.stroke_width * (1.0 - ring as f32 * 0.2);
            surface.stroke_circle(self.x, self.y, self.radius + offset, width, self.color, alpha);
        }
        surface.stroke_circle(
            self.x,
            self.y,
            self.radius * 0.7,
            self.stroke_width * 0.5,
            Rgb::new(255, 255, 255),
            self.opacity * 0.3,
        );
    }
}

/// Particle-model engine: a bounded FIFO collection of ripples.
pub struct RippleField {
    ripples: VecDeque<Ripple>,
    surface_width: usize,
    surface_height: usize,
    rng: ThreadRng,
}

impl RippleField {
    pub fn new(surface_width: usize, surface_height: usize) -> Self {
        Self {
            ripples: VecDeque::new(),
            surface_width,
            surface_height,
            rng: rand::thread_rng(),
        }
    }

    /// Record new surface dimensions. Existing ripples keep the max radius
    /// computed from the old dimensions; only new ripples see the change.
    pub fn set_surface_size(&mut self, width: usize, height: usize) {
        self.surface_width = width;
        self.surface_height = height;
    }

    pub fn count(&self) -> usize {
        self.ripples.len()
    }

    pub fn ripples(&self) -> impl Iterator<Item = &Ripple> {
        self.ripples.iter()
    }

    /// Spawn a ripple at (x, y) with a randomly sampled color. Evicts the
    /// oldest ripple when the cap is exceeded. Always succeeds.
    pub fn add_ripple(&mut self, x: f32, y: f32, speed: f32, palette: &Palette) {
        let max_radius = self.surface_width.min(self.surface_height) as f32 * 0.4;
        let sample = |base: u8, span: u8, rng: &mut ThreadRng| {
            (base as f32 + rng.gen::<f32>() * span as f32).min(255.0) as u8
        };
        let color = Rgb::new(
            sample(palette.ripple_base.r, palette.ripple_span.r, &mut self.rng),
            sample(palette.ripple_base.g, palette.ripple_span.g, &mut self.rng),
            sample(palette.ripple_base.b, palette.ripple_span.b, &mut self.rng),
        );
        self.ripples.push_back(Ripple::new(x, y, max_radius, speed, color));
        while self.ripples.len() > MAX_RIPPLES {
            self.ripples.pop_front();
        }
    }

    /// Advance every ripple one frame and drop the expired ones.
    /// Survivors keep their relative order.
    pub fn advance_and_prune(&mut self) {
        self.ripples.retain_mut(|ripple| ripple.advance());
    }

    /// Draw all live ripples, oldest first.
    pub fn draw(&self, surface: &mut PixelSurface) {
        for ripple in &self.ripples {
            ripple.draw(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    fn field() -> RippleField {
        RippleField::new(100, 100)
    }

    #[test]
    fn test_radius_is_monotonic() {
        let mut field = field();
        field.add_ripple(50.0, 50.0, 2.0, Theme::Ocean.palette());
        let mut last_radius = 0.0;
        while field.count() > 0 {
            field.advance_and_prune();
            if let Some(ripple) = field.ripples().next() {
                assert!(ripple.radius > last_radius);
                last_radius = ripple.radius;
            }
        }
    }

    #[test]
    fn test_opacity_and_stroke_shrink() {
        let mut field = field();
        field.add_ripple(50.0, 50.0, 2.0, Theme::Ocean.palette());
        let mut last_opacity = f32::MAX;
        let mut last_width = f32::MAX;
        while field.count() > 0 {
            field.advance_and_prune();
            if let Some(ripple) = field.ripples().next() {
                assert!(ripple.opacity <= last_opacity);
                assert!(ripple.stroke_width <= last_width);
                assert!(ripple.stroke_width >= 0.5);
                last_opacity = ripple.opacity;
                last_width = ripple.stroke_width;
            }
        }
    }

    #[test]
    fn test_removed_only_past_overshoot() {
        let mut field = field();
        field.add_ripple(50.0, 50.0, 2.0, Theme::Ocean.palette());
        let max_radius = field.ripples().next().unwrap().max_radius;
        loop {
            field.advance_and_prune();
            match field.ripples().next() {
                Some(ripple) => {
                    // Still alive, so it must not have overshot.
                    assert!(ripple.radius <= max_radius * 1.2);
                }
                None => break,
            }
        }
    }

    #[test]
    fn test_max_radius_from_smaller_dimension() {
        let mut field = RippleField::new(200, 100);
        field.add_ripple(0.0, 0.0, 2.0, Theme::Ocean.palette());
        assert_eq!(field.ripples().next().unwrap().max_radius, 40.0);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut field = field();
        let palette = Theme::Ocean.palette();
        for i in 0..MAX_RIPPLES + 1 {
            field.add_ripple(i as f32, 0.0, 2.0, palette);
        }
        assert_eq!(field.count(), MAX_RIPPLES);
        // Ripple 0 was evicted; 1 is now the oldest.
        assert_eq!(field.ripples().next().unwrap().x, 1.0);
        assert_eq!(field.ripples().last().unwrap().x, MAX_RIPPLES as f32);
    }

    #[test]
    fn test_resize_leaves_existing_ripples_alone() {
        let mut field = field();
        let palette = Theme::Ocean.palette();
        field.add_ripple(10.0, 10.0, 2.0, palette);
        field.set_surface_size(300, 300);
        field.add_ripple(20.0, 20.0, 2.0, palette);
        let radii: Vec<f32> = field.ripples().map(|r| r.max_radius).collect();
        assert_eq!(radii, vec![40.0, 120.0]);
    }
}
