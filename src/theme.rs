use crate::surface::Rgb;
use serde::{Deserialize, Serialize};

/// Color palette driving both engines.
///
/// The physics engine maps cell amplitude to `crest` colors (positive) or
/// `trough` colors (negative) as `base + normalized * span` per channel,
/// with `still` at exactly zero. The simple engine samples each ripple's
/// color once at creation, uniformly from `ripple_base + [0, ripple_span]`.
pub struct Palette {
    pub still: Rgb,
    pub crest_base: Rgb,
    pub crest_span: Rgb,
    pub trough_base: Rgb,
    pub trough_span: Rgb,
    /// Backdrop gradient painted on reset in simple mode.
    pub backdrop_top: Rgb,
    pub backdrop_bottom: Rgb,
    /// Color the per-frame fade overlay pulls toward.
    pub fade: Rgb,
    pub ripple_base: Rgb,
    pub ripple_span: Rgb,
}

impl Palette {
    /// Amplitude color for the physics field. `normalized` is |amp|/128
    /// clamped to [0, 1]; `positive` selects crest vs trough gradient.
    pub fn amplitude_color(&self, normalized: f32, positive: bool) -> Rgb {
        let (base, span) = if positive {
            (self.crest_base, self.crest_span)
        } else {
            (self.trough_base, self.trough_span)
        };
        let channel = |b: u8, s: u8| (b as f32 + normalized * s as f32).min(255.0) as u8;
        Rgb::new(
            channel(base.r, span.r),
            channel(base.g, span.g),
            channel(base.b, span.b),
        )
    }
}

/// Selectable color themes. Ocean is the canonical deep-water palette.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Ocean,
    Mercury,
    Ember,
    Lagoon,
}

impl Theme {
    pub fn name(&self) -> &str {
        match self {
            Theme::Ocean => "Ocean",
            Theme::Mercury => "Mercury",
            Theme::Ember => "Ember",
            Theme::Lagoon => "Lagoon",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Theme::Ocean => Theme::Mercury,
            Theme::Mercury => Theme::Ember,
            Theme::Ember => Theme::Lagoon,
            Theme::Lagoon => Theme::Ocean,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Theme::Ocean => Theme::Lagoon,
            Theme::Mercury => Theme::Ocean,
            Theme::Ember => Theme::Mercury,
            Theme::Lagoon => Theme::Ember,
        }
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Ocean => &OCEAN,
            Theme::Mercury => &MERCURY,
            Theme::Ember => &EMBER,
            Theme::Lagoon => &LAGOON,
        }
    }
}

static OCEAN: Palette = Palette {
    still: Rgb::new(50, 100, 150),
    crest_base: Rgb::new(50, 100, 150),
    crest_span: Rgb::new(150, 155, 105),
    trough_base: Rgb::new(0, 30, 60),
    trough_span: Rgb::new(50, 70, 90),
    backdrop_top: Rgb::new(0, 30, 60),
    backdrop_bottom: Rgb::new(0, 61, 122),
    fade: Rgb::new(0, 30, 60),
    ripple_base: Rgb::new(100, 150, 200),
    ripple_span: Rgb::new(155, 105, 55),
};

static MERCURY: Palette = Palette {
    still: Rgb::new(90, 90, 100),
    crest_base: Rgb::new(90, 90, 100),
    crest_span: Rgb::new(165, 165, 155),
    trough_base: Rgb::new(15, 15, 25),
    trough_span: Rgb::new(70, 70, 80),
    backdrop_top: Rgb::new(20, 20, 30),
    backdrop_bottom: Rgb::new(60, 60, 75),
    fade: Rgb::new(20, 20, 30),
    ripple_base: Rgb::new(140, 140, 155),
    ripple_span: Rgb::new(110, 110, 100),
};

static EMBER: Palette = Palette {
    still: Rgb::new(120, 50, 20),
    crest_base: Rgb::new(120, 50, 20),
    crest_span: Rgb::new(135, 150, 80),
    trough_base: Rgb::new(40, 10, 5),
    trough_span: Rgb::new(80, 40, 15),
    backdrop_top: Rgb::new(40, 10, 5),
    backdrop_bottom: Rgb::new(90, 30, 10),
    fade: Rgb::new(40, 10, 5),
    ripple_base: Rgb::new(200, 110, 40),
    ripple_span: Rgb::new(55, 100, 60),
};

static LAGOON: Palette = Palette {
    still: Rgb::new(30, 120, 110),
    crest_base: Rgb::new(30, 120, 110),
    crest_span: Rgb::new(170, 135, 120),
    trough_base: Rgb::new(5, 40, 40),
    trough_span: Rgb::new(40, 80, 70),
    backdrop_top: Rgb::new(5, 40, 40),
    backdrop_bottom: Rgb::new(15, 80, 75),
    fade: Rgb::new(5, 40, 40),
    ripple_base: Rgb::new(90, 180, 160),
    ripple_span: Rgb::new(120, 75, 90),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle_round_trips() {
        let mut theme = Theme::Ocean;
        for _ in 0..4 {
            theme = theme.next();
        }
        assert_eq!(theme, Theme::Ocean);
        assert_eq!(Theme::Ocean.next().prev(), Theme::Ocean);
    }

    #[test]
    fn test_ocean_amplitude_colors() {
        let palette = Theme::Ocean.palette();
        // Zero amplitude from either side lands on the gradient base.
        assert_eq!(palette.amplitude_color(0.0, true), Rgb::new(50, 100, 150));
        assert_eq!(palette.amplitude_color(0.0, false), Rgb::new(0, 30, 60));
        // Saturated crest reaches the far end of the gradient.
        assert_eq!(palette.amplitude_color(1.0, true), Rgb::new(200, 255, 255));
        assert_eq!(palette.amplitude_color(1.0, false), Rgb::new(50, 100, 150));
    }
}
