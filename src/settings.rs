use serde::{Deserialize, Serialize};

/// Which simulation engine is active
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Particle model: expanding ring strokes that fade out
    #[default]
    Simple,
    /// Physics model: finite-difference wave equation on a coarse grid
    Physics,
}

impl Mode {
    pub fn name(&self) -> &str {
        match self {
            Mode::Simple => "Simple",
            Mode::Physics => "Physics",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Mode::Simple => Mode::Physics,
            Mode::Physics => Mode::Simple,
        }
    }
}

/// All tunable simulation parameters consolidated into one struct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSettings {
    /// Per-step multiplicative wave attenuation (0.90-0.999)
    pub damping: f32,
    /// Disturbance strength injected on click (50-255)
    pub click_strength: f32,
    /// Disturbance strength injected while dragging (50-255)
    pub drag_strength: f32,
    /// Probability that a drag event spawns a ripple in simple mode (0.0-1.0)
    pub drag_spawn_chance: f32,
    /// Ripple radius growth per frame (0.5-5.0)
    pub ripple_speed: f32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            damping: 0.98,
            click_strength: 200.0,
            drag_strength: 150.0,
            drag_spawn_chance: 0.3,
            ripple_speed: 2.0,
        }
    }
}

impl SimSettings {
    /// Adjust damping within bounds
    pub fn adjust_damping(&mut self, delta: f32) {
        self.damping = (self.damping + delta).clamp(0.90, 0.999);
    }

    /// Adjust click strength within bounds
    pub fn adjust_click_strength(&mut self, delta: f32) {
        self.click_strength = (self.click_strength + delta).clamp(50.0, 255.0);
    }

    /// Adjust drag strength within bounds
    pub fn adjust_drag_strength(&mut self, delta: f32) {
        self.drag_strength = (self.drag_strength + delta).clamp(50.0, 255.0);
    }

    /// Adjust drag spawn chance within bounds
    pub fn adjust_drag_spawn_chance(&mut self, delta: f32) {
        self.drag_spawn_chance = (self.drag_spawn_chance + delta).clamp(0.0, 1.0);
    }

    /// Adjust ripple growth speed within bounds
    pub fn adjust_ripple_speed(&mut self, delta: f32) {
        self.ripple_speed = (self.ripple_speed + delta).clamp(0.5, 5.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjusters_clamp() {
        let mut settings = SimSettings::default();
        settings.adjust_damping(1.0);
        assert_eq!(settings.damping, 0.999);
        settings.adjust_damping(-1.0);
        assert_eq!(settings.damping, 0.90);
        settings.adjust_click_strength(500.0);
        assert_eq!(settings.click_strength, 255.0);
        settings.adjust_drag_spawn_chance(-2.0);
        assert_eq!(settings.drag_spawn_chance, 0.0);
        settings.adjust_ripple_speed(100.0);
        assert_eq!(settings.ripple_speed, 5.0);
    }

    #[test]
    fn test_mode_cycle() {
        assert_eq!(Mode::Simple.next(), Mode::Physics);
        assert_eq!(Mode::Physics.next(), Mode::Simple);
    }
}
