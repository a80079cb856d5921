use crate::config::AppConfig;
use crate::presets::{Preset, PresetManager};
use crate::ripples::RippleField;
use crate::settings::{Mode, SimSettings};
use crate::snapshot;
use crate::surface::PixelSurface;
use crate::theme::Theme;
use crate::wavegrid::WaveGrid;
use rand::rngs::ThreadRng;
use rand::Rng;

/// First demo ripple lands roughly a second after startup, the rest follow
/// at half-second intervals (at ~60 fps).
const DEMO_FIRST_FRAME: u64 = 60;
const DEMO_SPACING_FRAMES: u64 = 30;
const DEMO_DROPS: usize = 3;

/// Focus state for parameter editing in the sidebar
/// Alphabetically ordered for consistent UI display
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Focus {
    #[default]
    None,
    // Alphabetical order
    ClickStrength,
    Damping,
    DragChance,
    DragStrength,
    Mode,
    RippleSpeed,
    Speed,
    Theme,
    // Controls box (not a param)
    Controls,
}

impl Focus {
    /// Tab cycles through parameters in alphabetical order
    pub fn next(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::ClickStrength,
            Focus::ClickStrength => Focus::Damping,
            Focus::Damping => Focus::DragChance,
            Focus::DragChance => Focus::DragStrength,
            Focus::DragStrength => Focus::Mode,
            Focus::Mode => Focus::RippleSpeed,
            Focus::RippleSpeed => Focus::Speed,
            Focus::Speed => Focus::Theme,
            Focus::Theme => Focus::ClickStrength, // Loop back
        }
    }

    /// Shift+Tab cycles in reverse
    pub fn prev(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::Theme,
            Focus::ClickStrength => Focus::Theme, // Loop back
            Focus::Damping => Focus::ClickStrength,
            Focus::DragChance => Focus::Damping,
            Focus::DragStrength => Focus::DragChance,
            Focus::Mode => Focus::DragStrength,
            Focus::RippleSpeed => Focus::Mode,
            Focus::Speed => Focus::RippleSpeed,
            Focus::Theme => Focus::Speed,
        }
    }

    /// Line index in the parameters box for this focus
    pub fn line_index(&self) -> u16 {
        match self {
            Focus::None | Focus::Controls => 0,
            Focus::ClickStrength => 0,
            Focus::Damping => 1,
            Focus::DragChance => 2,
            Focus::DragStrength => 3,
            Focus::Mode => 4,
            Focus::RippleSpeed => 5,
            Focus::Speed => 6,
            Focus::Theme => 7,
        }
    }

    /// Check if focus is on a parameter (not Controls or None)
    pub fn is_param(&self) -> bool {
        !matches!(self, Focus::None | Focus::Controls)
    }
}

/// The active engine. Exactly one exists at a time; switching modes
/// replaces it wholesale, never migrating state across.
pub enum Engine {
    Simple(RippleField),
    Physics(WaveGrid),
}

/// Main application state: owns the surface, the active engine, and every
/// piece of mutable session state. Pointer entry points only mutate engine
/// state; drawing happens exclusively inside `tick`.
pub struct App {
    pub engine: Engine,
    pub surface: PixelSurface,
    pub settings: SimSettings,
    pub theme: Theme,
    pub steps_per_frame: usize,
    pub paused: bool,
    pub focus: Focus,
    pub fullscreen_mode: bool,
    pub show_help: bool,
    pub help_scroll: u16,
    pub controls_scroll: u16,
    pub presets: PresetManager,
    pub status_message: Option<String>,
    preset_index: Option<usize>,
    frame_count: u64,
    demo_drops_left: usize,
    rng: ThreadRng,
}

impl App {
    pub fn new(canvas_width: u16, canvas_height: u16) -> Self {
        let (width, height) = Self::surface_size(canvas_width, canvas_height);
        let mut app = Self {
            engine: Engine::Simple(RippleField::new(width, height)),
            surface: PixelSurface::new(width, height),
            settings: SimSettings::default(),
            theme: Theme::default(),
            steps_per_frame: 1,
            paused: false,
            focus: Focus::Controls,
            fullscreen_mode: false,
            show_help: false,
            help_scroll: 0,
            controls_scroll: 0,
            presets: PresetManager::new(),
            status_message: None,
            preset_index: None,
            frame_count: 0,
            demo_drops_left: DEMO_DROPS,
            rng: rand::thread_rng(),
        };
        app.paint_backdrop();
        app
    }

    /// Half-block rendering: one terminal cell covers 1x2 surface pixels.
    fn surface_size(canvas_width: u16, canvas_height: u16) -> (usize, usize) {
        (canvas_width as usize, canvas_height as usize * 2)
    }

    pub fn mode(&self) -> Mode {
        match self.engine {
            Engine::Simple(_) => Mode::Simple,
            Engine::Physics(_) => Mode::Physics,
        }
    }

    fn paint_backdrop(&mut self) {
        let palette = self.theme.palette();
        match self.engine {
            Engine::Simple(_) => {
                self.surface.clear(crate::surface::Rgb::default());
                self.surface
                    .fill_vertical_gradient(palette.backdrop_top, palette.backdrop_bottom, 0.95);
            }
            Engine::Physics(_) => {
                self.surface.clear(palette.still);
            }
        }
    }

    /// Tear down the current engine and start the requested one from
    /// scratch. No simulation state survives the switch.
    pub fn select_mode(&mut self, mode: Mode) {
        let width = self.surface.width();
        let height = self.surface.height();
        self.engine = match mode {
            Mode::Simple => Engine::Simple(RippleField::new(width, height)),
            Mode::Physics => Engine::Physics(WaveGrid::new(width, height, self.settings.damping)),
        };
        self.paint_backdrop();
    }

    /// Reset the active engine in place
    pub fn reset(&mut self) {
        match &mut self.engine {
            Engine::Simple(_) => {
                let width = self.surface.width();
                let height = self.surface.height();
                self.engine = Engine::Simple(RippleField::new(width, height));
            }
            Engine::Physics(grid) => grid.reset(),
        }
        self.paint_backdrop();
    }

    /// Strong disturbance at a surface-pixel position
    pub fn on_click(&mut self, x: i32, y: i32) {
        if !self.contains(x, y) {
            return;
        }
        match &mut self.engine {
            Engine::Simple(field) => {
                field.add_ripple(
                    x as f32,
                    y as f32,
                    self.settings.ripple_speed,
                    self.theme.palette(),
                );
            }
            Engine::Physics(grid) => grid.inject(x, y, self.settings.click_strength),
        }
    }

    /// Weaker disturbance while the primary button is held
    pub fn on_drag(&mut self, x: i32, y: i32) {
        if !self.contains(x, y) {
            return;
        }
        match &mut self.engine {
            Engine::Simple(field) => {
                if self.rng.gen::<f32>() < self.settings.drag_spawn_chance {
                    field.add_ripple(
                        x as f32,
                        y as f32,
                        self.settings.ripple_speed,
                        self.theme.palette(),
                    );
                }
            }
            Engine::Physics(grid) => grid.inject(x, y, self.settings.drag_strength),
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.surface.width() && (y as usize) < self.surface.height()
    }

    /// Reallocate for a new canvas size. The physics grid is rebuilt from
    /// zero; existing ripples keep their old max radius on purpose.
    pub fn resize(&mut self, canvas_width: u16, canvas_height: u16) {
        let (width, height) = Self::surface_size(canvas_width, canvas_height);
        if width == self.surface.width() && height == self.surface.height() {
            return;
        }
        self.surface.resize(width, height);
        match &mut self.engine {
            Engine::Simple(field) => field.set_surface_size(width, height),
            Engine::Physics(grid) => grid.allocate(width, height),
        }
        self.paint_backdrop();
    }

    /// Advance the active engine one display frame and redraw the surface
    pub fn tick(&mut self) {
        self.frame_count += 1;
        self.maybe_drop_demo_ripple();

        if self.paused {
            return;
        }

        let palette = self.theme.palette();
        match &mut self.engine {
            Engine::Simple(field) => {
                // Old strokes decay toward the water color each frame.
                self.surface.fade(palette.fade, 0.1);
                for _ in 0..self.steps_per_frame {
                    field.advance_and_prune();
                }
                field.draw(&mut self.surface);
            }
            Engine::Physics(grid) => {
                for _ in 0..self.steps_per_frame {
                    grid.step();
                }
                grid.rasterize(&mut self.surface, palette);
                self.surface.fade(palette.fade, 0.05);
            }
        }
    }

    /// A few ripples shortly after startup so the screen is not empty
    /// before the first pointer event
    fn maybe_drop_demo_ripple(&mut self) {
        if self.demo_drops_left == 0 {
            return;
        }
        let next_at =
            DEMO_FIRST_FRAME + (DEMO_DROPS - self.demo_drops_left) as u64 * DEMO_SPACING_FRAMES;
        if self.frame_count < next_at {
            return;
        }
        self.demo_drops_left -= 1;
        if let Engine::Simple(field) = &mut self.engine {
            let x = self.rng.gen::<f32>() * self.surface.width() as f32;
            let y = self.rng.gen::<f32>() * self.surface.height() as f32;
            field.add_ripple(x, y, self.settings.ripple_speed, self.theme.palette());
        }
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused_up(&mut self) {
        match self.focus {
            Focus::None | Focus::Controls => {}
            Focus::ClickStrength => self.settings.adjust_click_strength(10.0),
            Focus::Damping => self.adjust_damping(0.005),
            Focus::DragChance => self.settings.adjust_drag_spawn_chance(0.1),
            Focus::DragStrength => self.settings.adjust_drag_strength(10.0),
            Focus::Mode => self.select_mode(self.mode().next()),
            Focus::RippleSpeed => self.settings.adjust_ripple_speed(0.5),
            Focus::Speed => self.increase_speed(),
            Focus::Theme => self.set_theme(self.theme.next()),
        }
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused_down(&mut self) {
        match self.focus {
            Focus::None | Focus::Controls => {}
            Focus::ClickStrength => self.settings.adjust_click_strength(-10.0),
            Focus::Damping => self.adjust_damping(-0.005),
            Focus::DragChance => self.settings.adjust_drag_spawn_chance(-0.1),
            Focus::DragStrength => self.settings.adjust_drag_strength(-10.0),
            Focus::Mode => self.select_mode(self.mode().next()),
            Focus::RippleSpeed => self.settings.adjust_ripple_speed(-0.5),
            Focus::Speed => self.decrease_speed(),
            Focus::Theme => self.set_theme(self.theme.prev()),
        }
    }

    pub fn adjust_damping(&mut self, delta: f32) {
        self.settings.adjust_damping(delta);
        if let Engine::Physics(grid) = &mut self.engine {
            grid.damping = self.settings.damping;
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        // Physics repaints every cell anyway; simple mode gets a fresh
        // backdrop so the old theme fades out under the new overlay.
        if matches!(self.engine, Engine::Simple(_)) {
            self.paint_backdrop();
        }
    }

    pub fn cycle_theme(&mut self) {
        self.set_theme(self.theme.next());
    }

    /// Cycle to next focus
    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Navigate to previous parameter (Shift+Tab)
    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen_mode = !self.fullscreen_mode;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0; // Reset scroll when opening
        }
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }

    pub fn scroll_controls_up(&mut self) {
        self.controls_scroll = self.controls_scroll.saturating_sub(1);
    }

    pub fn scroll_controls_down(&mut self, max_scroll: u16) {
        self.controls_scroll = (self.controls_scroll + 1).min(max_scroll);
    }

    pub fn increase_speed(&mut self) {
        self.steps_per_frame = (self.steps_per_frame + 1).min(8);
    }

    pub fn decrease_speed(&mut self) {
        self.steps_per_frame = self.steps_per_frame.saturating_sub(1).max(1);
    }

    // === Presets and persistence ===

    /// Apply a preset: settings and theme first, then a clean engine start
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.settings = preset.settings.clone();
        self.theme = preset.theme;
        self.select_mode(preset.mode);
        self.status_message = Some(format!("Preset: {}", preset.name));
    }

    /// Cycle through presets with the `p` key
    pub fn cycle_preset(&mut self) {
        if self.presets.is_empty() {
            return;
        }
        let next = match self.preset_index {
            Some(idx) => (idx + 1) % self.presets.len(),
            None => 0,
        };
        self.preset_index = Some(next);
        if let Some(preset) = self.presets.get(next) {
            let preset = preset.clone();
            self.apply_preset(&preset);
        }
    }

    pub fn current_config(&self) -> AppConfig {
        AppConfig {
            version: 1,
            settings: self.settings.clone(),
            mode: self.mode(),
            theme: self.theme,
            steps_per_frame: self.steps_per_frame,
        }
    }

    pub fn apply_config(&mut self, config: &AppConfig) {
        self.settings = config.settings.clone();
        self.theme = config.theme;
        self.steps_per_frame = config.steps_per_frame.clamp(1, 8);
        self.select_mode(config.mode);
    }

    /// Save the current configuration to the default path
    pub fn save_config(&mut self) {
        let result = AppConfig::default_path()
            .ok_or_else(|| "Could not determine config directory".to_string())
            .and_then(|path| {
                self.current_config().save_to_file(&path)?;
                Ok(path)
            });
        self.status_message = Some(match result {
            Ok(path) => format!("Saved {}", path.display()),
            Err(err) => err,
        });
    }

    /// Export the surface as a PNG
    pub fn take_snapshot(&mut self) {
        self.status_message = Some(match snapshot::save_snapshot(&self.surface) {
            Ok(path) => format!("Saved {}", path.display()),
            Err(err) => err,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(60, 30) // 60x60 pixel surface
    }

    #[test]
    fn test_starts_in_simple_mode() {
        let app = app();
        assert_eq!(app.mode(), Mode::Simple);
        assert_eq!(app.surface.width(), 60);
        assert_eq!(app.surface.height(), 60);
    }

    #[test]
    fn test_select_mode_discards_state() {
        let mut app = app();
        app.on_click(10, 10);
        match &app.engine {
            Engine::Simple(field) => assert_eq!(field.count(), 1),
            Engine::Physics(_) => panic!("expected simple engine"),
        }
        app.select_mode(Mode::Physics);
        app.on_click(10, 10);
        app.select_mode(Mode::Simple);
        // Re-selecting simple comes back with an empty field.
        match &app.engine {
            Engine::Simple(field) => assert_eq!(field.count(), 0),
            Engine::Physics(_) => panic!("expected simple engine"),
        }
    }

    #[test]
    fn test_click_injects_into_grid() {
        let mut app = app();
        app.select_mode(Mode::Physics);
        app.on_click(30, 30);
        match &app.engine {
            Engine::Physics(grid) => {
                assert_eq!(grid.amplitude(10, 10), app.settings.click_strength);
            }
            Engine::Simple(_) => panic!("expected physics engine"),
        }
    }

    #[test]
    fn test_out_of_surface_input_is_ignored() {
        let mut app = app();
        app.on_click(-5, 10);
        app.on_click(10, 900);
        match &app.engine {
            Engine::Simple(field) => assert_eq!(field.count(), 0),
            Engine::Physics(_) => panic!("expected simple engine"),
        }
    }

    #[test]
    fn test_resize_reallocates_grid() {
        let mut app = app();
        app.select_mode(Mode::Physics);
        app.on_click(30, 30);
        app.resize(90, 45);
        match &app.engine {
            Engine::Physics(grid) => {
                assert_eq!(grid.cols(), 30);
                assert_eq!(grid.rows(), 30);
                assert_eq!(grid.amplitude(10, 10), 0.0);
            }
            Engine::Simple(_) => panic!("expected physics engine"),
        }
        assert_eq!(app.surface.width(), 90);
        assert_eq!(app.surface.height(), 90);
    }

    #[test]
    fn test_damping_adjustment_reaches_grid() {
        let mut app = app();
        app.select_mode(Mode::Physics);
        app.focus = Focus::Damping;
        app.adjust_focused_up();
        match &app.engine {
            Engine::Physics(grid) => assert_eq!(grid.damping, app.settings.damping),
            Engine::Simple(_) => panic!("expected physics engine"),
        }
    }

    #[test]
    fn test_tick_while_paused_leaves_engine_alone() {
        let mut app = app();
        app.on_click(10, 10);
        app.paused = true;
        for _ in 0..100 {
            app.tick();
        }
        match &app.engine {
            Engine::Simple(field) => {
                assert_eq!(field.ripples().next().unwrap().radius, 0.0);
            }
            Engine::Physics(_) => panic!("expected simple engine"),
        }
    }

    #[test]
    fn test_cycle_preset_applies_settings() {
        let mut app = app();
        app.cycle_preset();
        let first = app.presets.get(0).unwrap();
        assert_eq!(app.settings, first.settings);
        assert_eq!(app.mode(), first.mode);
        assert_eq!(app.theme, first.theme);
    }

    #[test]
    fn test_config_roundtrip_through_app() {
        let mut app = app();
        app.settings.adjust_damping(0.01);
        app.select_mode(Mode::Physics);
        let config = app.current_config();

        let mut other = App::new(40, 20);
        other.apply_config(&config);
        assert_eq!(other.settings, app.settings);
        assert_eq!(other.mode(), Mode::Physics);
    }

    #[test]
    fn test_focus_cycle_round_trips() {
        let mut focus = Focus::ClickStrength;
        for _ in 0..8 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::ClickStrength);
        assert_eq!(Focus::Damping.next().prev(), Focus::Damping);
    }
}
