mod app;
mod config;
mod presets;
mod ripples;
mod settings;
mod snapshot;
mod surface;
mod theme;
mod ui;
mod wavegrid;

use app::App;
use clap::Parser;
use config::AppConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Mode;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "ripple-simulator")]
#[command(about = "Interactive water surface ripple simulation in the terminal")]
struct Args {
    /// Starting engine (simple, physics)
    #[arg(short = 'm', long)]
    mode: Option<String>,

    /// Wave attenuation per step (0.90-0.999, physics mode)
    #[arg(short = 'd', long)]
    damping: Option<f32>,

    /// Simulation steps per display frame (1-8)
    #[arg(long)]
    speed: Option<usize>,

    /// Disturbance strength injected on click (50-255)
    #[arg(long)]
    strength: Option<f32>,

    /// Disturbance strength injected while dragging (50-255)
    #[arg(long = "drag-strength")]
    drag_strength: Option<f32>,

    /// Chance a drag event spawns a ripple in simple mode (0.0-1.0)
    #[arg(long = "drag-chance")]
    drag_chance: Option<f32>,

    /// Ripple radius growth per frame in simple mode (0.5-5.0)
    #[arg(long = "ripple-speed")]
    ripple_speed: Option<f32>,

    /// Color theme (ocean, mercury, ember, lagoon)
    #[arg(short = 't', long)]
    theme: Option<String>,

    /// Start from a named preset (built-in or user)
    #[arg(short = 'p', long)]
    preset: Option<String>,

    /// Load a saved configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_mode(s: &str) -> Mode {
    match s.to_lowercase().as_str() {
        "physics" | "wave" | "2" => Mode::Physics,
        _ => Mode::Simple,
    }
}

fn parse_theme(s: &str) -> Theme {
    match s.to_lowercase().as_str() {
        "mercury" | "silver" => Theme::Mercury,
        "ember" | "fire" => Theme::Ember,
        "lagoon" => Theme::Lagoon,
        _ => Theme::Ocean,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Get initial terminal size and create app
    let size = terminal.size()?;
    let frame_rect = ratatui::layout::Rect {
        x: 0,
        y: 0,
        width: size.width,
        height: size.height,
    };
    let (canvas_width, canvas_height) = ui::get_canvas_size(frame_rect, false);
    let mut app = App::new(canvas_width, canvas_height);

    // Saved config first, then an optional preset, then explicit flags.
    if let Some(path) = &args.config {
        match AppConfig::load_from_file(path) {
            Ok(config) => app.apply_config(&config),
            Err(err) => app.status_message = Some(err),
        }
    }
    if let Some(name) = &args.preset {
        if let Some(preset) = app.presets.find(name).cloned() {
            app.apply_preset(&preset);
        } else {
            app.status_message = Some(format!("Unknown preset: {}", name));
        }
    }

    if let Some(damping) = args.damping {
        app.settings.damping = damping.clamp(0.90, 0.999);
    }
    if let Some(strength) = args.strength {
        app.settings.click_strength = strength.clamp(50.0, 255.0);
    }
    if let Some(strength) = args.drag_strength {
        app.settings.drag_strength = strength.clamp(50.0, 255.0);
    }
    if let Some(chance) = args.drag_chance {
        app.settings.drag_spawn_chance = chance.clamp(0.0, 1.0);
    }
    if let Some(speed) = args.ripple_speed {
        app.settings.ripple_speed = speed.clamp(0.5, 5.0);
    }
    if let Some(speed) = args.speed {
        app.steps_per_frame = speed.clamp(1, 8);
    }
    if let Some(theme) = &args.theme {
        app.set_theme(parse_theme(theme));
    }

    // Mode selection last so the fresh engine sees the final settings.
    if let Some(mode) = &args.mode {
        app.select_mode(parse_mode(mode));
    } else {
        app.select_mode(app.mode());
    }

    // Run the app
    let res = run_app(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    // Target ~60fps for smooth animation
    const FRAME_DURATION: Duration = Duration::from_millis(16);

    loop {
        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout
        if event::poll(FRAME_DURATION)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only process Press events
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    // Handle Ctrl+C
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }

                    match key.code {
                        // System controls
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char(' ') => app.toggle_pause(),
                        KeyCode::Char('r') | KeyCode::Char('R') => app.reset(),
                        KeyCode::Char('v') | KeyCode::Char('V') => app.toggle_fullscreen(),
                        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                            app.toggle_help()
                        }
                        KeyCode::Char('1') => app.select_mode(Mode::Simple),
                        KeyCode::Char('2') => app.select_mode(Mode::Physics),
                        KeyCode::Char('m') | KeyCode::Char('M') => {
                            app.select_mode(app.mode().next());
                            app.focus = app::Focus::Mode;
                        }
                        KeyCode::Char('t') | KeyCode::Char('T') => {
                            app.cycle_theme();
                            app.focus = app::Focus::Theme;
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => app.cycle_preset(),
                        KeyCode::Char('s') | KeyCode::Char('S') => app.save_config(),
                        KeyCode::Char('x') | KeyCode::Char('X') => app.take_snapshot(),
                        KeyCode::Char('+') | KeyCode::Char('=') => {
                            app.increase_speed();
                            app.focus = app::Focus::Speed;
                        }
                        KeyCode::Char('-') | KeyCode::Char('_') => {
                            app.decrease_speed();
                            app.focus = app::Focus::Speed;
                        }

                        // Navigation
                        KeyCode::Tab => app.next_focus(),
                        KeyCode::BackTab => app.prev_focus(),
                        KeyCode::Up => {
                            if !app.show_help {
                                if app.focus.is_param() {
                                    app.adjust_focused_up();
                                } else {
                                    app.scroll_controls_up();
                                }
                            }
                        }
                        KeyCode::Down => {
                            if !app.show_help {
                                if app.focus.is_param() {
                                    app.adjust_focused_down();
                                } else {
                                    let term_size = terminal.size().unwrap_or_default();
                                    let visible = ui::get_controls_visible_lines(term_size.height);
                                    app.scroll_controls_down(
                                        ui::CONTROLS_CONTENT_LINES.saturating_sub(visible),
                                    );
                                }
                            }
                        }
                        KeyCode::Esc => {
                            if app.show_help {
                                app.toggle_help();
                            } else if app.focus.is_param() {
                                app.focus = app::Focus::Controls;
                            }
                        }
                        KeyCode::Char('j') | KeyCode::Char('J') => {
                            if app.show_help {
                                app.scroll_help_down(ui::HELP_CONTENT_LINES);
                            }
                        }
                        KeyCode::Char('k') | KeyCode::Char('K') => {
                            if app.show_help {
                                app.scroll_help_up();
                            }
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => {
                    let (origin_x, origin_y) = ui::canvas_origin(app.fullscreen_mode);
                    // One cell is one pixel wide and two pixels tall.
                    let pixel_x = mouse.column as i32 - origin_x as i32;
                    let pixel_y = (mouse.row as i32 - origin_y as i32) * 2;
                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            app.on_click(pixel_x, pixel_y);
                        }
                        MouseEventKind::Drag(MouseButton::Left) => {
                            app.on_drag(pixel_x, pixel_y);
                        }
                        _ => {}
                    }
                }
                Event::Resize(width, height) => {
                    let (canvas_width, canvas_height) = ui::get_canvas_size(
                        ratatui::layout::Rect {
                            x: 0,
                            y: 0,
                            width,
                            height,
                        },
                        app.fullscreen_mode,
                    );
                    app.resize(canvas_width, canvas_height);
                }
                _ => {}
            }
        }

        // Run simulation tick
        app.tick();
    }
}
