use crate::app::{App, Engine, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 22;

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 40;

/// Number of lines in controls content
pub const CONTROLS_CONTENT_LINES: u16 = 14;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.fullscreen_mode {
        render_canvas(frame, area, app);
    } else {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        render_sidebar(frame, layout[0], app);
        render_canvas(frame, layout[1], app);
    }

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

/// Calculate the canvas size (excluding borders)
pub fn get_canvas_size(frame_area: Rect, fullscreen: bool) -> (u16, u16) {
    if fullscreen {
        (frame_area.width.saturating_sub(2), frame_area.height.saturating_sub(2))
    } else {
        let canvas_width = frame_area.width.saturating_sub(SIDEBAR_WIDTH + 2);
        let canvas_height = frame_area.height.saturating_sub(2);
        (canvas_width, canvas_height)
    }
}

/// Top-left cell of the canvas interior, for mapping mouse coordinates
/// onto the pixel surface
pub fn canvas_origin(fullscreen: bool) -> (u16, u16) {
    if fullscreen {
        (1, 1)
    } else {
        (SIDEBAR_WIDTH + 1, 1)
    }
}

pub fn get_controls_visible_lines(terminal_height: u16) -> u16 {
    // Status box (6) + params box (10) leave the rest for controls,
    // minus its own borders.
    terminal_height.saturating_sub(16).saturating_sub(2)
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),  // Status
            Constraint::Length(10), // Parameters
            Constraint::Min(10),    // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_params_box(frame, sections[1], app);
    render_controls_box(frame, sections[2], app);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Water Ripples ");

    let status_text = if app.paused { "PAUSED" } else { "RUNNING" };
    let status_color = if app.paused { HIGHLIGHT_COLOR } else { BORDER_COLOR };

    let engine_line = match &app.engine {
        Engine::Simple(field) => format!(
            "Ripples: {}/{}",
            field.count(),
            crate::ripples::MAX_RIPPLES
        ),
        Engine::Physics(grid) => format!(
            "Cells: {}x{} ({})",
            grid.cols(),
            grid.rows(),
            grid.active_cells()
        ),
    };

    let mut content = vec![
        Line::from(Span::styled(
            format!("Mode: {}", app.mode().name()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(engine_line, Style::default().fg(TEXT_COLOR))),
        Line::from(Span::styled(status_text, Style::default().fg(status_color))),
    ];

    if let Some(message) = &app.status_message {
        content.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(DIM_TEXT_COLOR),
        )));
    }

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_params_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Parameters ");

    let make_line = |label: &str, value: String, focused: bool| {
        let prefix = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(HIGHLIGHT_COLOR)
        } else {
            Style::default().fg(TEXT_COLOR)
        };
        Line::from(Span::styled(format!("{}{}: {}", prefix, label, value), style))
    };

    let settings = &app.settings;

    let content = vec![
        make_line(
            "Click",
            format!("{:.0}", settings.click_strength),
            app.focus == Focus::ClickStrength,
        ),
        make_line(
            "Damping",
            format!("{:.3}", settings.damping),
            app.focus == Focus::Damping,
        ),
        make_line(
            "Drag %",
            format!("{:.0}", settings.drag_spawn_chance * 100.0),
            app.focus == Focus::DragChance,
        ),
        make_line(
            "Drag",
            format!("{:.0}", settings.drag_strength),
            app.focus == Focus::DragStrength,
        ),
        make_line(
            "Mode",
            app.mode().name().to_string(),
            app.focus == Focus::Mode,
        ),
        make_line(
            "Ripple",
            format!("{:.1}", settings.ripple_speed),
            app.focus == Focus::RippleSpeed,
        ),
        make_line(
            "Speed",
            format!("{}", app.steps_per_frame),
            app.focus == Focus::Speed,
        ),
        make_line(
            "Theme",
            app.theme.name().to_string(),
            app.focus == Focus::Theme,
        ),
    ];

    // Calculate scroll to keep focused item visible based on actual area
    let focus_line = app.focus.line_index();
    let visible_height = area.height.saturating_sub(2); // minus borders
    let content_height = content.len() as u16;

    let scroll = if visible_height == 0 || visible_height >= content_height {
        0 // No scrolling needed
    } else if focus_line >= visible_height {
        // Scroll to show focused line at bottom of visible area
        focus_line.saturating_sub(visible_height - 1)
    } else {
        0 // Focus is within first visible lines
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    // Helper to create a control line
    let make_control = |key: &str, desc: String| -> Line<'_> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Click", "drop a ripple".to_string()),
        make_control("Drag", "stir the water".to_string()),
        make_control("Space", "pause/resume".to_string()),
        make_control("1/2", "simple/physics".to_string()),
        make_control("M", format!("mode: {}", app.mode().name())),
        make_control("T", format!("theme: {}", app.theme.name())),
        make_control("P", "cycle presets".to_string()),
        make_control("R", "reset".to_string()),
        make_control("V", "fullscreen".to_string()),
        make_control("X", "snapshot PNG".to_string()),
        make_control("S", "save config".to_string()),
        make_control("+/-", "speed".to_string()),
        make_control("H/?", "help".to_string()),
        make_control("Q", "quit".to_string()),
    ];

    let content_height = content.len() as u16;
    let visible_height = area.height.saturating_sub(2); // minus borders
    let max_scroll = content_height.saturating_sub(visible_height);
    let is_scrollable = max_scroll > 0;

    let title = if is_scrollable {
        " Controls (↑↓) "
    } else {
        " Controls "
    };

    let block = styled_block(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .scroll((app.controls_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block("");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Half-block raster: each cell shows two vertically stacked pixels.
    for cell in app.surface.to_cells() {
        let x = inner.x + cell.x;
        let y = inner.y + cell.y;

        if x < inner.x + inner.width && y < inner.y + inner.height {
            let cell_rect = Rect {
                x,
                y,
                width: 1,
                height: 1,
            };
            let style = Style::default()
                .fg(Color::Rgb(cell.top.r, cell.top.g, cell.top.b))
                .bg(Color::Rgb(cell.bottom.r, cell.bottom.g, cell.bottom.b));
            let span = Span::styled("▀", style);
            let paragraph = Paragraph::new(Line::from(span));
            frame.render_widget(paragraph, cell_rect);
        }
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    // Calculate the canvas area (exclude sidebar unless fullscreen)
    let canvas_x = if app.fullscreen_mode { 0 } else { SIDEBAR_WIDTH };
    let canvas_width = if app.fullscreen_mode {
        area.width
    } else {
        area.width.saturating_sub(SIDEBAR_WIDTH)
    };

    // Center the help dialog within the canvas
    let help_width = 56.min(canvas_width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(32);
    let x = canvas_x + (canvas_width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    // Clear the background
    frame.render_widget(Clear, help_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("WATER SURFACE RIPPLES", Style::default().fg(BORDER_COLOR))),
        Line::from(""),
        Line::from("Click or drag on the water to disturb it. Two engines are available."),
        Line::from(""),
        Line::from(Span::styled("1 - Simple Mode", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Each click spawns an expanding ring that fades as it grows. Dragging sprinkles rings along the stroke."),
        Line::from(""),
        Line::from(Span::styled("2 - Physics Mode", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("A finite-difference wave equation runs on a coarse grid. Waves from separate disturbances interfere, creating complex patterns. Edge cells are frozen, so reflections near the border look rough on purpose."),
        Line::from(""),
        Line::from(Span::styled("PARAMETERS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Tab/Shift+Tab selects a parameter, Up/Down adjusts it. Damping controls how quickly waves die; click/drag strength sets injected amplitude; drag % is the chance a drag event spawns a ring in simple mode."),
        Line::from(""),
        Line::from(Span::styled("T - Theme", Style::default().fg(TEXT_COLOR))),
        Line::from("Ocean, Mercury, Ember, Lagoon"),
        Line::from(""),
        Line::from(Span::styled("P - Presets", Style::default().fg(TEXT_COLOR))),
        Line::from("Cycle built-in parameter bundles; user presets load from the config directory."),
        Line::from(""),
        Line::from(Span::styled("X - Snapshot", Style::default().fg(TEXT_COLOR))),
        Line::from("Writes the current frame as a PNG to your pictures folder."),
        Line::from(""),
        Line::from(Span::styled("BASIC CONTROLS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Space=Pause, R=Reset, M=Mode, V=Fullscreen, S=Save config, +/-=Speed, Q=Quit"),
        Line::from(""),
    ];

    let content_height = content.len() as u16;
    let visible_height = help_height.saturating_sub(2); // minus borders
    let max_scroll = content_height.saturating_sub(visible_height);
    let is_scrollable = max_scroll > 0;

    let title = if is_scrollable {
        " Help (J/K scroll, H to close) "
    } else {
        " Help (H to close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}
