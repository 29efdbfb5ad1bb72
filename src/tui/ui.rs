use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};
use crate::config::{SPEED_MAX_MS, SPEED_MIN_MS};
use super::theme::*;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main vertical layout: logo, display, speed, lists, status, hotkeys
    let main_layout = Layout::vertical([
        Constraint::Length(2), // Logo + spacing
        Constraint::Length(5), // Name display
        Constraint::Length(1), // Speed line
        Constraint::Min(0),    // Remaining / picked lists
        Constraint::Length(1), // Status line
        Constraint::Length(1), // Hotkeys
    ])
    .split(area);

    render_logo(frame, main_layout[0]);
    render_display(frame, main_layout[1], app);
    render_speed(frame, main_layout[2], app);
    render_lists(frame, main_layout[3], app);
    render_status(frame, main_layout[4], app);
    render_hotkeys(frame, main_layout[5], app);

    // Overlays
    match app.input_mode {
        InputMode::ImportPath | InputMode::ExportPath => render_path_prompt(frame, area, app),
        InputMode::Help => render_help(frame, area),
        _ => {}
    }
}

fn render_logo(frame: &mut Frame, area: Rect) {
    // Center the colorful "rollcall" logo
    let padding = (area.width.saturating_sub(8)) / 2;
    let centered = Line::from(vec![
        Span::raw(" ".repeat(padding as usize)),
        Span::styled("ro", Style::new().fg(LOGO_CORAL).bold()),
        Span::styled("ll", Style::new().fg(LOGO_GOLD).bold()),
        Span::styled("ca", Style::new().fg(LOGO_LIGHT_BLUE).bold()),
        Span::styled("ll", Style::new().fg(LOGO_MINT).bold()),
    ]);

    let paragraph = Paragraph::new(centered);
    frame.render_widget(paragraph, area);
}

fn render_display(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = if app.engine.is_spinning() {
        (
            app.engine.displayed().unwrap_or("...").to_string(),
            Style::new().fg(ROLL_BLUE).bold(),
        )
    } else if let Some(name) = app.engine.displayed() {
        // The committed pick stays framed until the next spin or reset.
        (format!("★ {} ★", name), Style::new().fg(PICK_RED).bold())
    } else {
        ("Ready to start".to_string(), Style::new().fg(TEXT_DIM))
    };

    let lines = vec![Line::raw(""), Line::from(Span::styled(text, style))];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(TEXT_DIM));
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_speed(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(" Speed: ", Style::new().fg(TEXT_DIM)),
        Span::styled(
            format!("{} ms/tick", app.roll_speed_ms),
            Style::new().fg(TEXT_WHITE),
        ),
        Span::styled(
            format!(" ({}..{})", SPEED_MIN_MS, SPEED_MAX_MS),
            Style::new().fg(TEXT_DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_lists(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::horizontal([
        Constraint::Percentage(50), // Remaining
        Constraint::Percentage(50), // Picked
    ])
    .split(area);

    let remaining: Vec<Line> = app
        .engine
        .pool()
        .iter()
        .map(|name| Line::styled(name.clone(), Style::new().fg(TEXT_WHITE)))
        .collect();
    render_name_list(
        frame,
        columns[0],
        format!("Remaining ({})", app.engine.pool().len()),
        remaining,
        LOGO_LIGHT_BLUE,
    );

    let picked: Vec<Line> = app
        .engine
        .picked()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::new().fg(TEXT_DIM)),
                Span::styled(name.clone(), Style::new().fg(TEXT_WHITE)),
            ])
        })
        .collect();
    render_name_list(
        frame,
        columns[1],
        format!("Picked ({})", app.engine.picked().len()),
        picked,
        LOGO_MINT,
    );
}

fn render_name_list(
    frame: &mut Frame,
    area: Rect,
    title: String,
    mut lines: Vec<Line>,
    accent: ratatui::style::Color,
) {
    // Keep the tail visible when the list outgrows the block.
    let visible = area.height.saturating_sub(2) as usize;
    if lines.len() > visible {
        lines.drain(..lines.len() - visible);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(TEXT_DIM))
        .title(Span::styled(title, Style::new().fg(accent)));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(" ", Style::new()),
        Span::styled(&app.status, Style::new().fg(TEXT_DIM)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_hotkeys(frame: &mut Frame, area: Rect, app: &App) {
    let hotkeys = match app.input_mode {
        InputMode::Normal => Line::from(vec![
            Span::styled("[space]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" start/stop • ", Style::new().fg(TEXT_DIM)),
            Span::styled("[r]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" reset • ", Style::new().fg(TEXT_DIM)),
            Span::styled("[i]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" import • ", Style::new().fg(TEXT_DIM)),
            Span::styled("[e]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" export • ", Style::new().fg(TEXT_DIM)),
            Span::styled("[+/-]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" speed • ", Style::new().fg(TEXT_DIM)),
            Span::styled("[?]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" help • ", Style::new().fg(TEXT_DIM)),
            Span::styled("[q]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" quit", Style::new().fg(TEXT_DIM)),
        ]),
        InputMode::ImportPath | InputMode::ExportPath => Line::from(vec![
            Span::styled("[Enter]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" confirm • ", Style::new().fg(TEXT_DIM)),
            Span::styled("[Esc]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" cancel", Style::new().fg(TEXT_DIM)),
        ]),
        InputMode::Help => Line::from(vec![
            Span::styled("[Esc]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" close", Style::new().fg(TEXT_DIM)),
        ]),
    };

    let paragraph = Paragraph::new(hotkeys);
    frame.render_widget(paragraph, area);
}

fn render_path_prompt(frame: &mut Frame, area: Rect, app: &App) {
    let Some(prompt) = &app.path_input else {
        return;
    };

    let title = match app.input_mode {
        InputMode::ImportPath => "Import roster from",
        _ => "Export results to",
    };

    let popup = centered_rect(area, 60, 3);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(LOGO_GOLD))
        .title(Span::styled(title, Style::new().fg(LOGO_GOLD)));
    let input_line = Line::from(Span::styled(&prompt.input, Style::new().fg(TEXT_WHITE)));
    frame.render_widget(Paragraph::new(input_line).block(block), popup);

    frame.set_cursor_position(Position::new(
        popup.x + 1 + prompt.cursor_chars() as u16,
        popup.y + 1,
    ));
}

fn render_help(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled("space", Style::new().fg(TEXT_WHITE)),
            Span::styled("  start or stop the spin", Style::new().fg(TEXT_DIM)),
        ]),
        Line::from(vec![
            Span::styled("r    ", Style::new().fg(TEXT_WHITE)),
            Span::styled("  reset pool and picks", Style::new().fg(TEXT_DIM)),
        ]),
        Line::from(vec![
            Span::styled("i    ", Style::new().fg(TEXT_WHITE)),
            Span::styled("  import a roster workbook", Style::new().fg(TEXT_DIM)),
        ]),
        Line::from(vec![
            Span::styled("e    ", Style::new().fg(TEXT_WHITE)),
            Span::styled("  export results workbook", Style::new().fg(TEXT_DIM)),
        ]),
        Line::from(vec![
            Span::styled("+ / -", Style::new().fg(TEXT_WHITE)),
            Span::styled("  spin faster / slower", Style::new().fg(TEXT_DIM)),
        ]),
        Line::from(vec![
            Span::styled("q    ", Style::new().fg(TEXT_WHITE)),
            Span::styled("  save roster and quit", Style::new().fg(TEXT_DIM)),
        ]),
    ];

    let popup = centered_rect(area, 40, lines.len() as u16 + 2);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(TEXT_DIM))
        .title(Span::styled("Keys", Style::new().fg(TEXT_WHITE)));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
