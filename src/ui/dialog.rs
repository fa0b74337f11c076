use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Dialog};

const DIALOG_WIDTH: u16 = 46;

pub fn render_dialog(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let (title, body, hint, accent): (String, Vec<Line>, &str, Color) = match &app.dialog {
        Dialog::None => return,
        Dialog::NewNote => (
            " New Note ".to_string(),
            vec![
                Line::from("Enter the note name:"),
                Line::from(vec![
                    Span::styled("> ", Style::default().fg(theme.primary)),
                    Span::raw(app.input_buffer.as_str()),
                    Span::styled("_", Style::default().fg(theme.primary).add_modifier(Modifier::SLOW_BLINK)),
                ]),
            ],
            " Enter: create, Esc: cancel ",
            theme.primary,
        ),
        Dialog::ConfirmDelete { file_name, .. } => (
            " Delete ".to_string(),
            vec![Line::from(format!("Delete tab {}?", file_name))],
            " y: yes, n: no ",
            theme.error,
        ),
        Dialog::Warning { title, message } => (
            format!(" {} ", title),
            vec![Line::from(message.as_str())],
            " any key to close ",
            theme.warning,
        ),
        Dialog::Error { message } => (
            " Error ".to_string(),
            vec![Line::from(message.as_str())],
            " any key to close ",
            theme.error,
        ),
    };

    let screen = f.area();
    let width = DIALOG_WIDTH.min(screen.width);
    let inner_width = width.saturating_sub(4).max(1) as usize;
    let body_rows: usize = body
        .iter()
        .map(|l| l.width().max(1).div_ceil(inner_width))
        .sum();
    let height = (body_rows as u16 + 4).min(screen.height);
    let area = centered(screen, width, height);

    f.render_widget(Clear, area);
    let dialog = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(theme.foreground))
        .block(
            Block::default()
                .title(Span::styled(title, Style::default().fg(accent).add_modifier(Modifier::BOLD)))
                .title_bottom(Line::from(Span::styled(hint, Style::default().fg(theme.muted))).right_aligned())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(accent))
                .padding(ratatui::widgets::Padding::new(1, 1, 1, 0))
                .style(Style::default().bg(theme.background)),
        );
    f.render_widget(dialog, area);
}

fn centered(screen: Rect, width: u16, height: u16) -> Rect {
    Rect::new(
        screen.x + screen.width.saturating_sub(width) / 2,
        screen.y + screen.height.saturating_sub(height) / 2,
        width,
        height,
    )
}
