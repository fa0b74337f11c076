mod dialog;
mod panel;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub use dialog::render_dialog;
pub use panel::render_panel;

pub fn draw(f: &mut Frame, app: &mut App) {
    app.layout(f.area());

    if app.panel.is_visible() {
        render_panel(f, app);
    } else {
        render_hidden_hint(f, app);
    }
    render_dialog(f, app);
}

fn render_hidden_hint(f: &mut Frame, app: &App) {
    let area = f.area();
    if area.height == 0 {
        return;
    }
    let theme = &app.theme;
    let toggle = app
        .host
        .shortcut()
        .map(|combo| combo.to_string())
        .unwrap_or_else(|| "the activation key".to_string());

    let line = Line::from(vec![
        Span::styled(" jotter ", Style::default().fg(theme.primary)),
        Span::styled("›", Style::default().fg(theme.border)),
        Span::styled(
            format!(" hidden, {} to show, {} to quit ", toggle, app.keys.quit),
            Style::default().fg(theme.muted),
        ),
    ]);
    let hint_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    f.render_widget(Paragraph::new(line), hint_area);
}
