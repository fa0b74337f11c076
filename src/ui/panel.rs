use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::tab_bar::{ADD_BUTTON, CLOSE_MARK};
use crate::app::App;

pub fn render_panel(f: &mut Frame, app: &App) {
    let area = app.panel_area;
    if area.width < 4 || area.height < 4 {
        return;
    }
    let theme = &app.theme;
    let border_color = if app.panel.is_focused() { theme.primary } else { theme.border };

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(" jotter ", Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)))
        .title_bottom(
            Line::from(Span::styled(
                format!(" {}: new  {}: delete ", app.keys.new_note, app.keys.delete_note),
                Style::default().fg(theme.muted),
            ))
            .right_aligned(),
        )
        .style(Style::default().bg(theme.background).fg(theme.foreground));
    f.render_widget(block, area);

    render_tab_bar(f, app);

    let rule = Rect::new(area.x + 1, area.y + 2, area.width - 2, 1);
    if rule.y < area.y + area.height - 1 {
        f.render_widget(
            Paragraph::new("─".repeat(rule.width as usize)).style(Style::default().fg(theme.border)),
            rule,
        );
    }

    render_editor(f, app);
}

fn render_tab_bar(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let active = app.panel.active_index();
    let tabs = app.panel.tabs();

    // more tabs scrolled off to the left
    let first = app.tab_bar.cells.first();
    if let Some(first) = first.filter(|_| app.tab_bar.first_visible > 0) {
        let marker = Rect::new(first.area.x.saturating_sub(1), first.area.y, 1, 1);
        f.render_widget(Paragraph::new("‹").style(Style::default().fg(theme.muted)), marker);
    }

    for cell in &app.tab_bar.cells {
        let Some(tab) = tabs.get(cell.index) else {
            continue;
        };
        let style = if Some(cell.index) == active {
            Style::default().fg(theme.background).bg(theme.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        let line = Line::from(vec![
            Span::styled(format!(" {} ", tab.label()), style),
            Span::styled(CLOSE_MARK, style.fg(theme.error)),
            Span::styled(" ", style),
        ]);
        f.render_widget(Paragraph::new(line), cell.area);
    }

    if app.tab_bar.add_button.width > 0 {
        f.render_widget(
            Paragraph::new(ADD_BUTTON).style(Style::default().fg(theme.primary)),
            app.tab_bar.add_button,
        );
    }
}

fn render_editor(f: &mut Frame, app: &App) {
    let area = app.editor_area;
    if area.width == 0 || area.height == 0 {
        return;
    }
    let theme = &app.theme;
    let Some(tab) = app.panel.active_tab() else {
        let empty = Paragraph::new(Span::styled(
            format!("No notes. Press {} to create one.", app.keys.new_note),
            Style::default().fg(theme.muted),
        ));
        f.render_widget(empty, area);
        return;
    };

    let editor = &tab.editor;
    let (scroll_top, scroll_left) = editor.scroll();
    let lines = editor.lines();

    if editor.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("Start typing…", Style::default().fg(theme.muted))),
            area,
        );
    } else {
        let visible: Vec<Line> = lines
            .iter()
            .skip(scroll_top)
            .take(area.height as usize)
            .map(|line| Line::from(visible_slice(line, scroll_left)))
            .collect();
        f.render_widget(Paragraph::new(visible).style(Style::default().fg(theme.foreground)), area);
    }

    if app.panel.is_focused() && !app.dialog.is_open() {
        let cursor = editor.cursor();
        if cursor.row >= scroll_top && cursor.row < scroll_top + area.height as usize {
            let line = lines.get(cursor.row).copied().unwrap_or_default();
            let before: String = line
                .chars()
                .skip(scroll_left)
                .take(cursor.col.saturating_sub(scroll_left))
                .map(|c| if c == '\t' { ' ' } else { c })
                .collect();
            let x = area.x.saturating_add(before.width() as u16);
            let y = area.y + (cursor.row - scroll_top) as u16;
            if x < area.x + area.width {
                f.set_cursor_position((x, y));
            }
        }
    }
}

/// Tabs are drawn as single spaces so columns line up with the cursor.
fn visible_slice(line: &str, scroll_left: usize) -> String {
    line.chars()
        .skip(scroll_left)
        .map(|c| if c == '\t' { ' ' } else { c })
        .collect()
}
