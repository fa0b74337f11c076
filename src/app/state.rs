use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::host::{KeyCombo, KeyHost};
use crate::app::panel::{AddOutcome, NoteId, NotesPanel, Notice, PanelSettings};
use crate::app::tab_bar::{TabBarLayout, TabHit};
use crate::config::{Config, KeyConfig, Theme};
use crate::editor::{process_key, InputAction};
use crate::error::{NoteError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dialog {
    #[default]
    None,
    NewNote,
    ConfirmDelete { id: NoteId, file_name: String },
    Warning { title: &'static str, message: String },
    Error { message: String },
}

impl Dialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::None)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Keymap {
    pub new_note: KeyCombo,
    pub delete_note: KeyCombo,
    pub quit: KeyCombo,
}

fn combo_or(value: &str, fallback: &str) -> KeyCombo {
    value.parse().unwrap_or_else(|e| {
        log::warn!("{}, falling back to {}", e, fallback);
        fallback
            .parse()
            .unwrap_or(KeyCombo::new(KeyCode::Null, KeyModifiers::NONE))
    })
}

impl Keymap {
    fn from_config(keys: &KeyConfig) -> Self {
        let defaults = KeyConfig::default();
        Self {
            new_note: combo_or(&keys.new_note, &defaults.new_note),
            delete_note: combo_or(&keys.delete_note, &defaults.delete_note),
            quit: combo_or(&keys.quit, &defaults.quit),
        }
    }
}

/// Application context, built once at startup and passed around explicitly.
pub struct App {
    pub panel: NotesPanel,
    pub host: KeyHost,
    pub keys: Keymap,
    pub theme: Theme,
    pub dialog: Dialog,
    pub input_buffer: String,
    pub panel_area: Rect,
    pub tab_bar: TabBarLayout,
    pub editor_area: Rect,
    pub needs_full_clear: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let panel = NotesPanel::open(PanelSettings::from_config(&config))?;

        let mut host = KeyHost::new();
        host.set_activate_shortcut(combo_or(&config.keys.toggle, &KeyConfig::default().toggle));

        Ok(Self {
            panel,
            host,
            keys: Keymap::from_config(&config.keys),
            theme: Theme::default(),
            dialog: Dialog::None,
            input_buffer: String::new(),
            panel_area: Rect::default(),
            tab_bar: TabBarLayout::default(),
            editor_area: Rect::default(),
            needs_full_clear: true,
            should_quit: false,
        })
    }

    /// Work out where the panel, tab row and editor sit on `screen`.
    pub fn layout(&mut self, screen: Rect) {
        if self.panel.take_raised() {
            self.needs_full_clear = true;
        }
        self.panel_area = self.panel.place(screen);
        let inner = Rect::new(
            self.panel_area.x.saturating_add(1),
            self.panel_area.y.saturating_add(1),
            self.panel_area.width.saturating_sub(2),
            self.panel_area.height.saturating_sub(2),
        );
        let bar = Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), inner.height.min(1));
        self.tab_bar = TabBarLayout::compute(&self.panel.labels(), self.panel.active_index(), bar);
        self.editor_area = Rect::new(
            inner.x + 1,
            inner.y.saturating_add(2),
            inner.width.saturating_sub(2),
            inner.height.saturating_sub(2),
        );

        let (width, height) = (self.editor_area.width as usize, self.editor_area.height as usize);
        if let Some(tab) = self.panel.active_tab_mut() {
            tab.editor.scroll_to_cursor(width, height);
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        let result = match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Paste(text) => self.handle_paste(&text),
            Event::Resize(..) => {
                self.needs_full_clear = true;
                Ok(())
            }
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.report_error(err);
        }
    }

    pub fn report_error(&mut self, err: NoteError) {
        log::error!("operation aborted: {}", err);
        self.dialog = Dialog::Error { message: err.to_string() };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.dialog.is_open() {
            return self.handle_dialog_key(key);
        }
        if self.keys.quit.matches(&key) {
            self.should_quit = true;
            return Ok(());
        }
        if self.host.dispatch(&key, &mut self.panel) {
            return Ok(());
        }
        if !self.panel.is_focused() {
            return Ok(());
        }

        if self.keys.new_note.matches(&key) {
            self.open_new_note_prompt();
            return Ok(());
        }
        if self.keys.delete_note.matches(&key) {
            if let Some(index) = self.panel.active_index() {
                self.request_delete(index);
            }
            return Ok(());
        }

        let ctrl = key.modifiers == KeyModifiers::CONTROL;
        let alt = key.modifiers == KeyModifiers::ALT;
        let alt_shift = key.modifiers == KeyModifiers::ALT | KeyModifiers::SHIFT;
        match key.code {
            KeyCode::PageDown if ctrl => self.panel.next_tab(),
            KeyCode::PageUp if ctrl => self.panel.prev_tab(),
            KeyCode::Right if alt => self.panel.next_tab(),
            KeyCode::Left if alt => self.panel.prev_tab(),
            KeyCode::Right if alt_shift => self.panel.move_active(1),
            KeyCode::Left if alt_shift => self.panel.move_active(-1),
            _ => self.panel.edit_active(process_key(key)).map(|_| ()),
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) -> Result<()> {
        match std::mem::take(&mut self.dialog) {
            Dialog::NewNote => match key.code {
                KeyCode::Enter => {
                    let name = std::mem::take(&mut self.input_buffer);
                    self.submit_new_note(&name)?;
                }
                KeyCode::Esc => self.input_buffer.clear(),
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                    self.dialog = Dialog::NewNote;
                }
                KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                    self.input_buffer.push(c);
                    self.dialog = Dialog::NewNote;
                }
                _ => self.dialog = Dialog::NewNote,
            },
            Dialog::ConfirmDelete { id, file_name } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    if let Some(notice) = self.panel.delete_note(&id)? {
                        self.show_notice(notice);
                    }
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    log::debug!("kept {}", file_name);
                }
                _ => self.dialog = Dialog::ConfirmDelete { id, file_name },
            },
            Dialog::Warning { .. } | Dialog::Error { .. } | Dialog::None => {}
        }
        Ok(())
    }

    pub fn open_new_note_prompt(&mut self) {
        self.input_buffer.clear();
        self.dialog = Dialog::NewNote;
    }

    /// An empty name is the same as cancelling the prompt.
    pub fn submit_new_note(&mut self, name: &str) -> Result<()> {
        match self.panel.add_note(name)? {
            AddOutcome::Rejected(notice) => self.show_notice(notice),
            AddOutcome::Added(_) | AddOutcome::Cancelled => {}
        }
        Ok(())
    }

    pub fn request_delete(&mut self, index: usize) {
        if let Some(tab) = self.panel.tabs().get(index) {
            self.dialog = Dialog::ConfirmDelete {
                id: tab.id().to_path_buf(),
                file_name: tab.label().to_string(),
            };
        }
    }

    fn show_notice(&mut self, notice: Notice) {
        self.dialog = Dialog::Warning {
            title: notice.title(),
            message: notice.message(),
        };
    }

    fn handle_paste(&mut self, text: &str) -> Result<()> {
        match self.dialog {
            Dialog::NewNote => {
                let first_line = text.lines().next().unwrap_or_default();
                self.input_buffer.push_str(first_line);
                Ok(())
            }
            Dialog::None if self.panel.is_focused() => {
                self.panel.edit_active(InputAction::InsertText(text.to_string())).map(|_| ())
            }
            _ => Ok(()),
        }
    }

    fn on_frame(&self, column: u16, row: u16) -> bool {
        let area = self.panel_area;
        if area.width == 0 || area.height == 0 {
            return false;
        }
        let inside = column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height;
        let on_border = column == area.x
            || column == area.x + area.width - 1
            || row == area.y
            || row == area.y + area.height - 1;
        // the tab row and the rule under it act as a title bar
        let on_title = row == area.y + 1 || row == area.y + 2;
        inside && (on_border || on_title)
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.dialog.is_open() || !self.panel.is_visible() {
            return Ok(());
        }
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(button) => {
                if button == MouseButton::Left {
                    match self.tab_bar.hit(column, row) {
                        Some(TabHit::Tab(index)) => return self.panel.select(index),
                        Some(TabHit::Close(index)) => {
                            self.request_delete(index);
                            return Ok(());
                        }
                        Some(TabHit::Add) => {
                            self.open_new_note_prompt();
                            return Ok(());
                        }
                        None => {}
                    }
                }
                if self.on_frame(column, row) {
                    self.panel.begin_drag(button, column, row);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if self.panel.is_dragging() => {
                let before = self.panel.position();
                self.panel.drag_to(column, row);
                if self.panel.position() != before {
                    self.needs_full_clear = true;
                }
            }
            MouseEventKind::Up(button) => self.panel.end_drag(button),
            _ => {}
        }
        Ok(())
    }

    /// Persist the final tab order before exit.
    pub fn shutdown(&mut self) -> Result<()> {
        self.panel.close()
    }
}
