use std::fs;
use std::path::{Path, PathBuf};

use crossterm::event::MouseButton;
use ratatui::layout::Rect;

use crate::app::host::Activate;
use crate::config::Config;
use crate::editor::{Editor, InputAction};
use crate::error::{NoteError, Result};
use crate::notes::{NoteStore, TabOrder, TabOrderConfig};

/// Stable identity of a tab: the path of the note file behind it.
pub type NoteId = PathBuf;

#[derive(Debug, Clone)]
pub struct NoteTab {
    store: NoteStore,
    label: String,
    pub editor: Editor,
}

impl NoteTab {
    fn open(path: PathBuf) -> Result<Self> {
        let store = NoteStore::new(path);
        let editor = Editor::from_text(&store.load()?);
        Ok(Self {
            label: store.file_name(),
            store,
            editor,
        })
    }

    pub fn id(&self) -> &Path {
        self.store.path()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Something the user should be told about in a warning dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    DuplicateName { file_name: String },
    InvalidName { name: String },
    MissingFile { path: PathBuf },
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::DuplicateName { .. } => "File Exists",
            Notice::InvalidName { .. } => "Invalid Name",
            Notice::MissingFile { .. } => "File Missing",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::DuplicateName { file_name } => {
                format!("A file with the name {} already exists.", file_name)
            }
            Notice::InvalidName { name } => format!("'{}' cannot be used as a note name.", name),
            Notice::MissingFile { path } => format!("{} does not exist.", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(NoteId),
    Rejected(Notice),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct PanelSettings {
    pub notes_dir: PathBuf,
    pub extension: String,
    pub sidecar: String,
    pub default_note: String,
    pub width: u16,
    pub height: u16,
    pub visible: bool,
}

impl PanelSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            notes_dir: config.notes_path(),
            extension: config.extension.trim_start_matches('.').to_string(),
            sidecar: config.sidecar.clone(),
            default_note: config.default_note.clone(),
            width: config.panel.width,
            height: config.panel.height,
            visible: config.start_visible,
        }
    }
}

/// The floating notes window: an ordered strip of note tabs, each backed by
/// one file, with the order and active tab mirrored to the sidecar file on
/// every structural change.
#[derive(Debug)]
pub struct NotesPanel {
    notes_dir: PathBuf,
    extension: String,
    tab_order: TabOrderConfig,
    tabs: Vec<NoteTab>,
    active: Option<usize>,
    visible: bool,
    focused: bool,
    raised: bool,
    size: (u16, u16),
    position: Option<(i32, i32)>,
    drag_anchor: Option<(u16, u16)>,
}

impl NotesPanel {
    /// Rebuild the tab strip from the sidecar, or from a directory scan when
    /// there is no sidecar yet, and make sure at least one note exists.
    pub fn open(settings: PanelSettings) -> Result<Self> {
        fs::create_dir_all(&settings.notes_dir).map_err(|e| NoteError::io(&settings.notes_dir, e))?;

        let mut panel = Self {
            tab_order: TabOrderConfig::in_dir(&settings.notes_dir, &settings.sidecar),
            notes_dir: settings.notes_dir,
            extension: settings.extension,
            tabs: Vec::new(),
            active: None,
            visible: settings.visible,
            focused: settings.visible,
            raised: settings.visible,
            size: (settings.width, settings.height),
            position: None,
            drag_anchor: None,
        };

        match panel.tab_order.load()? {
            Some(order) => panel.restore(&order)?,
            None => panel.discover()?,
        }

        if panel.tabs.is_empty() {
            panel.add_default_note(&settings.default_note)?;
        }

        log::info!(
            "opened {} with {} tab(s)",
            panel.notes_dir.display(),
            panel.tabs.len()
        );
        Ok(panel)
    }

    fn restore(&mut self, order: &TabOrder) -> Result<()> {
        let files = order.existing_files();
        if files.len() < order.files.len() {
            log::info!(
                "skipped {} missing note(s) listed in {}",
                order.files.len() - files.len(),
                self.tab_order.path().display()
            );
        }
        for path in files {
            self.tabs.push(NoteTab::open(path)?);
        }

        self.active = if self.tabs.is_empty() { None } else { Some(0) };
        match order.active_index() {
            Some(index) if index < self.tabs.len() => self.active = Some(index),
            Some(index) => log::warn!(
                "last active tab {} is out of range for {} restored tab(s), keeping the first",
                index,
                self.tabs.len()
            ),
            None => {}
        }
        Ok(())
    }

    fn discover(&mut self) -> Result<()> {
        let entries = fs::read_dir(&self.notes_dir).map_err(|e| NoteError::io(&self.notes_dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| NoteError::io(&self.notes_dir, e))?.path();
            let is_note = path.is_file()
                && path.extension().is_some_and(|ext| ext.to_string_lossy() == self.extension);
            if is_note {
                self.tabs.push(NoteTab::open(path)?);
            }
        }
        if !self.tabs.is_empty() {
            self.active = Some(0);
        }
        Ok(())
    }

    fn add_default_note(&mut self, name: &str) -> Result<()> {
        let path = self.note_path(name);
        if NoteStore::new(&path).exists() {
            // Listed nowhere but present on disk: adopt it rather than refuse.
            self.tabs.push(NoteTab::open(path)?);
            self.active = Some(self.tabs.len() - 1);
            return self.persist();
        }
        self.add_note(name).map(|_| ())
    }

    fn note_path(&self, name: &str) -> PathBuf {
        self.notes_dir.join(format!("{}.{}", name, self.extension))
    }

    pub fn tabs(&self) -> &[NoteTab] {
        &self.tabs
    }

    pub fn labels(&self) -> Vec<&str> {
        self.tabs.iter().map(NoteTab::label).collect()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_tab(&self) -> Option<&NoteTab> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut NoteTab> {
        let index = self.active?;
        self.tabs.get_mut(index)
    }

    pub fn position_of(&self, id: &Path) -> Option<usize> {
        self.tabs.iter().position(|t| t.id() == id)
    }

    pub fn current_order(&self) -> TabOrder {
        TabOrder::new(
            self.tabs
                .iter()
                .map(|t| t.id().to_string_lossy().to_string())
                .collect(),
            self.active,
        )
    }

    fn persist(&self) -> Result<()> {
        self.tab_order.save(&self.current_order())
    }

    /// Create a tab for `name` plus the note extension. The file itself is
    /// written by the first edit.
    pub fn add_note(&mut self, name: &str) -> Result<AddOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(AddOutcome::Cancelled);
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Ok(AddOutcome::Rejected(Notice::InvalidName { name: name.to_string() }));
        }

        let path = self.note_path(name);
        if path.exists() || self.position_of(&path).is_some() {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            log::info!("refused to add {}: already exists", file_name);
            return Ok(AddOutcome::Rejected(Notice::DuplicateName { file_name }));
        }

        self.tabs.push(NoteTab::open(path.clone())?);
        self.active = Some(self.tabs.len() - 1);
        self.persist()?;
        log::info!("added note {}", path.display());
        Ok(AddOutcome::Added(path))
    }

    /// Remove the tab and its file. Only call this once the user confirmed.
    /// A file that is already gone is reported but does not stop the removal.
    pub fn delete_note(&mut self, id: &Path) -> Result<Option<Notice>> {
        let Some(index) = self.position_of(id) else {
            return Ok(None);
        };

        let tab = self.tabs.remove(index);
        self.active = match self.active {
            _ if self.tabs.is_empty() => None,
            Some(a) if a > index => Some(a - 1),
            Some(a) if a == index => Some(index.min(self.tabs.len() - 1)),
            other => other,
        };

        let notice = if tab.store.delete()? {
            None
        } else {
            Some(Notice::MissingFile { path: tab.id().to_path_buf() })
        };
        self.persist()?;
        log::info!("deleted note {}", tab.id().display());
        Ok(notice)
    }

    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.tabs.len() || self.active == Some(index) {
            return Ok(());
        }
        self.active = Some(index);
        self.persist()
    }

    pub fn next_tab(&mut self) -> Result<()> {
        match self.active {
            Some(a) if !self.tabs.is_empty() => self.select((a + 1) % self.tabs.len()),
            _ => Ok(()),
        }
    }

    pub fn prev_tab(&mut self) -> Result<()> {
        match self.active {
            Some(a) if !self.tabs.is_empty() => {
                self.select((a + self.tabs.len() - 1) % self.tabs.len())
            }
            _ => Ok(()),
        }
    }

    /// Shift the active tab one slot left (`-1`) or right (`1`).
    pub fn move_active(&mut self, delta: isize) -> Result<()> {
        let Some(from) = self.active else {
            return Ok(());
        };
        let Some(to) = from.checked_add_signed(delta).filter(|&to| to < self.tabs.len()) else {
            return Ok(());
        };
        if to == from {
            return Ok(());
        }
        self.tabs.swap(from, to);
        self.active = Some(to);
        self.persist()
    }

    /// Apply an edit to the active tab and flush the full text to disk when
    /// it changed.
    pub fn edit_active(&mut self, action: InputAction) -> Result<bool> {
        let Some(tab) = self.active_tab_mut() else {
            return Ok(false);
        };
        if !tab.editor.apply(action) {
            return Ok(false);
        }
        tab.store.save(&tab.editor.text())?;
        Ok(true)
    }

    pub fn close(&mut self) -> Result<()> {
        self.drag_anchor = None;
        self.persist()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_focused(&self) -> bool {
        self.visible && self.focused
    }

    /// Reports once that the panel was brought to the front.
    pub fn take_raised(&mut self) -> bool {
        std::mem::take(&mut self.raised)
    }

    pub fn position(&self) -> Option<(i32, i32)> {
        self.position
    }

    /// Where the panel lands on `screen`, clipped to it. The first call
    /// centers the panel.
    pub fn place(&mut self, screen: Rect) -> Rect {
        let (w, h) = self.size;
        let (x, y) = *self.position.get_or_insert_with(|| {
            (
                screen.x as i32 + (screen.width as i32 - w as i32).max(0) / 2,
                screen.y as i32 + (screen.height as i32 - h as i32).max(0) / 2,
            )
        });

        let left = x.max(screen.x as i32);
        let top = y.max(screen.y as i32);
        let right = (x + w as i32).min(screen.x as i32 + screen.width as i32);
        let bottom = (y + h as i32).min(screen.y as i32 + screen.height as i32);
        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect::new(left as u16, top as u16, (right - left) as u16, (bottom - top) as u16)
    }

    pub fn begin_drag(&mut self, button: MouseButton, column: u16, row: u16) {
        if button == MouseButton::Left {
            self.drag_anchor = Some((column, row));
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn drag_to(&mut self, column: u16, row: u16) {
        let Some((ax, ay)) = self.drag_anchor else {
            return;
        };
        let (dx, dy) = (column as i32 - ax as i32, row as i32 - ay as i32);
        if let Some((x, y)) = self.position.as_mut() {
            *x += dx;
            *y += dy;
        }
        self.drag_anchor = Some((column, row));
    }

    pub fn end_drag(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.drag_anchor = None;
        }
    }
}

impl Activate for NotesPanel {
    fn activate(&mut self) {
        if self.visible {
            self.visible = false;
            self.focused = false;
            self.drag_anchor = None;
            log::debug!("panel hidden");
        } else {
            self.visible = true;
            self.raised = true;
            self.focused = true;
            log::debug!("panel shown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::CursorMove;
    use tempfile::{tempdir, TempDir};

    fn settings(dir: &TempDir) -> PanelSettings {
        PanelSettings {
            notes_dir: dir.path().join("data"),
            extension: "txt".to_string(),
            sidecar: "config.json".to_string(),
            default_note: "notes".to_string(),
            width: 40,
            height: 10,
            visible: true,
        }
    }

    fn sidecar(dir: &TempDir) -> TabOrder {
        TabOrderConfig::in_dir(&dir.path().join("data"), "config.json")
            .load()
            .unwrap()
            .expect("sidecar written")
    }

    fn note(dir: &TempDir, name: &str) -> PathBuf {
        dir.path().join("data").join(name)
    }

    fn write_note(dir: &TempDir, name: &str, text: &str) {
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(note(dir, name), text).unwrap();
    }

    #[test]
    fn test_empty_dir_gets_default_note() {
        let dir = tempdir().unwrap();
        let panel = NotesPanel::open(settings(&dir)).unwrap();

        assert_eq!(panel.labels(), vec!["notes.txt"]);
        assert_eq!(panel.active_index(), Some(0));
        assert!(!note(&dir, "notes.txt").exists());
        let order = sidecar(&dir);
        assert_eq!(order.files, vec![note(&dir, "notes.txt").to_string_lossy().to_string()]);
        assert_eq!(order.last_active, 0);
    }

    #[test]
    fn test_scan_without_sidecar_only_takes_note_files() {
        let dir = tempdir().unwrap();
        write_note(&dir, "a.txt", "alpha");
        write_note(&dir, "b.txt", "beta");
        write_note(&dir, "image.png", "");

        let panel = NotesPanel::open(settings(&dir)).unwrap();
        let mut labels = panel.labels();
        labels.sort();
        assert_eq!(labels, vec!["a.txt", "b.txt"]);
        assert!(!dir.path().join("data").join("config.json").exists());
    }

    #[test]
    fn test_scan_skips_directories_with_note_extension() {
        let dir = tempdir().unwrap();
        write_note(&dir, "a.txt", "alpha");
        fs::create_dir(note(&dir, "archive.txt")).unwrap();

        let panel = NotesPanel::open(settings(&dir)).unwrap();
        assert_eq!(panel.labels(), vec!["a.txt"]);
    }

    #[test]
    fn test_loaded_text_matches_file() {
        let dir = tempdir().unwrap();
        write_note(&dir, "a.txt", "line one\nline two\n");
        let panel = NotesPanel::open(settings(&dir)).unwrap();
        assert_eq!(panel.active_tab().unwrap().editor.text(), "line one\nline two\n");
    }

    #[test]
    fn test_add_note_appends_and_persists() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();

        let outcome = panel.add_note("groceries").unwrap();
        assert_eq!(outcome, AddOutcome::Added(note(&dir, "groceries.txt")));
        assert_eq!(panel.labels(), vec!["notes.txt", "groceries.txt"]);
        assert_eq!(panel.active_index(), Some(1));

        let order = sidecar(&dir);
        assert_eq!(
            order.files.last().unwrap(),
            &note(&dir, "groceries.txt").to_string_lossy().to_string()
        );
        assert!(!note(&dir, "groceries.txt").exists());
    }

    #[test]
    fn test_add_duplicate_is_rejected_without_changes() {
        let dir = tempdir().unwrap();
        write_note(&dir, "todo.txt", "x");
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        panel.add_note("other").unwrap();
        let before = sidecar(&dir);

        let outcome = panel.add_note("todo").unwrap();
        assert_eq!(
            outcome,
            AddOutcome::Rejected(Notice::DuplicateName { file_name: "todo.txt".to_string() })
        );
        assert_eq!(panel.labels(), vec!["todo.txt", "other.txt"]);
        assert_eq!(sidecar(&dir), before);
    }

    #[test]
    fn test_add_same_unsaved_name_twice_is_rejected() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        assert!(matches!(panel.add_note("draft").unwrap(), AddOutcome::Added(_)));
        assert!(matches!(panel.add_note("draft").unwrap(), AddOutcome::Rejected(_)));
        assert_eq!(panel.tabs().len(), 2);
    }

    #[test]
    fn test_add_blank_or_bad_name() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();

        assert_eq!(panel.add_note("   ").unwrap(), AddOutcome::Cancelled);
        assert!(matches!(
            panel.add_note("../escape").unwrap(),
            AddOutcome::Rejected(Notice::InvalidName { .. })
        ));
        assert_eq!(panel.tabs().len(), 1);
    }

    #[test]
    fn test_delete_removes_tab_file_and_entry() {
        let dir = tempdir().unwrap();
        write_note(&dir, "a.txt", "alpha");
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        panel.add_note("b").unwrap();

        let notice = panel.delete_note(&note(&dir, "a.txt")).unwrap();
        assert_eq!(notice, None);
        assert_eq!(panel.labels(), vec!["b.txt"]);
        assert!(!note(&dir, "a.txt").exists());
        let order = sidecar(&dir);
        assert_eq!(order.files, vec![note(&dir, "b.txt").to_string_lossy().to_string()]);
        assert_eq!(order.last_active, 0);
    }

    #[test]
    fn test_delete_unsaved_note_warns_but_removes() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        panel.add_note("scratch").unwrap();

        let notice = panel.delete_note(&note(&dir, "scratch.txt")).unwrap();
        assert_eq!(notice, Some(Notice::MissingFile { path: note(&dir, "scratch.txt") }));
        assert_eq!(panel.labels(), vec!["notes.txt"]);
    }

    #[test]
    fn test_delete_last_tab_leaves_no_active() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        panel.delete_note(&note(&dir, "notes.txt")).unwrap();

        assert!(panel.tabs().is_empty());
        assert_eq!(panel.active_index(), None);
        assert_eq!(sidecar(&dir), TabOrder::new(Vec::new(), None));

        // An empty strip on the next start falls back to the default note.
        let panel = NotesPanel::open(settings(&dir)).unwrap();
        assert_eq!(panel.labels(), vec!["notes.txt"]);
    }

    #[test]
    fn test_delete_shifts_active_index() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        panel.add_note("b").unwrap();
        panel.add_note("c").unwrap();
        assert_eq!(panel.active_index(), Some(2));

        panel.delete_note(&note(&dir, "notes.txt")).unwrap();
        assert_eq!(panel.active_index(), Some(1));
        assert_eq!(panel.active_tab().unwrap().label(), "c.txt");

        panel.delete_note(&note(&dir, "c.txt")).unwrap();
        assert_eq!(panel.active_tab().unwrap().label(), "b.txt");
    }

    #[test]
    fn test_round_trip_order_and_active() {
        let dir = tempdir().unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            write_note(&dir, name, name);
        }
        let files: Vec<String> = ["a.txt", "b.txt", "c.txt"]
            .iter()
            .map(|n| note(&dir, n).to_string_lossy().to_string())
            .collect();
        TabOrderConfig::in_dir(&dir.path().join("data"), "config.json")
            .save(&TabOrder::new(files, Some(1)))
            .unwrap();

        let panel = NotesPanel::open(settings(&dir)).unwrap();
        assert_eq!(panel.labels(), vec!["a.txt", "b.txt", "c.txt"]);
        assert_eq!(panel.active_tab().unwrap().label(), "b.txt");
    }

    #[test]
    fn test_missing_middle_file_keeps_literal_index() {
        let dir = tempdir().unwrap();
        write_note(&dir, "a.txt", "");
        write_note(&dir, "c.txt", "");
        let files: Vec<String> = ["a.txt", "b.txt", "c.txt"]
            .iter()
            .map(|n| note(&dir, n).to_string_lossy().to_string())
            .collect();
        TabOrderConfig::in_dir(&dir.path().join("data"), "config.json")
            .save(&TabOrder::new(files, Some(1)))
            .unwrap();

        let panel = NotesPanel::open(settings(&dir)).unwrap();
        assert_eq!(panel.labels(), vec!["a.txt", "c.txt"]);
        // Index 1 pointed at b; it now lands on c.
        assert_eq!(panel.active_index(), Some(1));
    }

    #[test]
    fn test_out_of_range_active_keeps_first_tab() {
        let dir = tempdir().unwrap();
        write_note(&dir, "a.txt", "");
        let files = vec![
            note(&dir, "a.txt").to_string_lossy().to_string(),
            note(&dir, "gone.txt").to_string_lossy().to_string(),
        ];
        TabOrderConfig::in_dir(&dir.path().join("data"), "config.json")
            .save(&TabOrder::new(files, Some(1)))
            .unwrap();

        let panel = NotesPanel::open(settings(&dir)).unwrap();
        assert_eq!(panel.active_index(), Some(0));
    }

    #[test]
    fn test_malformed_sidecar_fails_startup() {
        let dir = tempdir().unwrap();
        write_note(&dir, "config.json", "not json");
        let err = NotesPanel::open(settings(&dir)).unwrap_err();
        assert!(matches!(err, NoteError::MalformedConfig { .. }));
    }

    #[test]
    fn test_every_edit_is_on_disk() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        let path = note(&dir, "notes.txt");

        let mut typed = String::new();
        for c in "hi there".chars() {
            assert!(panel.edit_active(InputAction::InsertChar(c)).unwrap());
            typed.push(c);
            assert_eq!(fs::read_to_string(&path).unwrap(), typed);
        }
        panel.edit_active(InputAction::InsertNewline).unwrap();
        panel.edit_active(InputAction::DeleteCharBefore).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hi there");
    }

    #[test]
    fn test_cursor_moves_do_not_write() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        assert!(!panel.edit_active(InputAction::Move(CursorMove::Top)).unwrap());
        assert!(!note(&dir, "notes.txt").exists());
    }

    #[test]
    fn test_select_and_move_persist() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        panel.add_note("b").unwrap();
        panel.add_note("c").unwrap();

        panel.select(0).unwrap();
        assert_eq!(sidecar(&dir).last_active, 0);

        panel.move_active(1).unwrap();
        assert_eq!(panel.labels(), vec!["b.txt", "notes.txt", "c.txt"]);
        assert_eq!(panel.active_index(), Some(1));
        assert_eq!(sidecar(&dir), panel.current_order());

        panel.move_active(-1).unwrap();
        panel.move_active(-1).unwrap();
        assert_eq!(panel.labels(), vec!["notes.txt", "b.txt", "c.txt"]);
        assert_eq!(panel.active_index(), Some(0));
    }

    #[test]
    fn test_next_prev_wrap() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        panel.add_note("b").unwrap();

        panel.next_tab().unwrap();
        assert_eq!(panel.active_index(), Some(0));
        panel.prev_tab().unwrap();
        assert_eq!(panel.active_index(), Some(1));
    }

    #[test]
    fn test_close_persists_final_state() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        panel.add_note("b").unwrap();
        fs::remove_file(dir.path().join("data").join("config.json")).unwrap();

        panel.close().unwrap();
        assert_eq!(sidecar(&dir), panel.current_order());
    }

    #[test]
    fn test_toggle_shows_and_focuses() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        assert!(panel.take_raised());
        assert!(!panel.take_raised());

        panel.activate();
        assert!(!panel.is_visible());
        assert!(!panel.is_focused());

        panel.activate();
        assert!(panel.is_visible());
        assert!(panel.is_focused());
        assert!(panel.take_raised());
    }

    #[test]
    fn test_drag_moves_by_pointer_delta() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        let screen = Rect::new(0, 0, 100, 30);
        assert_eq!(panel.place(screen), Rect::new(30, 10, 40, 10));

        panel.begin_drag(MouseButton::Left, 35, 10);
        panel.drag_to(40, 12);
        panel.drag_to(38, 12);
        assert_eq!(panel.position(), Some((33, 12)));

        panel.end_drag(MouseButton::Left);
        panel.drag_to(0, 0);
        assert_eq!(panel.position(), Some((33, 12)));
    }

    #[test]
    fn test_only_primary_button_drags() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        panel.place(Rect::new(0, 0, 100, 30));

        panel.begin_drag(MouseButton::Right, 35, 10);
        assert!(!panel.is_dragging());
        panel.drag_to(50, 20);
        assert_eq!(panel.position(), Some((30, 10)));
    }

    #[test]
    fn test_drag_is_not_clamped_but_placement_clips() {
        let dir = tempdir().unwrap();
        let mut panel = NotesPanel::open(settings(&dir)).unwrap();
        let screen = Rect::new(0, 0, 100, 30);
        panel.place(screen);

        panel.begin_drag(MouseButton::Left, 31, 10);
        panel.drag_to(1, 10);
        panel.drag_to(0, 10);
        assert_eq!(panel.position(), Some((-1, 10)));
        assert_eq!(panel.place(screen), Rect::new(0, 10, 39, 10));
    }
}
