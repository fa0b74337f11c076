mod buffer;
mod input;

pub use buffer::TextBuffer;
pub use input::{process_key, InputAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Forward,
    Back,
    Up,
    Down,
    Head,
    End,
    Top,
    Bottom,
}

/// Plain-text editing surface of one note tab.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    buffer: TextBuffer,
    cursor: Position,
    scroll_top: usize,
    scroll_left: usize,
}

impl Editor {
    /// The cursor starts at the end of the text.
    pub fn from_text(text: &str) -> Self {
        let mut editor = Self {
            buffer: TextBuffer::from_text(text),
            ..Self::default()
        };
        editor.move_cursor(CursorMove::Bottom);
        editor
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn lines(&self) -> Vec<&str> {
        self.buffer.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn scroll(&self) -> (usize, usize) {
        (self.scroll_top, self.scroll_left)
    }

    /// Apply one action; returns true when the text changed.
    pub fn apply(&mut self, action: InputAction) -> bool {
        let Position { row, col } = self.cursor;
        match action {
            InputAction::InsertChar(c) => {
                self.buffer.insert_char(row, col, c);
                self.cursor.col += 1;
                true
            }
            InputAction::InsertText(text) => self.insert_text(&text),
            InputAction::InsertNewline => {
                self.buffer.split_line(row, col);
                self.cursor = Position::new(row + 1, 0);
                true
            }
            InputAction::DeleteChar => {
                if col < self.buffer.line_len(row) {
                    self.buffer.delete_char(row, col).is_some()
                } else if row + 1 < self.buffer.line_count() {
                    self.buffer.join_with_previous(row + 1)
                } else {
                    false
                }
            }
            InputAction::DeleteCharBefore => {
                if col > 0 {
                    self.buffer.delete_char(row, col - 1);
                    self.cursor.col -= 1;
                    true
                } else if row > 0 {
                    let prev_len = self.buffer.line_len(row - 1);
                    self.buffer.join_with_previous(row);
                    self.cursor = Position::new(row - 1, prev_len);
                    true
                } else {
                    false
                }
            }
            InputAction::Move(movement) => {
                self.move_cursor(movement);
                false
            }
            InputAction::None => false,
        }
    }

    fn insert_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        for (i, chunk) in text.split('\n').enumerate() {
            if i > 0 {
                self.buffer.split_line(self.cursor.row, self.cursor.col);
                self.cursor = Position::new(self.cursor.row + 1, 0);
            }
            self.buffer.insert_str(self.cursor.row, self.cursor.col, chunk);
            self.cursor.col += chunk.chars().count();
        }
        true
    }

    pub fn move_cursor(&mut self, movement: CursorMove) {
        let Position { row, col } = self.cursor;
        let last_row = self.buffer.line_count().saturating_sub(1);
        self.cursor = match movement {
            CursorMove::Forward if col < self.buffer.line_len(row) => Position::new(row, col + 1),
            CursorMove::Forward if row < last_row => Position::new(row + 1, 0),
            CursorMove::Back if col > 0 => Position::new(row, col - 1),
            CursorMove::Back if row > 0 => Position::new(row - 1, self.buffer.line_len(row - 1)),
            CursorMove::Up if row > 0 => Position::new(row - 1, col.min(self.buffer.line_len(row - 1))),
            CursorMove::Down if row < last_row => {
                Position::new(row + 1, col.min(self.buffer.line_len(row + 1)))
            }
            CursorMove::Head => Position::new(row, 0),
            CursorMove::End => Position::new(row, self.buffer.line_len(row)),
            CursorMove::Top => Position::new(0, 0),
            CursorMove::Bottom => Position::new(last_row, self.buffer.line_len(last_row)),
            _ => self.cursor,
        };
    }

    /// Keep the cursor inside a `width` x `height` viewport.
    pub fn scroll_to_cursor(&mut self, width: usize, height: usize) {
        let Position { row, col } = self.cursor;
        if height > 0 {
            if row < self.scroll_top {
                self.scroll_top = row;
            } else if row >= self.scroll_top + height {
                self.scroll_top = row + 1 - height;
            }
        }
        if width > 0 {
            if col < self.scroll_left {
                self.scroll_left = col;
            } else if col >= self.scroll_left + width {
                self.scroll_left = col + 1 - width;
            }
        }
    }
}
