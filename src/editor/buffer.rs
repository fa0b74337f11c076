use std::cmp::Ordering;

/// Line-based gap buffer backing a note's editing surface.
/// `before` holds the lines up to the gap, `after` the rest in reverse, so
/// edits around the cursor line stay cheap.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    before: Vec<String>,
    after: Vec<String>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            before: vec![String::new()],
            after: Vec::new(),
        }
    }
}

impl TextBuffer {
    /// Split on `\n` only, so `text()` gives back exactly what was loaded,
    /// trailing newline included.
    pub fn from_text(text: &str) -> Self {
        Self {
            before: text.split('\n').map(str::to_string).collect(),
            after: Vec::new(),
        }
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.before.len() + self.after.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_count() == 1 && self.line(0).map_or(true, str::is_empty)
    }

    #[inline]
    fn gap_pos(&self) -> usize {
        self.before.len()
    }

    fn move_gap_to(&mut self, row: usize) {
        let current = self.gap_pos();
        match row.cmp(&current) {
            Ordering::Equal => {}
            Ordering::Less => {
                for _ in row..current {
                    if let Some(line) = self.before.pop() {
                        self.after.push(line);
                    }
                }
            }
            Ordering::Greater => {
                let target = row.min(self.line_count());
                for _ in current..target {
                    if let Some(line) = self.after.pop() {
                        self.before.push(line);
                    }
                }
            }
        }
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        let gap_pos = self.gap_pos();
        if row < gap_pos {
            self.before.get(row).map(|s| s.as_str())
        } else {
            let after_idx = self.after.len().checked_sub(row - gap_pos + 1)?;
            self.after.get(after_idx).map(|s| s.as_str())
        }
    }

    fn line_mut(&mut self, row: usize) -> Option<&mut String> {
        self.move_gap_to(row + 1);
        self.before.get_mut(row)
    }

    pub fn line_len(&self, row: usize) -> usize {
        self.line(row).map_or(0, |l| l.chars().count())
    }

    pub fn lines(&self) -> Vec<&str> {
        self.before
            .iter()
            .chain(self.after.iter().rev())
            .map(|s| s.as_str())
            .collect()
    }

    pub fn insert_char(&mut self, row: usize, col: usize, c: char) {
        if let Some(line) = self.line_mut(row) {
            let byte_idx = char_to_byte_index(line, col);
            line.insert(byte_idx, c);
        }
    }

    pub fn insert_str(&mut self, row: usize, col: usize, s: &str) {
        if let Some(line) = self.line_mut(row) {
            let byte_idx = char_to_byte_index(line, col);
            line.insert_str(byte_idx, s);
        }
    }

    pub fn delete_char(&mut self, row: usize, col: usize) -> Option<char> {
        let line = self.line_mut(row)?;
        if col < line.chars().count() {
            let byte_idx = char_to_byte_index(line, col);
            return Some(line.remove(byte_idx));
        }
        None
    }

    pub fn split_line(&mut self, row: usize, col: usize) -> bool {
        self.move_gap_to(row + 1);
        if let Some(line) = self.before.get_mut(row) {
            let byte_idx = char_to_byte_index(line, col);
            let remainder = line.split_off(byte_idx);
            self.before.push(remainder);
            return true;
        }
        false
    }

    pub fn join_with_previous(&mut self, row: usize) -> bool {
        if row == 0 || row >= self.line_count() {
            return false;
        }
        self.move_gap_to(row + 1);
        if let Some(current_line) = self.before.pop() {
            if let Some(prev_line) = self.before.last_mut() {
                prev_line.push_str(&current_line);
                return true;
            }
            self.before.push(current_line);
        }
        false
    }
}

fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buf = TextBuffer::default();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line(0), Some(""));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_from_text_keeps_exact_text() {
        let text = "groceries\n- milk\n\n";
        let buf = TextBuffer::from_text(text);
        assert_eq!(buf.line_count(), 4);
        assert_eq!(buf.line(1), Some("- milk"));
        assert_eq!(buf.text(), text);
    }

    #[test]
    fn test_insert_char() {
        let mut buf = TextBuffer::from_text("hello");
        buf.insert_char(0, 5, '!');
        assert_eq!(buf.line(0), Some("hello!"));
    }

    #[test]
    fn test_insert_multibyte() {
        let mut buf = TextBuffer::from_text("cafe");
        buf.delete_char(0, 3);
        buf.insert_char(0, 3, 'é');
        buf.insert_str(0, 0, "☕ ");
        assert_eq!(buf.text(), "☕ café");
        assert_eq!(buf.line_len(0), 6);
    }

    #[test]
    fn test_delete_char() {
        let mut buf = TextBuffer::from_text("hello");
        assert_eq!(buf.delete_char(0, 4), Some('o'));
        assert_eq!(buf.delete_char(0, 4), None);
        assert_eq!(buf.line(0), Some("hell"));
    }

    #[test]
    fn test_split_line() {
        let mut buf = TextBuffer::from_text("hello world");
        buf.split_line(0, 5);
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line(0), Some("hello"));
        assert_eq!(buf.line(1), Some(" world"));
    }

    #[test]
    fn test_join_lines() {
        let mut buf = TextBuffer::from_text("one\nhello\n world\nlast");
        assert!(buf.join_with_previous(2));
        assert_eq!(buf.text(), "one\nhello world\nlast");
        assert!(!buf.join_with_previous(0));
    }

    #[test]
    fn test_edits_across_gap() {
        let mut buf = TextBuffer::from_text("a\nb\nc\nd");
        buf.insert_char(3, 1, '!');
        buf.insert_char(0, 0, '>');
        buf.split_line(1, 1);
        assert_eq!(buf.text(), ">a\nb\n\nc\nd!");
        assert_eq!(buf.lines(), vec![">a", "b", "", "c", "d!"]);
    }
}
