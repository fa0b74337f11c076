use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

pub const CLOSE_MARK: &str = "×";
pub const ADD_BUTTON: &str = "[+]";

/// One tab cell on screen: ` label × `.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabCell {
    pub index: usize,
    pub area: Rect,
    pub close: Rect,
}

/// Where every tab, its close mark and the add button sit in the tab row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabBarLayout {
    pub cells: Vec<TabCell>,
    pub add_button: Rect,
    pub first_visible: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabHit {
    Tab(usize),
    Close(usize),
    Add,
}

fn cell_width(label: &str) -> u16 {
    // space, label, space, ×, space
    (label.width() + 4).min(u16::MAX as usize) as u16
}

impl TabBarLayout {
    /// Lay the labels out left to right in `bar`, followed by the add button.
    /// Leading tabs are skipped when needed to keep the active one on screen.
    pub fn compute(labels: &[&str], active: Option<usize>, bar: Rect) -> Self {
        let add_width = ADD_BUTTON.width() as u16 + 1;
        let widths: Vec<u16> = labels.iter().map(|l| cell_width(l)).collect();

        let mut first_visible = 0;
        if let Some(active) = active.filter(|&a| a < labels.len()) {
            let span = |from: usize| -> u32 {
                widths[from..=active].iter().map(|&w| w as u32 + 1).sum::<u32>() + add_width as u32
            };
            while first_visible < active && span(first_visible) > bar.width as u32 {
                first_visible += 1;
            }
        }

        let right = bar.x.saturating_add(bar.width);
        let mut x = bar.x;
        let mut cells = Vec::new();
        for (index, &w) in widths.iter().enumerate().skip(first_visible) {
            if x >= right {
                break;
            }
            let width = w.min(right - x);
            let close_x = x + w - 2;
            let close = if close_x < right {
                Rect::new(close_x, bar.y, 1, 1)
            } else {
                Rect::default()
            };
            cells.push(TabCell {
                index,
                area: Rect::new(x, bar.y, width, 1),
                close,
            });
            x = x.saturating_add(w + 1);
        }

        let add_x = x.min(right);
        let add_button = Rect::new(add_x, bar.y, (ADD_BUTTON.width() as u16).min(right - add_x), 1);

        Self {
            cells,
            add_button,
            first_visible,
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<TabHit> {
        let inside = |r: &Rect| r.width > 0 && column >= r.x && column < r.x + r.width && row == r.y;
        if inside(&self.add_button) {
            return Some(TabHit::Add);
        }
        for cell in &self.cells {
            if inside(&cell.close) {
                return Some(TabHit::Close(cell.index));
            }
            if inside(&cell.area) {
                return Some(TabHit::Tab(cell.index));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_button_follows_last_tab() {
        let bar = Rect::new(10, 3, 60, 1);
        let layout = TabBarLayout::compute(&["a.txt", "notes.txt"], Some(0), bar);

        assert_eq!(layout.cells.len(), 2);
        assert_eq!(layout.cells[0].area, Rect::new(10, 3, 9, 1));
        assert_eq!(layout.cells[1].area, Rect::new(20, 3, 13, 1));
        assert_eq!(layout.add_button.x, 34);
    }

    #[test]
    fn test_empty_bar_puts_add_button_first() {
        let bar = Rect::new(0, 0, 40, 1);
        let layout = TabBarLayout::compute(&[], None, bar);
        assert!(layout.cells.is_empty());
        assert_eq!(layout.add_button, Rect::new(0, 0, 3, 1));
    }

    #[test]
    fn test_hits() {
        let bar = Rect::new(0, 0, 60, 1);
        let layout = TabBarLayout::compute(&["a.txt", "b.txt"], Some(0), bar);

        assert_eq!(layout.hit(2, 0), Some(TabHit::Tab(0)));
        assert_eq!(layout.hit(7, 0), Some(TabHit::Close(0)));
        assert_eq!(layout.hit(11, 0), Some(TabHit::Tab(1)));
        assert_eq!(layout.hit(layout.add_button.x + 1, 0), Some(TabHit::Add));
        assert_eq!(layout.hit(2, 1), None);
        assert_eq!(layout.hit(55, 0), None);
    }

    #[test]
    fn test_active_tab_scrolled_into_view() {
        let labels = ["first.txt", "second.txt", "third.txt", "fourth.txt"];
        let bar = Rect::new(0, 0, 30, 1);
        let layout = TabBarLayout::compute(&labels, Some(3), bar);

        assert!(layout.first_visible > 0);
        assert!(layout.cells.iter().any(|c| c.index == 3));
        assert_eq!(layout.cells[0].index, layout.first_visible);
    }
}
