#![forbid(unsafe_code)]

//! Scroll state shared by every list-like widget.
//!
//! [`ViewportState`] tracks a cursor (`current_item`) within a list of
//! `list_size` items, the first visible item (`current_top`), the cursor's
//! row within the window (`current_high`), and a horizontal offset
//! (`left_char`). Widgets own one and call its operations; none of them
//! re-implement the arithmetic.
//!
//! # Invariants
//!
//! For a non-empty list with at least one available row, after every
//! operation:
//!
//! 1. `current_item < list_size`
//! 2. `current_top <= max_top_item`
//! 3. `current_high < view_size`
//! 4. `current_item == current_top + current_high`
//! 5. `left_char <= max_left_char`
//!
//! An empty list keeps every position at zero and refuses every movement.
//!
//! Movement operations return `false` when they are refused; the caller
//! turns that into an audible reject.

use std::ops::Range;

/// Scroll position of a list viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    rows: usize,
    list_size: usize,
    view_size: usize,
    max_top_item: usize,
    current_top: usize,
    current_item: usize,
    current_high: usize,
    left_char: usize,
    max_left_char: usize,
    step: f64,
    toggle_size: usize,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ViewportState {
    /// An empty viewport with `rows` rows available for items.
    #[must_use]
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            list_size: 0,
            view_size: 0,
            max_top_item: 0,
            current_top: 0,
            current_item: 0,
            current_high: 0,
            left_char: 0,
            max_left_char: 0,
            step: 1.0,
            toggle_size: 1,
        }
    }

    /// A viewport over `list_size` items with `rows` rows available.
    #[must_use]
    pub fn with_list(rows: usize, list_size: usize) -> Self {
        let mut state = Self::new(rows);
        state.set_view_size(list_size);
        state
    }

    #[inline]
    pub const fn list_size(&self) -> usize {
        self.list_size
    }

    #[inline]
    pub const fn available_rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub const fn view_size(&self) -> usize {
        self.view_size
    }

    #[inline]
    pub const fn max_top_item(&self) -> usize {
        self.max_top_item
    }

    #[inline]
    pub const fn current_top(&self) -> usize {
        self.current_top
    }

    #[inline]
    pub const fn current_item(&self) -> usize {
        self.current_item
    }

    #[inline]
    pub const fn current_high(&self) -> usize {
        self.current_high
    }

    #[inline]
    pub const fn left_char(&self) -> usize {
        self.left_char
    }

    #[inline]
    pub const fn max_left_char(&self) -> usize {
        self.max_left_char
    }

    /// Scrollbar rows per item.
    #[inline]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Scrollbar thumb length in rows.
    #[inline]
    pub const fn toggle_size(&self) -> usize {
        self.toggle_size
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.list_size == 0
    }

    /// Item indices currently inside the window.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.current_top + self.view_size).min(self.list_size);
        self.current_top..end
    }

    fn can_move(&self) -> bool {
        self.list_size > 0 && self.view_size > 0
    }

    fn last_item(&self) -> usize {
        self.list_size.saturating_sub(1)
    }

    fn page(&self) -> usize {
        self.view_size.saturating_sub(1).max(1)
    }

    /// Change the number of rows available (e.g. after a resize) and
    /// recompute the window for the current list.
    pub fn set_available_rows(&mut self, rows: usize) {
        self.rows = rows;
        self.set_view_size(self.list_size);
    }

    /// Recompute window geometry for a list of `list_size` items.
    ///
    /// The cursor is kept where possible and clamped otherwise.
    pub fn set_view_size(&mut self, list_size: usize) {
        self.list_size = list_size;
        self.view_size = self.rows.min(list_size);
        self.max_top_item = list_size.saturating_sub(self.view_size);

        if list_size > 0 && self.rows > 0 {
            self.step = self.rows as f64 / list_size as f64;
            self.toggle_size = if list_size > self.rows {
                1
            } else {
                self.step.ceil() as usize
            };
        } else {
            self.step = 1.0;
            self.toggle_size = 1;
        }

        self.current_top = self.current_top.min(self.max_top_item);
        let item = self.current_item.min(self.last_item());
        self.set_position(item);
    }

    /// Widest horizontal scroll offset allowed.
    pub fn set_max_left_char(&mut self, max_left_char: usize) {
        self.max_left_char = max_left_char;
        self.left_char = self.left_char.min(max_left_char);
    }

    /// Put the cursor on `item`, scrolling the window as little as possible.
    ///
    /// Out-of-range positions clamp to the first or last item. When the
    /// target lies above or below the window, the window scrolls so the
    /// target is its last visible row (or as close as the top allows).
    pub fn set_position(&mut self, item: usize) {
        if !self.can_move() {
            self.current_top = 0;
            self.current_item = 0;
            self.current_high = 0;
            return;
        }
        let last = self.last_item();
        if item == 0 {
            self.current_top = 0;
            self.current_item = 0;
            self.current_high = 0;
        } else if item >= last {
            self.current_top = self.max_top_item;
            self.current_item = last;
            self.current_high = last - self.current_top;
        } else if item >= self.current_top && item < self.current_top + self.view_size {
            self.current_item = item;
            self.current_high = item - self.current_top;
        } else {
            self.current_top = (item + 1).saturating_sub(self.view_size);
            self.current_item = item;
            self.current_high = item - self.current_top;
        }
    }

    /// Move the cursor up one item.
    pub fn up(&mut self) -> bool {
        if !self.can_move() || self.current_item == 0 {
            return false;
        }
        self.current_item -= 1;
        if self.current_high > 0 {
            self.current_high -= 1;
        }
        if self.current_top > 0 && self.current_item < self.current_top {
            self.current_top -= 1;
        }
        true
    }

    /// Move the cursor down one item.
    pub fn down(&mut self) -> bool {
        if !self.can_move() || self.current_item >= self.last_item() {
            return false;
        }
        self.current_item += 1;
        if self.current_high + 1 < self.view_size {
            self.current_high += 1;
        }
        if self.current_top < self.max_top_item
            && self.current_item > self.current_top + self.view_size - 1
        {
            self.current_top += 1;
        }
        true
    }

    /// Scroll one column left.
    pub fn left(&mut self) -> bool {
        if !self.can_move() || self.left_char == 0 {
            return false;
        }
        self.left_char -= 1;
        true
    }

    /// Scroll one column right.
    pub fn right(&mut self) -> bool {
        if !self.can_move() || self.left_char >= self.max_left_char {
            return false;
        }
        self.left_char += 1;
        true
    }

    /// Move up by `max(view_size - 1, 1)` items.
    ///
    /// A partial page at the top falls back to [`home`](Self::home).
    pub fn page_up(&mut self) -> bool {
        if !self.can_move() || self.current_top == 0 {
            return false;
        }
        let page = self.page();
        if self.current_top < page {
            return self.home();
        }
        self.current_top -= page;
        self.current_item -= page;
        true
    }

    /// Move down by `max(view_size - 1, 1)` items.
    ///
    /// A partial page at the bottom falls back to [`end`](Self::end).
    pub fn page_down(&mut self) -> bool {
        if !self.can_move() || self.current_top >= self.max_top_item {
            return false;
        }
        let page = self.page();
        if self.current_top + page <= self.max_top_item {
            self.current_top += page;
            self.current_item += page;
            true
        } else {
            self.end()
        }
    }

    /// Jump to the first item.
    pub fn home(&mut self) -> bool {
        if !self.can_move() {
            return false;
        }
        self.current_top = 0;
        self.current_item = 0;
        self.current_high = 0;
        true
    }

    /// Jump to the last item.
    pub fn end(&mut self) -> bool {
        if !self.can_move() {
            return false;
        }
        self.current_top = self.max_top_item;
        self.current_item = self.last_item();
        self.current_high = self.current_item - self.current_top;
        true
    }

    /// Scrollbar thumb offset for a track of `track_len` rows.
    pub fn thumb_position(&self, track_len: usize) -> usize {
        let pos = (self.current_item as f64 * self.step).floor() as usize;
        pos.min(track_len.saturating_sub(self.toggle_size))
    }

    /// Apply the standard list navigation for `code`.
    ///
    /// Returns `None` when `code` is not a navigation key, otherwise whether
    /// the movement was accepted.
    pub fn navigate(&mut self, code: ftk_core::event::KeyCode) -> Option<bool> {
        use ftk_core::event::KeyCode;
        Some(match code {
            KeyCode::Up => self.up(),
            KeyCode::Down => self.down(),
            KeyCode::Left => self.left(),
            KeyCode::Right => self.right(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Home | KeyCode::Char('g' | '1') => self.home(),
            KeyCode::End | KeyCode::Char('G') => self.end(),
            KeyCode::Char('|') => {
                self.left_char = 0;
                self.can_move()
            }
            KeyCode::Char('$') => {
                self.left_char = self.max_left_char;
                self.can_move()
            }
            _ => return None,
        })
    }
}
