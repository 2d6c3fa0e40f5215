//! Windowing arithmetic shared by every scrollable region.
//!
//! Every function here returns `0` for an empty collection instead of
//! underflowing or dividing by zero.

use std::ops::Range;

/// Visible slice of a collection plus the cursor that must stay inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub cursor: usize,
    pub visible: usize,
    pub len: usize,
}

impl Window {
    pub fn end(&self) -> usize {
        (self.start + self.visible).min(self.len)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

/// Clamp `index` into `[0, len)`, or `0` when empty.
pub fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}

/// Largest valid window start for `len` items with `visible` rows.
pub fn max_start(len: usize, visible: usize) -> usize {
    len.saturating_sub(visible.max(1))
}

/// Clamp a pure scroll offset into `[0, max(len - visible, 0)]`.
pub fn clamp_scroll(offset: usize, len: usize, visible: usize) -> usize {
    offset.min(max_start(len, visible))
}

/// Place a window of `visible` items over `len` so that `cursor` is inside
/// it, moving the previous start as little as possible.
pub fn window(len: usize, visible: usize, cursor: usize, previous_start: usize) -> Window {
    let visible = visible.max(1);
    let cursor = clamp_index(cursor, len);
    let mut start = previous_start.min(max_start(len, visible));

    if cursor < start {
        start = cursor;
    } else if cursor >= start + visible {
        start = cursor + 1 - visible;
    }

    Window {
        start,
        cursor,
        visible,
        len,
    }
}

/// Move `index` by `delta`, saturating at both ends.
pub fn step(index: usize, delta: isize, len: usize) -> usize {
    let moved = if delta < 0 {
        index.saturating_sub(delta.unsigned_abs())
    } else {
        index.saturating_add(delta.unsigned_abs())
    };
    clamp_index(moved, len)
}

/// Move `index` by `delta`, wrapping around `len`.
pub fn cycle(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    let current = (index as isize).rem_euclid(len);
    (current + delta).rem_euclid(len) as usize
}
