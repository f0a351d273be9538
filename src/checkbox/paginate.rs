//! Pagination: which rows of the list are visible.
//!
//! The window is part of each snapshot so that it can slide minimally
//! between keypresses instead of re-centering on every move.

/// A contiguous run of rows, possibly wrapping past the list end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    /// Index of the first visible item.
    pub start: usize,
    /// Number of visible rows.
    pub height: usize,
    /// Length of the list the window was computed for.
    pub total: usize,
}

impl Window {
    /// Item indices of the visible rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.height).map(move |offset| (self.start + offset) % self.total.max(1))
    }

    /// Whether some items are not visible.
    pub fn is_partial(&self) -> bool {
        self.height < self.total
    }
}

/// Compute the window that keeps `active` visible.
///
/// The previous window is kept when the active row is still on screen.
/// Otherwise the window slides by the smallest number of rows that brings
/// it back. Without looping the start is clamped to the list; with looping
/// rows wrap around the end and the window slides whichever way is shorter.
pub fn paginate(
    total: usize,
    active: usize,
    previous: Window,
    page_size: usize,
    loop_navigation: bool,
) -> Window {
    if total <= page_size {
        return Window {
            start: 0,
            height: total,
            total,
        };
    }

    let height = page_size;
    let start = if previous.total == total { previous.start } else { 0 };

    let start = if loop_navigation {
        let offset = (active + total - start) % total;
        if offset < height {
            start
        } else {
            let up = (start + total - active) % total;
            let down = offset + 1 - height;
            if up <= down { active } else { (start + down) % total }
        }
    } else {
        let start = start.min(total - height);
        if active < start {
            active
        } else if active >= start + height {
            active + 1 - height
        } else {
            start
        }
    };

    Window {
        start,
        height,
        total,
    }
}

// ============================================================================
// TESTS
// ============================================================================
