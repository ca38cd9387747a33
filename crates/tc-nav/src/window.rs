//! Horizontal scroll window over the navbar classes.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Number of classes shown at once on wide viewports.
pub const DEFAULT_WINDOW_SIZE: usize = 6;

/// Viewports narrower than this show the full class list.
pub const NAVBAR_BREAKPOINT_PX: u32 = 992;

/// Viewports wider than this open the sidebar by default.
pub const SIDEBAR_BREAKPOINT_PX: u32 = 768;

/// Layout mode derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    /// Below [`NAVBAR_BREAKPOINT_PX`]: every class is listed
    Narrow,
    /// Classes are shown through a [`NavWindow`]
    Wide,
}

impl Viewport {
    /// Classify a viewport width in CSS pixels.
    pub const fn from_width(width_px: u32) -> Self {
        if width_px < NAVBAR_BREAKPOINT_PX {
            Self::Narrow
        } else {
            Self::Wide
        }
    }
}

/// Navbar arrow pressed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Left,
    Right,
}

/// Sliding window state: the index of the first visible class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavWindow {
    pub start: usize,
    /// Classes visible at once
    pub size: usize,
}

impl Default for NavWindow {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NavWindow {
    /// Window of [`DEFAULT_WINDOW_SIZE`] classes starting at `start`.
    pub const fn new(start: usize) -> Self {
        Self {
            start,
            size: DEFAULT_WINDOW_SIZE,
        }
    }

    /// Largest valid start for `total` classes.
    pub const fn ceiling(&self, total: usize) -> usize {
        total.saturating_sub(self.size)
    }

    /// Pull an out-of-range start back under the ceiling.
    pub fn clamped(self, total: usize) -> Self {
        Self {
            start: self.start.min(self.ceiling(total)),
            ..self
        }
    }

    /// Move the window one class in `direction`.
    ///
    /// Left stops at 0, right stops once `start + size` reaches `total`.
    /// Narrow viewports show everything, so scrolling there does nothing.
    pub fn scroll(self, direction: ScrollDirection, total: usize, viewport: Viewport) -> Self {
        if viewport == Viewport::Narrow {
            return self;
        }

        let start = match direction {
            ScrollDirection::Left => self.start.saturating_sub(1),
            ScrollDirection::Right if self.start + self.size < total => self.start + 1,
            ScrollDirection::Right => self.start,
        };

        Self { start, ..self }
    }

    /// Indices of the classes to render.
    pub fn visible(&self, total: usize, viewport: Viewport) -> Range<usize> {
        match viewport {
            Viewport::Narrow => 0..total,
            Viewport::Wide => {
                let start = self.start.min(total);
                start..(self.start + self.size).min(total)
            }
        }
    }

    pub const fn can_scroll_left(&self) -> bool {
        self.start > 0
    }

    pub const fn can_scroll_right(&self, total: usize) -> bool {
        self.start + self.size < total
    }
}

/// Whether the sidebar starts expanded at this width.
pub const fn sidebar_expanded(width_px: u32) -> bool {
    width_px > SIDEBAR_BREAKPOINT_PX
}
