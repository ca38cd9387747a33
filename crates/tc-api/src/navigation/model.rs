use serde::{Deserialize, Serialize};
use tc_nav::{ClassNode, ClassTree, ScrollDirection, Viewport};

#[derive(Debug, Default, Deserialize)]
pub struct NavbarQuery {
    /// Current window start, as returned by the previous call
    pub start: Option<usize>,
    pub viewport_width: Option<u32>,
    /// Move the window one class before rendering
    pub scroll: Option<ScrollDirection>,
}

/// Navbar view model: the visible slice of the class index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavbarView {
    pub viewport: Viewport,
    pub start: usize,
    pub size: usize,
    pub total: usize,
    pub can_scroll_left: bool,
    pub can_scroll_right: bool,
    pub classes: Vec<ClassNode>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SidebarQuery {
    pub search: Option<String>,
    pub viewport_width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidebarView {
    /// Whether the panel starts open at this width
    pub expanded: bool,
    pub classes: Vec<ClassTree>,
}
