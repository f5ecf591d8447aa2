//! Navigation bar, mobile menu, active-section tracking, back-to-top.
//!
//! Scroll handling only reports class changes when a state actually flips,
//! so a host applying effects verbatim never thrashes the DOM on every
//! scroll event.

use crate::types::{PageLayout, Section};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavOptions {
    /// Height of the fixed header; anchor scrolls stop this far above the
    /// section.
    pub header_offset: f64,
    /// Scroll offset beyond which the navbar gets `scrolled`.
    pub scrolled_threshold: f64,
    /// A section becomes active this many pixels before its top reaches the
    /// top of the viewport.
    pub active_offset: f64,
    /// Scroll offset beyond which the back-to-top button is `visible`.
    pub back_to_top_threshold: f64,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
            scrolled_threshold: 100.0,
            active_offset: 150.0,
            back_to_top_threshold: 300.0,
        }
    }
}

/// Something the page should change.
#[derive(Debug, Clone, PartialEq)]
pub enum NavChange {
    MenuOpen(bool),
    NavbarScrolled(bool),
    /// Href of the link that is now active, or `None` when no section
    /// matches the scroll offset.
    ActiveLink(Option<String>),
    BackToTopVisible(bool),
    ScrollTo(f64),
}

#[derive(Debug, Clone)]
pub struct Navigation {
    options: NavOptions,
    /// Whether both the hamburger and the menu exist.
    has_menu: bool,
    menu_open: bool,
    scrolled: bool,
    active_link: Option<String>,
    active_section: String,
    back_to_top_visible: bool,
}

impl Navigation {
    pub fn new(options: NavOptions, layout: &PageLayout) -> Self {
        Self {
            options,
            has_menu: layout.elements.hamburger && layout.elements.nav_menu,
            menu_open: false,
            scrolled: false,
            active_link: None,
            active_section: "home".to_string(),
            back_to_top_visible: false,
        }
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Last section that had a matching nav link.
    pub fn active_section(&self) -> &str {
        &self.active_section
    }

    pub fn toggle_menu(&mut self) -> Vec<NavChange> {
        if !self.has_menu {
            return Vec::new();
        }
        self.menu_open = !self.menu_open;
        vec![NavChange::MenuOpen(self.menu_open)]
    }

    /// A `.nav-link` was clicked.
    pub fn click_link(&mut self, href: &str, layout: &PageLayout) -> Vec<NavChange> {
        let mut changes = Vec::new();
        if self.has_menu && self.menu_open {
            self.menu_open = false;
            changes.push(NavChange::MenuOpen(false));
        }
        if let Some(section) = layout.anchor_target(href) {
            changes.push(NavChange::ScrollTo(self.scroll_target(section)));
        }
        changes
    }

    /// Scroll to a section by id (hero buttons).
    pub fn scroll_to_section(&self, id: &str, layout: &PageLayout) -> Option<NavChange> {
        layout
            .section(id)
            .map(|section| NavChange::ScrollTo(self.scroll_target(section)))
    }

    fn scroll_target(&self, section: &Section) -> f64 {
        section.span.top - self.options.header_offset
    }

    pub fn on_scroll(&mut self, y: f64, layout: &PageLayout) -> Vec<NavChange> {
        let mut changes = Vec::new();

        let scrolled = y > self.options.scrolled_threshold;
        if layout.elements.navbar && scrolled != self.scrolled {
            self.scrolled = scrolled;
            changes.push(NavChange::NavbarScrolled(scrolled));
        }

        let current = active_section(&layout.sections, y, self.options.active_offset);
        let link = current
            .map(|id| format!("#{id}"))
            .filter(|href| layout.nav_links.contains(href));
        if link != self.active_link {
            if let (Some(id), Some(_)) = (current, &link) {
                self.active_section = id.to_string();
            }
            self.active_link = link.clone();
            changes.push(NavChange::ActiveLink(link));
        }

        let visible = y > self.options.back_to_top_threshold;
        if visible != self.back_to_top_visible {
            self.back_to_top_visible = visible;
            changes.push(NavChange::BackToTopVisible(visible));
        }

        changes
    }
}

/// The section whose activation window contains `y`. When windows overlap
/// the last section in document order wins.
pub fn active_section(sections: &[Section], y: f64, offset: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|s| {
            let top = s.span.top - offset;
            y >= top && y < top + s.span.height
        })
        .last()
        .map(|s| s.id.as_str())
}
