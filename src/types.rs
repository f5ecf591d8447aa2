//! Shared page description types.
//!
//! A [`PageLayout`] is the host's snapshot of the markup the behaviors act
//! on. Everything optional in the page is optional here too: a component
//! whose element is absent is simply not started, mirroring partial markup.
//! Layouts are read from scenario files, so every type deserializes from
//! JSON with sensible defaults.

use crate::form::FormData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Id attribute of a page element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Visible window of the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Span {
    pub top: f64,
    pub height: f64,
}

impl Span {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A `<section id=...>` used for anchor scrolling and active-link tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(flatten)]
    pub span: Span,
}

/// An `.animate-on-scroll` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealTarget {
    pub id: ElementId,
    #[serde(flatten)]
    pub span: Span,
    /// `data-count` of the `.stat-number` inside a `.stat-item`. `None` for
    /// ordinary elements or statistic items without a readable count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_count: Option<i64>,
}

/// An `img[data-src]` waiting to be loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LazyImage {
    pub id: ElementId,
    #[serde(flatten)]
    pub span: Span,
    pub src: String,
}

/// Which optional elements the page actually contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Elements {
    pub hamburger: bool,
    pub nav_menu: bool,
    pub navbar: bool,
    pub particles_container: bool,
    pub loader: bool,
    pub back_to_top: bool,
    pub contact_form: bool,
    pub view_work_button: bool,
    pub contact_button: bool,
}

impl Default for Elements {
    fn default() -> Self {
        Self {
            hamburger: true,
            nav_menu: true,
            navbar: true,
            particles_container: true,
            loader: true,
            back_to_top: false,
            contact_form: true,
            view_work_button: true,
            contact_button: true,
        }
    }
}

/// Snapshot of the portfolio page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub viewport: Viewport,
    pub elements: Elements,
    pub sections: Vec<Section>,
    /// `href` of every `.nav-link`, e.g. `#about`.
    pub nav_links: Vec<String>,
    pub reveal_targets: Vec<RevealTarget>,
    pub lazy_images: Vec<LazyImage>,
    /// Text of `#typing-text`, if present.
    pub typing_text: Option<String>,
    /// Values already in the contact form at load.
    pub form_values: FormData,
}

impl PageLayout {
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Resolve an in-page anchor (`#contact`) to its section.
    pub fn anchor_target(&self, href: &str) -> Option<&Section> {
        self.section(href.strip_prefix('#')?)
    }

    pub fn reveal_target(&self, id: &ElementId) -> Option<&RevealTarget> {
        self.reveal_targets.iter().find(|t| &t.id == id)
    }
}
