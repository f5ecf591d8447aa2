//! What goes into the [`App`](crate::app::App) and what comes out.
//!
//! [`PageEvent`]s are the browser events the page listens to. [`Effect`]s
//! are the DOM operations that result. Both serialize to tagged JSON so a
//! host binding, a scenario file, or a golden test can speak the same
//! vocabulary.

use crate::notification::{DismissReason, NotificationId, Severity};
use crate::reveal::IntersectionEntry;
use serde::{Deserialize, Serialize};

/// A browser event, as seen by the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PageEvent {
    /// Window scrolled to `y`.
    Scroll { y: f64 },
    Resize { width: f64, height: f64 },
    VisibilityChange { hidden: bool },
    /// Hamburger clicked.
    ToggleMenu,
    /// A `.nav-link` clicked.
    NavLinkClick { href: String },
    /// A button clicked, by element id.
    ButtonClick { id: String },
    Input { field: String, value: String },
    Focus { field: String },
    Blur { field: String },
    /// Contact form submitted.
    Submit,
    /// Close button of the current notification clicked.
    DismissNotification,
    /// A batch from the reveal observer, for hosts that run their own.
    Intersections { entries: Vec<IntersectionEntry> },
    /// A batch from the lazy-image observer, for hosts that run their own.
    ImageIntersections { entries: Vec<IntersectionEntry> },
    /// Anything else on the page reporting an outcome.
    Notify {
        message: String,
        #[serde(default)]
        severity: Option<String>,
    },
}

/// A DOM operation for the host to apply. Targets are CSS selectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Effect {
    AddClass {
        target: String,
        class: String,
    },
    RemoveClass {
        target: String,
        class: String,
    },
    SetText {
        target: String,
        text: String,
    },
    SetStyle {
        target: String,
        property: String,
        value: String,
    },
    ScrollTo {
        top: f64,
    },
    /// Append `count` particles to the particle container.
    SpawnParticles {
        count: usize,
        html: String,
    },
    ClearParticles,
    /// `animation-play-state` for every particle.
    SetParticlesRunning {
        running: bool,
    },
    ShowNotification {
        id: NotificationId,
        severity: Severity,
        html: String,
    },
    /// Play the exit transition; `animation` is the inline value to set.
    StartNotificationExit {
        id: NotificationId,
        reason: DismissReason,
        animation: String,
    },
    RemoveNotification {
        id: NotificationId,
        reason: DismissReason,
    },
    /// Append markup to `<body>`.
    AppendToBody {
        html: String,
    },
    /// Append a stylesheet to `<head>`.
    InjectStyle {
        css: String,
    },
    SetImageSource {
        target: String,
        src: String,
    },
    ResetForm,
    RemoveElement {
        target: String,
    },
}

impl Effect {
    pub fn add_class(target: impl Into<String>, class: impl Into<String>) -> Self {
        Effect::AddClass {
            target: target.into(),
            class: class.into(),
        }
    }

    pub fn remove_class(target: impl Into<String>, class: impl Into<String>) -> Self {
        Effect::RemoveClass {
            target: target.into(),
            class: class.into(),
        }
    }

    /// Add or remove depending on `on`.
    pub fn toggle_class(target: impl Into<String>, class: impl Into<String>, on: bool) -> Self {
        if on {
            Self::add_class(target, class)
        } else {
            Self::remove_class(target, class)
        }
    }

    pub fn set_text(target: impl Into<String>, text: impl Into<String>) -> Self {
        Effect::SetText {
            target: target.into(),
            text: text.into(),
        }
    }

    pub fn set_style(
        target: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Effect::SetStyle {
            target: target.into(),
            property: property.into(),
            value: value.into(),
        }
    }
}
