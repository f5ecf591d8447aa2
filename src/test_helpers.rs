//! Shared test utilities for the portfolio-ui test suite.
//!
//! Provides a realistic page layout and effect extractors that panic with
//! the available values on a miss, so a failing assertion shows what the
//! page actually did.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (mut app, _) = App::simulated(sample_layout(), UiConfig::default(), 1);
//! let effects = app.handle(0, PageEvent::Scroll { y: 1600.0 });
//! assert!(has_effect(&effects, &Effect::add_class("#stat-projects", "animated")));
//!
//! let effects = app.advance_to(5000);
//! assert_eq!(last_text(&effects, "#stat-projects .stat-number"), "42+");
//! ```

use std::path::{Path, PathBuf};

use crate::event::Effect;
use crate::types::{ElementId, LazyImage, PageLayout, RevealTarget, Section, Span, Viewport};

// =========================================================================
// Layout
// =========================================================================

fn span(top: f64, height: f64) -> Span {
    Span { top, height }
}

/// A 1280x800 portfolio page: four sections with matching nav links, a hero
/// card visible at load, two statistics further down, and two lazy images.
pub fn sample_layout() -> PageLayout {
    let sections = [
        ("home", 0.0, 900.0),
        ("about", 900.0, 1000.0),
        ("projects", 1900.0, 1100.0),
        ("contact", 3000.0, 900.0),
    ];
    let reveal = |id: &str, top, height, stat_count| RevealTarget {
        id: ElementId::new(id),
        span: span(top, height),
        stat_count,
    };
    PageLayout {
        viewport: Viewport {
            width: 1280.0,
            height: 800.0,
        },
        sections: sections
            .iter()
            .map(|&(id, top, height)| Section {
                id: id.to_string(),
                span: span(top, height),
            })
            .collect(),
        nav_links: sections.iter().map(|(id, ..)| format!("#{id}")).collect(),
        reveal_targets: vec![
            reveal("hero-card", 200.0, 300.0, None),
            reveal("about-text", 1000.0, 200.0, None),
            reveal("stat-projects", 1700.0, 150.0, Some(42)),
            reveal("stat-satisfaction", 1700.0, 150.0, Some(100)),
        ],
        lazy_images: vec![
            LazyImage {
                id: ElementId::new("avatar"),
                span: span(300.0, 200.0),
                src: "img/avatar.jpg".to_string(),
            },
            LazyImage {
                id: ElementId::new("project-shot"),
                span: span(2000.0, 400.0),
                src: "img/project.jpg".to_string(),
            },
        ],
        typing_text: Some("Full-stack developer".to_string()),
        ..PageLayout::default()
    }
}

/// Absolute path of a file under `fixtures/`.
pub fn fixture_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(relative)
}

// =========================================================================
// Effect extractors
// =========================================================================

pub fn has_effect(effects: &[Effect], expected: &Effect) -> bool {
    effects.contains(expected)
}

/// Every text set on `target`, in order.
pub fn texts_for<'a>(effects: &'a [Effect], target: &str) -> Vec<&'a str> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::SetText { target: t, text } if t == target => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Final text set on `target`. Panics if none was set.
pub fn last_text<'a>(effects: &'a [Effect], target: &str) -> &'a str {
    texts_for(effects, target)
        .last()
        .copied()
        .unwrap_or_else(|| {
            let targets: Vec<&str> = effects
                .iter()
                .filter_map(|e| match e {
                    Effect::SetText { target, .. } => Some(target.as_str()),
                    _ => None,
                })
                .collect();
            panic!("no text set on '{target}'. Targets with text: {targets:?}")
        })
}

/// HTML of the only notification shown. Panics unless exactly one was.
pub fn shown_notification(effects: &[Effect]) -> &str {
    let shown: Vec<&str> = effects
        .iter()
        .filter_map(|e| match e {
            Effect::ShowNotification { html, .. } => Some(html.as_str()),
            _ => None,
        })
        .collect();
    match shown.as_slice() {
        [html] => html,
        _ => panic!("expected one notification, got {}: {shown:?}", shown.len()),
    }
}
