//! One-shot scroll reveal.
//!
//! Elements marked `.animate-on-scroll` get the `animated` class the first
//! time they enter the viewport and keep it for the rest of the page's life.
//! Statistic items additionally kick off their counter.
//!
//! Hosts with a real `IntersectionObserver` pass its entries straight to
//! [`ScrollReveal::on_intersections`]. Hosts without one (tests, the CLI)
//! compute entries from the layout with [`observe`].

use crate::types::{ElementId, Span, Viewport};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Observer configuration: fraction of the element that must be visible,
/// and root margins in pixels (negative shrinks the viewport).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
}

impl ObserverOptions {
    /// Reveal animations: 10 % visible, trigger 50 px before the bottom edge.
    pub const REVEAL: ObserverOptions = ObserverOptions {
        threshold: 0.1,
        top_margin: 0.0,
        bottom_margin: -50.0,
    };
}

/// One observer notification for one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
}

/// Fraction of `span` inside the margin-adjusted viewport at `scroll_y`.
pub fn visible_ratio(
    span: Span,
    scroll_y: f64,
    viewport: Viewport,
    options: ObserverOptions,
) -> f64 {
    let root_top = scroll_y - options.top_margin;
    let root_bottom = scroll_y + viewport.height + options.bottom_margin;
    let overlap = (span.bottom().min(root_bottom) - span.top.max(root_top)).max(0.0);
    if span.height <= 0.0 {
        // Zero-height elements count as fully visible when inside the root.
        return if span.top >= root_top && span.top <= root_bottom {
            1.0
        } else {
            0.0
        };
    }
    overlap / span.height
}

/// Compute intersection entries for `targets` at the given scroll offset.
pub fn observe<'a>(
    targets: impl IntoIterator<Item = (&'a ElementId, Span)>,
    scroll_y: f64,
    viewport: Viewport,
    options: ObserverOptions,
) -> Vec<IntersectionEntry> {
    targets
        .into_iter()
        .map(|(id, span)| {
            let ratio = visible_ratio(span, scroll_y, viewport, options);
            IntersectionEntry {
                target: id.clone(),
                is_intersecting: ratio > 0.0 && ratio >= options.threshold,
            }
        })
        .collect()
}

/// An element that just got revealed.
#[derive(Debug, Clone, PartialEq)]
pub struct Revealed {
    pub id: ElementId,
    /// Counter target when the element is a statistic item.
    pub counter: Option<i64>,
}

/// Tracks which elements have already been animated.
#[derive(Debug, Clone, Default)]
pub struct ScrollReveal {
    animated: HashSet<ElementId>,
}

impl ScrollReveal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animated(&self, id: &ElementId) -> bool {
        self.animated.contains(id)
    }

    pub fn animated_count(&self) -> usize {
        self.animated.len()
    }

    /// Handle one batch of observer entries. `stat_count` looks up the
    /// counter target of an element, if it is a statistic item.
    pub fn on_intersections(
        &mut self,
        entries: &[IntersectionEntry],
        stat_count: impl Fn(&ElementId) -> Option<i64>,
    ) -> Vec<Revealed> {
        entries
            .iter()
            .filter(|e| e.is_intersecting)
            .filter_map(|e| {
                if !self.animated.insert(e.target.clone()) {
                    return None;
                }
                Some(Revealed {
                    id: e.target.clone(),
                    counter: stat_count(&e.target),
                })
            })
            .collect()
    }
}
