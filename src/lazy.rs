//! Deferred image loading.
//!
//! Images carrying a `data-src` get their real `src` the first time they come
//! within 50 px of the viewport, then stop being observed.

use crate::reveal::{IntersectionEntry, ObserverOptions};
use crate::types::{ElementId, LazyImage, Span};
use std::collections::BTreeMap;

impl ObserverOptions {
    /// Lazy images: 10 % visible, viewport grown by 50 px on every side.
    pub const LAZY_IMAGES: ObserverOptions = ObserverOptions {
        threshold: 0.1,
        top_margin: 50.0,
        bottom_margin: 50.0,
    };
}

/// An image that should now load its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLoad {
    pub id: ElementId,
    pub src: String,
}

#[derive(Debug, Clone, Default)]
pub struct LazyImages {
    pending: BTreeMap<ElementId, (Span, String)>,
}

impl LazyImages {
    pub fn new(images: &[LazyImage]) -> Self {
        Self {
            pending: images
                .iter()
                .filter(|img| !img.src.is_empty())
                .map(|img| (img.id.clone(), (img.span, img.src.clone())))
                .collect(),
        }
    }

    /// Images still being observed, with their extents.
    pub fn observed(&self) -> impl Iterator<Item = (&ElementId, Span)> {
        self.pending.iter().map(|(id, (span, _))| (id, *span))
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn on_intersections(&mut self, entries: &[IntersectionEntry]) -> Vec<ImageLoad> {
        entries
            .iter()
            .filter(|e| e.is_intersecting)
            .filter_map(|e| {
                let (_, src) = self.pending.remove(&e.target)?;
                Some(ImageLoad {
                    id: e.target.clone(),
                    src,
                })
            })
            .collect()
    }
}
