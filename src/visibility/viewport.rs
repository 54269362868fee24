use std::collections::BTreeMap;

use crate::foundation::core::ContainerId;
use crate::visibility::gate::{IntersectionEntry, IntersectionObserver};

/// Axis-aligned box in page coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, non-negative.
    pub width: f64,
    /// Height, non-negative.
    pub height: f64,
}

impl Bounds {
    /// Build a box from its top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the two boxes share any area. Touching edges do not count.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Headless [`IntersectionObserver`]: tracks element boxes and a scrolling viewport.
#[derive(Debug, Default)]
pub struct ViewportObserver {
    viewport: Bounds,
    elements: BTreeMap<ContainerId, Bounds>,
    observed: BTreeMap<ContainerId, Option<bool>>,
}

impl ViewportObserver {
    /// Observer over the given viewport.
    pub fn new(viewport: Bounds) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Place (or move) an element.
    pub fn place(&mut self, id: ContainerId, bounds: Bounds) {
        self.elements.insert(id, bounds);
    }

    /// Whether `id` is currently observed.
    pub fn is_observing(&self, id: &ContainerId) -> bool {
        self.observed.contains_key(id)
    }

    /// Number of observed containers.
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Move the viewport and report entries whose intersection state changed.
    ///
    /// Like a browser observer, the first report after `observe` is always delivered.
    pub fn scroll_to(&mut self, viewport: Bounds) -> Vec<IntersectionEntry> {
        self.viewport = viewport;
        self.collect_changes()
    }

    fn collect_changes(&mut self) -> Vec<IntersectionEntry> {
        let mut out = Vec::new();
        for (id, last) in self.observed.iter_mut() {
            let now = self
                .elements
                .get(id)
                .is_some_and(|b| b.intersects(&self.viewport));
            if *last != Some(now) {
                *last = Some(now);
                out.push(IntersectionEntry {
                    target: id.clone(),
                    is_intersecting: now,
                });
            }
        }
        out
    }
}

impl IntersectionObserver for ViewportObserver {
    fn observe(&mut self, target: &ContainerId) {
        self.observed.insert(target.clone(), None);
    }

    fn unobserve(&mut self, target: &ContainerId) {
        self.observed.remove(target);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visibility/viewport.rs"]
mod tests;
