use crate::foundation::core::ContainerId;

/// One intersection notification for an observed container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntersectionEntry {
    /// Observed container.
    pub target: ContainerId,
    /// Whether any part of the container is inside the viewport.
    pub is_intersecting: bool,
}

/// Host-side intersection observation.
pub trait IntersectionObserver {
    /// Start reporting entries for `target`.
    fn observe(&mut self, target: &ContainerId);
    /// Stop reporting entries for `target`.
    fn unobserve(&mut self, target: &ContainerId);
}

/// Runs a callback the first time a container scrolls into view, then stops observing it.
///
/// The callback is consumed when it fires, so it can run at most once.
pub struct VisibilityGate<F> {
    container: ContainerId,
    callback: Option<F>,
}

impl<F, R> VisibilityGate<F>
where
    F: FnOnce(&ContainerId) -> R,
{
    /// Observe `container` and arm `callback`.
    pub fn on_becomes_visible(
        observer: &mut dyn IntersectionObserver,
        container: ContainerId,
        callback: F,
    ) -> Self {
        observer.observe(&container);
        Self {
            container,
            callback: Some(callback),
        }
    }

    /// Observed container.
    pub fn container(&self) -> &ContainerId {
        &self.container
    }

    /// Whether the callback already ran (or the gate was cancelled).
    pub fn is_spent(&self) -> bool {
        self.callback.is_none()
    }

    /// Feed one entry. Returns the callback's output if this entry fired it.
    pub fn notify(
        &mut self,
        observer: &mut dyn IntersectionObserver,
        entry: &IntersectionEntry,
    ) -> Option<R> {
        if entry.target != self.container || !entry.is_intersecting {
            return None;
        }
        let callback = self.callback.take()?;
        observer.unobserve(&self.container);
        tracing::debug!(container = %self.container, "container became visible");
        Some(callback(&self.container))
    }

    /// Disarm without firing and stop observing.
    pub fn cancel(&mut self, observer: &mut dyn IntersectionObserver) {
        if self.callback.take().is_some() {
            observer.unobserve(&self.container);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visibility/gate.rs"]
mod tests;
