//! Visibility capability: who is on screen, and how much of them.
//!
//! A [`VisibilityWatcher`] hands out a [`WatchHandle`] per observed entity
//! and later reports [`Intersection`] events for those handles. The driver
//! forwards events to whoever owns the handle.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

// ============================================================================
// TYPES
// ============================================================================

/// Opaque key of an observed element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        EntityId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId(s.to_string())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One active observation. Never reused by a watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchHandle(u64);

impl WatchHandle {
    /// For watcher implementations that mint their own handles.
    pub fn from_raw(raw: u64) -> Self {
        WatchHandle(raw)
    }
}

/// The scroll container intersections are measured against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScrollRoot {
    /// The whole visible screen.
    #[default]
    Viewport,
    /// A named scrolling element.
    Element(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObserveOptions {
    /// Fraction of the entity that must be visible, in `0.0..=1.0`.
    pub threshold: f64,
    pub root: ScrollRoot,
}

/// A visibility measurement for one handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub handle: WatchHandle,
    /// Visible fraction of the entity, `0.0..=1.0`.
    pub ratio: f64,
}

/// Observe/unobserve capability.
pub trait VisibilityWatcher {
    fn observe(&mut self, id: &EntityId, options: &ObserveOptions) -> WatchHandle;

    /// Stop reporting `handle`. Unknown handles are ignored.
    fn unobserve(&mut self, handle: WatchHandle);
}

// ============================================================================
// GEOMETRIC WATCHER
// ============================================================================

/// Vertical placement of an entity inside the scroll root, in rows.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    top: f64,
    height: f64,
}

#[derive(Debug)]
struct Observation {
    id: EntityId,
    threshold: f64,
    above: bool,
}

/// Watcher over one scroll root laid out as a vertical strip.
///
/// Queues a measurement when an entity starts being observed, then only
/// when an entity crosses its threshold in either direction.
#[derive(Debug)]
pub struct ViewportWatcher {
    root: ScrollRoot,
    layout: HashMap<EntityId, Span>,
    observed: BTreeMap<WatchHandle, Observation>,
    offset: f64,
    height: f64,
    next_handle: u64,
    queue: Vec<Intersection>,
}

impl ViewportWatcher {
    pub fn new(root: ScrollRoot, height: f64) -> Self {
        Self {
            root,
            layout: HashMap::new(),
            observed: BTreeMap::new(),
            offset: 0.0,
            height,
            next_handle: 0,
            queue: Vec::new(),
        }
    }

    /// Place (or move) an entity within the root.
    pub fn place(&mut self, id: &EntityId, top: f64, height: f64) {
        self.layout.insert(id.clone(), Span { top, height });
        self.recompute();
    }

    /// Forget all placements, e.g. before a relayout.
    pub fn clear_layout(&mut self) {
        self.layout.clear();
        self.recompute();
    }

    /// Scroll the root and resize its visible window.
    pub fn scroll_to(&mut self, offset: f64, height: f64) {
        self.offset = offset;
        self.height = height;
        self.recompute();
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    pub fn is_observing(&self, handle: WatchHandle) -> bool {
        self.observed.contains_key(&handle)
    }

    /// Visible fraction of `id` at the current scroll position.
    pub fn ratio_of(&self, id: &EntityId) -> f64 {
        let Some(span) = self.layout.get(id) else {
            return 0.0;
        };
        if span.height <= 0.0 || self.height <= 0.0 {
            return 0.0;
        }
        let top = span.top.max(self.offset);
        let bottom = (span.top + span.height).min(self.offset + self.height);
        ((bottom - top).max(0.0) / span.height).min(1.0)
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<Intersection> {
        std::mem::take(&mut self.queue)
    }

    fn recompute(&mut self) {
        let mut changed = Vec::new();
        for (handle, obs) in &self.observed {
            let ratio = self.ratio_of(&obs.id);
            if (ratio > obs.threshold) != obs.above {
                changed.push((*handle, ratio));
            }
        }
        for (handle, ratio) in changed {
            if let Some(obs) = self.observed.get_mut(&handle) {
                obs.above = !obs.above;
            }
            self.queue.push(Intersection { handle, ratio });
        }
    }
}

impl VisibilityWatcher for ViewportWatcher {
    fn observe(&mut self, id: &EntityId, options: &ObserveOptions) -> WatchHandle {
        let handle = WatchHandle(self.next_handle);
        self.next_handle += 1;

        // Another root's entity is never measured here.
        if options.root != self.root {
            return handle;
        }

        let ratio = self.ratio_of(id);
        self.observed.insert(
            handle,
            Observation {
                id: id.clone(),
                threshold: options.threshold,
                above: ratio > options.threshold,
            },
        );
        self.queue.push(Intersection { handle, ratio });
        handle
    }

    fn unobserve(&mut self, handle: WatchHandle) {
        self.observed.remove(&handle);
        self.queue.retain(|i| i.handle != handle);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(threshold: f64) -> ObserveOptions {
        ObserveOptions {
            threshold,
            root: ScrollRoot::Viewport,
        }
    }

    #[test]
    fn ratio_is_visible_fraction() {
        let mut w = ViewportWatcher::new(ScrollRoot::Viewport, 10.0);
        let id = EntityId::from("a");
        w.place(&id, 8.0, 4.0);
        assert_eq!(w.ratio_of(&id), 0.5);

        w.scroll_to(20.0, 10.0);
        assert_eq!(w.ratio_of(&id), 0.0);

        w.scroll_to(6.0, 10.0);
        assert_eq!(w.ratio_of(&id), 1.0);
    }

    #[test]
    fn unplaced_entity_is_invisible() {
        let w = ViewportWatcher::new(ScrollRoot::Viewport, 10.0);
        assert_eq!(w.ratio_of(&EntityId::from("ghost")), 0.0);
    }

    #[test]
    fn observe_queues_initial_measurement() {
        let mut w = ViewportWatcher::new(ScrollRoot::Viewport, 10.0);
        let id = EntityId::from("a");
        w.place(&id, 0.0, 2.0);
        let h = w.observe(&id, &opts(0.3));

        assert_eq!(w.drain(), vec![Intersection { handle: h, ratio: 1.0 }]);
        assert!(w.drain().is_empty());
    }

    #[test]
    fn events_only_on_threshold_crossing() {
        let mut w = ViewportWatcher::new(ScrollRoot::Viewport, 10.0);
        let id = EntityId::from("a");
        w.place(&id, 20.0, 10.0);
        let h = w.observe(&id, &opts(0.3));
        w.drain();

        w.scroll_to(11.0, 10.0); // 1 row visible, 0.1
        assert!(w.drain().is_empty());

        w.scroll_to(15.0, 10.0); // 5 rows, 0.5
        assert_eq!(w.drain(), vec![Intersection { handle: h, ratio: 0.5 }]);

        w.scroll_to(16.0, 10.0); // still above
        assert!(w.drain().is_empty());

        w.scroll_to(0.0, 10.0);
        assert_eq!(w.drain(), vec![Intersection { handle: h, ratio: 0.0 }]);
    }

    #[test]
    fn unobserve_drops_queued_events() {
        let mut w = ViewportWatcher::new(ScrollRoot::Viewport, 10.0);
        let id = EntityId::from("a");
        w.place(&id, 0.0, 1.0);
        let h = w.observe(&id, &opts(0.0));
        w.unobserve(h);

        assert!(w.drain().is_empty());
        assert!(!w.is_observing(h));
        w.unobserve(h);
    }

    #[test]
    fn other_root_is_not_measured() {
        let mut w = ViewportWatcher::new(ScrollRoot::Element("timeline".into()), 10.0);
        let id = EntityId::from("a");
        w.place(&id, 0.0, 1.0);
        let h = w.observe(&id, &opts(0.0));

        assert!(!w.is_observing(h));
        assert!(w.drain().is_empty());
    }

    #[test]
    fn handles_are_never_reused() {
        let mut w = ViewportWatcher::new(ScrollRoot::Viewport, 10.0);
        let id = EntityId::from("a");
        let h1 = w.observe(&id, &opts(0.5));
        w.unobserve(h1);
        let h2 = w.observe(&id, &opts(0.5));
        assert_ne!(h1, h2);
    }
}
