//! One-shot reveal of entities as they scroll into view.
//!
//! Each observed entity fires [`Entered`] the first time its visible ratio
//! exceeds the threshold, and is unobserved right away. Revealed ids live in
//! an insertion-only [`RevealSet`] scoped to a generation; swapping the
//! presented collection starts a new generation with an empty set.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::error::{MotionError, Result};
use crate::visibility::{EntityId, Intersection, ObserveOptions, VisibilityWatcher, WatchHandle};

// ============================================================================
// TYPES
// ============================================================================

/// Ids revealed in one generation. Entries are never removed.
#[derive(Debug, Default, Clone)]
pub struct RevealSet {
    members: HashSet<EntityId>,
    order: Vec<EntityId>,
}

impl RevealSet {
    /// Returns false if `id` was already present.
    pub fn insert(&mut self, id: EntityId) -> bool {
        if !self.members.insert(id.clone()) {
            return false;
        }
        self.order.push(id);
        true
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in the order they were revealed.
    pub fn iter(&self) -> impl Iterator<Item = &EntityId> {
        self.order.iter()
    }
}

/// An entity crossed into view for the first time this generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entered {
    pub id: EntityId,
    pub generation: u64,
    /// How many entities were revealed before this one in the generation.
    /// Consumers stagger a batch of reveals by its distance from the
    /// batch's first `sequence`.
    pub sequence: usize,
}

// ============================================================================
// SCHEDULER
// ============================================================================

#[derive(Debug)]
pub struct RevealScheduler {
    options: ObserveOptions,
    generation: u64,
    revealed: RevealSet,
    watching: HashMap<WatchHandle, EntityId>,
    torn_down: bool,
}

impl RevealScheduler {
    /// # Errors
    /// Returns [`MotionError::InvalidThreshold`] if the threshold is not in
    /// `0.0..=1.0`.
    pub fn new(options: ObserveOptions) -> Result<Self> {
        if !(0.0..=1.0).contains(&options.threshold) {
            return Err(MotionError::InvalidThreshold {
                value: options.threshold,
            });
        }
        Ok(Self {
            options,
            generation: 0,
            revealed: RevealSet::default(),
            watching: HashMap::new(),
            torn_down: false,
        })
    }

    /// Start observing every id in `collection` not yet revealed.
    pub fn register<'a, I>(&mut self, collection: I, watcher: &mut dyn VisibilityWatcher)
    where
        I: IntoIterator<Item = &'a EntityId>,
    {
        if self.torn_down {
            return;
        }
        for id in collection {
            if self.revealed.contains(id) || self.watching.values().any(|w| w == id) {
                continue;
            }
            let handle = watcher.observe(id, &self.options);
            self.watching.insert(handle, id.clone());
        }
    }

    /// Replace the presented collection.
    ///
    /// Drops every observation of the old generation, discards its reveal set
    /// wholesale and observes `collection` from scratch, so ids shown before
    /// can reveal again.
    pub fn reset<'a, I>(&mut self, collection: I, watcher: &mut dyn VisibilityWatcher)
    where
        I: IntoIterator<Item = &'a EntityId>,
    {
        if self.torn_down {
            return;
        }
        self.unobserve_all(watcher);
        self.generation += 1;
        self.revealed = RevealSet::default();
        debug!("reveal: generation {} started", self.generation);
        self.register(collection, watcher);
    }

    /// Feed one visibility event. Returns the reveal it caused, if any.
    pub fn on_intersection(
        &mut self,
        event: &Intersection,
        watcher: &mut dyn VisibilityWatcher,
    ) -> Option<Entered> {
        if self.torn_down || event.ratio <= self.options.threshold {
            return None;
        }
        // Handles from older generations were dropped from `watching`.
        let id = self.watching.remove(&event.handle)?;
        watcher.unobserve(event.handle);

        let sequence = self.revealed.len();
        if !self.revealed.insert(id.clone()) {
            return None;
        }
        debug!("reveal: {} entered (gen {}, #{})", id, self.generation, sequence);
        Some(Entered {
            id,
            generation: self.generation,
            sequence,
        })
    }

    pub fn is_revealed(&self, id: &EntityId) -> bool {
        self.revealed.contains(id)
    }

    pub fn revealed(&self) -> &RevealSet {
        &self.revealed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Entities still waiting for their first qualifying intersection.
    pub fn pending(&self) -> usize {
        self.watching.len()
    }

    pub fn options(&self) -> &ObserveOptions {
        &self.options
    }

    /// Unobserve everything. Later events are ignored.
    pub fn teardown(&mut self, watcher: &mut dyn VisibilityWatcher) {
        trace!("reveal: teardown, {} observation(s) released", self.watching.len());
        self.unobserve_all(watcher);
        self.torn_down = true;
    }

    fn unobserve_all(&mut self, watcher: &mut dyn VisibilityWatcher) {
        for (handle, _) in self.watching.drain() {
            watcher.unobserve(handle);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
