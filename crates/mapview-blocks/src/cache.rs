use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use mapview_geom::Model;

use crate::state::StateInstance;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModelCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub builds: u64,
    /// Builds that lost a publish race and were dropped in favour of the canonical model.
    pub discarded: u64,
    pub entries: usize,
}

/// Per-block-type map from state to its published model.
///
/// Models are built outside the lock and published with compare-and-insert: the first
/// insert for a state wins and every caller, racing or not, gets that `Arc` back.
#[derive(Default)]
pub struct ModelCache {
    entries: RwLock<HashMap<StateInstance, Arc<Model>>>,
    hits: AtomicU64,
    misses: AtomicU64,
    builds: AtomicU64,
    discarded: AtomicU64,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, state: &StateInstance) -> Option<Arc<Model>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(state)
            .cloned()
    }

    pub fn get_or_build(&self, state: &StateInstance, build: impl FnOnce() -> Model) -> Arc<Model> {
        if let Some(model) = self.get(state) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return model;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let built = Arc::new(build());
        self.builds.fetch_add(1, Ordering::Relaxed);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.entry(state.clone()) {
            Entry::Occupied(e) => {
                self.discarded.fetch_add(1, Ordering::Relaxed);
                log::debug!("model cache: dropped racing build for {:?}", state.raw_values());
                e.get().clone()
            }
            Entry::Vacant(v) => v.insert(built).clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .map(|m| m.len())
            .unwrap_or_else(|e| e.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> ModelCacheStats {
        ModelCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            builds: self.builds.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
