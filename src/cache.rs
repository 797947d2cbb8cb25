//! In-process memo of the last resolved entity list
//!
//! The resolver keeps the most recent result of an entity listing so callers
//! can read it back without another round of remote lookups. The memo is
//! best-effort: it is replaced wholesale by every listing call, never merged,
//! and has no invalidation protocol beyond the source it was built from.
//!
//! Access is synchronized, and every store bumps a generation counter so a
//! caller can tell whether the list it holds is still the latest.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::resolver::ConfigSource;

/// A stored entity list together with where and when it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedEntities {
    pub source: ConfigSource,
    pub generation: u64,
    pub entities: Vec<Entity>,
}

#[derive(Debug, Default)]
struct CacheState {
    generation: u64,
    current: Option<CachedEntities>,
}

/// Shared, synchronized holder of the last entity listing
#[derive(Debug, Clone, Default)]
pub struct EntityCache {
    state: Arc<Mutex<CacheState>>,
}

impl EntityCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, CacheState>> {
        self.state.lock().map_err(|_| Error::LockPoisoned {
            context: "entity cache".to_string(),
        })
    }

    /// Replace the stored list, returning the new generation
    pub fn store(&self, source: ConfigSource, entities: Vec<Entity>) -> Result<u64> {
        let mut state = self.lock()?;
        state.generation += 1;
        let generation = state.generation;
        state.current = Some(CachedEntities {
            source,
            generation,
            entities,
        });
        Ok(generation)
    }

    /// The stored list, if any, with its source and generation
    pub fn snapshot(&self) -> Result<Option<CachedEntities>> {
        Ok(self.lock()?.current.clone())
    }

    /// The stored list, but only when it was built from `source`
    pub fn get(&self, source: &ConfigSource) -> Result<Option<Vec<Entity>>> {
        let state = self.lock()?;
        Ok(state
            .current
            .as_ref()
            .filter(|cached| &cached.source == source)
            .map(|cached| cached.entities.clone()))
    }

    /// Generation of the most recent store; 0 before the first one
    pub fn generation(&self) -> Result<u64> {
        Ok(self.lock()?.generation)
    }

    /// Drop the stored list. The generation keeps counting.
    pub fn clear(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.generation += 1;
        state.current = None;
        Ok(())
    }
}
