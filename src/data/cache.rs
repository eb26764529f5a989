use std::collections::HashMap;
use std::sync::Arc;

use super::loader::{self, LoadError, Loaded, Source};

/// Session-scoped memo of load results, keyed by source.
///
/// Sources are treated as static while the application runs, so a
/// successful load is reused until [`TableCache::invalidate`] is called.
/// Failed loads are not stored; asking again retries from disk.
#[derive(Debug, Default)]
pub struct TableCache {
    entries: HashMap<Source, Arc<Loaded>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&mut self, source: &Source) -> Result<Arc<Loaded>, LoadError> {
        if let Some(hit) = self.entries.get(source) {
            log::debug!("cache hit for {}", source.path().display());
            return Ok(Arc::clone(hit));
        }
        let loaded = Arc::new(loader::load(source)?);
        self.entries.insert(source.clone(), Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Drop the cached result so the next request re-reads the source.
    pub fn invalidate(&mut self, source: &Source) {
        self.entries.remove(source);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
