//! Hash storage and root/session bookkeeping shared by both symbol table
//! flavors.

use std::{collections::hash_map::RandomState, hash::BuildHasher, sync::Arc};

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::Name;
use crate::{error::LimitError, options::StreamLimits};

/// Longest bucket chain tolerated.
pub const MAX_COLLISION_CHAIN: usize = 100;

/// New names a session must add before its table is offered to the root.
pub const PROMOTION_THRESHOLD: usize = 1;

const INITIAL_BUCKETS: usize = 64;

pub(crate) trait Symbol: Clone {
    fn hash(&self) -> u32;
    fn name(&self) -> &Name;
}

/// Power-of-two bucket array with chaining.
#[derive(Debug, Clone)]
pub(crate) struct HashArea<E> {
    buckets: Vec<Vec<E>>,
    count: usize,
    longest_chain: usize,
}

impl<E: Symbol> HashArea<E> {
    fn new() -> Self {
        Self {
            buckets: vec![Vec::new(); INITIAL_BUCKETS],
            count: 0,
            longest_chain: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.count
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn index(&self, hash: u32) -> usize {
        (hash as usize) & (self.buckets.len() - 1)
    }

    pub(crate) fn find(&self, hash: u32, mut matches: impl FnMut(&E) -> bool) -> Option<&E> {
        self.buckets[self.index(hash)]
            .iter()
            .find(|e| e.hash() == hash && matches(e))
    }

    #[cfg(test)]
    pub(crate) fn longest_chain(&self) -> usize {
        self.longest_chain
    }

    /// Adds `entry`, leaving the area untouched when its bucket is full.
    fn insert(&mut self, entry: E) -> Result<(), LimitError> {
        let index = self.index(entry.hash());
        let chain = &mut self.buckets[index];
        if chain.len() >= MAX_COLLISION_CHAIN {
            return Err(LimitError::SymbolCollisions(MAX_COLLISION_CHAIN));
        }
        chain.push(entry);
        self.longest_chain = self.longest_chain.max(chain.len());
        self.count += 1;
        if self.count > self.buckets.len() / 4 * 3 {
            self.rehash();
        }
        Ok(())
    }

    fn rehash(&mut self) {
        let size = self.buckets.len() * 2;
        trace!(
            from = self.buckets.len(),
            to = size,
            entries = self.count,
            "rehashing symbol table"
        );
        let old = core::mem::replace(&mut self.buckets, vec![Vec::new(); size]);
        self.longest_chain = 0;
        for entry in old.into_iter().flatten() {
            let index = self.index(entry.hash());
            let chain = &mut self.buckets[index];
            chain.push(entry);
            self.longest_chain = self.longest_chain.max(chain.len());
        }
    }
}

/// The published, shared state of a root table.
#[derive(Debug)]
pub(crate) struct RootTable<E> {
    seed: u32,
    published: Mutex<Arc<HashArea<E>>>,
    kind: &'static str,
}

impl<E: Symbol> RootTable<E> {
    pub(crate) fn new(kind: &'static str) -> Self {
        #[expect(clippy::cast_possible_truncation)]
        let seed = RandomState::new().hash_one(kind) as u32;
        Self {
            seed,
            published: Mutex::new(Arc::new(HashArea::new())),
            kind,
        }
    }

    pub(crate) fn seed(&self) -> u32 {
        self.seed
    }

    pub(crate) fn snapshot(&self) -> Arc<HashArea<E>> {
        Arc::clone(&self.published.lock())
    }

    fn offer(&self, area: &Arc<HashArea<E>>, max_entries_for_reuse: usize) {
        if area.len() > max_entries_for_reuse {
            debug!(
                table = self.kind,
                entries = area.len(),
                cap = max_entries_for_reuse,
                "symbol table too large to reuse, not promoting"
            );
            return;
        }
        let mut published = self.published.lock();
        if area.len() > published.len() {
            debug!(
                table = self.kind,
                from = published.len(),
                to = area.len(),
                "promoting symbol table"
            );
            *published = Arc::clone(area);
        }
    }
}

/// Per-tokenizer view of a root table.
///
/// Starts by sharing the root's snapshot and copies the bucket array on the
/// first insertion.
#[derive(Debug)]
pub(crate) struct SessionTable<E: Symbol> {
    root: Option<Arc<RootTable<E>>>,
    area: Arc<HashArea<E>>,
    seed: u32,
    added: usize,
    /// Set once an insert hits a limit; such a table is never offered.
    limited: bool,
    canonicalize: bool,
    limits: StreamLimits,
}

impl<E: Symbol> SessionTable<E> {
    pub(crate) fn new(root: &Arc<RootTable<E>>, canonicalize: bool, limits: StreamLimits) -> Self {
        Self {
            area: root.snapshot(),
            seed: root.seed(),
            root: Some(Arc::clone(root)),
            added: 0,
            limited: false,
            canonicalize,
            limits,
        }
    }

    pub(crate) fn seed(&self) -> u32 {
        self.seed
    }

    pub(crate) fn canonicalizes(&self) -> bool {
        self.canonicalize
    }

    pub(crate) fn len(&self) -> usize {
        self.area.len()
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.area.bucket_count()
    }

    pub(crate) fn added(&self) -> usize {
        self.added
    }

    pub(crate) fn is_shared(&self) -> bool {
        Arc::strong_count(&self.area) > 1
    }

    pub(crate) fn find(&self, hash: u32, matches: impl FnMut(&E) -> bool) -> Option<Name> {
        self.area.find(hash, matches).map(|e| e.name().clone())
    }

    pub(crate) fn insert(&mut self, entry: E) -> Result<Name, LimitError> {
        let name = entry.name().clone();
        if !self.canonicalize {
            return Ok(name);
        }
        if self.area.len() >= self.limits.max_symbol_count {
            self.limited = true;
            return Err(LimitError::SymbolCount(self.limits.max_symbol_count));
        }
        if let Err(err) = Arc::make_mut(&mut self.area).insert(entry) {
            self.limited = true;
            return Err(err);
        }
        self.added += 1;
        Ok(name)
    }

    /// Offers new names to the root table. Runs at most once.
    pub(crate) fn release(&mut self) {
        let Some(root) = self.root.take() else {
            return;
        };
        trace!(table = root.kind, added = self.added, "releasing symbol table");
        if self.limited {
            debug!(table = root.kind, "symbol table hit a limit, not promoting");
            return;
        }
        if self.canonicalize && self.added >= PROMOTION_THRESHOLD {
            root.offer(&self.area, self.limits.max_entries_for_reuse);
        }
    }
}

impl<E: Symbol> Drop for SessionTable<E> {
    fn drop(&mut self) {
        self.release();
    }
}
