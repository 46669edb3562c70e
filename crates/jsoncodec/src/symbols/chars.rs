use std::sync::Arc;

use super::{
    Name,
    table::{RootTable, SessionTable, Symbol},
};
use crate::{error::LimitError, options::StreamLimits};

pub(crate) fn char_hash(seed: u32, chars: impl IntoIterator<Item = char>) -> u32 {
    let mut h = seed;
    for c in chars {
        h = h.wrapping_mul(33).wrapping_add(u32::from(c));
    }
    h ^ (h >> 15)
}

#[derive(Debug, Clone)]
pub(crate) struct CharEntry {
    hash: u32,
    name: Name,
}

impl Symbol for CharEntry {
    fn hash(&self) -> u32 {
        self.hash
    }

    fn name(&self) -> &Name {
        &self.name
    }
}

/// Root symbol table for character tokenizers.
#[derive(Debug, Clone)]
pub struct CharSymbolTable {
    root: Arc<RootTable<CharEntry>>,
}

impl Default for CharSymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CharSymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Arc::new(RootTable::new("chars")),
        }
    }

    #[must_use]
    pub fn child(&self, canonicalize: bool, limits: StreamLimits) -> CharNameTable {
        CharNameTable {
            inner: SessionTable::new(&self.root, canonicalize, limits),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.root.snapshot().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        let hash = char_hash(self.root.seed(), text.chars());
        self.root
            .snapshot()
            .find(hash, |e| e.name.as_str() == text)
            .is_some()
    }
}

/// A tokenizer's session view of a [`CharSymbolTable`].
#[derive(Debug)]
pub struct CharNameTable {
    inner: SessionTable<CharEntry>,
}

impl CharNameTable {
    #[must_use]
    pub fn find_name(&self, chars: &[char]) -> Option<Name> {
        let hash = char_hash(self.inner.seed(), chars.iter().copied());
        self.inner
            .find(hash, |e| e.name.chars().eq(chars.iter().copied()))
    }

    #[must_use]
    pub fn find_str(&self, text: &str) -> Option<Name> {
        let hash = char_hash(self.inner.seed(), text.chars());
        self.inner.find(hash, |e| e.name.as_str() == text)
    }

    /// Interns the name made of `chars`.
    ///
    /// # Errors
    ///
    /// [`LimitError::SymbolCount`] or [`LimitError::SymbolCollisions`].
    pub fn add_name(&mut self, chars: &[char]) -> Result<Name, LimitError> {
        let text: String = chars.iter().collect();
        self.add_str(&text)
    }

    /// Interns `text`.
    ///
    /// # Errors
    ///
    /// As for [`CharNameTable::add_name`].
    pub fn add_str(&mut self, text: &str) -> Result<Name, LimitError> {
        let entry = CharEntry {
            hash: char_hash(self.inner.seed(), text.chars()),
            name: Name::new(text),
        };
        self.inner.insert(entry)
    }

    /// Looks up `text`, interning it on a miss.
    ///
    /// # Errors
    ///
    /// As for [`CharNameTable::add_name`].
    pub fn intern(&mut self, text: &str) -> Result<Name, LimitError> {
        match self.find_str(text) {
            Some(name) => Ok(name),
            None => self.add_str(text),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn added(&self) -> usize {
        self.inner.added()
    }

    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.inner.is_shared()
    }

    #[must_use]
    pub fn canonicalizes(&self) -> bool {
        self.inner.canonicalizes()
    }

    pub fn release(&mut self) {
        self.inner.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_and_strings_agree() {
        let root = CharSymbolTable::new();
        let mut child = root.child(true, StreamLimits::default());
        let chars: Vec<char> = "größe".chars().collect();
        let a = child.add_name(&chars).unwrap();
        let b = child.find_str("größe").unwrap();
        let c = child.find_name(&chars).unwrap();
        assert!(Name::ptr_eq(&a, &b));
        assert!(Name::ptr_eq(&a, &c));
        assert!(child.find_str("gross").is_none());
    }

    #[test]
    fn promotion_publishes_snapshot() {
        let root = CharSymbolTable::new();
        let mut first = root.child(true, StreamLimits::default());
        first.intern("id").unwrap();
        first.intern("name").unwrap();
        first.release();
        assert_eq!(root.len(), 2);

        // A smaller table does not replace a larger published one.
        let mut second = CharSymbolTable::child(&root, true, StreamLimits::default());
        let mut third = root.child(true, StreamLimits::default());
        second.intern("x").unwrap();
        third.intern("y").unwrap();
        third.intern("z").unwrap();
        third.release();
        assert_eq!(root.len(), 4);
        second.release();
        assert_eq!(root.len(), 4);
        assert!(root.contains("z"));
        assert!(!root.contains("x"));
    }
}
