use std::sync::Arc;

use super::{
    Name,
    table::{RootTable, SessionTable, Symbol},
};
use crate::{error::LimitError, options::StreamLimits};

/// Packs UTF-8 bytes into big-endian quads, zero-padding the last one.
#[must_use]
pub fn pack_quads(bytes: &[u8]) -> Vec<u32> {
    let mut quads = Vec::with_capacity(bytes.len().div_ceil(4));
    pack_quads_into(bytes, &mut quads);
    quads
}

/// Like [`pack_quads`], appending to `quads`.
pub fn pack_quads_into(bytes: &[u8], quads: &mut Vec<u32>) {
    quads.extend(bytes.chunks(4).map(|chunk| {
        chunk
            .iter()
            .enumerate()
            .fold(0u32, |quad, (i, b)| quad | (u32::from(*b) << (24 - 8 * i)))
    }));
}

/// Hash over every quad and the byte length.
#[must_use]
pub(crate) fn quad_hash(seed: u32, quads: &[u32], byte_len: usize) -> u32 {
    #[expect(clippy::cast_possible_truncation)]
    let mut h = seed ^ (byte_len as u32).wrapping_mul(0x0100_0193);
    for &q in quads {
        h = (h ^ q).wrapping_mul(0x9E37_79B1);
        h ^= h >> 15;
    }
    h ^ (h >> 16)
}

#[derive(Debug, Clone)]
pub(crate) struct ByteEntry {
    hash: u32,
    byte_len: usize,
    quads: Box<[u32]>,
    name: Name,
}

impl Symbol for ByteEntry {
    fn hash(&self) -> u32 {
        self.hash
    }

    fn name(&self) -> &Name {
        &self.name
    }
}

/// Root symbol table for byte tokenizers, keyed by quad-packed UTF-8.
///
/// Cloning shares the same root. Tokenizers work on a [`ByteNameTable`]
/// obtained from [`ByteSymbolTable::child`]; names they add are published back
/// here when they close.
#[derive(Debug, Clone)]
pub struct ByteSymbolTable {
    root: Arc<RootTable<ByteEntry>>,
}

impl Default for ByteSymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Arc::new(RootTable::new("bytes")),
        }
    }

    /// Creates a session table sharing the currently published names.
    #[must_use]
    pub fn child(&self, canonicalize: bool, limits: StreamLimits) -> ByteNameTable {
        ByteNameTable {
            inner: SessionTable::new(&self.root, canonicalize, limits),
        }
    }

    /// Number of names in the published snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.snapshot().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the published snapshot contains `text`.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        let quads = pack_quads(text.as_bytes());
        let hash = quad_hash(self.root.seed(), &quads, text.len());
        self.root
            .snapshot()
            .find(hash, |e| e.byte_len == text.len() && *e.quads == *quads)
            .is_some()
    }
}

/// A tokenizer's session view of a [`ByteSymbolTable`].
#[derive(Debug)]
pub struct ByteNameTable {
    inner: SessionTable<ByteEntry>,
}

impl ByteNameTable {
    #[must_use]
    pub fn hash(&self, quads: &[u32], byte_len: usize) -> u32 {
        quad_hash(self.inner.seed(), quads, byte_len)
    }

    /// Looks up the name whose UTF-8 bytes pack into `quads`.
    #[must_use]
    pub fn find_name(&self, quads: &[u32], byte_len: usize) -> Option<Name> {
        let hash = self.hash(quads, byte_len);
        self.inner
            .find(hash, |e| e.byte_len == byte_len && *e.quads == *quads)
    }

    #[must_use]
    pub fn find_name1(&self, q1: u32, byte_len: usize) -> Option<Name> {
        self.find_name(&[q1], byte_len)
    }

    #[must_use]
    pub fn find_name2(&self, q1: u32, q2: u32, byte_len: usize) -> Option<Name> {
        self.find_name(&[q1, q2], byte_len)
    }

    #[must_use]
    pub fn find_name3(&self, q1: u32, q2: u32, q3: u32, byte_len: usize) -> Option<Name> {
        self.find_name(&[q1, q2, q3], byte_len)
    }

    /// Interns `text`, whose UTF-8 bytes pack into `quads`.
    ///
    /// The caller has already looked the name up and missed. When the table
    /// does not canonicalize, a fresh unshared name is returned.
    ///
    /// # Errors
    ///
    /// [`LimitError::SymbolCount`] when the session holds the maximum number
    /// of names, [`LimitError::SymbolCollisions`] on pathological hashing.
    pub fn add_name(&mut self, text: &str, quads: &[u32]) -> Result<Name, LimitError> {
        debug_assert_eq!(quads.len(), text.len().div_ceil(4));
        let entry = ByteEntry {
            hash: self.hash(quads, text.len()),
            byte_len: text.len(),
            quads: quads.into(),
            name: Name::new(text),
        };
        self.inner.insert(entry)
    }

    /// Looks up `text`, interning it on a miss.
    ///
    /// # Errors
    ///
    /// As for [`ByteNameTable::add_name`].
    pub fn intern(&mut self, text: &str) -> Result<Name, LimitError> {
        let quads = pack_quads(text.as_bytes());
        match self.find_name(&quads, text.len()) {
            Some(name) => Ok(name),
            None => self.add_name(text, &quads),
        }
    }

    /// Number of names visible to this session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names this session added to the snapshot it started from.
    #[must_use]
    pub fn added(&self) -> usize {
        self.inner.added()
    }

    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.inner.bucket_count()
    }

    /// Whether the bucket array is still shared with the root snapshot.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.inner.is_shared()
    }

    #[must_use]
    pub fn canonicalizes(&self) -> bool {
        self.inner.canonicalizes()
    }

    /// Offers this session's names to the root. Later calls do nothing.
    pub fn release(&mut self) {
        self.inner.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> (ByteSymbolTable, ByteNameTable) {
        let root = ByteSymbolTable::new();
        let child = root.child(true, StreamLimits::default());
        (root, child)
    }

    #[test]
    fn packs_big_endian_with_zero_padding() {
        assert_eq!(pack_quads(b"abcde"), vec![0x6162_6364, 0x6500_0000]);
        assert!(pack_quads(b"").is_empty());
    }

    #[test]
    fn same_bytes_same_name() {
        let (_root, mut child) = table();
        let a = child.intern("name").unwrap();
        let b = child.intern("name").unwrap();
        assert!(Name::ptr_eq(&a, &b));
        let quads = pack_quads(b"name");
        let c = child.find_name1(quads[0], 4).unwrap();
        assert!(Name::ptr_eq(&a, &c));
    }

    #[test]
    fn byte_length_disambiguates_zero_padding() {
        let (_root, mut child) = table();
        let a = child.intern("a").unwrap();
        let nul = child.intern("a\0").unwrap();
        assert!(!Name::ptr_eq(&a, &nul));
        assert_eq!(nul.as_str(), "a\0");
    }

    #[test]
    fn every_byte_of_every_quad_matters() {
        let (_root, child) = table();
        let base = pack_quads(b"abcdefghijkl");
        let h = child.hash(&base, 12);
        let mut distinct = 0;
        for i in 0..12 {
            let mut bytes = *b"abcdefghijkl";
            bytes[i] ^= 0x01;
            if child.hash(&pack_quads(&bytes), 12) != h {
                distinct += 1;
            }
        }
        assert_eq!(distinct, 12);
    }

    #[test]
    fn copy_on_write_and_promotion() {
        let (root, mut child) = table();
        assert!(child.is_shared());
        assert!(child.find_name1(0x6100_0000, 1).is_none());
        child.intern("a").unwrap();
        assert!(!child.is_shared());
        assert!(root.is_empty());
        child.release();
        assert_eq!(root.len(), 1);
        assert!(root.contains("a"));

        let second = root.child(true, StreamLimits::default());
        assert!(second.find_name1(0x6100_0000, 1).is_some());
    }

    #[test]
    fn oversized_tables_are_not_promoted() {
        let root = ByteSymbolTable::new();
        let limits = StreamLimits {
            max_entries_for_reuse: 3,
            ..StreamLimits::default()
        };
        let mut child = root.child(true, limits);
        for i in 0..4 {
            child.intern(&format!("k{i}")).unwrap();
        }
        drop(child);
        assert!(root.is_empty());
    }

    #[test]
    fn grows_past_many_rehashes() {
        let (_root, mut child) = table();
        let names: Vec<Name> = (0..5_000)
            .map(|i| child.intern(&format!("field_{i}")).unwrap())
            .collect();
        assert_eq!(child.len(), 5_000);
        assert!(child.bucket_count() >= 5_000 * 4 / 3);
        for (i, name) in names.iter().enumerate() {
            let again = child.intern(&format!("field_{i}")).unwrap();
            assert!(Name::ptr_eq(name, &again));
        }
    }

    #[test]
    fn symbol_count_limit() {
        let root = ByteSymbolTable::new();
        let limits = StreamLimits {
            max_symbol_count: 2,
            ..StreamLimits::default()
        };
        let mut child = root.child(true, limits);
        child.intern("a").unwrap();
        child.intern("b").unwrap();
        assert_eq!(child.intern("c"), Err(LimitError::SymbolCount(2)));
        assert!(child.intern("a").is_ok());
    }

    #[test]
    fn without_canonicalization_names_are_fresh() {
        let root = ByteSymbolTable::new();
        let mut child = root.child(false, StreamLimits::default());
        let a = child.intern("x").unwrap();
        let b = child.intern("x").unwrap();
        assert_eq!(a, b);
        assert!(!Name::ptr_eq(&a, &b));
        child.release();
        assert!(root.is_empty());
    }
}
