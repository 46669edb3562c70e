//! Segmented, append-only byte buffer.
//!
//! [`ByteAccumulator`] collects bytes into a list of geometrically growing
//! chunks instead of one reallocating vector, so appending never copies what
//! was already written. The content is flattened into one contiguous `Vec`
//! only when [`ByteAccumulator::to_byte_array`] is called.
//!
//! Invariant: the filled chunks, in order, followed by `current[..current_len]`
//! are exactly the bytes appended since the last reset, and `past_len` is the
//! summed length of the filled chunks.

use std::io;

use bstr::ByteSlice;

/// Size of the first chunk.
pub const INITIAL_BLOCK_SIZE: usize = 500;

/// Upper bound for any single chunk allocation.
pub const MAX_BLOCK_SIZE: usize = 1 << 18;

/// Growable byte buffer built from a list of chunks, so appending never
/// copies what was already written.
pub struct ByteAccumulator {
    past: Vec<Box<[u8]>>,
    past_len: usize,
    current: Box<[u8]>,
    current_len: usize,
    chunks_allocated: usize,
}

impl Default for ByteAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_BLOCK_SIZE)
    }

    /// Creates an accumulator whose first chunk holds `first_block` bytes.
    #[must_use]
    pub fn with_capacity(first_block: usize) -> Self {
        Self {
            past: Vec::new(),
            past_len: 0,
            current: vec![0; first_block.max(1)].into_boxed_slice(),
            current_len: 0,
            chunks_allocated: 1,
        }
    }

    /// Number of bytes appended since the last reset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.past_len + self.current_len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of chunks in use, including the current one.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.past.len() + 1
    }

    /// Chunks allocated since construction or the last reset, including the
    /// one that was kept for reuse.
    #[must_use]
    pub fn chunks_allocated(&self) -> usize {
        self.chunks_allocated
    }

    #[inline]
    pub fn append(&mut self, b: u8) {
        if self.current_len >= self.current.len() {
            self.alloc_more();
        }
        self.current[self.current_len] = b;
        self.current_len += 1;
    }

    /// Appends the two low-order bytes of `b16`, most significant first.
    #[expect(clippy::cast_possible_truncation)]
    pub fn append_two_bytes(&mut self, b16: u32) {
        if self.current_len + 1 < self.current.len() {
            self.current[self.current_len] = (b16 >> 8) as u8;
            self.current[self.current_len + 1] = b16 as u8;
            self.current_len += 2;
        } else {
            self.append((b16 >> 8) as u8);
            self.append(b16 as u8);
        }
    }

    /// Appends the three low-order bytes of `b24`, most significant first.
    #[expect(clippy::cast_possible_truncation)]
    pub fn append_three_bytes(&mut self, b24: u32) {
        if self.current_len + 2 < self.current.len() {
            self.current[self.current_len] = (b24 >> 16) as u8;
            self.current[self.current_len + 1] = (b24 >> 8) as u8;
            self.current[self.current_len + 2] = b24 as u8;
            self.current_len += 3;
        } else {
            self.append((b24 >> 16) as u8);
            self.append((b24 >> 8) as u8);
            self.append(b24 as u8);
        }
    }

    pub fn append_slice(&mut self, mut bytes: &[u8]) {
        while !bytes.is_empty() {
            if self.current_len >= self.current.len() {
                self.alloc_more();
            }
            let room = self.current.len() - self.current_len;
            let n = room.min(bytes.len());
            self.current[self.current_len..self.current_len + n].copy_from_slice(&bytes[..n]);
            self.current_len += n;
            bytes = &bytes[n..];
        }
    }

    fn alloc_more(&mut self) {
        let full = core::mem::take(&mut self.current);
        self.past_len += full.len();
        self.past.push(full);
        let size =
            (self.past_len >> 1).clamp(INITIAL_BLOCK_SIZE + INITIAL_BLOCK_SIZE, MAX_BLOCK_SIZE);
        self.current = vec![0; size].into_boxed_slice();
        self.current_len = 0;
        self.chunks_allocated += 1;
    }

    /// Flattens the accumulated content into a new vector and resets.
    ///
    /// Nothing is allocated when the accumulator is empty.
    ///
    /// # Panics
    ///
    /// Panics if the chunk bookkeeping is inconsistent, which indicates a bug
    /// in this type rather than bad input.
    #[must_use]
    pub fn to_byte_array(&mut self) -> Vec<u8> {
        let total = self.len();
        if total == 0 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(total);
        for block in &self.past {
            out.extend_from_slice(block);
        }
        out.extend_from_slice(&self.current[..self.current_len]);
        assert_eq!(
            out.len(),
            total,
            "byte accumulator lost track of its content: copied {} of {total} bytes",
            out.len()
        );
        self.reset();
        out
    }

    /// Empties the accumulator, keeping the largest chunk for reuse.
    pub fn reset(&mut self) {
        self.past_len = 0;
        self.current_len = 0;
        if let Some(largest) = self.past.pop() {
            if largest.len() > self.current.len() {
                self.current = largest;
            }
            self.past.clear();
        }
        self.chunks_allocated = 1;
    }
}

impl io::Write for ByteAccumulator {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append_slice(buf);
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.append_slice(buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl core::fmt::Debug for ByteAccumulator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ByteAccumulator")
            .field("len", &self.len())
            .field("chunks", &self.chunk_count())
            .field("current", &self.current[..self.current_len].as_bstr())
            .finish_non_exhaustive()
    }
}
