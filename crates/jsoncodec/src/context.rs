//! Nesting state shared by tokenizers and generators.
//!
//! A [`ContextStack`] always holds the root frame at the bottom; one frame is
//! pushed for every open array or object and popped when it closes, so
//! `depth()` is the number of unclosed structures.

use core::fmt;

use crate::{
    error::{GenerationError, LimitError},
    symbols::Name,
};

/// The kind of structure a frame stands for.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    Root,
    Array,
    Object,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Root => "root",
            Self::Array => "array",
            Self::Object => "object",
        })
    }
}

/// What a generator must write before the next field name or value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// First entry of a structure, or first root value.
    First,
    AfterComma,
    AfterColon,
    /// A root value follows an earlier root value.
    AfterRootValue,
}

/// One level of nesting.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    kind: ContextKind,
    entries: usize,
    name: Option<Name>,
    name_pending: bool,
}

impl Frame {
    fn new(kind: ContextKind) -> Self {
        Self {
            kind,
            entries: 0,
            name: None,
            name_pending: false,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ContextKind {
        self.kind
    }

    /// Values seen in an array or at the root, field names seen in an object.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// Index of the current array element.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.kind {
            ContextKind::Object => None,
            _ => self.entries.checked_sub(1),
        }
    }

    /// Most recent field name of an object frame.
    #[must_use]
    pub fn current_name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    /// Whether a field name was written and its value has not been.
    #[must_use]
    pub fn is_name_pending(&self) -> bool {
        self.name_pending
    }
}

/// One step of a [`ContextStack::path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathItem {
    Key(Name),
    Index(usize),
}

impl fmt::Display for PathItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(name) => write!(f, ".{name}"),
            Self::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Open structures from the root down to the innermost one.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextStack {
    frames: Vec<Frame>,
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextStack {
    #[must_use]
    pub fn new() -> Self {
        let mut frames = Vec::with_capacity(16);
        frames.push(Frame::new(ContextKind::Root));
        Self { frames }
    }

    /// Number of unclosed structures.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    #[must_use]
    pub fn current(&self) -> &Frame {
        // The root frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    #[must_use]
    pub fn kind(&self) -> ContextKind {
        self.current().kind
    }

    #[must_use]
    pub fn in_root(&self) -> bool {
        self.kind() == ContextKind::Root
    }

    #[must_use]
    pub fn in_array(&self) -> bool {
        self.kind() == ContextKind::Array
    }

    #[must_use]
    pub fn in_object(&self) -> bool {
        self.kind() == ContextKind::Object
    }

    /// Frames from the root outwards.
    pub fn frames(&self) -> impl DoubleEndedIterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Opens an array or object.
    ///
    /// # Errors
    ///
    /// [`LimitError::NestingDepth`] when the new depth would exceed
    /// `max_depth`.
    pub fn push(&mut self, kind: ContextKind, max_depth: usize) -> Result<(), LimitError> {
        debug_assert!(kind != ContextKind::Root, "cannot push a root frame");
        if self.depth() >= max_depth {
            return Err(LimitError::NestingDepth(max_depth));
        }
        self.frames.push(Frame::new(kind));
        Ok(())
    }

    /// Closes the innermost structure. The root frame stays in place.
    pub fn pop(&mut self) -> Option<Frame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// Records that a value starts in the current array or root context.
    pub(crate) fn start_value(&mut self) {
        let frame = self.current_mut();
        if frame.kind != ContextKind::Object {
            frame.entries += 1;
        }
    }

    /// Records a field name read in the current object.
    pub(crate) fn start_field(&mut self, name: Name) {
        let frame = self.current_mut();
        frame.entries += 1;
        frame.name = Some(name);
    }

    /// Validates and records a value written by a generator.
    ///
    /// # Errors
    ///
    /// [`GenerationError::ExpectedName`] inside an object when no field name
    /// was written. The stack is unchanged on error.
    pub fn write_value(&mut self) -> Result<WriteStatus, GenerationError> {
        let frame = self.current_mut();
        let status = match frame.kind {
            ContextKind::Object => {
                if !frame.name_pending {
                    return Err(GenerationError::ExpectedName);
                }
                frame.name_pending = false;
                return Ok(WriteStatus::AfterColon);
            }
            ContextKind::Array if frame.entries > 0 => WriteStatus::AfterComma,
            ContextKind::Root if frame.entries > 0 => WriteStatus::AfterRootValue,
            _ => WriteStatus::First,
        };
        frame.entries += 1;
        Ok(status)
    }

    /// Validates and records a field name written by a generator.
    ///
    /// # Errors
    ///
    /// [`GenerationError::NameOutsideObject`] outside objects and
    /// [`GenerationError::ExpectedValue`] right after another name. The stack
    /// is unchanged on error.
    pub fn write_field_name(&mut self) -> Result<WriteStatus, GenerationError> {
        let frame = self.current_mut();
        if frame.kind != ContextKind::Object {
            return Err(GenerationError::NameOutsideObject(frame.kind));
        }
        if frame.name_pending {
            return Err(GenerationError::ExpectedValue);
        }
        let status = if frame.entries == 0 {
            WriteStatus::First
        } else {
            WriteStatus::AfterComma
        };
        frame.entries += 1;
        frame.name_pending = true;
        Ok(status)
    }

    /// Checks that `kind` may be closed now, without changing anything.
    ///
    /// # Errors
    ///
    /// [`GenerationError::EndAtRoot`], [`GenerationError::MismatchedEnd`] or
    /// [`GenerationError::EndAfterName`].
    pub fn check_end(&self, kind: ContextKind) -> Result<(), GenerationError> {
        let frame = self.current();
        match frame.kind {
            ContextKind::Root => Err(GenerationError::EndAtRoot(kind)),
            current if current != kind => Err(GenerationError::MismatchedEnd {
                expected: current,
                found: kind,
            }),
            ContextKind::Object if frame.name_pending => Err(GenerationError::EndAfterName),
            _ => Ok(()),
        }
    }

    /// Path from the root to the current position.
    #[must_use]
    pub fn path(&self) -> Vec<PathItem> {
        self.frames
            .iter()
            .skip(1)
            .filter_map(|frame| match frame.kind {
                ContextKind::Object => frame.name.clone().map(PathItem::Key),
                _ => frame.current_index().map(PathItem::Index),
            })
            .collect()
    }

    /// The current position as an RFC 6901 JSON Pointer.
    #[must_use]
    pub fn pointer(&self) -> String {
        let mut out = String::new();
        for item in self.path() {
            out.push('/');
            match item {
                PathItem::Key(name) => {
                    for c in name.as_str().chars() {
                        match c {
                            '~' => out.push_str("~0"),
                            '/' => out.push_str("~1"),
                            c => out.push(c),
                        }
                    }
                }
                PathItem::Index(i) => {
                    out.push_str(itoa::Buffer::new().format(i));
                }
            }
        }
        out
    }
}
