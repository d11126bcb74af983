//! File identifiers and byte spans.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Handle for a file in the [`SourceDb`](crate::SourceDb), issued in load
/// order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// Refers to no file at all.
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Wraps a raw index.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// Half-open byte range `start..end` inside one file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// Owning file.
    pub file: FileId,
    /// First byte.
    pub start: u32,
    /// One past the last byte.
    pub end: u32,
}

impl Span {
    /// Placeholder for findings that have no location, such as a file with
    /// no entity at all.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// A span over `start..end` in `file`.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// A span over a `usize` range taken from string slicing. Offsets that do
    /// not fit in `u32` saturate.
    pub fn from_range(file: FileId, range: Range<usize>) -> Self {
        let narrow = |v: usize| u32::try_from(v).unwrap_or(u32::MAX);
        Self::new(file, narrow(range.start), narrow(range.end))
    }

    /// Length in bytes.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// `true` for a zero-length span.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if this span points into no file.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }
}
