//! Every file loaded during one run.

use crate::file::SourceFile;
use crate::span::{FileId, Span};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Owns loaded files and maps spans back to lines and columns.
#[derive(Default)]
pub struct SourceDb {
    files: Vec<SourceFile>,
}

/// Where a span starts, for display as `path:line:col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// File path.
    pub path: PathBuf,
    /// 1-indexed line.
    pub line: u32,
    /// 1-indexed column.
    pub col: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.col)
    }
}

impl SourceDb {
    /// An empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a file from disk.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Adds in-memory text under `name`.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// The file behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Where `span` starts.
    pub fn locate(&self, span: Span) -> Location {
        let file = self.get_file(span.file);
        let (line, col) = file.position(span.start);
        Location {
            path: file.path.clone(),
            line,
            col,
        }
    }

    /// The text `span` covers.
    pub fn text(&self, span: Span) -> &str {
        self.get_file(span.file).slice(span.start, span.end)
    }
}
