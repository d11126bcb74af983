//! One loaded file plus its line index.

use crate::span::FileId;
use std::path::PathBuf;

/// The text of a loaded wrapper and where its lines begin.
pub struct SourceFile {
    /// Handle within the owning database.
    pub id: FileId,
    /// Path on disk, or the name given to in-memory text.
    pub path: PathBuf,
    /// Full text.
    pub content: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Wraps `content` and indexes its lines.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| (i + 1) as u32))
            .collect();
        Self {
            id,
            path,
            content,
            line_starts,
        }
    }

    /// 1-indexed `(line, column)` of a byte offset. Columns count bytes.
    pub fn position(&self, offset: u32) -> (u32, u32) {
        let idx = self.line_starts.partition_point(|&start| start <= offset) - 1;
        (idx as u32 + 1, offset - self.line_starts[idx] + 1)
    }

    /// Number of lines, counting a trailing empty one.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of a 1-indexed line without its `\n` or `\r\n`.
    pub fn line(&self, number: u32) -> Option<&str> {
        let idx = (number as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)? as usize;
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.content.len(), |&next| next as usize);
        let text = &self.content[start..end];
        let text = text.strip_suffix('\n').unwrap_or(text);
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    /// Text between two byte offsets.
    pub fn slice(&self, start: u32, end: u32) -> &str {
        &self.content[start as usize..end as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content: &str) -> SourceFile {
        SourceFile::new(
            FileId::from_raw(0),
            PathBuf::from("NiFpgaIPWrapper_top.vhd"),
            content.to_string(),
        )
    }

    #[test]
    fn positions() {
        let f = file("entity a is\n  port (\nend a;");
        assert_eq!(f.position(0), (1, 1));
        assert_eq!(f.position(11), (1, 12));
        assert_eq!(f.position(12), (2, 1));
        assert_eq!(f.position(14), (2, 3));
        assert_eq!(f.position(21), (3, 1));
        assert_eq!(f.line_count(), 3);
    }

    #[test]
    fn lines_drop_terminators() {
        let f = file("port (\r\n  clk : in std_logic;\r\n);");
        assert_eq!(f.line(1), Some("port ("));
        assert_eq!(f.line(2), Some("  clk : in std_logic;"));
        assert_eq!(f.line(3), Some(");"));
        assert_eq!(f.line(0), None);
        assert_eq!(f.line(4), None);
    }

    #[test]
    fn trailing_newline_adds_empty_line() {
        let f = file("end a;\n");
        assert_eq!(f.line_count(), 2);
        assert_eq!(f.line(2), Some(""));
    }

    #[test]
    fn slices() {
        let f = file("reset : in std_logic;");
        assert_eq!(f.slice(0, 5), "reset");
        assert_eq!(f.slice(8, 10), "in");
    }

    #[test]
    fn empty_content() {
        let f = file("");
        assert_eq!(f.position(0), (1, 1));
        assert_eq!(f.line(1), Some(""));
    }
}
