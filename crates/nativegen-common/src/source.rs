use std::path::{Path, PathBuf};

/// A header (or hand-written source) file with its contents.
///
/// Holds the line table so diagnostics can be reported as `path:line:col`
/// without re-scanning the text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    pub fn new(path: impl AsRef<Path>, content: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i as u32 + 1))
            .collect();

        Self {
            path: path.as_ref().to_path_buf(),
            content,
            line_starts,
        }
    }

    /// Read a file from disk.
    pub fn read(path: impl AsRef<Path>) -> miette::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;
        Ok(Self::new(path, content))
    }

    /// Zero-based line and column of a byte offset.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line];
        (line as u32, col)
    }

    /// Human readable `path:line:col` (1-indexed) for a byte offset.
    pub fn location(&self, offset: u32) -> String {
        let (line, col) = self.line_col(offset);
        format!("{}:{}:{}", self.path.display(), line + 1, col + 1)
    }
}
