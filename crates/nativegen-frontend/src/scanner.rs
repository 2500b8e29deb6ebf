//! Brace-aware cursor over comment-free header text.
//!
//! Blocks are delimited by tracking nesting depth rather than by pattern
//! matching, so nested braces inside namespace or function bodies never
//! cut a block short.

use nativegen_common::Span;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("`{open}` at offset {at} is never closed")]
    Unterminated { open: char, at: usize },
    #[error("expected `{expected}` at offset {at}")]
    Expected { expected: char, at: usize },
}

impl ScanError {
    pub fn offset(&self) -> usize {
        match *self {
            ScanError::Unterminated { at, .. } | ScanError::Expected { at, .. } => at,
        }
    }
}

/// A cursor over `text[pos..end]`. Offsets are always absolute into `text`.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    end: usize,
}

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            end: text.len(),
        }
    }

    /// A cursor restricted to `start..end` of `text`.
    pub fn range(text: &'a str, start: usize, end: usize) -> Self {
        Self {
            text,
            pos: start,
            end,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.end);
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..self.end]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consume `c` if it is the next character.
    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume an identifier at the cursor.
    pub fn ident(&mut self) -> Option<(&'a str, Span)> {
        let rest = self.rest();
        let len = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        let start = self.pos;
        self.pos += len;
        Some((&self.text[start..self.pos], Span::new(start, self.pos)))
    }

    /// Advance to the next whole-word `keyword` outside any brace block and
    /// return its start offset; the cursor ends up just past the keyword.
    pub fn next_keyword(&mut self, keyword: &str) -> Option<usize> {
        let bytes = self.text.as_bytes();
        let mut depth = 0usize;
        let mut i = self.pos;

        while i < self.end {
            match bytes[i] {
                b'{' => depth += 1,
                b'}' => depth = depth.saturating_sub(1),
                _ if depth == 0 && bytes[i..self.end].starts_with(keyword.as_bytes()) => {
                    let before_ok = i == 0 || !is_ident_char(bytes[i - 1] as char);
                    let after = i + keyword.len();
                    let after_ok = after >= self.end || !is_ident_char(bytes[after] as char);
                    if before_ok && after_ok {
                        self.pos = after;
                        return Some(i);
                    }
                }
                _ => {}
            }
            i += 1;
        }

        self.pos = self.end;
        None
    }

    /// Advance past the next whole-word `keyword` at any nesting depth and
    /// return its start offset.
    pub fn next_word(&mut self, keyword: &str) -> Option<usize> {
        if !self.resync(keyword) {
            return None;
        }
        let start = self.pos;
        self.pos += keyword.len();
        Some(start)
    }

    /// Recover after a malformed block: move the cursor onto the next
    /// whole-word `keyword` regardless of nesting depth. Returns `false` and
    /// moves to the end if there is none.
    pub fn resync(&mut self, keyword: &str) -> bool {
        let bytes = self.text.as_bytes();
        let mut from = self.pos;
        while let Some(found) = self.text[from..self.end].find(keyword) {
            let i = from + found;
            let after = i + keyword.len();
            let before_ok = i == 0 || !is_ident_char(bytes[i - 1] as char);
            let after_ok = after >= self.end || !is_ident_char(bytes[after] as char);
            if before_ok && after_ok {
                self.pos = i;
                return true;
            }
            from = after;
        }
        self.pos = self.end;
        false
    }

    /// Advance to the first of `targets` at nesting depth zero (counting both
    /// braces and parentheses) and return it with its offset. The cursor is
    /// left on the found character.
    pub fn find_any(&mut self, targets: &[char]) -> Option<(char, usize)> {
        let mut depth = 0usize;
        for (offset, c) in self.rest().char_indices() {
            let at = self.pos + offset;
            if depth == 0 && targets.contains(&c) {
                self.pos = at;
                return Some((c, at));
            }
            match c {
                '{' | '(' => depth += 1,
                '}' | ')' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        None
    }

    /// With the cursor on `open`, find the offset of its matching `close` and
    /// move the cursor past it. On failure the cursor is left unchanged.
    pub fn block(&mut self, open: char, close: char) -> Result<(usize, usize), ScanError> {
        let start = self.pos;
        if self.peek() != Some(open) {
            return Err(ScanError::Expected {
                expected: open,
                at: start,
            });
        }

        let mut depth = 0usize;
        for (offset, c) in self.rest().char_indices() {
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    let end = self.pos + offset;
                    self.pos = end + close.len_utf8();
                    return Ok((start, end));
                }
            }
        }

        Err(ScanError::Unterminated { open, at: start })
    }
}

/// Split `text` on `sep` where it is not nested inside `()`, `[]` or `{}`.
pub(crate) fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut last = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ if c == sep && depth == 0 => {
                parts.push(&text[last..i]);
                last = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[last..]);
    parts
}
