//! Greedy word-wrap plus the flat-index -> screen coordinate table.
//!
//! Wrapping is a pure function of `(text, width)`. Every character that is
//! given a screen cell maps to `Some((line, column))`; a separator space
//! whose following word wrapped onto a new line is elided and maps to
//! `None`. Target-text indices are never shifted by elision, so the typed
//! log can keep comparing against the raw text.

/// Display lines and per-character coordinates for one target text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub lines: Vec<String>,
    /// Indexed by flat char position in the source text. `None` marks a
    /// wrap-elided separator space.
    pub coords: Vec<Option<(usize, usize)>>,
}

impl Layout {
    /// Line holding the caret. A cursor sitting on an elided space (or past
    /// the mapped range) resolves to the line of the next placed character,
    /// falling back to the last line.
    pub fn line_of_cursor(&self, cursor: usize) -> usize {
        for coord in self.coords.iter().skip(cursor) {
            if let Some((line, _)) = coord {
                return *line;
            }
        }
        self.lines.len().saturating_sub(1)
    }

    /// Screen cell for a flat index, if it was assigned one.
    pub fn cell(&self, index: usize) -> Option<(usize, usize)> {
        self.coords.get(index).copied().flatten()
    }
}

/// Wraps `text` into lines no wider than `width` (clamped to >= 1) and
/// builds the coordinate table in the same pass.
pub fn wrap(text: &str, width: usize) -> Layout {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut coords: Vec<Option<(usize, usize)>> = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for (i, word) in text.split(' ').enumerate() {
        let word_chars: Vec<char> = word.chars().collect();

        if i > 0 {
            // The separator space before this word. It gets a cell only
            // when the word joins the current line; a wrap absorbs it.
            if line_len + 1 + word_chars.len() <= width && line_len > 0 {
                coords.push(Some((lines.len(), line_len)));
                line.push(' ');
                line_len += 1;
            } else {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                coords.push(None);
            }
        }

        let mut rest = &word_chars[..];
        // A word longer than the width is hard-split into full-width chunks
        while line_len == 0 && rest.len() > width {
            let (chunk, tail) = rest.split_at(width);
            for (col, c) in chunk.iter().enumerate() {
                coords.push(Some((lines.len(), col)));
                line.push(*c);
            }
            lines.push(std::mem::take(&mut line));
            rest = tail;
        }
        for c in rest {
            coords.push(Some((lines.len(), line_len)));
            line.push(*c);
            line_len += 1;
        }
    }

    if line_len > 0 {
        lines.push(line);
    }

    Layout { lines, coords }
}
