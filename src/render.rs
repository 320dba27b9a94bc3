use crate::session::{Input, Outcome};
use crate::wrap::Layout;

/// Placeholder glyph painted for the caret when the target char is a space
const CARET_SPACE_GLYPH: char = '_';

/// Named styles the drawing backend maps to real colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Base,
    Correct,
    Incorrect,
    Caret,
}

/// One instruction for the drawing backend: put `text` at `(row, col)` in
/// `style`. Rows are relative to the top of the visible text band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintOp {
    pub row: usize,
    pub col: usize,
    pub text: String,
    pub style: CellStyle,
}

/// Everything the backend needs to draw one frame of the text area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    /// First layout line shown at the top of the band
    pub scroll: usize,
    pub ops: Vec<PaintOp>,
}

/// Computes the frame for the current state: base lines, one overlay per
/// typed character that owns a screen cell, and the caret. Characters whose
/// flat index was wrap-elided produce no instruction. Pure function; no
/// backend involved.
pub fn plan(layout: &Layout, input: &[Input], visible_rows: usize) -> RenderPlan {
    let visible_rows = visible_rows.max(1);
    let cursor = input.len();
    let cursor_line = layout.line_of_cursor(cursor);
    let scroll = cursor_line.saturating_sub(visible_rows / 2);

    let grid: Vec<Vec<char>> = layout.lines.iter().map(|l| l.chars().collect()).collect();
    let visible = |line: usize| line >= scroll && line < scroll + visible_rows;

    let mut ops = Vec::new();

    for (row, line) in layout
        .lines
        .iter()
        .skip(scroll)
        .take(visible_rows)
        .enumerate()
    {
        ops.push(PaintOp {
            row,
            col: 0,
            text: line.clone(),
            style: CellStyle::Base,
        });
    }

    for (i, entry) in input.iter().enumerate() {
        if let Some((line, col)) = layout.cell(i) {
            if visible(line) {
                ops.push(PaintOp {
                    row: line - scroll,
                    col,
                    text: grid[line][col].to_string(),
                    style: match entry.outcome {
                        Outcome::Correct => CellStyle::Correct,
                        Outcome::Incorrect => CellStyle::Incorrect,
                    },
                });
            }
        }
    }

    if let Some((line, col)) = layout.cell(cursor) {
        if visible(line) {
            let target = grid[line][col];
            ops.push(PaintOp {
                row: line - scroll,
                col,
                text: match target {
                    ' ' => CARET_SPACE_GLYPH.to_string(),
                    c => c.to_string(),
                },
                style: CellStyle::Caret,
            });
        }
    }

    RenderPlan { scroll, ops }
}
