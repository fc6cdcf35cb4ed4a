//! Text wrapping and table measurement
//!
//! Everything here is pure geometry: nothing touches a `PdfDocument`. The
//! renderer consumes a [`TableLayout`] and decides where on which page each
//! row ends up.

use crate::schema::{Align, CellRange, Color, FontWeight, TableBlock, TableStyleCommand, VAlign};
use crate::Result;
use pdf_core::{FontStyle, PdfError, StandardFont};

/// Wrap text into lines no wider than `max_width` points
///
/// Explicit `\n` always breaks. A segment that fits is kept verbatim,
/// spaces included. Otherwise words are packed greedily with their original
/// spacing, and the whitespace at each soft break is dropped; a word wider
/// than `max_width` is kept whole on its own line. Empty input yields no
/// lines; an empty segment between two newlines yields an empty line.
pub fn wrap_text(text: &str, font: StandardFont, size: f64, max_width: f64) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();

    for segment in text.split('\n') {
        if font.text_width_points(segment, size) <= max_width {
            lines.push(segment.to_string());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0.0;

        for token in spaced_words(segment) {
            let token_width = font.text_width_points(token, size);

            if current.is_empty() || current_width + token_width <= max_width {
                current.push_str(token);
                current_width += token_width;
            } else {
                lines.push(std::mem::take(&mut current));
                let word = token.trim_start();
                current.push_str(word);
                current_width = font.text_width_points(word, size);
            }
        }

        lines.push(current);
    }

    lines
}

/// Split into words, each carrying the whitespace that precedes it
///
/// Trailing whitespace becomes a final whitespace-only token, so the tokens
/// concatenate back to `segment`.
fn spaced_words(segment: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_word = false;

    for (i, c) in segment.char_indices() {
        if c.is_whitespace() {
            if in_word {
                tokens.push(&segment[start..i]);
                start = i;
                in_word = false;
            }
        } else {
            in_word = true;
        }
    }
    if start < segment.len() {
        tokens.push(&segment[start..]);
    }

    tokens
}

/// Resolved style of one table cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    pub weight: FontWeight,
    pub font_size: f64,
    /// Explicit leading; `None` means 1.2 x font size
    pub leading: Option<f64>,
    pub text_color: Color,
    pub background: Option<Color>,
    pub align: Align,
    pub valign: VAlign,
    pub top_padding: f64,
    pub bottom_padding: f64,
    pub left_padding: f64,
    pub right_padding: f64,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            weight: FontWeight::Regular,
            font_size: 10.0,
            leading: None,
            text_color: Color::black(),
            background: None,
            align: Align::Left,
            valign: VAlign::Bottom,
            top_padding: 3.0,
            bottom_padding: 3.0,
            left_padding: 6.0,
            right_padding: 6.0,
        }
    }
}

impl CellStyle {
    /// Effective distance between baselines
    pub fn leading(&self) -> f64 {
        self.leading.unwrap_or(self.font_size * 1.2)
    }

    /// Apply one style command (the caller has already checked coverage)
    fn apply(&mut self, command: &TableStyleCommand) {
        match command {
            TableStyleCommand::FontWeight { weight, .. } => self.weight = *weight,
            TableStyleCommand::FontSize { size, .. } => self.font_size = *size,
            TableStyleCommand::Leading { leading, .. } => self.leading = Some(*leading),
            TableStyleCommand::TextColor { color, .. } => self.text_color = *color,
            TableStyleCommand::Background { color, .. } => self.background = Some(*color),
            TableStyleCommand::Align { align, .. } => self.align = *align,
            TableStyleCommand::VAlign { valign, .. } => self.valign = *valign,
            TableStyleCommand::TopPadding { padding, .. } => self.top_padding = *padding,
            TableStyleCommand::BottomPadding { padding, .. } => self.bottom_padding = *padding,
            TableStyleCommand::LeftPadding { padding, .. } => self.left_padding = *padding,
            TableStyleCommand::RightPadding { padding, .. } => self.right_padding = *padding,
            TableStyleCommand::Grid { .. } | TableStyleCommand::Outline { .. } => {}
        }
    }
}

/// A cell after wrapping
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutCell {
    pub lines: Vec<String>,
    pub font: StandardFont,
    pub style: CellStyle,
}

impl LaidOutCell {
    /// Height of the wrapped text block (without padding)
    pub fn content_height(&self) -> f64 {
        self.lines.len() as f64 * self.style.leading()
    }

    /// Offset from the row top to the first baseline
    pub fn first_baseline(&self, row_height: f64) -> f64 {
        let style = &self.style;
        let text_top = match style.valign {
            VAlign::Top => style.top_padding,
            VAlign::Bottom => row_height - style.bottom_padding - self.content_height(),
            VAlign::Middle => {
                let available = row_height - style.top_padding - style.bottom_padding;
                style.top_padding + (available - self.content_height()) / 2.0
            }
        };
        text_top + style.font_size
    }

    /// Anchor x for text, relative to the cell's left edge
    pub fn text_x(&self, cell_width: f64) -> f64 {
        let style = &self.style;
        match style.align {
            Align::Left => style.left_padding,
            Align::Right => cell_width - style.right_padding,
            Align::Center => {
                style.left_padding
                    + (cell_width - style.left_padding - style.right_padding) / 2.0
            }
        }
    }
}

/// Kind of ruling line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Every cell edge inside the range
    Grid,
    /// Outer edge of the range only
    Outline,
}

/// A ruling command resolved to concrete cell bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRule {
    pub kind: RuleKind,
    pub first_col: usize,
    pub first_row: usize,
    pub last_col: usize,
    pub last_row: usize,
    pub width: f64,
    pub color: Color,
}

impl TableRule {
    /// Rows of this rule that fall inside `start..end`
    pub fn rows_within(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        let first = self.first_row.max(start);
        let last = self.last_row.min(end.checked_sub(1)?);
        (first <= last).then_some((first, last))
    }
}

/// Measured table, ready to be placed
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub col_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
    /// Cells, row-major
    pub cells: Vec<Vec<LaidOutCell>>,
    /// Grid and outline commands in declaration order
    pub rules: Vec<TableRule>,
}

impl TableLayout {
    pub fn width(&self) -> f64 {
        self.col_widths.iter().sum()
    }

    pub fn height(&self) -> f64 {
        self.row_heights.iter().sum()
    }

    /// X offset of each column's left edge from the table's left edge
    pub fn col_offsets(&self) -> Vec<f64> {
        self.col_widths
            .iter()
            .scan(0.0, |acc, w| {
                let offset = *acc;
                *acc += w;
                Some(offset)
            })
            .collect()
    }
}

/// Resolve per-cell styles, wrap every cell and measure rows
pub fn layout_table(table: &TableBlock) -> Result<TableLayout> {
    table.validate()?;

    let cols = table.column_count();
    let rows = table.row_count();

    let mut styles = vec![vec![CellStyle::default(); cols]; rows];
    let mut rules = Vec::new();

    for command in &table.style {
        let range = command.range();
        match command {
            TableStyleCommand::Grid { width, color, .. } => {
                if let Some(rule) = resolve_rule(RuleKind::Grid, range, *width, *color, cols, rows)
                {
                    rules.push(rule);
                }
            }
            TableStyleCommand::Outline { width, color, .. } => {
                if let Some(rule) =
                    resolve_rule(RuleKind::Outline, range, *width, *color, cols, rows)
                {
                    rules.push(rule);
                }
            }
            _ => {
                let Some((c0, r0, c1, r1)) = range.resolve(cols, rows) else {
                    continue;
                };
                for row in &mut styles[r0..=r1] {
                    for style in &mut row[c0..=c1] {
                        style.apply(command);
                    }
                }
            }
        }
    }

    let mut cells = Vec::with_capacity(rows);
    let mut row_heights = Vec::with_capacity(rows);

    for (texts, row_styles) in table.rows.iter().zip(styles) {
        let mut row_cells = Vec::with_capacity(cols);
        let mut row_height: f64 = 0.0;

        for ((text, style), col_width) in texts.iter().zip(row_styles).zip(&table.col_widths) {
            let font = StandardFont::resolve(
                &table.font_family,
                style.weight.into(),
                FontStyle::Normal,
            )
            .ok_or_else(|| PdfError::FontNotFound(table.font_family.clone()))?;

            let max_width = col_width - style.left_padding - style.right_padding;
            let lines = wrap_text(text, font, style.font_size, max_width);

            let cell = LaidOutCell { lines, font, style };
            let needed = cell.content_height() + cell.style.top_padding + cell.style.bottom_padding;
            row_height = row_height.max(needed);
            row_cells.push(cell);
        }

        row_heights.push(row_height);
        cells.push(row_cells);
    }

    Ok(TableLayout {
        col_widths: table.col_widths.clone(),
        row_heights,
        cells,
        rules,
    })
}

fn resolve_rule(
    kind: RuleKind,
    range: CellRange,
    width: f64,
    color: Color,
    cols: usize,
    rows: usize,
) -> Option<TableRule> {
    let (first_col, first_row, last_col, last_row) = range.resolve(cols, rows)?;
    Some(TableRule {
        kind,
        first_col,
        first_row,
        last_col,
        last_row,
        width,
        color,
    })
}
