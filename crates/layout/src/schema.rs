//! Story schema types

use crate::{LayoutError, Result};
use serde::{Deserialize, Serialize};

/// RGB color, serialized as a `#rrggbb` string
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red component (0.0 - 1.0)
    pub r: f64,
    /// Green component (0.0 - 1.0)
    pub g: f64,
    /// Blue component (0.0 - 1.0)
    pub b: f64,
}

impl Color {
    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Parse a `#rrggbb` hex color
    pub fn from_hex(hex: &str) -> Result<Self> {
        let parsed = pdf_core::Color::from_hex(hex)
            .map_err(|_| LayoutError::InvalidColor(hex.to_string()))?;
        Ok(parsed.into())
    }

    /// Black color
    pub fn black() -> Self {
        Self::from_rgb(0, 0, 0)
    }

    /// White color
    pub fn white() -> Self {
        Self::from_rgb(255, 255, 255)
    }

    /// Off-white (#f5f5f5)
    pub fn whitesmoke() -> Self {
        Self::from_rgb(0xf5, 0xf5, 0xf5)
    }

    /// Format as `#rrggbb`
    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl TryFrom<String> for Color {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl From<pdf_core::Color> for Color {
    fn from(color: pdf_core::Color) -> Self {
        Self {
            r: color.r as f64,
            g: color.g as f64,
            b: color.b as f64,
        }
    }
}

impl From<Color> for pdf_core::Color {
    fn from(color: Color) -> Self {
        pdf_core::Color::rgb(color.r as f32, color.g as f32, color.b as f32)
    }
}

/// Horizontal alignment
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl From<Align> for pdf_core::Align {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => pdf_core::Align::Left,
            Align::Center => pdf_core::Align::Center,
            Align::Right => pdf_core::Align::Right,
        }
    }
}

/// Vertical alignment inside a table cell
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    Middle,
    #[default]
    Bottom,
}

/// Font weight
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

impl From<FontWeight> for pdf_core::FontWeight {
    fn from(weight: FontWeight) -> Self {
        match weight {
            FontWeight::Regular => pdf_core::FontWeight::Regular,
            FontWeight::Bold => pdf_core::FontWeight::Bold,
        }
    }
}

fn default_font_family() -> String {
    "Helvetica".to_string()
}

fn default_font_size() -> f64 {
    10.0
}

/// Paragraph style
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParagraphStyle {
    /// Style name (informational)
    #[serde(default)]
    pub name: String,

    /// Font family
    #[serde(rename = "fontFamily")]
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight
    #[serde(default)]
    pub weight: FontWeight,

    /// Font size in points
    #[serde(rename = "fontSize")]
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Distance between baselines; defaults to 1.2 x font size
    #[serde(default)]
    pub leading: Option<f64>,

    /// Text color
    #[serde(rename = "textColor")]
    #[serde(default)]
    pub text_color: Color,

    /// Horizontal alignment within the frame
    #[serde(default)]
    pub alignment: Align,

    /// Space above the paragraph (suppressed at the top of a page)
    #[serde(rename = "spaceBefore")]
    #[serde(default)]
    pub space_before: f64,

    /// Space below the paragraph
    #[serde(rename = "spaceAfter")]
    #[serde(default)]
    pub space_after: f64,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self::normal()
    }
}

impl ParagraphStyle {
    /// Body text: Helvetica 10/12
    pub fn normal() -> Self {
        Self {
            name: "Normal".to_string(),
            font_family: default_font_family(),
            weight: FontWeight::Regular,
            font_size: 10.0,
            leading: Some(12.0),
            text_color: Color::black(),
            alignment: Align::Left,
            space_before: 0.0,
            space_after: 0.0,
        }
    }

    /// First-level heading: Helvetica-Bold 18/22
    pub fn heading1() -> Self {
        Self {
            name: "Heading1".to_string(),
            weight: FontWeight::Bold,
            font_size: 18.0,
            leading: Some(22.0),
            space_after: 6.0,
            ..Self::normal()
        }
    }

    /// Second-level heading: Helvetica-Bold 14/18
    pub fn heading2() -> Self {
        Self {
            name: "Heading2".to_string(),
            weight: FontWeight::Bold,
            font_size: 14.0,
            leading: Some(18.0),
            space_before: 12.0,
            space_after: 6.0,
            ..Self::normal()
        }
    }

    /// Rename the style
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_alignment(mut self, alignment: Align) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_space_after(mut self, space: f64) -> Self {
        self.space_after = space;
        self
    }

    /// Effective leading in points
    pub fn leading(&self) -> f64 {
        self.leading.unwrap_or(self.font_size * 1.2)
    }
}

/// Content block (tagged union)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// Wrapped text in a single style
    Paragraph(ParagraphBlock),

    /// Fixed vertical whitespace
    Spacer(SpacerBlock),

    /// Grid of text cells with style commands
    Table(TableBlock),
}

impl Block {
    /// Create a paragraph block
    pub fn paragraph(text: &str, style: ParagraphStyle) -> Self {
        Block::Paragraph(ParagraphBlock {
            text: text.to_string(),
            style,
        })
    }

    /// Create a spacer block of the given height
    pub fn spacer(height: f64) -> Self {
        Block::Spacer(SpacerBlock { width: 0.0, height })
    }

    /// Short name of the block kind (for logging)
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Spacer(_) => "spacer",
            Block::Table(_) => "table",
        }
    }
}

/// Paragraph block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParagraphBlock {
    /// Text content; `\n` forces a line break
    pub text: String,

    /// Paragraph style
    #[serde(default)]
    pub style: ParagraphStyle,
}

/// Spacer block
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpacerBlock {
    /// Width in points (unused by vertical flow)
    #[serde(default)]
    pub width: f64,

    /// Height in points
    pub height: f64,
}

fn default_table_align() -> Align {
    Align::Center
}

/// Table block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableBlock {
    /// Cell text, row-major; `\n` inside a cell forces a line break
    pub rows: Vec<Vec<String>>,

    /// Column widths in points (one per column)
    #[serde(rename = "colWidths")]
    pub col_widths: Vec<f64>,

    /// Style commands, applied in order
    #[serde(default)]
    pub style: Vec<TableStyleCommand>,

    /// Horizontal placement of the table within the frame
    #[serde(rename = "hAlign")]
    #[serde(default = "default_table_align")]
    pub h_align: Align,

    /// Font family for every cell
    #[serde(rename = "fontFamily")]
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl TableBlock {
    /// Create a table with no style commands
    pub fn new(rows: Vec<Vec<String>>, col_widths: Vec<f64>) -> Self {
        Self {
            rows,
            col_widths,
            style: Vec::new(),
            h_align: Align::Center,
            font_family: default_font_family(),
        }
    }

    /// Append style commands
    pub fn with_style(mut self, commands: Vec<TableStyleCommand>) -> Self {
        self.style.extend(commands);
        self
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.col_widths.len()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total width in points
    pub fn width(&self) -> f64 {
        self.col_widths.iter().sum()
    }

    /// Check that every row has one cell per column width
    pub fn validate(&self) -> Result<()> {
        if self.col_widths.is_empty() {
            return Err(LayoutError::InvalidTable(
                "table has no column widths".to_string(),
            ));
        }

        if let Some(w) = self.col_widths.iter().find(|w| !w.is_finite() || **w <= 0.0) {
            return Err(LayoutError::InvalidTable(format!(
                "column width must be positive, got {w}"
            )));
        }

        for (index, row) in self.rows.iter().enumerate() {
            if row.len() != self.col_widths.len() {
                return Err(LayoutError::InvalidTable(format!(
                    "row {index} has {} cells, expected {}",
                    row.len(),
                    self.col_widths.len()
                )));
            }
        }

        Ok(())
    }
}

/// Rectangular cell range, `(column, row)` corners inclusive
///
/// Negative indices count from the end: `-1` is the last column/row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellRange {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

impl CellRange {
    pub fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        Self { start, end }
    }

    /// Every cell of the table
    pub fn all() -> Self {
        Self::new((0, 0), (-1, -1))
    }

    /// A single cell
    pub fn cell(col: i32, row: i32) -> Self {
        Self::new((col, row), (col, row))
    }

    /// One whole row
    pub fn row(row: i32) -> Self {
        Self::new((0, row), (-1, row))
    }

    /// One whole column
    pub fn column(col: i32) -> Self {
        Self::new((col, 0), (col, -1))
    }

    /// Resolve to concrete inclusive bounds `(col0, row0, col1, row1)`
    ///
    /// Returns `None` when the range covers no cell of a `cols` x `rows` table.
    pub fn resolve(&self, cols: usize, rows: usize) -> Option<(usize, usize, usize, usize)> {
        let col0 = normalize_index(self.start.0, cols)?;
        let row0 = normalize_index(self.start.1, rows)?;
        let col1 = normalize_index(self.end.0, cols)?;
        let row1 = normalize_index(self.end.1, rows)?;

        if col0 > col1 || row0 > row1 {
            return None;
        }

        Some((col0, row0, col1, row1))
    }

    /// Check whether the cell at `(col, row)` is covered
    pub fn contains(&self, col: usize, row: usize, cols: usize, rows: usize) -> bool {
        match self.resolve(cols, rows) {
            Some((c0, r0, c1, r1)) => (c0..=c1).contains(&col) && (r0..=r1).contains(&row),
            None => false,
        }
    }
}

fn normalize_index(index: i32, len: usize) -> Option<usize> {
    let len = len as i64;
    let index = index as i64;
    let resolved = if index < 0 { len + index } else { index };
    if resolved < 0 || resolved >= len {
        return None;
    }
    Some(resolved as usize)
}

/// Table style command; later commands override earlier ones
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum TableStyleCommand {
    FontWeight {
        range: CellRange,
        weight: FontWeight,
    },
    FontSize {
        range: CellRange,
        size: f64,
    },
    Leading {
        range: CellRange,
        leading: f64,
    },
    TextColor {
        range: CellRange,
        color: Color,
    },
    Background {
        range: CellRange,
        color: Color,
    },
    Align {
        range: CellRange,
        align: Align,
    },
    #[serde(rename = "valign")]
    VAlign {
        range: CellRange,
        valign: VAlign,
    },
    TopPadding {
        range: CellRange,
        padding: f64,
    },
    BottomPadding {
        range: CellRange,
        padding: f64,
    },
    LeftPadding {
        range: CellRange,
        padding: f64,
    },
    RightPadding {
        range: CellRange,
        padding: f64,
    },
    /// Stroke every cell edge inside the range
    Grid {
        range: CellRange,
        width: f64,
        color: Color,
    },
    /// Stroke the outer edge of the range
    #[serde(rename = "box")]
    Outline {
        range: CellRange,
        width: f64,
        color: Color,
    },
}

impl TableStyleCommand {
    /// Cell range the command applies to
    pub fn range(&self) -> CellRange {
        match self {
            TableStyleCommand::FontWeight { range, .. }
            | TableStyleCommand::FontSize { range, .. }
            | TableStyleCommand::Leading { range, .. }
            | TableStyleCommand::TextColor { range, .. }
            | TableStyleCommand::Background { range, .. }
            | TableStyleCommand::Align { range, .. }
            | TableStyleCommand::VAlign { range, .. }
            | TableStyleCommand::TopPadding { range, .. }
            | TableStyleCommand::BottomPadding { range, .. }
            | TableStyleCommand::LeftPadding { range, .. }
            | TableStyleCommand::RightPadding { range, .. }
            | TableStyleCommand::Grid { range, .. }
            | TableStyleCommand::Outline { range, .. } => *range,
        }
    }
}

/// Page margins in points
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    /// Same margin on every side
    pub fn uniform(margin: f64) -> Self {
        Self {
            top: margin,
            bottom: margin,
            left: margin,
            right: margin,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(72.0)
    }
}

/// Page geometry a story is flowed into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTemplate {
    pub page_size: pdf_core::PageSize,
    pub margins: Margins,
}

impl PageTemplate {
    /// A4 with one-inch margins
    pub fn a4() -> Self {
        Self {
            page_size: pdf_core::PageSize::A4,
            margins: Margins::default(),
        }
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Width available to content
    pub fn frame_width(&self) -> f64 {
        self.page_size.width - self.margins.left - self.margins.right
    }

    /// Y coordinate (from top) where content stops
    pub fn frame_bottom(&self) -> f64 {
        self.page_size.height - self.margins.bottom
    }
}

impl Default for PageTemplate {
    fn default() -> Self {
        Self::a4()
    }
}
