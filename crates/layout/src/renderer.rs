//! Story rendering

use crate::blocks::{layout_table, wrap_text, RuleKind, TableLayout};
use crate::schema::*;
use crate::Result;
use pdf_core::{PdfDocument, Rect};
use std::path::Path;

/// Tolerance for "fits on the page" comparisons
const FIT_EPSILON: f64 = 1e-6;

/// Flows a story of blocks onto pages of a [`PageTemplate`]
pub struct StoryRenderer {
    /// Page geometry
    template: PageTemplate,
    /// Document title (Info dictionary)
    title: Option<String>,
    /// Flate-compress content streams
    compress: bool,
}

/// Write position inside the current frame
struct Cursor {
    /// Current page (1-indexed)
    page: usize,
    /// Y coordinate from the top of the page
    y: f64,
    /// Nothing has been placed on this page yet
    at_top: bool,
}

impl StoryRenderer {
    /// Create a renderer for the given page geometry
    pub fn new(template: PageTemplate) -> Self {
        Self {
            template,
            title: None,
            compress: false,
        }
    }

    /// Set the document title
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Enable or disable content stream compression
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Lay out the story and return the in-memory document
    ///
    /// The document always has at least one page, even for an empty story.
    pub fn build(&self, story: &[Block]) -> Result<PdfDocument> {
        let mut doc = PdfDocument::new(self.template.page_size);
        doc.set_compression(self.compress);
        doc.set_producer(concat!("layout ", env!("CARGO_PKG_VERSION")));
        if let Some(title) = &self.title {
            doc.set_title(title);
        }

        let mut cursor = Cursor {
            page: doc.add_page(),
            y: self.template.margins.top,
            at_top: true,
        };

        for block in story {
            match block {
                Block::Paragraph(p) => self.render_paragraph(&mut doc, &mut cursor, p)?,
                Block::Spacer(s) => self.render_spacer(&mut doc, &mut cursor, s),
                Block::Table(t) => self.render_table(&mut doc, &mut cursor, t)?,
            }
        }

        tracing::debug!(
            blocks = story.len(),
            pages = doc.page_count(),
            "story laid out"
        );
        Ok(doc)
    }

    /// Lay out the story and serialize it
    pub fn build_to_bytes(&self, story: &[Block]) -> Result<Vec<u8>> {
        Ok(self.build(story)?.to_bytes()?)
    }

    /// Lay out the story and write it to `path`
    ///
    /// Nothing is written when layout fails.
    pub fn build_to_file<P: AsRef<Path>>(&self, story: &[Block], path: P) -> Result<()> {
        self.build(story)?.save(path)?;
        Ok(())
    }

    fn new_page(&self, doc: &mut PdfDocument, cursor: &mut Cursor) {
        cursor.page = doc.add_page();
        cursor.y = self.template.margins.top;
        cursor.at_top = true;

        tracing::debug!(page = cursor.page, "page break");
    }

    fn fits(&self, cursor: &Cursor, height: f64) -> bool {
        cursor.y + height <= self.template.frame_bottom() + FIT_EPSILON
    }

    /// Render a paragraph line by line, breaking pages between lines
    fn render_paragraph(
        &self,
        doc: &mut PdfDocument,
        cursor: &mut Cursor,
        block: &ParagraphBlock,
    ) -> Result<()> {
        let style = &block.style;

        doc.set_font(&style.font_family, style.font_size)?;
        doc.set_font_weight(style.weight.into())?;
        doc.set_text_color(style.text_color.into());

        let font = doc.current_font()?;
        let frame_width = self.template.frame_width();
        let lines = wrap_text(&block.text, font, style.font_size, frame_width);
        let leading = style.leading();

        if !cursor.at_top {
            cursor.y += style.space_before;
        }

        let left = self.template.margins.left;
        let x = match style.alignment {
            Align::Left => left,
            Align::Center => left + frame_width / 2.0,
            Align::Right => left + frame_width,
        };

        for line in &lines {
            if !cursor.at_top && !self.fits(cursor, leading) {
                self.new_page(doc, cursor);
            }

            doc.insert_text(
                line,
                cursor.page,
                x,
                cursor.y + style.font_size,
                style.alignment.into(),
            )?;
            cursor.y += leading;
            cursor.at_top = false;
        }

        cursor.y += style.space_after;
        Ok(())
    }

    /// Advance the cursor; a spacer that does not fit ends the page
    fn render_spacer(&self, doc: &mut PdfDocument, cursor: &mut Cursor, block: &SpacerBlock) {
        if cursor.at_top {
            cursor.y += block.height;
            cursor.at_top = false;
        } else if self.fits(cursor, block.height) {
            cursor.y += block.height;
        } else {
            self.new_page(doc, cursor);
        }
    }

    /// Render a table, splitting it between rows across pages
    fn render_table(
        &self,
        doc: &mut PdfDocument,
        cursor: &mut Cursor,
        block: &TableBlock,
    ) -> Result<()> {
        let layout = layout_table(block)?;
        let row_count = layout.row_heights.len();
        if row_count == 0 {
            return Ok(());
        }

        let frame_width = self.template.frame_width();
        let x = self.template.margins.left
            + match block.h_align {
                Align::Left => 0.0,
                Align::Center => (frame_width - layout.width()) / 2.0,
                Align::Right => frame_width - layout.width(),
            };

        let mut row = 0;
        while row < row_count {
            let available = self.template.frame_bottom() - cursor.y;
            let mut end = row;
            let mut height = 0.0;
            while end < row_count && height + layout.row_heights[end] <= available + FIT_EPSILON {
                height += layout.row_heights[end];
                end += 1;
            }

            if end == row {
                if !cursor.at_top {
                    self.new_page(doc, cursor);
                    continue;
                }
                // Taller than a whole frame: place it anyway and let it overflow
                height = layout.row_heights[row];
                end = row + 1;
            }

            self.draw_table_rows(
                doc,
                cursor.page,
                &layout,
                &block.font_family,
                row..end,
                x,
                cursor.y,
            )?;
            cursor.y += height;
            cursor.at_top = false;
            row = end;

            if row < row_count {
                self.new_page(doc, cursor);
            }
        }

        Ok(())
    }

    /// Draw rows `start..end` with their top edge at `top`
    ///
    /// Backgrounds go first, then text, then grid lines, then outlines.
    #[allow(clippy::too_many_arguments)]
    fn draw_table_rows(
        &self,
        doc: &mut PdfDocument,
        page: usize,
        layout: &TableLayout,
        font_family: &str,
        rows: std::ops::Range<usize>,
        x: f64,
        top: f64,
    ) -> Result<()> {
        let (start, end) = (rows.start, rows.end);
        let col_offsets = layout.col_offsets();

        let mut row_tops = Vec::with_capacity(end - start + 1);
        let mut y = top;
        for height in &layout.row_heights[start..end] {
            row_tops.push(y);
            y += height;
        }
        row_tops.push(y);
        let row_top = |row: usize| row_tops[row - start];

        for row in start..end {
            for (col, cell) in layout.cells[row].iter().enumerate() {
                if let Some(background) = cell.style.background {
                    let rect = Rect::new(
                        x + col_offsets[col],
                        row_top(row),
                        layout.col_widths[col],
                        layout.row_heights[row],
                    );
                    doc.fill_rect(page, rect, background.into())?;
                }
            }
        }

        for row in start..end {
            for (col, cell) in layout.cells[row].iter().enumerate() {
                if cell.lines.is_empty() {
                    continue;
                }

                doc.set_font(font_family, cell.style.font_size)?;
                doc.set_font_weight(cell.style.weight.into())?;
                doc.set_text_color(cell.style.text_color.into());

                let text_x = x + col_offsets[col] + cell.text_x(layout.col_widths[col]);
                let mut baseline = row_top(row) + cell.first_baseline(layout.row_heights[row]);
                for line in &cell.lines {
                    doc.insert_text(line, page, text_x, baseline, cell.style.align.into())?;
                    baseline += cell.style.leading();
                }
            }
        }

        for rule in &layout.rules {
            let Some((first_row, last_row)) = rule.rows_within(start, end) else {
                continue;
            };

            match rule.kind {
                RuleKind::Grid => {
                    for row in first_row..=last_row {
                        for col in rule.first_col..=rule.last_col {
                            let rect = Rect::new(
                                x + col_offsets[col],
                                row_top(row),
                                layout.col_widths[col],
                                layout.row_heights[row],
                            );
                            doc.stroke_rect(page, rect, rule.width, rule.color.into())?;
                        }
                    }
                }
                RuleKind::Outline => {
                    let left = x + col_offsets[rule.first_col];
                    let right = x + col_offsets[rule.last_col] + layout.col_widths[rule.last_col];
                    let rect_top = row_top(first_row);
                    let rect_bottom = row_top(last_row + 1);
                    let rect = Rect::new(left, rect_top, right - left, rect_bottom - rect_top);
                    doc.stroke_rect(page, rect, rule.width, rule.color.into())?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_core::PageSize;

    fn small_template() -> PageTemplate {
        PageTemplate {
            page_size: PageSize::new(200.0, 100.0),
            margins: Margins::uniform(10.0),
        }
    }

    fn rows(n: usize) -> Vec<Vec<String>> {
        (0..n).map(|i| vec![format!("row {i}")]).collect()
    }

    #[test]
    fn test_empty_story_has_one_page() {
        let doc = StoryRenderer::new(PageTemplate::a4()).build(&[]).unwrap();
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_long_table_splits_between_rows() {
        // 18pt rows, 80pt frame: 4 rows per page
        let story = vec![Block::Table(TableBlock::new(rows(10), vec![100.0]))];
        let doc = StoryRenderer::new(small_template()).build(&story).unwrap();
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn test_table_moves_to_next_page_when_first_row_does_not_fit() {
        let story = vec![
            Block::spacer(70.0),
            Block::Table(TableBlock::new(rows(1), vec![100.0])),
        ];
        let doc = StoryRenderer::new(small_template()).build(&story).unwrap();
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_oversized_row_does_not_loop() {
        let text = vec![vec!["a\nb\nc\nd\ne\nf\ng\nh".to_string()]];
        let story = vec![Block::Table(TableBlock::new(text, vec![100.0]))];
        let doc = StoryRenderer::new(small_template()).build(&story).unwrap();
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_overflowing_spacer_breaks_page() {
        let story = vec![
            Block::paragraph("first", ParagraphStyle::normal()),
            Block::spacer(200.0),
            Block::paragraph("second", ParagraphStyle::normal()),
        ];
        let doc = StoryRenderer::new(small_template()).build(&story).unwrap();
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_long_paragraph_flows_onto_next_page() {
        let text = vec!["line"; 10].join("\n");
        let story = vec![Block::paragraph(&text, ParagraphStyle::normal())];
        let doc = StoryRenderer::new(small_template()).build(&story).unwrap();
        // 12pt leading, 80pt frame: 6 lines on the first page
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_unknown_paragraph_font() {
        let mut style = ParagraphStyle::normal();
        style.font_family = "Courier".to_string();
        let story = vec![Block::paragraph("x", style)];
        assert!(StoryRenderer::new(PageTemplate::a4()).build(&story).is_err());
    }

    #[test]
    fn test_invalid_table_is_rejected() {
        let table = TableBlock::new(vec![vec!["a".to_string()]], vec![10.0, 10.0]);
        let story = vec![Block::Table(table)];
        assert!(matches!(
            StoryRenderer::new(PageTemplate::a4()).build(&story),
            Err(crate::LayoutError::InvalidTable(_))
        ));
    }
}
