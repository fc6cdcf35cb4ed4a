//! PDF Document builder

use crate::font::{encode_win_ansi, StandardFont, HELVETICA_FAMILY};
use crate::graphics::{fill_rect_operators, line_operators, stroke_rect_operators, Rect};
use crate::text::{generate_text_operators, TextRenderContext};
use crate::{Align, FontStyle, FontWeight, PdfError, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex color
    ///
    /// # Example
    /// ```ignore
    /// let indigo = Color::from_hex("#3f51b5")?;
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PdfError::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| PdfError::InvalidColor(hex.to_string()))
        };

        Ok(Self::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Off-white (#f5f5f5)
    pub fn whitesmoke() -> Self {
        Self::from_rgb(0xf5, 0xf5, 0xf5)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4 (210 x 297 mm)
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Per-page state buffered until save
#[derive(Debug, Default, Clone)]
struct PageBuffer {
    /// Content stream operators
    content: Vec<u8>,
    /// Fonts used on this page (face -> resource name)
    fonts: BTreeMap<StandardFont, String>,
}

/// PDF document builder providing high-level drawing operations
///
/// Pages and their content are buffered in memory; the lopdf object graph is
/// assembled only when the document is saved, so a failed build never leaves
/// a half-written file behind.
pub struct PdfDocument {
    /// Geometry shared by every page
    page_size: PageSize,
    /// Buffered pages (index 0 is page 1)
    pages: Vec<PageBuffer>,
    /// Current font family name
    current_family: Option<String>,
    /// Current font weight
    current_weight: FontWeight,
    /// Current font style
    current_style: FontStyle,
    /// Current font size
    current_font_size: f64,
    /// Current text color
    current_text_color: Color,
    /// Resource names assigned to faces (shared across pages)
    font_resources: HashMap<StandardFont, String>,
    /// Next font resource number
    next_font_resource: u32,
    /// Flate-compress content streams on save
    compress: bool,
    /// Document information entries (Title, Producer, ...)
    info: BTreeMap<String, String>,
}

impl PdfDocument {
    /// Create an empty document; add pages with [`PdfDocument::add_page`]
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            pages: Vec::new(),
            current_family: None,
            current_weight: FontWeight::default(),
            current_style: FontStyle::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            font_resources: HashMap::new(),
            next_font_resource: 1,
            compress: false,
            info: BTreeMap::new(),
        }
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page geometry
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Append a blank page
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_page(&mut self) -> usize {
        self.pages.push(PageBuffer::default());
        self.pages.len()
    }

    /// Enable or disable Flate compression of page content streams
    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    /// Set the document title (Info dictionary)
    pub fn set_title(&mut self, title: &str) {
        self.info.insert("Title".to_string(), title.to_string());
    }

    /// Set the producing application (Info dictionary)
    pub fn set_producer(&mut self, producer: &str) {
        self.info.insert("Producer".to_string(), producer.to_string());
    }

    /// Set the current font family and size
    ///
    /// Resets weight and style to regular/normal.
    ///
    /// # Example
    /// ```ignore
    /// doc.set_font("Helvetica", 12.0)?;  // Regular 12pt
    /// doc.set_font_weight(FontWeight::Bold)?;  // Now bold 12pt
    /// ```
    pub fn set_font(&mut self, family: &str, size: f64) -> Result<()> {
        if !family.eq_ignore_ascii_case(HELVETICA_FAMILY) {
            return Err(PdfError::FontNotFound(family.to_string()));
        }

        self.current_family = Some(family.to_string());
        self.current_font_size = size;
        self.current_weight = FontWeight::Regular;
        self.current_style = FontStyle::Normal;

        Ok(())
    }

    /// Set only the font size (keeps current family/weight/style)
    pub fn set_font_size(&mut self, size: f64) -> Result<()> {
        if self.current_family.is_none() {
            return Err(PdfError::FontNotFound("No font family set".to_string()));
        }

        self.current_font_size = size;
        Ok(())
    }

    /// Set the font weight (keeps current family/size/style)
    pub fn set_font_weight(&mut self, weight: FontWeight) -> Result<()> {
        if self.current_family.is_none() {
            return Err(PdfError::FontNotFound("No font family set".to_string()));
        }

        self.current_weight = weight;
        Ok(())
    }

    /// Set the font style (keeps current family/size/weight)
    pub fn set_font_style(&mut self, style: FontStyle) -> Result<()> {
        if self.current_family.is_none() {
            return Err(PdfError::FontNotFound("No font family set".to_string()));
        }

        self.current_style = style;
        Ok(())
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Get the face selected by the current family/weight/style
    pub fn current_font(&self) -> Result<StandardFont> {
        let family = self
            .current_family
            .as_ref()
            .ok_or_else(|| PdfError::FontNotFound("No font family set".to_string()))?;

        StandardFont::resolve(family, self.current_weight, self.current_style)
            .ok_or_else(|| PdfError::FontNotFound(family.clone()))
    }

    /// Get current font's text width for a string, in points
    pub fn get_text_width(&self, text: &str) -> Result<f64> {
        let font = self.current_font()?;
        Ok(font.text_width_points(text, self.current_font_size))
    }

    /// Insert one line of text
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Alignment of the text relative to `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        self.check_page(page)?;

        // Skip empty text - nothing to render
        if text.is_empty() {
            return Ok(());
        }

        let font = self.current_font()?;
        let font_resource_name = self.get_or_create_font_ref(font, page)?;

        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size: self.current_font_size,
            text_width: font.text_width_points(text, self.current_font_size),
            color: self.current_text_color,
        };

        // Convert Y coordinate from top-origin to PDF bottom-origin
        let pdf_y = self.page_size.height - y;
        let operators = generate_text_operators(&encode_win_ansi(text), x, pdf_y, align, &ctx);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Fill a rectangle (top-origin coordinates)
    pub fn fill_rect(&mut self, page: usize, rect: Rect, color: Color) -> Result<()> {
        self.check_page(page)?;

        let pdf_y = self.page_size.height - rect.bottom();
        let operators = fill_rect_operators(rect.x, pdf_y, rect.width, rect.height, color);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Stroke a rectangle outline (top-origin coordinates)
    pub fn stroke_rect(
        &mut self,
        page: usize,
        rect: Rect,
        line_width: f64,
        color: Color,
    ) -> Result<()> {
        self.check_page(page)?;

        let pdf_y = self.page_size.height - rect.bottom();
        let operators =
            stroke_rect_operators(rect.x, pdf_y, rect.width, rect.height, line_width, color);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Stroke a straight line between two points (top-origin coordinates)
    #[allow(clippy::too_many_arguments)]
    pub fn draw_line(
        &mut self,
        page: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        line_width: f64,
        color: Color,
    ) -> Result<()> {
        self.check_page(page)?;

        let height = self.page_size.height;
        let operators = line_operators(x1, height - y1, x2, height - y2, line_width, color);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Save the document to a file
    ///
    /// The whole document is serialized in memory first; the file is only
    /// created once serialization succeeded.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), &bytes)?;

        tracing::debug!(
            path = %path.as_ref().display(),
            bytes = bytes.len(),
            pages = self.page_count(),
            "saved PDF"
        );
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut doc = self.build_document()?;

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Assemble the lopdf object graph from the buffered pages
    fn build_document(&self) -> Result<Document> {
        if self.pages.is_empty() {
            return Err(PdfError::SaveError("Document has no pages".to_string()));
        }

        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        // One font object per face, shared by every page that uses it
        let mut font_objects: HashMap<StandardFont, ObjectId> = HashMap::new();
        for page in &self.pages {
            for font in page.fonts.keys() {
                if !font_objects.contains_key(font) {
                    let id = doc.add_object(font.to_pdf_dictionary());
                    font_objects.insert(*font, id);
                }
            }
        }

        let media_box = vec![
            Object::Integer(0),
            Object::Integer(0),
            self.page_size.width.into(),
            self.page_size.height.into(),
        ];

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let contents_id = doc.add_object(self.content_stream(&page.content)?);

            let mut font_dict = Dictionary::new();
            for (font, resource_name) in &page.fonts {
                let font_id = font_objects
                    .get(font)
                    .ok_or_else(|| PdfError::FontNotFound(font.base_font().to_string()))?;
                font_dict.set(resource_name.as_bytes(), Object::Reference(*font_id));
            }

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => media_box.clone(),
                "Resources" => dictionary! { "Font" => font_dict },
                "Contents" => contents_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if !self.info.is_empty() {
            let mut info = Dictionary::new();
            for (key, value) in &self.info {
                info.set(
                    key.as_bytes(),
                    Object::string_literal(encode_win_ansi(value)),
                );
            }
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", info_id);
        }

        Ok(doc)
    }

    /// Wrap page operators in a content stream, compressing if enabled
    fn content_stream(&self, content: &[u8]) -> Result<Stream> {
        if !self.compress {
            return Ok(Stream::new(Dictionary::new(), content.to_vec()));
        }

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content)?;
        let compressed = encoder.finish()?;

        Ok(Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            compressed,
        ))
    }

    /// Get or create a font reference for a specific page
    ///
    /// Returns the resource name (e.g., "F1", "F2") for use in content streams
    fn get_or_create_font_ref(&mut self, font: StandardFont, page: usize) -> Result<String> {
        let resource_name = match self.font_resources.get(&font) {
            Some(name) => name.clone(),
            None => {
                let name = format!("F{}", self.next_font_resource);
                self.next_font_resource += 1;
                self.font_resources.insert(font, name.clone());
                name
            }
        };

        let page_count = self.pages.len();
        let page_buffer = self
            .pages
            .get_mut(page - 1)
            .ok_or(PdfError::InvalidPage(page, page_count))?;
        page_buffer
            .fonts
            .entry(font)
            .or_insert_with(|| resource_name.clone());

        Ok(resource_name)
    }

    fn check_page(&self, page: usize) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }
        Ok(())
    }

    /// Buffer content operators for a page (written at save time)
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        if let Some(buffer) = self.pages.get_mut(page - 1) {
            buffer.content.extend_from_slice(content);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let color = Color::from_hex("#3f51b5").unwrap();
        assert_eq!(color, Color::from_rgb(0x3f, 0x51, 0xb5));

        let color = Color::from_hex("ffffff").unwrap();
        assert_eq!(color, Color::white());
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert!(matches!(
            Color::from_hex("#12345"),
            Err(PdfError::InvalidColor(_))
        ));
        assert!(matches!(
            Color::from_hex("#gg0000"),
            Err(PdfError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_new_document_has_no_pages() {
        let doc = PdfDocument::new(PageSize::A4);
        assert_eq!(doc.page_count(), 0);
        assert!(doc.to_bytes().is_err());
    }

    #[test]
    fn test_add_page_numbers() {
        let mut doc = PdfDocument::new(PageSize::A4);
        assert_eq!(doc.add_page(), 1);
        assert_eq!(doc.add_page(), 2);
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_set_font_unknown_family() {
        let mut doc = PdfDocument::new(PageSize::A4);
        assert!(matches!(
            doc.set_font("Comic Sans", 12.0),
            Err(PdfError::FontNotFound(_))
        ));
    }

    #[test]
    fn test_weight_requires_family() {
        let mut doc = PdfDocument::new(PageSize::A4);
        assert!(doc.set_font_weight(FontWeight::Bold).is_err());
    }

    #[test]
    fn test_set_font_resets_weight() {
        let mut doc = PdfDocument::new(PageSize::A4);
        doc.set_font("Helvetica", 10.0).unwrap();
        doc.set_font_weight(FontWeight::Bold).unwrap();
        assert_eq!(doc.current_font().unwrap(), StandardFont::HelveticaBold);

        doc.set_font("Helvetica", 10.0).unwrap();
        assert_eq!(doc.current_font().unwrap(), StandardFont::Helvetica);
    }

    #[test]
    fn test_insert_text_invalid_page() {
        let mut doc = PdfDocument::new(PageSize::A4);
        doc.add_page();
        doc.set_font("Helvetica", 10.0).unwrap();

        let result = doc.insert_text("x", 2, 0.0, 0.0, Align::Left);
        assert!(matches!(result, Err(PdfError::InvalidPage(2, 1))));
    }

    #[test]
    fn test_font_resources_are_shared() {
        let mut doc = PdfDocument::new(PageSize::A4);
        doc.add_page();
        doc.add_page();
        doc.set_font("Helvetica", 10.0).unwrap();

        let first = doc
            .get_or_create_font_ref(StandardFont::Helvetica, 1)
            .unwrap();
        let second = doc
            .get_or_create_font_ref(StandardFont::Helvetica, 2)
            .unwrap();
        let bold = doc
            .get_or_create_font_ref(StandardFont::HelveticaBold, 1)
            .unwrap();

        assert_eq!(first, "F1");
        assert_eq!(second, "F1");
        assert_eq!(bold, "F2");
    }
}
