//! Integration tests for pdf-core
//!
//! These tests build documents, serialize them and reopen the bytes with
//! lopdf to check the resulting object graph.

use pdf_core::{Align, Color, FontStyle, FontWeight, PageSize, PdfDocument, PdfError, Rect};
use pretty_assertions::assert_eq;

/// Reload serialized bytes and return the content stream of `page` (1-indexed)
fn page_content(bytes: &[u8], page: u32) -> String {
    let doc = lopdf::Document::load_mem(bytes).expect("Failed to reload PDF");
    let pages = doc.get_pages();
    let page_id = pages[&page];
    let content = doc.get_page_content(page_id).expect("Missing page content");
    String::from_utf8_lossy(&content).into_owned()
}

/// Sorted `BaseFont` names registered on page 1
fn base_fonts(bytes: &[u8]) -> Vec<String> {
    let doc = lopdf::Document::load_mem(bytes).expect("Failed to reload PDF");
    let page_id = doc.get_pages()[&1];
    let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();

    let mut names: Vec<String> = fonts
        .iter()
        .map(|(_, value)| {
            let id = value.as_reference().unwrap();
            let font = doc.get_object(id).unwrap().as_dict().unwrap();
            String::from_utf8_lossy(font.get(b"BaseFont").unwrap().as_name().unwrap())
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

fn single_page_doc() -> PdfDocument {
    let mut doc = PdfDocument::new(PageSize::A4);
    doc.add_page();
    doc.set_font("Helvetica", 12.0).unwrap();
    doc
}

#[test]
fn test_blank_page_round_trip() {
    let mut doc = PdfDocument::new(PageSize::A4);
    doc.add_page();

    let bytes = doc.to_bytes().unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));

    let reloaded = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(reloaded.get_pages().len(), 1);
}

#[test]
fn test_media_box_is_a4() {
    let doc = single_page_doc();
    let bytes = doc.to_bytes().unwrap();

    let reloaded = lopdf::Document::load_mem(&bytes).unwrap();
    let page_id = reloaded.get_pages()[&1];
    let page = reloaded.get_object(page_id).unwrap().as_dict().unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();

    let height = media_box[3].as_float().unwrap();
    let width = media_box[2].as_float().unwrap();
    assert!((width - 595.28).abs() < 0.01);
    assert!((height - 841.89).abs() < 0.01);
}

#[test]
fn test_insert_text_writes_literal_string() {
    let mut doc = single_page_doc();
    doc.insert_text("Hello, World!", 1, 100.0, 100.0, Align::Left)
        .unwrap();

    let content = page_content(&doc.to_bytes().unwrap(), 1);
    assert!(content.contains("(Hello, World!) Tj"));
    assert!(content.contains("/F1 12 Tf"));
}

#[test]
fn test_insert_text_converts_to_bottom_origin() {
    let mut doc = PdfDocument::new(PageSize::new(200.0, 300.0));
    doc.add_page();
    doc.set_font("Helvetica", 10.0).unwrap();
    doc.insert_text("A", 1, 50.0, 100.0, Align::Left).unwrap();

    let content = page_content(&doc.to_bytes().unwrap(), 1);
    assert!(content.contains("50 200 Td"));
}

#[test]
fn test_insert_text_center_alignment() {
    let mut doc = single_page_doc();
    let width = doc.get_text_width("Center").unwrap();
    doc.insert_text("Center", 1, 300.0, 100.0, Align::Center)
        .unwrap();

    let content = page_content(&doc.to_bytes().unwrap(), 1);
    let expected_x = 300.0 - width / 2.0;
    assert!(content.contains(&format!("{expected_x} ")));
}

#[test]
fn test_empty_text_is_noop() {
    let mut doc = single_page_doc();
    doc.insert_text("", 1, 100.0, 100.0, Align::Left).unwrap();

    let content = page_content(&doc.to_bytes().unwrap(), 1);
    assert!(!content.contains("Tj"));
}

#[test]
fn test_text_with_parentheses_is_escaped() {
    let mut doc = single_page_doc();
    doc.insert_text("Grade Scale: A(90-100)", 1, 10.0, 10.0, Align::Left)
        .unwrap();

    let content = page_content(&doc.to_bytes().unwrap(), 1);
    assert!(content.contains("(Grade Scale: A\\(90-100\\)) Tj"));
}

#[test]
fn test_bold_and_regular_use_separate_resources() {
    let mut doc = single_page_doc();
    doc.insert_text("Regular", 1, 10.0, 10.0, Align::Left)
        .unwrap();
    doc.set_font_weight(FontWeight::Bold).unwrap();
    doc.insert_text("Bold", 1, 10.0, 30.0, Align::Left).unwrap();

    let bytes = doc.to_bytes().unwrap();
    assert_eq!(base_fonts(&bytes), vec!["Helvetica", "Helvetica-Bold"]);
}

#[test]
fn test_font_style_selects_oblique_faces() {
    let mut doc = single_page_doc();
    doc.set_font_style(FontStyle::Italic).unwrap();
    doc.insert_text("Oblique", 1, 10.0, 10.0, Align::Left)
        .unwrap();
    doc.set_font_weight(FontWeight::Bold).unwrap();
    doc.insert_text("Bold oblique", 1, 10.0, 30.0, Align::Left)
        .unwrap();

    let bytes = doc.to_bytes().unwrap();
    assert_eq!(
        base_fonts(&bytes),
        vec!["Helvetica-BoldOblique", "Helvetica-Oblique"]
    );
}

#[test]
fn test_font_size_keeps_face() {
    let mut doc = single_page_doc();
    doc.set_font_weight(FontWeight::Bold).unwrap();
    let width_at_12 = doc.get_text_width("Marks").unwrap();

    doc.set_font_size(18.0).unwrap();
    let width_at_18 = doc.get_text_width("Marks").unwrap();
    assert!((width_at_18 - width_at_12 * 1.5).abs() < 1e-9);

    doc.insert_text("Marks", 1, 10.0, 30.0, Align::Left).unwrap();
    let bytes = doc.to_bytes().unwrap();
    assert!(page_content(&bytes, 1).contains("/F1 18 Tf"));
    assert_eq!(base_fonts(&bytes), vec!["Helvetica-Bold"]);
}

#[test]
fn test_font_size_without_family_fails() {
    let mut doc = PdfDocument::new(PageSize::A4);
    assert!(matches!(
        doc.set_font_size(10.0),
        Err(PdfError::FontNotFound(_))
    ));
    assert!(matches!(
        doc.set_font_style(FontStyle::Italic),
        Err(PdfError::FontNotFound(_))
    ));
}

#[test]
fn test_text_color() {
    let mut doc = single_page_doc();
    doc.set_text_color(Color::rgb(0.0, 0.0, 1.0));
    doc.insert_text("Blue", 1, 10.0, 10.0, Align::Left).unwrap();

    let content = page_content(&doc.to_bytes().unwrap(), 1);
    assert!(content.contains("0 0 1 rg"));
}

#[test]
fn test_graphics_operators() {
    let mut doc = single_page_doc();
    doc.fill_rect(1, Rect::new(10.0, 10.0, 100.0, 20.0), Color::whitesmoke())
        .unwrap();
    doc.stroke_rect(1, Rect::new(10.0, 10.0, 100.0, 20.0), 1.5, Color::black())
        .unwrap();
    doc.draw_line(1, 10.0, 10.0, 110.0, 10.0, 1.0, Color::black())
        .unwrap();

    let content = page_content(&doc.to_bytes().unwrap(), 1);
    assert!(content.contains(" re\nf\n"));
    assert!(content.contains(" re\nS\n"));
    assert!(content.contains("1.5 w"));
    assert!(content.contains(" l\nS\n"));
}

#[test]
fn test_draw_on_missing_page_fails() {
    let mut doc = single_page_doc();
    let result = doc.fill_rect(3, Rect::new(0.0, 0.0, 1.0, 1.0), Color::black());
    assert!(matches!(result, Err(PdfError::InvalidPage(3, 1))));
}

#[test]
fn test_multiple_pages() {
    let mut doc = PdfDocument::new(PageSize::A4);
    doc.add_page();
    doc.add_page();
    doc.set_font("Helvetica", 10.0).unwrap();
    doc.insert_text("First", 1, 10.0, 10.0, Align::Left).unwrap();
    doc.insert_text("Second", 2, 10.0, 10.0, Align::Left)
        .unwrap();

    let bytes = doc.to_bytes().unwrap();
    assert!(page_content(&bytes, 1).contains("(First) Tj"));
    assert!(page_content(&bytes, 2).contains("(Second) Tj"));
    assert!(!page_content(&bytes, 2).contains("(First) Tj"));
}

#[test]
fn test_compressed_content_decodes() {
    let mut doc = single_page_doc();
    doc.set_compression(true);
    doc.insert_text("Compressed", 1, 10.0, 10.0, Align::Left)
        .unwrap();

    let bytes = doc.to_bytes().unwrap();
    assert!(!bytes
        .windows(b"(Compressed)".len())
        .any(|w| w == b"(Compressed)"));
    assert!(page_content(&bytes, 1).contains("(Compressed) Tj"));
}

#[test]
fn test_info_dictionary() {
    let mut doc = single_page_doc();
    doc.set_title("Marksheet");
    doc.set_producer("pdf-core");

    let bytes = doc.to_bytes().unwrap();
    let reloaded = lopdf::Document::load_mem(&bytes).unwrap();
    let info_id = reloaded
        .trailer
        .get(b"Info")
        .unwrap()
        .as_reference()
        .unwrap();
    let info = reloaded.get_object(info_id).unwrap().as_dict().unwrap();

    assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Marksheet");
}

#[test]
fn test_save_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");

    let mut doc = single_page_doc();
    doc.insert_text("Saved", 1, 10.0, 10.0, Align::Left).unwrap();
    doc.save(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(page_content(&bytes, 1).contains("(Saved) Tj"));
}

#[test]
fn test_save_to_missing_directory_fails_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.pdf");

    let doc = single_page_doc();
    let result = doc.save(&path);

    assert!(matches!(result, Err(PdfError::IoError(_))));
    assert!(!path.exists());
}
