//! PDF Core - Low-level PDF writing
//!
//! This crate provides functionality for:
//! - Creating blank documents with fixed page geometry
//! - Placing text in the built-in Helvetica family
//! - Drawing filled and stroked rectangles and lines
//! - Saving to a file or to bytes
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, PageSize, PdfDocument};
//!
//! let mut doc = PdfDocument::new(PageSize::A4);
//! let page = doc.add_page();
//! doc.set_font("Helvetica", 12.0)?;
//! doc.insert_text("Hello, World!", page, 100.0, 100.0, Align::Left)?;
//! doc.save("output.pdf")?;
//! ```

mod document;
mod font;
mod graphics;
mod text;

pub use document::{Color, PageSize, PdfDocument};
pub use font::{encode_win_ansi, FontStyle, FontWeight, StandardFont};
pub use graphics::Rect;
pub use text::{escape_literal, generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Points per inch
pub const INCH: f64 = 72.0;
