//! Layout - content-block flow layout
//!
//! This crate provides:
//! - Story schema types (paragraph, spacer, table with per-cell style commands)
//! - Story parsing from JSON
//! - Text wrapping and table layout against built-in font metrics
//! - Flowing a story onto fixed page geometry with pagination
//!
//! # Example
//!
//! ```ignore
//! use layout::{Block, PageTemplate, ParagraphStyle, StoryRenderer};
//!
//! let story = vec![
//!     Block::paragraph("ABC University", ParagraphStyle::heading1()),
//!     Block::spacer(0.3 * 72.0),
//! ];
//! StoryRenderer::new(PageTemplate::a4()).build_to_file(&story, "out.pdf")?;
//! ```

pub mod blocks;
pub mod parser;
mod renderer;
mod schema;

pub use blocks::{layout_table, wrap_text, CellStyle, LaidOutCell, RuleKind, TableLayout, TableRule};
pub use parser::{parse_story, story_to_json};
pub use renderer::StoryRenderer;
pub use schema::*;

use thiserror::Error;

/// Errors that can occur during layout and rendering
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Failed to parse story: {0}")]
    ParseError(String),

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
