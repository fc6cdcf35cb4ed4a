//! Marksheet - provisional marksheet PDF renderer
//!
//! This crate provides:
//! - The marksheet request model (student identity, five subject records, GPA)
//! - The fixed marksheet layout expressed as a `layout` story
//! - Rendering to a file or to bytes, with optional strict validation
//! - Command-line argument handling for the `marksheet` binary
//!
//! # Example
//!
//! ```ignore
//! use marksheet::{render, MarksheetRequest, RenderOptions};
//!
//! let request = MarksheetRequest::demo();
//! let path = render(&request, &RenderOptions::default())?;
//! ```

pub mod cli;
mod error;
pub mod grade;
pub mod logging;
mod render;
mod request;

pub use error::{MarksheetError, Result};
pub use grade::{validate_request, GradeBand, GradeScale, ValidationIssue, ValidationMode};
pub use render::{build_story, page_template, render, render_to_bytes, RenderOptions};
pub use request::{
    MarksheetRequest, MarksheetRequestBuilder, StudentIdentity, SubjectRecord, DEMO_OUTPUT,
    SUBJECT_COUNT,
};
