//! Marksheet layout and rendering

use crate::grade::{validate_request, GradeScale, ValidationMode};
use crate::request::MarksheetRequest;
use crate::{MarksheetError, Result};
use chrono::{Local, NaiveDate};
use layout::{
    Align, Block, CellRange, Color, FontWeight, Margins, PageTemplate, ParagraphStyle,
    StoryRenderer, TableBlock, TableStyleCommand, VAlign,
};
use pdf_core::{PageSize, INCH};
use std::path::PathBuf;
use tracing::{error, info};

/// Render-time switches
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub validation: ValidationMode,
    /// Flate-compress page content
    pub compress: bool,
    /// Date printed in the footer
    pub as_of: NaiveDate,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            validation: ValidationMode::default(),
            compress: false,
            as_of: Local::now().date_naive(),
        }
    }
}

impl RenderOptions {
    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }
}

/// A4 with half-inch top/bottom and three-quarter-inch side margins
pub fn page_template() -> PageTemplate {
    PageTemplate {
        page_size: PageSize::A4,
        margins: Margins {
            top: 0.5 * INCH,
            bottom: 0.5 * INCH,
            left: 0.75 * INCH,
            right: 0.75 * INCH,
        },
    }
}

fn heading_color() -> Color {
    Color::from_rgb(0x1a, 0x23, 0x7e)
}

fn subtitle_color() -> Color {
    Color::from_rgb(0x28, 0x35, 0x93)
}

fn indigo() -> Color {
    Color::from_rgb(0x3f, 0x51, 0xb5)
}

fn body_background() -> Color {
    Color::from_rgb(0xf5, 0xf5, 0xf5)
}

fn grid_grey() -> Color {
    Color::from_rgb(0x9e, 0x9e, 0x9e)
}

fn gpa_background() -> Color {
    Color::from_rgb(0xe8, 0xea, 0xf6)
}

fn inches(widths: &[f64]) -> Vec<f64> {
    widths.iter().map(|w| w * INCH).collect()
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

/// The marksheet as a story, top to bottom
///
/// Heading, subtitle, identity table, marks table, GPA summary, grade legend
/// and the signature footer dated `as_of`.
pub fn build_story(request: &MarksheetRequest, as_of: NaiveDate) -> Vec<Block> {
    let heading = ParagraphStyle::heading1()
        .named("CustomHeader")
        .with_alignment(Align::Center)
        .with_font_size(18.0)
        .with_color(heading_color())
        .with_space_after(6.0);

    let subtitle = ParagraphStyle::heading2()
        .named("TitleStyle")
        .with_alignment(Align::Center)
        .with_font_size(14.0)
        .with_color(subtitle_color())
        .with_space_after(12.0);

    let legend = ParagraphStyle::normal().named("Legend").with_font_size(8.0);

    vec![
        Block::paragraph(&request.institution_name, heading),
        Block::paragraph("PROVISIONAL MARKSHEET", subtitle),
        Block::spacer(0.3 * INCH),
        Block::Table(identity_table(request)),
        Block::spacer(0.3 * INCH),
        Block::Table(marks_table(request)),
        Block::spacer(0.3 * INCH),
        Block::Table(gpa_table(request.gpa)),
        Block::spacer(0.5 * INCH),
        Block::paragraph(&GradeScale::standard().legend_text(), legend),
        Block::spacer(0.3 * INCH),
        Block::Table(footer_table(as_of)),
    ]
}

fn identity_table(request: &MarksheetRequest) -> TableBlock {
    let id = &request.identity;
    let rows = vec![
        row(&["Name:", &id.name, "Roll Number:", &id.roll_number]),
        row(&["Date of Birth:", &id.date_of_birth, "Semester:", &id.semester]),
        row(&["Year:", &id.year, "Department:", &id.department]),
    ];

    let all = CellRange::all();
    TableBlock::new(rows, inches(&[1.5, 2.5, 1.5, 2.0])).with_style(vec![
        TableStyleCommand::FontWeight {
            range: CellRange::column(0),
            weight: FontWeight::Bold,
        },
        TableStyleCommand::FontWeight {
            range: CellRange::column(2),
            weight: FontWeight::Bold,
        },
        TableStyleCommand::FontSize {
            range: all,
            size: 10.0,
        },
        TableStyleCommand::BottomPadding {
            range: all,
            padding: 8.0,
        },
        TableStyleCommand::TopPadding {
            range: all,
            padding: 4.0,
        },
        TableStyleCommand::VAlign {
            range: all,
            valign: VAlign::Middle,
        },
    ])
}

fn marks_table(request: &MarksheetRequest) -> TableBlock {
    let mut rows = vec![row(&["S.No", "Subject Name", "Marks Obtained", "Grade"])];
    for (index, subject) in request.subjects.iter().enumerate() {
        rows.push(vec![
            (index + 1).to_string(),
            subject.name.clone(),
            subject.mark.to_string(),
            subject.grade.clone(),
        ]);
    }

    let all = CellRange::all();
    let header = CellRange::row(0);
    let body = CellRange::new((0, 1), (-1, -1));

    TableBlock::new(rows, inches(&[0.8, 3.5, 1.5, 1.0])).with_style(vec![
        TableStyleCommand::Background {
            range: header,
            color: indigo(),
        },
        TableStyleCommand::TextColor {
            range: header,
            color: Color::whitesmoke(),
        },
        TableStyleCommand::Align {
            range: all,
            align: Align::Center,
        },
        TableStyleCommand::FontWeight {
            range: header,
            weight: FontWeight::Bold,
        },
        TableStyleCommand::FontSize {
            range: header,
            size: 11.0,
        },
        TableStyleCommand::BottomPadding {
            range: header,
            padding: 12.0,
        },
        TableStyleCommand::TopPadding {
            range: header,
            padding: 12.0,
        },
        TableStyleCommand::Background {
            range: body,
            color: body_background(),
        },
        TableStyleCommand::Grid {
            range: all,
            width: 1.0,
            color: grid_grey(),
        },
        TableStyleCommand::FontSize {
            range: body,
            size: 10.0,
        },
        TableStyleCommand::TopPadding {
            range: body,
            padding: 8.0,
        },
        TableStyleCommand::BottomPadding {
            range: body,
            padding: 8.0,
        },
        TableStyleCommand::VAlign {
            range: all,
            valign: VAlign::Middle,
        },
    ])
}

fn gpa_table(gpa: f64) -> TableBlock {
    let rows = vec![vec![
        "Grade Point Average (GPA):".to_string(),
        format!("{gpa:.2}/10.00"),
    ]];

    let all = CellRange::all();
    TableBlock::new(rows, inches(&[4.0, 2.8])).with_style(vec![
        TableStyleCommand::FontWeight {
            range: all,
            weight: FontWeight::Bold,
        },
        TableStyleCommand::FontSize {
            range: all,
            size: 12.0,
        },
        TableStyleCommand::Align {
            range: CellRange::cell(0, 0),
            align: Align::Left,
        },
        TableStyleCommand::Align {
            range: CellRange::cell(1, 0),
            align: Align::Center,
        },
        TableStyleCommand::Outline {
            range: all,
            width: 1.5,
            color: indigo(),
        },
        TableStyleCommand::Background {
            range: all,
            color: gpa_background(),
        },
        TableStyleCommand::TopPadding {
            range: all,
            padding: 10.0,
        },
        TableStyleCommand::BottomPadding {
            range: all,
            padding: 10.0,
        },
        TableStyleCommand::VAlign {
            range: all,
            valign: VAlign::Middle,
        },
    ])
}

fn footer_table(as_of: NaiveDate) -> TableBlock {
    let rows = vec![vec![
        format!("Date: {}", as_of.format("%d-%m-%Y")),
        "Controller of Examinations\n___________________".to_string(),
    ]];

    let all = CellRange::all();
    TableBlock::new(rows, inches(&[3.4, 3.4])).with_style(vec![
        TableStyleCommand::FontSize {
            range: all,
            size: 10.0,
        },
        TableStyleCommand::Align {
            range: CellRange::cell(0, 0),
            align: Align::Left,
        },
        TableStyleCommand::Align {
            range: CellRange::cell(1, 0),
            align: Align::Right,
        },
        TableStyleCommand::TopPadding {
            range: all,
            padding: 10.0,
        },
    ])
}

/// Validate (when strict) and prepare the renderer and story
fn prepare(
    request: &MarksheetRequest,
    options: &RenderOptions,
) -> Result<(StoryRenderer, Vec<Block>)> {
    if options.validation == ValidationMode::Strict {
        let issues = validate_request(request, &GradeScale::standard());
        if !issues.is_empty() {
            return Err(MarksheetError::Validation(issues));
        }
    }

    let renderer = StoryRenderer::new(page_template())
        .with_title(&format!(
            "Provisional Marksheet - {}",
            request.identity.roll_number
        ))
        .with_compression(options.compress);

    Ok((renderer, build_story(request, options.as_of)))
}

/// Render the marksheet to `request.output_path`
///
/// Returns the output path unchanged. Failures are logged and returned; no
/// file is left behind when rendering fails before the write.
pub fn render(request: &MarksheetRequest, options: &RenderOptions) -> Result<PathBuf> {
    let result = prepare(request, options).and_then(|(renderer, story)| {
        renderer
            .build_to_file(&story, &request.output_path)
            .map_err(MarksheetError::from)
    });

    match result {
        Ok(()) => {
            info!(
                path = %request.output_path.display(),
                roll_number = %request.identity.roll_number,
                "marksheet generated"
            );
            Ok(request.output_path.clone())
        }
        Err(e) => {
            error!(
                path = %request.output_path.display(),
                error = %e,
                "failed to generate marksheet"
            );
            Err(e)
        }
    }
}

/// Render the marksheet to PDF bytes without touching the filesystem
pub fn render_to_bytes(request: &MarksheetRequest, options: &RenderOptions) -> Result<Vec<u8>> {
    let (renderer, story) = prepare(request, options)?;
    Ok(renderer.build_to_bytes(&story)?)
}
