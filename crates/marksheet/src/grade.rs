//! Grade scale and request validation

use crate::request::MarksheetRequest;
use thiserror::Error;

/// One band of the grade scale, inclusive at both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeBand {
    pub grade: &'static str,
    pub min: i64,
    pub max: i64,
}

impl GradeBand {
    /// Legend label, e.g. `A(90-100)`; the bottom band reads `F(Below 50)`
    pub fn label(&self) -> String {
        if self.min <= MIN_MARK {
            format!("{}(Below {})", self.grade, self.max + 1)
        } else {
            format!("{}({}-{})", self.grade, self.min, self.max)
        }
    }

    fn contains(&self, mark: i64) -> bool {
        (self.min..=self.max).contains(&mark)
    }
}

/// Lowest and highest marks a subject can carry
pub const MIN_MARK: i64 = 0;
pub const MAX_MARK: i64 = 100;

/// Highest GPA on the ten-point scale
pub const MAX_GPA: f64 = 10.0;

const STANDARD_BANDS: [GradeBand; 6] = [
    GradeBand { grade: "A", min: 90, max: MAX_MARK },
    GradeBand { grade: "B", min: 80, max: 89 },
    GradeBand { grade: "C", min: 70, max: 79 },
    GradeBand { grade: "D", min: 60, max: 69 },
    GradeBand { grade: "E", min: 50, max: 59 },
    GradeBand { grade: "F", min: MIN_MARK, max: 49 },
];

/// The printed grade scale
///
/// The marksheet shows it as a static legend; it is only consulted for
/// marks when [`ValidationMode::Strict`] is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeScale {
    bands: &'static [GradeBand],
}

impl GradeScale {
    /// A-F on a hundred-point scale
    pub fn standard() -> Self {
        Self {
            bands: &STANDARD_BANDS,
        }
    }

    pub fn bands(&self) -> &'static [GradeBand] {
        self.bands
    }

    /// Grade letter for a mark, or `None` when the mark is off the scale
    pub fn grade_for_mark(&self, mark: i64) -> Option<&'static str> {
        self.bands
            .iter()
            .find(|band| band.contains(mark))
            .map(|band| band.grade)
    }

    /// The legend line printed under the GPA summary
    pub fn legend_text(&self) -> String {
        let bands: Vec<String> = self.bands.iter().map(GradeBand::label).collect();
        format!("Grade Scale: {}", bands.join(" | "))
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        Self::standard()
    }
}

/// How much checking to do before rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Render whatever the caller supplied
    #[default]
    Permissive,
    /// Reject out-of-range marks and GPA, and grades that disagree with the scale
    Strict,
}

/// A problem found by [`validate_request`]
///
/// Subjects are numbered from 1, matching the S.No column.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("subject {subject} mark {mark} is outside 0-100")]
    MarkOutOfRange { subject: usize, mark: i64 },

    #[error("subject {subject} grade {grade:?} does not match mark {mark} (expected {expected})")]
    GradeMismatch {
        subject: usize,
        mark: i64,
        grade: String,
        expected: &'static str,
    },

    #[error("GPA {gpa} is outside 0-10")]
    GpaOutOfRange { gpa: f64 },
}

/// Check marks, grades and GPA against the scale
///
/// Grades are compared case-insensitively after trimming. A mark that is off
/// the scale only reports [`ValidationIssue::MarkOutOfRange`].
pub fn validate_request(request: &MarksheetRequest, scale: &GradeScale) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (index, subject) in request.subjects.iter().enumerate() {
        let number = index + 1;

        if !(MIN_MARK..=MAX_MARK).contains(&subject.mark) {
            issues.push(ValidationIssue::MarkOutOfRange {
                subject: number,
                mark: subject.mark,
            });
            continue;
        }

        if let Some(expected) = scale.grade_for_mark(subject.mark) {
            if !subject.grade.trim().eq_ignore_ascii_case(expected) {
                issues.push(ValidationIssue::GradeMismatch {
                    subject: number,
                    mark: subject.mark,
                    grade: subject.grade.clone(),
                    expected,
                });
            }
        }
    }

    if !(0.0..=MAX_GPA).contains(&request.gpa) {
        issues.push(ValidationIssue::GpaOutOfRange { gpa: request.gpa });
    }

    issues
}
