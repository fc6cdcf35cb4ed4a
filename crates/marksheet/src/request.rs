//! Marksheet request model

use crate::{MarksheetError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Number of subject rows on a marksheet
pub const SUBJECT_COUNT: usize = 5;

/// Output file written in demo mode (relative to the working directory)
pub const DEMO_OUTPUT: &str = "test_marksheet.pdf";

/// Student identity block; every field is free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentIdentity {
    pub name: String,
    pub roll_number: String,
    pub date_of_birth: String,
    pub semester: String,
    pub year: String,
    pub department: String,
}

impl StudentIdentity {
    pub fn new(
        name: &str,
        roll_number: &str,
        date_of_birth: &str,
        semester: &str,
        year: &str,
        department: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            roll_number: roll_number.to_string(),
            date_of_birth: date_of_birth.to_string(),
            semester: semester.to_string(),
            year: year.to_string(),
            department: department.to_string(),
        }
    }
}

/// One row of the marks table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub name: String,
    pub mark: i64,
    pub grade: String,
}

impl SubjectRecord {
    pub fn new(name: &str, mark: i64, grade: &str) -> Self {
        Self {
            name: name.to_string(),
            mark,
            grade: grade.to_string(),
        }
    }
}

/// Everything needed to render one marksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarksheetRequest {
    pub identity: StudentIdentity,
    /// Printed in order with ordinals 1 to 5
    pub subjects: [SubjectRecord; SUBJECT_COUNT],
    /// Printed with two decimals over 10.00
    pub gpa: f64,
    pub institution_name: String,
    pub output_path: PathBuf,
}

impl MarksheetRequest {
    pub fn builder() -> MarksheetRequestBuilder {
        MarksheetRequestBuilder::default()
    }

    /// Built-in example used when the binary runs without arguments
    pub fn demo() -> Self {
        Self {
            identity: StudentIdentity::new(
                "John Doe",
                "2024001",
                "01-01-2000",
                "Fall 2024",
                "2024",
                "Computer Science",
            ),
            subjects: [
                SubjectRecord::new("Mathematics", 95, "A"),
                SubjectRecord::new("Physics", 88, "B"),
                SubjectRecord::new("Chemistry", 82, "B"),
                SubjectRecord::new("English", 75, "C"),
                SubjectRecord::new("Programming", 92, "A"),
            ],
            gpa: 9.0,
            institution_name: "ABC University".to_string(),
            output_path: PathBuf::from(DEMO_OUTPUT),
        }
    }

    /// Parse a request from JSON
    ///
    /// `subjects` must hold exactly five entries.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Builder for [`MarksheetRequest`]; every field is required
#[derive(Debug, Default)]
pub struct MarksheetRequestBuilder {
    identity: Option<StudentIdentity>,
    subjects: Vec<SubjectRecord>,
    gpa: Option<f64>,
    institution_name: Option<String>,
    output_path: Option<PathBuf>,
}

impl MarksheetRequestBuilder {
    pub fn identity(mut self, identity: StudentIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Append a subject row
    pub fn subject(mut self, name: &str, mark: i64, grade: &str) -> Self {
        self.subjects.push(SubjectRecord::new(name, mark, grade));
        self
    }

    pub fn gpa(mut self, gpa: f64) -> Self {
        self.gpa = Some(gpa);
        self
    }

    pub fn institution_name(mut self, name: &str) -> Self {
        self.institution_name = Some(name.to_string());
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<MarksheetRequest> {
        let identity = self
            .identity
            .ok_or(MarksheetError::MissingField("identity"))?;
        let gpa = self.gpa.ok_or(MarksheetError::MissingField("gpa"))?;
        let institution_name = self
            .institution_name
            .ok_or(MarksheetError::MissingField("institution_name"))?;
        let output_path = self
            .output_path
            .ok_or(MarksheetError::MissingField("output_path"))?;

        let got = self.subjects.len();
        let subjects: [SubjectRecord; SUBJECT_COUNT] =
            self.subjects
                .try_into()
                .map_err(|_| MarksheetError::SubjectCount {
                    expected: SUBJECT_COUNT,
                    got,
                })?;

        Ok(MarksheetRequest {
            identity,
            subjects,
            gpa,
            institution_name,
            output_path,
        })
    }
}
