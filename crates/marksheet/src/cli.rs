//! Positional argument handling for the `marksheet` binary

use crate::request::{MarksheetRequest, StudentIdentity, SUBJECT_COUNT};
use crate::{MarksheetError, Result};

/// Positional arguments required to render a marksheet
pub const EXPECTED_ARGS: usize = 24;

/// Arguments per subject: name, mark, grade
const SUBJECT_FIELDS: usize = 3;

/// What the binary was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// No arguments: render the built-in example
    Demo,
    /// Render the supplied request
    Render(Box<MarksheetRequest>),
}

/// Interpret the positional arguments (program name excluded)
///
/// Argument order: name, roll number, date of birth, semester, year,
/// department, five `subject mark grade` triples, GPA, institution name,
/// output path.
pub fn parse_invocation(args: &[String]) -> Result<Invocation> {
    if args.is_empty() {
        return Ok(Invocation::Demo);
    }
    if args.len() != EXPECTED_ARGS {
        return Err(MarksheetError::Usage { got: args.len() });
    }

    let identity = StudentIdentity::new(&args[0], &args[1], &args[2], &args[3], &args[4], &args[5]);
    let mut builder = MarksheetRequest::builder().identity(identity);

    let subject_args = &args[6..6 + SUBJECT_COUNT * SUBJECT_FIELDS];
    for (index, triple) in subject_args.chunks(SUBJECT_FIELDS).enumerate() {
        let mark = parse_field::<i64>(&format!("mark{}", index + 1), &triple[1])?;
        builder = builder.subject(&triple[0], mark, &triple[2]);
    }

    let request = builder
        .gpa(parse_field::<f64>("gpa", &args[21])?)
        .institution_name(&args[22])
        .output_path(&args[23])
        .build()?;

    Ok(Invocation::Render(Box::new(request)))
}

fn parse_field<T: std::str::FromStr>(field: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| MarksheetError::ArgumentParse {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// The two lines printed when the argument count is wrong
pub fn usage_lines(got: usize) -> [String; 2] {
    [
        format!("Error: Expected {EXPECTED_ARGS} arguments, got {got}"),
        "Usage: marksheet <name> <roll_number> <dob> <semester> <year> <department> \
         <subject1> <mark1> <grade1> ... <gpa> <institution_name> <output_path>"
            .to_string(),
    ]
}
