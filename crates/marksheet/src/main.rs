//! Marksheet CLI - render a provisional marksheet PDF
//!
//! Usage:
//!   marksheet                      Render the built-in example to test_marksheet.pdf
//!   marksheet <24 arguments>       Render the supplied marksheet
//!
//! Arguments: name roll_number dob semester year department, then five
//! `subject mark grade` triples, then gpa institution_name output_path.

use anyhow::Context;
use clap::Parser;
use marksheet::cli::{parse_invocation, usage_lines, Invocation};
use marksheet::logging::{init_logging, LoggingConfig};
use marksheet::{render, MarksheetError, MarksheetRequest, RenderOptions};

/// Every argument is a marksheet field, so clap's own `-h`/`-V` flags are off
#[derive(Parser)]
#[command(
    name = "marksheet",
    about = "Render a provisional marksheet PDF",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Marksheet fields (none for the built-in example)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    init_logging(&LoggingConfig::default());

    let cli = Cli::parse();

    let invocation = match parse_invocation(&cli.args) {
        Ok(invocation) => invocation,
        Err(MarksheetError::Usage { got }) => {
            for line in usage_lines(got) {
                println!("{line}");
            }
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("invalid marksheet arguments"),
    };

    let request = match invocation {
        Invocation::Demo => {
            println!("Running in test mode...");
            MarksheetRequest::demo()
        }
        Invocation::Render(request) => *request,
    };

    match render(&request, &RenderOptions::default()) {
        Ok(path) => {
            println!("PDF generated successfully: {}", path.display());
            Ok(())
        }
        Err(e) => {
            println!("Error generating PDF: {e}");
            Err(e).context("failed to generate marksheet")
        }
    }
}
