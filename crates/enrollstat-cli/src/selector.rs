use std::io::{self, BufRead, Write};

use enrollstat_core::{School, SchoolDirectory};

pub const PROMPT: &str = "Please enter the high school name or school code: ";
pub const INVALID_SELECTION: &str = "You must enter a valid school name or code.";

/// Prompt until the input names a known school.
///
/// Invalid input is reported and the prompt repeats. A closed input stream
/// ends the loop with `UnexpectedEof`.
pub fn prompt_for_school<'a, R, W>(
    directory: &'a SchoolDirectory,
    input: &mut R,
    output: &mut W,
) -> io::Result<&'a School>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a school was selected",
            ));
        }

        match directory.resolve(&line) {
            Ok(school) => {
                tracing::info!(event = "school_selected", code = %school.code);
                return Ok(school);
            }
            Err(err) => {
                tracing::debug!(event = "selection_rejected", reason = %err);
                writeln!(output, "{INVALID_SELECTION}")?;
            }
        }
    }
}
