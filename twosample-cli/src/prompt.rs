//! Interactive acquisition of the two samples.

use std::io::{self, BufRead, Write};

use twosample_core::{Result, SamplePair, TwoSampleError};
use twosample_io::{read_table, FileSource, ManualSource, SampleSource};

/// Print `message` (without a newline) and read one line of input.
fn ask<R: BufRead + ?Sized, W: Write + ?Sized>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> Result<String> {
    write!(out, "{message}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        let eof = io::Error::new(io::ErrorKind::UnexpectedEof, "input ended before a reply");
        return Err(eof.into());
    }
    Ok(line.trim().to_string())
}

/// Ask how the data will be supplied, then collect it.
///
/// `1` reads two lines of numbers; `2` reads a CSV or Excel file, lists its
/// columns and asks which two to compare. Anything else is a
/// [`TwoSampleError::Choice`].
pub fn load_interactive<R: BufRead + ?Sized, W: Write + ?Sized>(
    input: &mut R,
    out: &mut W,
) -> Result<SamplePair> {
    writeln!(out, "Choose how to enter the data:")?;
    writeln!(out, "1 - enter manually")?;
    writeln!(out, "2 - load from a file (CSV or Excel)")?;
    let choice = ask(input, out, "Your choice (1/2): ")?;

    match choice.as_str() {
        "1" => {
            let first = ask(
                input,
                out,
                "Enter the first sample, separated by spaces or commas:\n",
            )?;
            let second = ask(
                input,
                out,
                "Enter the second sample, separated by spaces or commas:\n",
            )?;
            ManualSource::new(first, second).load()
        }
        "2" => {
            let path = ask(input, out, "Path to the file: ")?;
            let table = read_table(&path)?;
            writeln!(out, "Available columns: {}", table.columns().join(", "))?;
            let first = ask(input, out, "Column for the first sample: ")?;
            let second = ask(input, out, "Column for the second sample: ")?;
            FileSource::new(table, first, second).load()
        }
        other => Err(TwoSampleError::Choice(format!(
            "`{other}` is not an option, enter 1 or 2"
        ))),
    }
}
