//! Interactive command modes (auto-send and manual coupon send)

pub mod auto;
pub mod manual;

use std::io::{self, BufRead, Write};

/// Print a question and read one trimmed line from the reader.
/// EOF yields an empty string, which callers treat as an abort/decline.
pub fn prompt_line<R: BufRead>(reader: &mut R, question: &str) -> io::Result<String> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut input = String::new();
    reader.read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// A yes/no confirmation: only "y"/"Y" counts as yes.
pub(crate) fn confirmed(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
