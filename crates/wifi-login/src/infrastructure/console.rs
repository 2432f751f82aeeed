//! Console helpers for debug runs.

use std::io::{self, BufRead, Write};

pub const CLOSE_MESSAGE: &str = "Press Enter to close the console...";

/// Shows [`CLOSE_MESSAGE`] and waits for one line of input.
///
/// End of input returns immediately.
pub fn pause_for_keypress<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<()> {
    write!(output, "{CLOSE_MESSAGE}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

/// [`pause_for_keypress`] on the process console.
pub fn pause_on_console() -> io::Result<()> {
    pause_for_keypress(&mut io::stdin().lock(), &mut io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pause_shows_message_and_consumes_one_line() {
        let mut input = Cursor::new("\nleft over\n");
        let mut output = Vec::new();

        pause_for_keypress(&mut input, &mut output).expect("pause");

        assert_eq!(String::from_utf8(output).unwrap(), CLOSE_MESSAGE);
        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "left over\n");
    }

    #[test]
    fn test_pause_returns_at_end_of_input() {
        let mut output = Vec::new();
        pause_for_keypress(&mut Cursor::new(""), &mut output).expect("pause");
        assert!(!output.is_empty());
    }
}
