//! Line-based question/answer input for first-run configuration.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

/// A source of answers to interactive questions.
pub trait Prompt {
    /// Shows `message` and reads one answer, without the line terminator.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    fn ask(&mut self, message: &str) -> io::Result<Option<String>>;

    /// Shows an informational line.
    fn notify(&mut self, message: &str) -> io::Result<()>;
}

/// [`Prompt`] over any reader/writer pair.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the prompt and returns the writer, e.g. to inspect what was
    /// shown.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl ConsolePrompt<BufReader<Stdin>, Stdout> {
    /// A prompt on the process console.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for ConsolePrompt<R, W> {
    fn ask(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        Ok(Some(answer))
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_writes_message_and_strips_line_ending() {
        // Arrange
        let mut prompt = ConsolePrompt::new(Cursor::new("answer\r\n"), Vec::new());

        // Act
        let answer = prompt.ask("Question: ").expect("ask");

        // Assert
        assert_eq!(answer.as_deref(), Some("answer"));
        assert_eq!(prompt.into_output(), b"Question: ".to_vec());
    }

    #[test]
    fn test_ask_returns_none_at_end_of_input() {
        let mut prompt = ConsolePrompt::new(Cursor::new(""), Vec::new());
        assert_eq!(prompt.ask("Question: ").expect("ask"), None);
    }

    #[test]
    fn test_ask_keeps_inner_whitespace() {
        let mut prompt = ConsolePrompt::new(Cursor::new("  Dorm Guest \n"), Vec::new());
        assert_eq!(
            prompt.ask("Q").expect("ask").as_deref(),
            Some("  Dorm Guest ")
        );
    }

    #[test]
    fn test_notify_writes_a_line() {
        let mut prompt = ConsolePrompt::new(Cursor::new(""), Vec::new());
        prompt.notify("hello").expect("notify");
        assert_eq!(prompt.into_output(), b"hello\n".to_vec());
    }
}
