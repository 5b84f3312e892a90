use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

/// The literal answer that backs out of the current operation at cancel-aware prompts.
pub const CANCEL_TOKEN: &str = "cancel";

/// Answer to a cancel-aware prompt.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Input {
    Cancelled,
    Value(String),
}

/// Console streams used by the text interface.  Generic so that sessions can be scripted from
/// in-memory buffers.
pub struct TextIO<R, W> {
    input: R,
    output: W,
}

impl TextIO<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        TextIO::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TextIO<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TextIO { input, output }
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Print `prompt` and read one line of input without its line terminator; other whitespace
    /// is kept, so "cancel " is not the cancel token.  End of input is an UnexpectedEof
    /// error so that callers never spin on a closed stream.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut io_buffer = String::new();
        if self.input.read_line(&mut io_buffer)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }

        let line = io_buffer.strip_suffix('\n').unwrap_or(io_buffer.as_str());
        let line = line.strip_suffix('\r').unwrap_or(line);

        Ok(String::from(line))
    }

    pub fn ask(&mut self, prompt: &str) -> io::Result<Input> {
        let answer = self.read_line(prompt)?;

        if answer == CANCEL_TOKEN {
            Ok(Input::Cancelled)
        } else {
            Ok(Input::Value(answer))
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(input: &str) -> TextIO<Cursor<Vec<u8>>, Vec<u8>> {
        TextIO::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn read_line_prints_prompt_and_drops_only_the_terminator() {
        let mut io = scripted("  Alice  \r\nBob\nlast");

        assert_eq!(io.read_line("Name: ").unwrap(), "  Alice  ");
        assert_eq!(io.read_line("").unwrap(), "Bob");
        assert_eq!(io.read_line("").unwrap(), "last");
        assert_eq!(io.output(), b"Name: ");
    }

    #[test]
    fn ask_maps_cancel_token() {
        let mut io = scripted("cancel\nCancel\ncancel \nBob\n");

        assert_eq!(io.ask("? ").unwrap(), Input::Cancelled);
        assert_eq!(io.ask("? ").unwrap(), Input::Value(String::from("Cancel")));
        assert_eq!(io.ask("? ").unwrap(), Input::Value(String::from("cancel ")));
        assert_eq!(io.ask("? ").unwrap(), Input::Value(String::from("Bob")));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut io = scripted("");

        let err = io.read_line("? ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
