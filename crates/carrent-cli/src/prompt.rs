//! Line-oriented prompting over any reader/writer pair
//!
//! End of input surfaces as `io::ErrorKind::UnexpectedEof` so menus can
//! unwind with `?` and the top level can treat it as "exit".

use std::io::{self, BufRead, Write};
use std::str::FromStr;

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Where menus write their output
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `question` and read one line, without its line ending
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string())
    }

    /// Read one menu choice: the first non-blank character of the line
    pub fn ask_choice(&mut self, question: &str) -> io::Result<Option<char>> {
        let line = self.ask(question)?;
        Ok(line.trim().chars().next())
    }

    /// Read a value, or None if the line does not parse
    pub fn ask_parsed<T: FromStr>(&mut self, question: &str) -> io::Result<Option<T>> {
        let line = self.ask(question)?;
        Ok(line.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(input: &str) -> Prompt<&[u8], Vec<u8>> {
        Prompt::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_ask_strips_line_ending() {
        let mut p = prompt("hello world\r\nnext\n");
        assert_eq!(p.ask("> ").unwrap(), "hello world");
        assert_eq!(p.ask("> ").unwrap(), "next");
        assert_eq!(String::from_utf8(p.into_output()).unwrap(), "> > ");
    }

    #[test]
    fn test_eof_is_unexpected_eof() {
        let mut p = prompt("");
        let err = p.ask("> ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_ask_choice() {
        let mut p = prompt("  3\n\n");
        assert_eq!(p.ask_choice("").unwrap(), Some('3'));
        assert_eq!(p.ask_choice("").unwrap(), None);
    }

    #[test]
    fn test_ask_parsed() {
        let mut p = prompt("42\nabc\n");
        assert_eq!(p.ask_parsed::<i64>("").unwrap(), Some(42));
        assert_eq!(p.ask_parsed::<i64>("").unwrap(), None);
    }
}
