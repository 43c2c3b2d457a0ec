//! Blocking console line input.
//!
//! The input task only needs "give me the next line or tell me the stream
//! ended", so that is the whole trait. [`StdinLines`] backs the demos;
//! [`ScriptedLines`] feeds canned input to tests.

use std::collections::VecDeque;
use std::io::{self, BufRead};

/// A blocking source of console lines.
///
/// `next_line` is the only intended suspension point of its caller. `None`
/// means the stream ended and the caller should leave its loop.
pub trait LineSource: Send {
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Lines read from standard input.
pub struct StdinLines {
    stdin: io::Stdin,
}

impl StdinLines {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Default for StdinLines {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for StdinLines {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = self.stdin.lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        while line.ends_with(['\n', '\r']) {
            line.pop();
        }
        Ok(Some(line))
    }
}

/// Pre-scripted lines for tests.
pub struct ScriptedLines {
    lines: VecDeque<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedLines {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_lines_in_order_then_eof() {
        let mut lines = ScriptedLines::new(["+", "-", "x"]);
        assert_eq!(lines.next_line().unwrap(), Some("+".to_string()));
        assert_eq!(lines.next_line().unwrap(), Some("-".to_string()));
        assert_eq!(lines.next_line().unwrap(), Some("x".to_string()));
        assert_eq!(lines.next_line().unwrap(), None);
    }
}
